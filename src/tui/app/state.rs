//! State types for the TUI application

use std::time::{Duration, Instant};

/// Which filter a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Location,
    Company,
}

impl PickerKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PickerKind::Location => " Filter by Location ",
            PickerKind::Company => " Filter by Company ",
        }
    }

    /// Label of the entry that clears this filter
    #[must_use]
    pub fn any_label(self) -> &'static str {
        match self {
            PickerKind::Location => "Any location",
            PickerKind::Company => "Any company",
        }
    }
}

/// One selectable picker entry: the filter value and what to show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

/// Unified modal state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    None,
    Help,
    /// Product overview and the companies hiring on the board
    About,
    /// Typing into the search box
    Search,
    Picker {
        kind: PickerKind,
        options: Vec<PickerOption>,
        list: ListState,
    },
}

impl ModalState {
    #[must_use]
    pub fn is_editing_search(&self) -> bool {
        matches!(self, ModalState::Search)
    }
}

/// Selection and scroll position within a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_count: usize,
}

impl ListState {
    /// Start with `selected` highlighted
    pub fn at(selected: usize) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else {
            self.selected = self.selected.min(list_len - 1);
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            } else if self.visible_count > 0
                && self.selected >= self.scroll_offset + self.visible_count
            {
                self.scroll_offset = self.selected.saturating_sub(self.visible_count - 1);
            }
        }
    }

    pub fn move_up(&mut self, list_len: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            self.clamp(list_len);
        }
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 && self.selected < list_len - 1 {
            self.selected += 1;
            self.clamp(list_len);
        }
    }

    /// Scroll-to-top: first card selected, no offset
    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }
}

/// Warnings and transient notices shown in the status bar
#[derive(Debug)]
pub struct FeedbackState {
    notice: Option<(String, Instant)>,
    notice_duration: Duration,
    pub config_warnings: Vec<String>,
}

impl FeedbackState {
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self {
            notice: None,
            notice_duration: Duration::from_secs(3),
            config_warnings,
        }
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some((msg.into(), Instant::now()));
    }

    /// Current notice, if it has not expired
    #[must_use]
    pub fn current_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, at)| at.elapsed() < self.notice_duration)
            .map(|(msg, _)| msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::default();
        list.move_up(5);
        assert_eq!(list.selected, 0);

        list.move_down(5);
        list.move_down(5);
        assert_eq!(list.selected, 2);

        for _ in 0..10 {
            list.move_down(5);
        }
        assert_eq!(list.selected, 4);
    }

    #[test]
    fn test_list_state_clamp_shrinks_selection() {
        let mut list = ListState::at(5);
        list.clamp(3);
        assert_eq!(list.selected, 2);

        list.clamp(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_state_scrolls_with_selection() {
        let mut list = ListState {
            visible_count: 3,
            ..ListState::default()
        };
        for _ in 0..4 {
            list.move_down(10);
        }
        assert_eq!(list.selected, 4);
        assert_eq!(list.scroll_offset, 2);

        list.move_to_top();
        assert_eq!((list.selected, list.scroll_offset), (0, 0));
    }

    #[test]
    fn test_feedback_notice() {
        let mut feedback = FeedbackState::new(vec![]);
        assert!(feedback.current_notice().is_none());
        feedback.set_notice("Companies are still loading");
        assert_eq!(feedback.current_notice(), Some("Companies are still loading"));
    }
}
