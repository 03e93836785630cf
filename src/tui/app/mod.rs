//! Application state and core logic for the TUI
//!
//! TEA-inspired: one mutable `App`, updated by `handle_input` and
//! `handle_data`, rendered by `ui::render`. The listing controller holds the
//! filter/page/fetch state; the App adds the terminal-only concerns (search
//! box text, pickers, card selection, spinner).

mod state;

pub use state::{FeedbackState, ListState, ModalState, PickerKind, PickerOption};

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::listing::{Debouncer, ListingController, ListingEvent};
use crate::models::{BoardConfig, location_options};
use crate::session::SessionProfile;
use crate::tui::event::{DataEvent, EventResult, InputEvent, InputMode, KeyAction};

/// Main application state
pub struct App {
    // Lifecycle
    pub running: bool,

    pub listing: ListingController,
    pub profile: SessionProfile,

    pub modal: ModalState,

    /// Text shown in the search box (the applied query lags behind by the debounce window)
    pub search_input: String,

    /// Selected card on the current page
    pub cards: ListState,

    pub spinner_frame: usize,

    pub feedback: FeedbackState,

    pub config: BoardConfig,

    search: Debouncer<String>,
}

impl App {
    /// Create the App. Spawns the search debouncer, so this must run inside
    /// a tokio runtime.
    pub fn new(
        config: BoardConfig,
        config_warnings: Vec<String>,
        profile: SessionProfile,
        ready: watch::Receiver<bool>,
        data_tx: mpsc::Sender<DataEvent>,
        cancel: &CancellationToken,
    ) -> Self {
        let search = Debouncer::spawn(
            Duration::from_millis(config.listing.debounce_ms),
            data_tx,
            |text: String| DataEvent::from(ListingEvent::SearchSettled(text)),
            cancel,
        );

        Self {
            running: true,
            listing: ListingController::new(config.listing.items_per_page, ready),
            profile,
            modal: ModalState::None,
            search_input: String::new(),
            cards: ListState::default(),
            spinner_frame: 0,
            feedback: FeedbackState::new(config_warnings),
            config,
            search,
        }
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let mode = if self.modal.is_editing_search() {
                    InputMode::Text
                } else {
                    InputMode::Normal
                };
                let action = KeyAction::from_key_event(key_event, mode);
                self.handle_action(action)
            }
            InputEvent::Resize => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        let closes_on_quit = matches!(self.modal, ModalState::Help | ModalState::About);
        if action == KeyAction::Quit && !closes_on_quit {
            self.running = false;
            return EventResult::Quit;
        }

        match &self.modal {
            ModalState::Help => {
                return match action {
                    KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                        self.modal = ModalState::None;
                        EventResult::Continue
                    }
                    _ => EventResult::Unchanged,
                };
            }
            ModalState::About => {
                return match action {
                    KeyAction::Escape
                    | KeyAction::ShowAbout
                    | KeyAction::Quit
                    | KeyAction::Select => {
                        self.modal = ModalState::None;
                        EventResult::Continue
                    }
                    _ => EventResult::Unchanged,
                };
            }
            ModalState::Search => return self.handle_search_action(action),
            ModalState::Picker { .. } => return self.handle_picker_action(action),
            ModalState::None => {}
        }

        match action {
            KeyAction::MoveUp => {
                self.cards.move_up(self.listing.page_items().len());
                EventResult::Continue
            }
            KeyAction::MoveDown => {
                self.cards.move_down(self.listing.page_items().len());
                EventResult::Continue
            }

            KeyAction::PrevPage => {
                let moved = self.listing.prev_page();
                self.after_page_change(moved)
            }
            KeyAction::NextPage => {
                let moved = self.listing.next_page();
                self.after_page_change(moved)
            }
            KeyAction::JumpToPage(n) => {
                let moved = self.listing.go_to_page(n);
                self.after_page_change(moved)
            }

            KeyAction::EditSearch => {
                self.modal = ModalState::Search;
                EventResult::Continue
            }
            KeyAction::OpenLocationPicker => {
                self.open_picker(PickerKind::Location);
                EventResult::Continue
            }
            KeyAction::OpenCompanyPicker => {
                self.open_picker(PickerKind::Company);
                EventResult::Continue
            }
            KeyAction::ClearFilters => {
                self.clear_filters();
                EventResult::Continue
            }
            KeyAction::Retry => {
                self.listing.retry();
                EventResult::Continue
            }

            KeyAction::ShowHelp => {
                self.modal = ModalState::Help;
                EventResult::Continue
            }
            KeyAction::ShowAbout => {
                self.modal = ModalState::About;
                EventResult::Continue
            }

            _ => EventResult::Unchanged,
        }
    }

    fn after_page_change(&mut self, moved: bool) -> EventResult {
        if !moved {
            return EventResult::Unchanged;
        }
        if self.listing.take_scroll_to_top() {
            self.cards.move_to_top();
        }
        EventResult::Continue
    }

    fn handle_search_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Select => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::InputChar(c) => {
                self.search_input.push(c);
                self.search.push(self.search_input.clone());
                EventResult::Continue
            }
            KeyAction::InputBackspace => {
                if self.search_input.pop().is_some() {
                    self.search.push(self.search_input.clone());
                }
                EventResult::Continue
            }
            KeyAction::InputClear => {
                if !self.search_input.is_empty() {
                    self.search_input.clear();
                    self.search.push(String::new());
                }
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    fn handle_picker_action(&mut self, action: KeyAction) -> EventResult {
        let ModalState::Picker {
            kind,
            options,
            list,
        } = &mut self.modal
        else {
            return EventResult::Unchanged;
        };

        match action {
            KeyAction::MoveUp => {
                list.move_up(options.len());
                EventResult::Continue
            }
            KeyAction::MoveDown => {
                list.move_down(options.len());
                EventResult::Continue
            }
            KeyAction::Select => {
                let kind = *kind;
                let value = options
                    .get(list.selected)
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
                self.modal = ModalState::None;
                match kind {
                    PickerKind::Location => self.listing.set_location(&value),
                    PickerKind::Company => self.listing.set_company(&value),
                };
                self.cards.move_to_top();
                EventResult::Continue
            }
            KeyAction::Escape => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Entries for a picker, "any" first, with the current value preselected
    #[must_use]
    pub fn picker_options(&self, kind: PickerKind) -> Option<(Vec<PickerOption>, usize)> {
        let any = PickerOption {
            value: String::new(),
            label: kind.any_label().to_string(),
        };
        let filters = self.listing.filters();

        let (mut options, current) = match kind {
            PickerKind::Location => {
                let options: Vec<PickerOption> = location_options(&self.config.display.locations)
                    .into_iter()
                    .map(|name| PickerOption {
                        value: name.clone(),
                        label: name,
                    })
                    .collect();
                (options, filters.location)
            }
            PickerKind::Company => {
                let companies = self.listing.company_options()?;
                let options: Vec<PickerOption> = companies
                    .iter()
                    .map(|c| PickerOption {
                        value: c.id.clone(),
                        label: c.name.clone(),
                    })
                    .collect();
                (options, filters.company_id)
            }
        };

        options.insert(0, any);
        let selected = options
            .iter()
            .position(|o| o.value == current)
            .unwrap_or(0);
        Some((options, selected))
    }

    fn open_picker(&mut self, kind: PickerKind) {
        match self.picker_options(kind) {
            Some((options, selected)) => {
                self.modal = ModalState::Picker {
                    kind,
                    options,
                    list: ListState::at(selected),
                };
            }
            None => self.feedback.set_notice("Loading companies..."),
        }
    }

    fn clear_filters(&mut self) {
        self.listing.clear_all();
        // Supersede any search text still inside the debounce window
        if !self.search_input.is_empty() {
            self.search_input.clear();
            self.search.push(String::new());
        }
        self.cards.move_to_top();
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::Listing(event) => {
                if !self.listing.apply(event) {
                    return EventResult::Unchanged;
                }
                if self.listing.take_scroll_to_top() {
                    self.cards.move_to_top();
                }
                self.cards.clamp(self.listing.page_items().len());
                EventResult::Continue
            }
            DataEvent::SpinnerTick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                let settled = self.listing.settle();
                if settled || self.is_busy() {
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
        }
    }

    /// Whether anything on screen is animating
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.listing.is_ready()
            || self.listing.jobs().is_loading()
            || self.listing.companies().is_loading()
            || self.listing.display_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FetchError, ListingView};
    use crate::models::{Company, Job};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn job(n: usize) -> Job {
        Job {
            id: n.to_string(),
            title: format!("Job {}", n),
            company_id: "c1".to_string(),
            location: "Goa".to_string(),
            description: String::new(),
            requirements: String::new(),
            is_open: true,
            saved: false,
            posted_at: None,
        }
    }

    fn make_app() -> (App, mpsc::Receiver<DataEvent>, CancellationToken) {
        let (_ready_tx, ready_rx) = watch::channel(true);
        let (data_tx, data_rx) = mpsc::channel(32);
        let cancel = CancellationToken::new();
        let app = App::new(
            BoardConfig::default(),
            Vec::new(),
            SessionProfile::default(),
            ready_rx,
            data_tx,
            &cancel,
        );
        (app, data_rx, cancel)
    }

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        app.handle_input(InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn load_jobs(app: &mut App, count: usize) {
        let seq = app.listing.jobs().latest_seq() + 1;
        app.handle_data(ListingEvent::JobsRequested { seq }.into());
        app.handle_data(
            ListingEvent::JobsLoaded {
                seq,
                result: Ok((1..=count).map(job).collect()),
            }
            .into(),
        );
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut app, _rx, _cancel) = make_app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), EventResult::Quit);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_about_overlay_opens_and_closes() {
        let (mut app, _rx, _cancel) = make_app();
        assert_eq!(press(&mut app, KeyCode::Char('a')), EventResult::Continue);
        assert_eq!(app.modal, ModalState::About);

        // q closes the overlay instead of quitting
        assert_eq!(press(&mut app, KeyCode::Char('q')), EventResult::Continue);
        assert_eq!(app.modal, ModalState::None);
        assert!(app.running);
    }

    #[tokio::test]
    async fn test_resize_requests_redraw() {
        let (mut app, _rx, _cancel) = make_app();
        assert_eq!(app.handle_input(InputEvent::Resize), EventResult::Continue);
    }

    #[tokio::test]
    async fn test_page_keys_reset_card_selection() {
        let (mut app, _rx, _cancel) = make_app();
        load_jobs(&mut app, 14);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cards.selected, 2);

        assert_eq!(press(&mut app, KeyCode::Right), EventResult::Continue);
        assert_eq!(app.listing.pages().current_page(), 2);
        assert_eq!(app.cards.selected, 0);
        assert!(app.listing.display_loading());

        assert_eq!(press(&mut app, KeyCode::Char('9')), EventResult::Unchanged);
        assert_eq!(app.listing.pages().current_page(), 2);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.listing.page_items().len(), 2);
    }

    #[tokio::test]
    async fn test_spinner_tick_settles_page_change() {
        let (mut app, _rx, _cancel) = make_app();
        load_jobs(&mut app, 14);
        press(&mut app, KeyCode::Right);

        assert_eq!(app.handle_data(DataEvent::SpinnerTick), EventResult::Continue);
        assert!(!app.listing.display_loading());
        assert_eq!(app.handle_data(DataEvent::SpinnerTick), EventResult::Unchanged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_typing_is_debounced() {
        let (mut app, mut rx, _cancel) = make_app();

        press(&mut app, KeyCode::Char('/'));
        assert!(app.modal.is_editing_search());
        for c in "dev".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.search_input, "dev");
        // Not applied until the window elapses
        assert_eq!(app.listing.filters().search_query, "");

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            &event,
            DataEvent::Listing(ListingEvent::SearchSettled(text)) if text == "dev"
        ));
        app.handle_data(event);
        assert_eq!(app.listing.filters().search_query, "dev");
    }

    #[tokio::test]
    async fn test_location_picker_sets_filter() {
        let (mut app, _rx, _cancel) = make_app();
        load_jobs(&mut app, 14);
        press(&mut app, KeyCode::Right);

        press(&mut app, KeyCode::Char('L'));
        let ModalState::Picker { options, list, .. } = &app.modal else {
            panic!("picker not open");
        };
        assert_eq!(options[0].label, "Any location");
        assert_eq!(list.selected, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modal, ModalState::None);
        assert!(!app.listing.filters().location.is_empty());
        assert_eq!(app.listing.pages().current_page(), 1);
    }

    #[tokio::test]
    async fn test_company_picker_waits_for_companies() {
        let (mut app, _rx, _cancel) = make_app();
        app.handle_data(ListingEvent::CompaniesRequested { seq: 1 }.into());

        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.modal, ModalState::None);
        assert_eq!(app.feedback.current_notice(), Some("Loading companies..."));

        app.handle_data(
            ListingEvent::CompaniesLoaded {
                seq: 1,
                result: Ok(vec![Company {
                    id: "c7".to_string(),
                    name: "Initech".to_string(),
                    logo_url: None,
                }]),
            }
            .into(),
        );
        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.listing.filters().company_id, "c7");
    }

    #[tokio::test]
    async fn test_clear_filters_resets_search_box() {
        let (mut app, _rx, _cancel) = make_app();
        app.search_input = "rust".to_string();
        app.listing.set_search("rust");
        app.listing.set_location("Goa");

        press(&mut app, KeyCode::Char('x'));
        assert!(app.search_input.is_empty());
        assert!(app.listing.filters().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_change_survives_settle_after_clear() {
        let (mut app, mut rx, _cancel) = make_app();
        app.search_input = "rust".to_string();
        app.listing.set_search("rust");

        press(&mut app, KeyCode::Char('x'));
        load_jobs(&mut app, 14);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.listing.pages().current_page(), 2);

        // The cleared search box settles after the page change
        let event = rx.recv().await.unwrap();
        assert!(matches!(
            &event,
            DataEvent::Listing(ListingEvent::SearchSettled(text)) if text.is_empty()
        ));
        app.handle_data(event);
        assert_eq!(app.listing.pages().current_page(), 2);
    }

    #[tokio::test]
    async fn test_page_keys_work_in_error_view() {
        let (mut app, _rx, _cancel) = make_app();
        load_jobs(&mut app, 14);
        app.handle_data(ListingEvent::JobsRequested { seq: 2 }.into());
        app.handle_data(
            ListingEvent::JobsLoaded {
                seq: 2,
                result: Err(FetchError::Backend("down".to_string())),
            }
            .into(),
        );
        assert!(matches!(app.listing.view(), ListingView::Failed(_)));

        assert_eq!(press(&mut app, KeyCode::Right), EventResult::Continue);
        assert_eq!(app.listing.pages().current_page(), 2);
        assert_eq!(press(&mut app, KeyCode::Left), EventResult::Continue);
        assert_eq!(app.listing.pages().current_page(), 1);
    }

    #[tokio::test]
    async fn test_error_keeps_controls_usable() {
        let (mut app, _rx, _cancel) = make_app();
        app.handle_data(ListingEvent::JobsRequested { seq: 1 }.into());
        app.handle_data(
            ListingEvent::JobsLoaded {
                seq: 1,
                result: Err(FetchError::Backend("down".to_string())),
            }
            .into(),
        );

        let mut filters = app.listing.subscribe_filters();
        assert_eq!(press(&mut app, KeyCode::Char('r')), EventResult::Continue);
        assert!(filters.has_changed().unwrap(), "retry republishes the filters");
    }
}
