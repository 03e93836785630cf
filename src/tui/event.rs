//! Event types for the TUI
//!
//! Dual-channel event architecture:
//! - InputEvent: priority channel for user input (never dropped)
//! - DataEvent: listing results and spinner ticks

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::listing::ListingEvent;

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// Data and control events
#[derive(Debug)]
pub enum DataEvent {
    /// Fetch progress, fetch results and settled search input
    Listing(ListingEvent),

    /// Spinner animation tick (also the render tick that settles page changes)
    SpinnerTick,
}

impl From<ListingEvent> for DataEvent {
    fn from(event: ListingEvent) -> Self {
        DataEvent::Listing(event)
    }
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// How keys are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search box
    Text,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Card selection
    MoveUp,
    MoveDown,

    // Pagination
    PrevPage,
    NextPage,
    JumpToPage(usize),

    // Filters
    EditSearch,
    OpenLocationPicker,
    OpenCompanyPicker,
    ClearFilters,
    Retry,

    Select,
    ShowHelp,
    ShowAbout,
    Escape,
    Quit,

    // Search box editing
    InputBackspace,
    InputClear,
    InputChar(char),

    Unknown,
}

impl KeyAction {
    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, mode: InputMode) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if mode == InputMode::Text {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::Select,
                KeyCode::Backspace => KeyAction::InputBackspace,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::InputClear
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char(c) => KeyAction::InputChar(c),
                _ => KeyAction::Unknown,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,

            KeyCode::Char('h') | KeyCode::Left => KeyAction::PrevPage,
            KeyCode::Char('l') | KeyCode::Right => KeyAction::NextPage,
            KeyCode::Char(c @ '1'..='9') => {
                KeyAction::JumpToPage(c.to_digit(10).map_or(0, |d| d as usize))
            }

            KeyCode::Char('/') => KeyAction::EditSearch,
            KeyCode::Char('L') => KeyAction::OpenLocationPicker,
            KeyCode::Char('C') => KeyAction::OpenCompanyPicker,
            KeyCode::Char('x') => KeyAction::ClearFilters,
            KeyCode::Char('r') => KeyAction::Retry,

            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Char('a') => KeyAction::ShowAbout,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}
