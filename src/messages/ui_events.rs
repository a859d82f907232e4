//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::routes::Route;

/// Kind of popup currently on screen (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ModalKind {
    #[default]
    None,
    Form,
    Detail,
    Confirm,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation shell
    SwitchRoute(Route),
    NextRoute,

    // List view
    SelectPrev,
    SelectNext,
    Reload,
    ViewSelected,
    AddRecord,
    EditSelected,
    DeleteSelected,
    ShowCuratorMuseums,
    AssignCurator,
    UnassignCurator,

    // Form editing
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Submit,

    // Dialogs
    ConfirmDelete,
    CloseModal,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, route: Route, modal: ModalKind, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match modal {
        ModalKind::None => handle_list_keys(key, route),
        ModalKind::Form => handle_form_keys(key),
        ModalKind::Detail => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(UiEvent::CloseModal),
            _ => None,
        },
        ModalKind::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('s') | KeyCode::Enter => Some(UiEvent::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::CloseModal),
            _ => None,
        },
    }
}

/// Handle keys while a list view has focus
fn handle_list_keys(key: KeyEvent, route: Route) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::SwitchRoute(Route::Museums)),
        KeyCode::Char('2') => Some(UiEvent::SwitchRoute(Route::Curators)),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::NextRoute),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Enter | KeyCode::Char('v') => Some(UiEvent::ViewSelected),
        KeyCode::Char('a') => Some(UiEvent::AddRecord),
        KeyCode::Char('e') => Some(UiEvent::EditSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Reload),
        KeyCode::Char('m') if route == Route::Curators => Some(UiEvent::ShowCuratorMuseums),
        KeyCode::Char('c') if route == Route::Museums => Some(UiEvent::AssignCurator),
        KeyCode::Char('u') if route == Route::Museums => Some(UiEvent::UnassignCurator),
        _ => None,
    }
}

/// Handle keys inside a form popup
fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CloseModal),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
