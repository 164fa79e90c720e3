//! Event handling for the explorer
//!
//! Keys are first mapped to an [`Action`] for the focused pane, then applied
//! to the [`AppState`]. Anything that needs the terminal or the scan worker
//! comes back as an [`Effect`] for the event loop to carry out.

use super::state::{AppState, Focus, MessageLevel};
use crate::explore::{ScanOutcome, ScanRequest};
use crate::scan::{DirectoryNode, ScanError};
use crate::selection::PanelState;
use crate::tagging::{SubmitOutcome, TagAssigner};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    ToggleRow,
    ToggleAll,
    OpenDirectory,
    ParentDirectory,
    Rescan,
    PickDirectory,
    CycleSort,
    ToggleGroup,
    /// Cycle focus between the table and the panel list
    SwitchFocus,
    FocusInput,
    LeaveInput,
    InputChar(char),
    InputBackspace,
    SubmitTag,
    RemoveItem,
    ClosePanel,
    OpenPanel,
    Quit,
}

/// Work left for the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Scan(ScanRequest),
    PickDirectory,
    Quit,
}

/// Map a key to an action for the focused pane
#[must_use]
pub fn map_key(focus: Focus, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match focus {
        Focus::TagInput => match key.code {
            KeyCode::Enter => Some(Action::SubmitTag),
            KeyCode::Esc => Some(Action::LeaveInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Tab => Some(Action::SwitchFocus),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
        Focus::Panel => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Char('x') | KeyCode::Delete => Some(Action::RemoveItem),
            KeyCode::Char('t') | KeyCode::Enter => Some(Action::FocusInput),
            KeyCode::Tab | KeyCode::Esc => Some(Action::SwitchFocus),
            KeyCode::Char('g') => Some(Action::ToggleGroup),
            KeyCode::Char('c') => Some(Action::ClosePanel),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Char(' ') => Some(Action::ToggleRow),
            KeyCode::Char('a') => Some(Action::ToggleAll),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Action::OpenDirectory),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Some(Action::ParentDirectory),
            KeyCode::Char('r') => Some(Action::Rescan),
            KeyCode::Char('o') => Some(Action::PickDirectory),
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char('g') => Some(Action::ToggleGroup),
            KeyCode::Char('t') => Some(Action::FocusInput),
            KeyCode::Tab => Some(Action::SwitchFocus),
            KeyCode::Char('x') => Some(Action::RemoveItem),
            KeyCode::Char('c') => Some(Action::ClosePanel),
            KeyCode::Char('p') => Some(Action::OpenPanel),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Apply one action
pub fn handle_action<A>(state: &mut AppState, action: Action, assigner: &A) -> Effect
where
    A: TagAssigner + ?Sized,
{
    match action {
        Action::MoveUp => match state.focus {
            Focus::Panel => state.panel.cursor_up(),
            _ => state.move_up(),
        },
        Action::MoveDown => match state.focus {
            Focus::Panel => {
                let items = state.session.panel_items().len();
                state.panel.cursor_down(items);
            }
            _ => state.move_down(),
        },
        Action::ToggleRow => {
            if let Some(id) = state.current_row().map(|row| row.id.clone()) {
                state.session.toggle_row(&id);
                state.move_down();
            }
            state.sync_panel();
        }
        Action::ToggleAll => {
            state.session.toggle_all();
            state.sync_panel();
        }
        Action::OpenDirectory => {
            let id = state.current_row().map(|row| row.id.clone());
            if let Some(request) = id.and_then(|id| state.session.request_child(&id)) {
                return Effect::Scan(request);
            }
        }
        Action::ParentDirectory => match state.session.request_parent() {
            Some(request) => return Effect::Scan(request),
            None => state.push_message(MessageLevel::Info, "Already at the filesystem root"),
        },
        Action::Rescan => return Effect::Scan(state.session.request_rescan()),
        Action::PickDirectory => return Effect::PickDirectory,
        Action::CycleSort => {
            let sort = state.session.cycle_sort();
            let label = sort.column.map_or_else(
                || "scan order".to_string(),
                |column| format!("{} {}", column.label(), sort.indicator(column)),
            );
            state.push_message(MessageLevel::Info, format!("Sorted by {label}"));
        }
        Action::ToggleGroup => toggle_group(state),
        Action::SwitchFocus => {
            state.focus = match state.focus {
                Focus::Table if state.session.selection().is_panel_visible() => Focus::Panel,
                _ => Focus::Table,
            };
        }
        Action::FocusInput => {
            if state.session.selection().is_panel_visible() {
                state.focus = Focus::TagInput;
            } else {
                state.push_message(MessageLevel::Warning, "Select rows to tag first");
            }
        }
        Action::LeaveInput => state.focus = Focus::Panel,
        Action::InputChar(c) => state.panel.push(c),
        Action::InputBackspace => state.panel.pop(),
        Action::SubmitTag => submit_tag(state, assigner),
        Action::RemoveItem => {
            let items = state.session.panel_items();
            if let Some(item) = items.get(state.panel.cursor()) {
                state.session.remove_item(&item.absolute_path);
            }
            state.sync_panel();
        }
        Action::ClosePanel => {
            state.session.close_panel();
            state.sync_panel();
        }
        Action::OpenPanel => {
            state.session.open_panel();
            state.sync_panel();
        }
        Action::Quit => {
            state.should_exit = true;
            return Effect::Quit;
        }
    }

    Effect::None
}

fn toggle_group(state: &mut AppState) {
    if state.session.toggle_aggregate_mode() {
        let message = match state.session.panel_state() {
            PanelState::OpenAggregate => "Tagging the directory as a group",
            _ => "Tagging items individually",
        };
        state.push_message(MessageLevel::Info, message);
        state.sync_panel();
    } else {
        state.push_message(MessageLevel::Warning, "Select every row to tag as a group");
    }
}

fn submit_tag<A>(state: &mut AppState, assigner: &A)
where
    A: TagAssigner + ?Sized,
{
    let items = state.session.panel_items();

    match state.panel.submit(assigner, &items) {
        SubmitOutcome::Assigned { tag, count } => {
            let paths = state.session.tag_targets();
            state.session.record_assigned_tag(&tag, &paths);
            state.push_message(MessageLevel::Success, format!("Tagged {count} item(s) with \"{tag}\""));
        }
        SubmitOutcome::EmptyTag => state.push_message(MessageLevel::Warning, "Tag name is empty"),
        SubmitOutcome::NoItems => state.push_message(MessageLevel::Warning, "No items selected"),
        SubmitOutcome::Failed(message) => {
            state.push_message(MessageLevel::Error, format!("Failed to assign tag: {message}"));
        }
    }
}

/// Feed a finished scan into the state
pub fn apply_scan_result(
    state: &mut AppState,
    id: crate::explore::ScanRequestId,
    result: Result<DirectoryNode, ScanError>,
) {
    match state.session.complete(id, result) {
        ScanOutcome::Applied => state.reset_cursor(),
        ScanOutcome::Failed(message) => {
            state.reset_cursor();
            state.push_message(MessageLevel::Error, message);
        }
        ScanOutcome::Stale => {}
    }
}
