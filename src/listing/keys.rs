//! Fixed key bindings for listings.
//!
//! Up/`k` and Down/`j` move focus, Enter opens, Right/`l` enters,
//! Left/`h` goes back, space toggles selection of the focused item. What
//! "open", "enter", and "back" actually do is the host's business; the
//! listing only reports the outcome.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{FocusMove, Keyed, Listing, Modifiers, SelectionMode};

/// Outcome of feeding one key event to a listing.
///
/// Anything other than [`KeyAction::Ignored`] means the event was consumed
/// and should not be handled again by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key is not part of the listing's bindings; let it pass through.
    Ignored,
    /// Key was applied internally (focus move or selection toggle).
    Handled,
    /// The host should open the focused item.
    Open,
    /// The host should enter the focused item, or open it if entering is
    /// not meaningful for this listing.
    Enter,
    /// The host should navigate back, if it has somewhere to go back to.
    Back,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Modifiers {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

impl<T: Keyed> Listing<T> {
    /// Dispatch a raw key event against the fixed binding table.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyAction {
        if event.kind == KeyEventKind::Release {
            return KeyAction::Ignored;
        }
        // Letter bindings are plain vim-style keys; with ctrl or meta held
        // they belong to the host, not the listing.
        let accel = Modifiers::from(event.modifiers).accel();

        match event.code {
            KeyCode::Up => {
                self.focus_move(FocusMove::Up);
                KeyAction::Handled
            }
            KeyCode::Down => {
                self.focus_move(FocusMove::Down);
                KeyAction::Handled
            }
            KeyCode::Char('k') if !accel => {
                self.focus_move(FocusMove::Up);
                KeyAction::Handled
            }
            KeyCode::Char('j') if !accel => {
                self.focus_move(FocusMove::Down);
                KeyAction::Handled
            }
            KeyCode::Enter => KeyAction::Open,
            KeyCode::Right => KeyAction::Enter,
            KeyCode::Char('l') if !accel => KeyAction::Enter,
            KeyCode::Left => KeyAction::Back,
            KeyCode::Char('h') if !accel => KeyAction::Back,
            KeyCode::Char(' ') if self.mode() != SelectionMode::None => {
                self.toggle_selection(None, event.modifiers.into());
                KeyAction::Handled
            }
            _ => KeyAction::Ignored,
        }
    }
}
