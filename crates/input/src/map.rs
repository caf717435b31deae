//! Key and mouse mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
///
/// The same actions drive menus: the cursor keys scroll, confirm selects,
/// cancel goes back.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::Cursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::Cursor(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::Cursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::Cursor(Direction::Right))
        }

        // Select / move
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Confirm),
        KeyCode::Esc => Some(GameAction::Cancel),

        // Undo / redo
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::ToggleUndo)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || is_interrupt(key)
}

/// Ctrl-C. Quits even while a text field has focus.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Mouse input, in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved (or dragged) to `(column, row)`.
    Moved { column: u16, row: u16 },
    /// Left click: confirm at `(column, row)`.
    Primary { column: u16, row: u16 },
    /// Right click: cancel.
    Secondary { column: u16, row: u16 },
}

impl PointerEvent {
    pub fn position(&self) -> (u16, u16) {
        match *self {
            PointerEvent::Moved { column, row }
            | PointerEvent::Primary { column, row }
            | PointerEvent::Secondary { column, row } => (column, row),
        }
    }
}

/// Map mouse input to pointer events. Scrolling and releases are ignored.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Moved { column, row }),
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Primary { column, row }),
        MouseEventKind::Down(MouseButton::Right) => Some(PointerEvent::Secondary { column, row }),
        _ => None,
    }
}

/// Edits for a single-line text field (name entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

/// Map keyboard input to text edits. Only printable characters are inserted.
pub fn handle_text_key(key: KeyEvent) -> Option<TextEdit> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if !c.is_control() => Some(TextEdit::Insert(c)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Enter => Some(TextEdit::Submit),
        KeyCode::Esc => Some(TextEdit::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::Cursor(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::Cursor(Direction::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Cursor(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(GameAction::Cursor(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(GameAction::Cursor(Direction::Left))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameAction::Confirm)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::Confirm)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(GameAction::Cancel)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameAction::ToggleUndo)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('U'))),
            Some(GameAction::ToggleUndo)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('q'))));
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(PointerEvent::Primary { column: 3, row: 4 })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            Some(PointerEvent::Secondary { column: 1, row: 1 })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 7, 2)).map(|p| p.position()),
            Some((7, 2))
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0)),
            None
        );
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(TextEdit::Insert('q'))
        );
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Backspace)),
            Some(TextEdit::Backspace)
        );
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Enter)),
            Some(TextEdit::Submit)
        );
        assert_eq!(
            handle_text_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }
}
