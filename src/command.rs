use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the program to do
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Pause,
    Retry,
    Enter,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char('p' | ' ') | KeyCode::Esc) => Some(Command::Pause),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::Retry),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            _ => None,
        }
    }
}
