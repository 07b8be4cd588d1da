//! Exit handling
//!
//! Keyboard input is polled cooperatively on the same runtime as the
//! polling engine; nothing blocks waiting for a key.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

const KEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why the session ended at the user's request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Escape, `q` or Ctrl+C pressed
    Key,
    /// SIGINT delivered to the process
    Signal,
}

/// Escape closes the dashboard; `q` and Ctrl+C do too
pub fn is_exit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

async fn wait_for_exit_key() -> io::Result<()> {
    let mut ticker = tokio::time::interval(KEY_POLL_INTERVAL);
    loop {
        ticker.tick().await;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_exit_key(&key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Resolve when the user asks to quit
pub async fn wait_for_exit() -> io::Result<ExitReason> {
    tokio::select! {
        res = wait_for_exit_key() => res.map(|_| ExitReason::Key),
        res = tokio::signal::ctrl_c() => res.map(|_| ExitReason::Signal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_escape_exits() {
        assert!(is_exit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_exit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_ctrl_c_exits() {
        assert!(is_exit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_exit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert!(!is_exit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_exit_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!is_exit_key(&key));
    }
}
