use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use neon_snake_common::games::snake::InputEvent;
use neon_snake_common::log;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    Input(InputEvent),
    Quit,
}

pub fn map_key(key: &KeyEvent) -> Option<ClientCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(ClientCommand::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => InputEvent::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => InputEvent::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => InputEvent::Right,
        KeyCode::Enter => InputEvent::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(ClientCommand::Quit),
        _ => return None,
    };
    Some(ClientCommand::Input(input))
}

/// Reads terminal key events on a blocking thread until the receiver goes away.
pub fn spawn_input_reader(command_tx: mpsc::UnboundedSender<ClientCommand>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !command_tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    log!("Failed to poll terminal events: {}", e);
                    let _ = command_tx.send(ClientCommand::Quit);
                    break;
                }
            }

            let command = match event::read() {
                Ok(Event::Key(key)) => map_key(&key),
                Ok(_) => None,
                Err(e) => {
                    log!("Failed to read terminal event: {}", e);
                    Some(ClientCommand::Quit)
                }
            };

            if let Some(command) = command
                && command_tx.send(command).is_err()
            {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_wasd_map_to_directions() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(ClientCommand::Input(InputEvent::Up)));
        assert_eq!(map_key(&press(KeyCode::Char('w'))), Some(ClientCommand::Input(InputEvent::Up)));
        assert_eq!(map_key(&press(KeyCode::Char('S'))), Some(ClientCommand::Input(InputEvent::Down)));
        assert_eq!(map_key(&press(KeyCode::Left)), Some(ClientCommand::Input(InputEvent::Left)));
        assert_eq!(map_key(&press(KeyCode::Char('d'))), Some(ClientCommand::Input(InputEvent::Right)));
    }

    #[test]
    fn test_enter_restarts_and_escape_quits() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(ClientCommand::Input(InputEvent::Restart)));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(ClientCommand::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(ClientCommand::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_but_ctrl_w_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(ClientCommand::Quit));
        assert_eq!(map_key(&ctrl_w), None);
    }

    #[test]
    fn test_releases_and_unknown_keys_are_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(map_key(&release), None);
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&press(KeyCode::Tab)), None);
    }
}
