use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Wait up to `timeout` for a key press. Other terminal events and key
/// releases are skipped; `None` means the timeout passed.
pub fn next_key_press(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            _ => continue,
        }
    }
    Ok(None)
}
