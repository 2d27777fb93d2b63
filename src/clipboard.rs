//! System clipboard wrapper
//!
//! Uses arboard when a system clipboard is reachable. Text copied inside the
//! editor is also kept locally, so cut/paste still works over SSH or on a
//! bare console.

use arboard::Clipboard;
use parking_lot::Mutex;
use std::sync::OnceLock;

struct ClipboardState {
    system: Option<Clipboard>,
    local: String,
}

/// Global clipboard instance (lazily initialized)
static CLIPBOARD: OnceLock<Mutex<ClipboardState>> = OnceLock::new();

fn state() -> &'static Mutex<ClipboardState> {
    CLIPBOARD.get_or_init(|| {
        let system = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::info!(error = %e, "system clipboard unavailable, using local buffer");
                None
            }
        };
        Mutex::new(ClipboardState {
            system,
            local: String::new(),
        })
    })
}

/// Initialize the clipboard (call once at startup)
pub fn init() {
    state();
}

/// Copy text to the clipboard
pub fn copy(text: &str) {
    let mut lock = state().lock();
    lock.local = text.to_string();
    if let Some(clipboard) = lock.system.as_mut() {
        if let Err(e) = clipboard.set_text(text) {
            tracing::warn!(error = %e, "clipboard write failed");
        }
    }
}

/// Text from the clipboard; falls back to the last local copy
pub fn paste() -> String {
    let mut lock = state().lock();
    let system = lock.system.as_mut().and_then(|c| c.get_text().ok());
    system.unwrap_or_else(|| lock.local.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_init() {
        init();
        // Should not panic on double init
        init();
    }

    #[test]
    fn test_copy_then_paste() {
        copy("tabpad clipboard test");
        assert_eq!(paste(), "tabpad clipboard test");
    }
}
