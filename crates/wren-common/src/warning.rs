//! Deduplicated warnings for malformed input the browser tolerates.
//!
//! The tokenizer reports recoverable problems (an unterminated `<script>`,
//! a trailing `<` with no `>`) here for the terminal. Each distinct message
//! is printed to stderr once per navigation; call [`clear_warnings`] when a
//! new page starts loading. Per-document issue lists are kept by the
//! tokenizer itself, not here.

use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Messages already printed since the last [`clear_warnings`].
static WARNED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Warn about tolerated malformed input (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("HTML", "unterminated <script> element");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let mut warned = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if warned.contains(&key) {
        return;
    }

    eprintln!("{}", format!("[Wren {component}] warning: {message}").yellow());
    log::warn!("{key}");
    warned.push(key);
}

/// Forget all recorded warnings (call when loading a new page).
pub fn clear_warnings() {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}
