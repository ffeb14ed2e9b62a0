//! Crash logging.
//!
//! The terminal surface runs in raw mode on the alternate screen, where a
//! panic message printed to stderr is lost when the screen is torn down.
//! The hook installed here writes the panic through the `log` facade first
//! (which lands in `--log-file` in terminal mode) and then chains to the
//! previously installed hook.

use std::panic::{self, PanicHookInfo};

/// Best-effort extraction of the panic payload as text.
pub fn panic_reason<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    if let Some(msg) = info.payload().downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = info.payload().downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

/// Install a panic hook that logs the panic before the previous hook runs.
///
/// Call once during init, before the terminal surface is created, so the
/// surface's own restore hook wraps this one and the terminal is back in
/// cooked mode by the time the default hook prints.
pub fn install_panic_handler() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".into());
        log::error!("PANIC at {}: {}", location, panic_reason(info));
        previous(info);
    }));
}

