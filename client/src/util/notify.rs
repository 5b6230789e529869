//! User-facing failure reports.
//!
//! ERROR HANDLING
//! ==============
//! Every failed operation ends here: it is logged with its cause and the user
//! gets one blocking `alert` with the boundary message. Nothing propagates
//! further.

use leptos::logging::warn;

use game::{Operation, SyncError};

/// Log `err` and show its user message.
pub fn report(op: Operation, err: &SyncError) {
    warn!("{} failed: {err}", op.describe());
    alert(&err.user_message(op));
}

/// Log a failure the user is not shown.
pub fn quiet(op: Operation, err: &SyncError) {
    warn!("{} failed (ignored): {err}", op.describe());
}

pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            warn!("could not show alert: {message}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
    }
}
