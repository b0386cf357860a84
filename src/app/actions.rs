//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij directly. It returns `Action`s and the
//! plugin shim in `main.rs` performs them in order.

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hide the plugin pane.
    CloseFocus,

    /// Send a request to the font worker.
    PostToWorker(WorkerMessage),

    /// Arm a one-shot timer; it comes back as `Event::Timer`.
    ScheduleTimer {
        seconds: f64,
    },

    /// Put `text` on the system clipboard. `label` names the font in the
    /// status line once the copy command reports back.
    CopyToClipboard {
        label: String,
        text: String,
    },
}
