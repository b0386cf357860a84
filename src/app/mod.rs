//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the catalog, render and
//! worker layers. Nothing in here calls Zellij; side effects leave as
//! [`Action`]s.
//!
//! # Architecture
//!
//! ```text
//! Key / Worker / Timer → Event → handle_event → State Mutations → Actions
//!                                     ↑                              ↓
//!                                     └──────── Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`card`]: Per-entry render cache
//! - [`debounce`]: Trailing-edge debounce over one-shot timers
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Key bindings per input mode
//! - [`modes`]: Input modes and library tabs
//! - [`state`]: Application state and view model computation
//! - [`visibility`]: Observe-once viewport tracking for lazy rendering

pub mod actions;
pub mod card;
pub mod debounce;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;
pub mod visibility;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::map_key;
pub use modes::{InputMode, SearchFocus, Tab};
pub use state::AppState;
