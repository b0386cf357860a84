//! Background worker for font file I/O.
//!
//! Reading a font directory blocks, so it runs on a Zellij worker thread and
//! talks to the plugin through JSON messages.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Directory listing and batch reads

pub mod handler;
pub mod messages;

pub use handler::FontWorker;
pub use messages::{FailedFont, FontSource, TraceContext, WorkerMessage, WorkerResponse};
