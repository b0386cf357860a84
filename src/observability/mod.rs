//! Tracing export to a local OTLP-JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK provider → OtlpFileExporter → rotating file
//! ```
//!
//! The level comes from the `trace_level` plugin option (default `info`). The
//! trace file rotates at 10 MB and keeps three rotated copies.
//!
//! - [`init`]: Subscriber installation
//! - `tracer`: Provider and file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Size-based rotation

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
