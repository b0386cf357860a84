//! Plugin ↔ worker protocol.
//!
//! Messages travel as JSON over Zellij's plugin IPC. Requests carry an
//! optional [`TraceContext`] so spans opened in the worker join the trace of
//! the plugin span that sent them.

use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry span identity of the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// 32 hex digits.
    pub trace_id: String,
    /// 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the span that is current on this thread.
    ///
    /// Returns `None` outside of a valid, recorded span, for example when
    /// tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let captured = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %captured.trace_id, "captured trace context");
        Some(captured)
    }
}

/// Generates one constructor per request variant that fills in the current
/// trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request tagged with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_fonts(ListFonts { dir: String }),
    load_font_batch(LoadFontBatch { dir: String, batch: usize, names: Vec<String> }),
}

/// Requests handled by the font worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// List the `.flf` fonts in `dir`.
    ListFonts {
        dir: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read the named fonts from `dir`; `batch` is echoed in the reply.
    LoadFontBatch {
        dir: String,
        batch: usize,
        names: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListFonts { trace_context, .. } | Self::LoadFontBatch { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Raw contents of one font file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub name: String,
    pub data: String,
}

/// A font the worker could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFont {
    pub name: String,
    pub reason: String,
}

/// Worker replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Font stems, sorted; empty when the directory does not exist.
    FontsListed { names: Vec<String> },

    /// Outcome of one `LoadFontBatch` request.
    FontBatchLoaded {
        batch: usize,
        fonts: Vec<FontSource>,
        failed: Vec<FailedFont>,
    },

    Error { message: String },
}
