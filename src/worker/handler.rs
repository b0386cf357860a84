//! Font file I/O on the worker thread.
//!
//! The worker answers exactly one response per request. It never parses fonts;
//! it only reads files and hands their text back so parsing happens where the
//! fonts are used.

use crate::domain::error::{GlyphdeckError, Result};
use crate::worker::messages::{FailedFont, FontSource};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Extension of FIGlet font files.
pub const FONT_EXTENSION: &str = "flf";

/// Stateless handler for [`WorkerMessage`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontWorker;

impl FontWorker {
    /// Dispatches one request.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);
        let span = tracing::debug_span!("worker_handle_message", message_type = message_name(&message));
        let _guard = span.entered();

        match message {
            WorkerMessage::ListFonts { dir, .. } => match list_fonts(Path::new(&dir)) {
                Ok(names) => {
                    tracing::debug!(dir = %dir, count = names.len(), "listed FIGlet fonts");
                    WorkerResponse::FontsListed { names }
                }
                Err(e) => {
                    tracing::warn!(dir = %dir, error = %e, "failed to list FIGlet fonts");
                    WorkerResponse::Error {
                        message: format!("list fonts in {dir}: {e}"),
                    }
                }
            },
            WorkerMessage::LoadFontBatch { dir, batch, names, .. } => {
                let (fonts, failed) = read_batch(Path::new(&dir), &names);
                tracing::debug!(batch, read = fonts.len(), failed = failed.len(), "font batch read");
                WorkerResponse::FontBatchLoaded { batch, fonts, failed }
            }
        }
    }

    /// Decodes a JSON request and encodes the JSON reply.
    ///
    /// Returns `None` when the payload is not a request or the reply cannot
    /// be encoded; both are logged.
    pub fn on_payload(&self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);
        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

const fn message_name(message: &WorkerMessage) -> &'static str {
    match message {
        WorkerMessage::ListFonts { .. } => "ListFonts",
        WorkerMessage::LoadFontBatch { .. } => "LoadFontBatch",
    }
}

/// Sorted, de-duplicated stems of the `.flf` files directly inside `dir`.
///
/// A missing directory is not an error and yields no fonts.
///
/// # Errors
///
/// Returns [`GlyphdeckError::Io`] when the directory exists but cannot be read.
pub fn list_fonts(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(dir = %dir.display(), "FIGlet font directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(GlyphdeckError::Io(e)),
    };

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(FONT_EXTENSION))
        })
        .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
        .collect();

    names.sort();
    names.dedup();
    Ok(names)
}

/// Reads every named font, splitting successes from failures.
///
/// Files are decoded lossily; FIGlet fonts commonly carry Latin-1 bytes in
/// their comment header.
fn read_batch(dir: &Path, names: &[String]) -> (Vec<FontSource>, Vec<FailedFont>) {
    let mut fonts = Vec::with_capacity(names.len());
    let mut failed = Vec::new();

    for name in names {
        let path = dir.join(format!("{name}.{FONT_EXTENSION}"));
        match fs::read(&path) {
            Ok(bytes) => fonts.push(FontSource {
                name: name.clone(),
                data: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Err(e) => {
                tracing::warn!(font = %name, path = %path.display(), error = %e, "failed to read font file");
                failed.push(FailedFont {
                    name: name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (fonts, failed)
}

/// Re-enters the sender's trace so worker spans become its children.
///
/// The returned guard must live for the duration of the handling.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = message.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
    Some(
        opentelemetry::Context::current()
            .with_remote_span_context(span_context)
            .attach(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::TraceContext;

    fn font_dir(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            fs::write(dir.path().join(file), format!("flf2a$ 1 1 1 0 0\n{file}")).unwrap();
        }
        dir
    }

    #[test]
    fn lists_only_flf_stems_sorted() {
        let dir = font_dir(&["slant.flf", "big.flf", "README.txt", "Banner.FLF"]);
        fs::create_dir(dir.path().join("nested.flf")).unwrap();

        assert_eq!(list_fonts(dir.path()).unwrap(), ["Banner", "big", "slant"]);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let response = FontWorker.handle_message(WorkerMessage::list_fonts(
            dir.path().join("absent").to_string_lossy().into_owned(),
        ));
        assert_eq!(response, WorkerResponse::FontsListed { names: Vec::new() });
    }

    #[test]
    fn batch_separates_read_failures() {
        let dir = font_dir(&["big.flf"]);
        let response = FontWorker.handle_message(WorkerMessage::load_font_batch(
            dir.path().to_string_lossy().into_owned(),
            3,
            vec!["big".to_string(), "ghost".to_string()],
        ));

        let WorkerResponse::FontBatchLoaded { batch, fonts, failed } = response else {
            panic!("unexpected response: {response:?}");
        };
        assert_eq!(batch, 3);
        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].name, "big");
        assert!(fonts[0].data.starts_with("flf2a$"));
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "ghost");
    }

    #[test]
    fn empty_batch_replies_with_empty_lists() {
        let response = FontWorker.handle_message(WorkerMessage::load_font_batch("/nowhere".to_string(), 0, Vec::new()));
        assert_eq!(
            response,
            WorkerResponse::FontBatchLoaded {
                batch: 0,
                fonts: Vec::new(),
                failed: Vec::new(),
            }
        );
    }

    #[test]
    fn non_utf8_files_are_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("latin.flf"), b"flf2a$ 1 1 1 0 0\n\xe9\n").unwrap();

        let (fonts, failed) = read_batch(dir.path(), &["latin".to_string()]);
        assert!(failed.is_empty());
        assert!(fonts[0].data.contains('\u{fffd}'));
    }

    #[test]
    fn payload_round_trip_through_json() {
        let dir = font_dir(&["small.flf"]);
        let request = serde_json::to_string(&WorkerMessage::list_fonts(dir.path().to_string_lossy().into_owned())).unwrap();

        let reply = FontWorker.on_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert_eq!(response, WorkerResponse::FontsListed { names: vec!["small".to_string()] });
    }

    #[test]
    fn garbage_payload_gets_no_reply() {
        assert_eq!(FontWorker.on_payload("{not json"), None);
    }

    #[test]
    fn malformed_trace_context_is_ignored() {
        let message = WorkerMessage::ListFonts {
            dir: "/nowhere".to_string(),
            trace_context: Some(TraceContext {
                trace_id: "zz".to_string(),
                parent_span_id: "yy".to_string(),
            }),
        };
        assert!(attach_parent_trace_context(&message).is_none());
        assert!(matches!(FontWorker.handle_message(message), WorkerResponse::FontsListed { .. }));
    }
}
