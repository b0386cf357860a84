//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the glyphdeck library and Zellij. It
//! implements `ZellijPlugin` for the UI and `ZellijWorker` for the font
//! reader, translates Zellij events into library events and performs the
//! actions the library asks for.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, rendering, FIGlet parsing
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ GlyphdeckWorker  │   │  ← Lists and reads .flf files
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Once granted, the worker lists the FIGlet directory
//! 3. **Update**: Keys, worker replies, timers and command results become events
//! 4. **Render**: Settle the card window, then draw
//! 5. **Close**: Pending font batches are cancelled

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use glyphdeck::worker::{FontWorker, WorkerMessage, WorkerResponse};
use glyphdeck::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(GlyphdeckWorker, glyphdeck_worker, GLYPHDECK_WORKER);

/// Name the worker is registered under and replies with.
const WORKER_NAME: &str = "glyphdeck";

/// `RunCommandResult` context key marking clipboard commands.
const CONTEXT_KIND: &str = "kind";
const CONTEXT_CLIPBOARD: &str = "clipboard";
const CONTEXT_LABEL: &str = "label";

/// Pipes the text argument into the first clipboard tool that exists.
const CLIPBOARD_SCRIPT: &str = "printf '%s' \"$1\" | (wl-copy 2>/dev/null || xclip -selection clipboard 2>/dev/null || pbcopy)";

struct State {
    app: glyphdeck::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: glyphdeck::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// Permissions:
    /// - `FullHdAccess`: read the FIGlet font directory
    /// - `RunCommands`: pipe art into the clipboard tool
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        glyphdeck::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(
            figlet_dir = %config.figlet_dir,
            batch_size = config.batch_size,
            debounce_ms = config.debounce_ms,
            "parsed configuration"
        );
        self.app = glyphdeck::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::RunCommandResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => {
                tracing::debug!(bare_key = ?key.bare_key, "key event");
                match glyphdeck::app::map_key(self.app.input_mode, key) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: status == PermissionStatus::Granted,
            },
            zellij_tile::prelude::Event::BeforeClose => Event::BeforeClose,
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.prepare_frame(rows);
        glyphdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if context.get(CONTEXT_KIND).map(String::as_str) != Some(CONTEXT_CLIPBOARD) {
            tracing::debug!(exit_code = ?exit_code, "ignoring result of unknown command");
            return None;
        }
        Some(Event::ClipboardResult {
            success: exit_code == Some(0),
            label: context.get(CONTEXT_LABEL).cloned().unwrap_or_default(),
            error: String::from_utf8_lossy(stderr).trim().to_string(),
        })
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(action = ?std::mem::discriminant(action)))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::ScheduleTimer { seconds } => set_timeout(*seconds),
            Action::CopyToClipboard { label, text } => {
                tracing::debug!(font = %label, bytes = text.len(), "copying to clipboard");
                let context = BTreeMap::from([
                    (CONTEXT_KIND.to_string(), CONTEXT_CLIPBOARD.to_string()),
                    (CONTEXT_LABEL.to_string(), label.clone()),
                ]);
                run_command(&["sh", "-c", CLIPBOARD_SCRIPT, "sh", text], context);
            }
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker half of the plugin; all logic lives in [`FontWorker`].
#[derive(Default, Serialize, Deserialize)]
struct GlyphdeckWorker;

impl ZellijWorker<'_> for GlyphdeckWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            glyphdeck::observability::init_tracing(&Config::default());
        }

        if let Some(payload) = FontWorker.on_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
