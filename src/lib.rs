//! Glyphdeck: a Zellij plugin for browsing ASCII-art fonts.
//!
//! Glyphdeck renders one preview text in every font it knows and lets you copy
//! the result:
//! - FIGlet fonts loaded in batches from a directory of `.flf` files
//! - cfonts-style glyph-table fonts bundled with the plugin
//! - 8×8 bitmap styles rasterized from the `font8x8` basic font
//! - Library tabs, substring search and a debounced preview text field
//! - Lazy card rendering driven by what is on screen

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, key bindings                     │
//! │  - Cards, viewport observer, debounce               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Filtering   │   │ - List dir    │
//! │ - Theming     │   │ - Ordering    │   │ - Read fonts  │
//! │ - Components  │   │ - Loader      │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Renderers (render/) & Domain (domain/)             │
//! │  - FIGlet adapter, glyph tables, bitmap rasterizer  │
//! │  - Catalog entries, font data, errors               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Catalog aggregation and batched FIGlet loading
//! - [`domain`]: Libraries, catalog entries, errors
//! - [`infrastructure`]: Sandbox path helpers
//! - [`render`]: The three text renderers
//! - [`worker`]: Background worker reading font files
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/glyphdeck.wasm" {
//!         text "Hello"
//!         figlet_dir "~/.local/share/figlet"
//!         batch_size "20"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use glyphdeck::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for event in [Event::KeyDown, Event::Copy] {
//!     let (_render, _actions) = handle_event(&mut state, &event)?;
//!     // execute actions...
//! }
//! # Ok::<(), glyphdeck::GlyphdeckError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod render;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, Tab};
pub use domain::{CatalogEntry, GlyphdeckError, Library, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default preview text.
pub const DEFAULT_TEXT: &str = "Hello";

/// Default FIGlet font directory on the host.
pub const DEFAULT_FIGLET_DIR: &str = "~/.local/share/figlet";

/// Plugin configuration parsed from the layout's plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial preview text.
    pub text: String,

    /// FIGlet font directory, already mapped into the sandbox (`~` → `/host`).
    pub figlet_dir: String,

    /// FIGlet fonts per load batch, at least 1.
    pub batch_size: usize,

    /// Delay between the last keystroke in the text field and a re-render.
    pub debounce_ms: u64,

    /// Built-in theme: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe` or `catppuccin-macchiato`. Ignored if `theme_file`
    /// is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `debug` or `glyphdeck=trace`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            figlet_dir: infrastructure::expand_tilde(DEFAULT_FIGLET_DIR),
            batch_size: catalog::DEFAULT_BATCH_SIZE,
            debounce_ms: app::debounce::DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the map Zellij hands to `load`, falling back to defaults for
    /// missing or malformed values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use glyphdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("figlet_dir".to_string(), "~/fonts".to_string());
    /// map.insert("batch_size".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.figlet_dir, "/host/fonts");
    /// assert_eq!(config.batch_size, 1);
    /// assert_eq!(config.text, "Hello");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = config.get("text").cloned().unwrap_or(defaults.text);

        let figlet_dir = config
            .get("figlet_dir")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.figlet_dir, infrastructure::expand_tilde);

        let batch_size = config
            .get("batch_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map_or(defaults.batch_size, |n| n.max(1));

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let trace_level = config
            .get("trace_level")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.trace_level);

        Self {
            text,
            figlet_dir,
            batch_size,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level,
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, falling back");
                }
            }
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the application state for `config`.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(figlet_dir = %config.figlet_dir, batch_size = config.batch_size, "initializing glyphdeck");
    AppState::new(config, config.resolve_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
        assert_eq!(Config::default().figlet_dir, "/host/.local/share/figlet");
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[("batch_size", "many"), ("debounce_ms", "-5")]));
        assert_eq!(config.batch_size, catalog::DEFAULT_BATCH_SIZE);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("text", "Hi there"),
            ("batch_size", " 5 "),
            ("debounce_ms", "50"),
            ("trace_level", "debug"),
            ("theme", "catppuccin-latte"),
        ]));
        assert_eq!(config.text, "Hi there");
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.trace_level, "debug");
        assert_eq!(config.resolve_theme().name, "catppuccin-latte");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let builtin = Theme::from_name("catppuccin-frappe").unwrap();
        let mut custom = builtin.clone();
        custom.name = "custom".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme().name, "custom");
    }

    #[test]
    fn broken_theme_file_falls_back_to_name() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/definitely/missing.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme().name, "catppuccin-latte");
    }
}
