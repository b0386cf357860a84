//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready frame data
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Renderers for header, tabs, text bar, search, cards, status
//! - [`helpers`]: Cursor positioning, highlighting and width helpers
//! - [`theme`]: Color themes and ANSI escape sequences
//!
//! # Example
//!
//! ```rust,no_run
//! use glyphdeck::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! state.prepare_frame(24);
//! glyphdeck::ui::render(&state, 24, 80); // Renders to stdout
//! ```

pub mod viewmodel;
pub mod renderer;
pub mod components;
pub mod helpers;
pub mod theme;

pub use viewmodel::{
    CardItem, CardLine, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo, TabItem, TextBarInfo,
    UIViewModel,
};
pub use renderer::render;
pub use theme::Theme;
