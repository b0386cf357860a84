//! Sandbox path handling.
//!
//! Zellij mounts the host filesystem under `/host`; everything that reads or
//! writes host files goes through these helpers.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
