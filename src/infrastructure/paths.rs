//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory holding the trace file, `~/.local/share/zellij/glyphdeck` on the host.
///
/// ```
/// use glyphdeck::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/glyphdeck"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("glyphdeck")
}

/// Maps a leading `~` onto the sandbox's `/host` mount.
///
/// ```
/// use glyphdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.local/share/figlet"), "/host/.local/share/figlet");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/usr/share/figlet"), "/usr/share/figlet");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

/// Shows a sandbox path the way the user would write it on the host.
///
/// ```
/// use glyphdeck::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/.local/share/figlet"), "~/.local/share/figlet");
/// assert_eq!(strip_host_prefix("/usr/share/figlet"), "/usr/share/figlet");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_user_paths_are_left_alone() {
        assert_eq!(expand_tilde("~alice/fonts"), "~alice/fonts");
    }

    #[test]
    fn expand_and_strip_are_inverse_for_home_paths() {
        for path in ["~", "~/fonts", "~/.local/share/figlet"] {
            assert_eq!(strip_host_prefix(&expand_tilde(path)), path);
        }
    }

    #[test]
    fn hostname_lookalikes_are_not_stripped() {
        assert_eq!(strip_host_prefix("/hostile/fonts"), "/hostile/fonts");
    }
}
