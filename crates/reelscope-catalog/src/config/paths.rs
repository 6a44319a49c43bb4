//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Environment variable naming the directory that holds `config.toml`.
pub const ENV_CONFIG_DIR: &str = "REELSCOPE_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "reelscope";

/// Resolves the config file path from the process environment.
///
/// See [`resolve_config_path_with`] for the lookup order.
///
/// # Errors
///
/// Returns an error if no candidate directory can be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_config_path_with(dir, |key| std::env::var(key).ok())
}

/// Resolves the config file path, reading variables through `lookup`.
///
/// First match wins:
///
/// 1. `{dir}/config.toml` when `dir` is given
/// 2. `$REELSCOPE_CONFIG_DIR/config.toml`
/// 3. `$XDG_CONFIG_HOME/reelscope/config.toml` (absolute paths only)
/// 4. `$HOME/.config/reelscope/config.toml`
///
/// Empty variables are treated as unset.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and none of the variables is usable.
pub fn resolve_config_path_with<F>(dir: Option<&PathBuf>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(d) = get(ENV_CONFIG_DIR) {
        return Ok(PathBuf::from(d).join(CONFIG_FILE));
    }
    if let Some(d) = get("XDG_CONFIG_HOME").filter(|d| Path::new(d).is_absolute()) {
        return Ok(PathBuf::from(d).join(APP_DIR).join(CONFIG_FILE));
    }
    if let Some(home) = get("HOME") {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE));
    }
    bail!("cannot locate config directory: set {ENV_CONFIG_DIR}, XDG_CONFIG_HOME or HOME")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (String::from(k), String::from(v)))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_explicit_dir_wins() {
        // Arrange
        let dir = PathBuf::from("/srv/reelscope");
        let lookup = env(&[(ENV_CONFIG_DIR, "/etc/reelscope")]);

        // Act
        let path = resolve_config_path_with(Some(&dir), lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/reelscope/config.toml"));
    }

    #[test]
    fn test_config_dir_variable_beats_xdg() {
        // Arrange
        let lookup = env(&[
            (ENV_CONFIG_DIR, "/etc/reelscope"),
            ("XDG_CONFIG_HOME", "/home/ana/.cfg"),
            ("HOME", "/home/ana"),
        ]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/etc/reelscope/config.toml"));
    }

    #[test]
    fn test_xdg_config_home() {
        // Arrange
        let lookup = env(&[
            ("XDG_CONFIG_HOME", "/home/ana/.cfg"),
            ("HOME", "/home/ana"),
        ]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/ana/.cfg/reelscope/config.toml"));
    }

    #[test]
    fn test_relative_xdg_and_empty_values_fall_back_to_home() {
        // Arrange
        let lookup = env(&[
            (ENV_CONFIG_DIR, ""),
            ("XDG_CONFIG_HOME", "relative/cfg"),
            ("HOME", "/home/ana"),
        ]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/ana/.config/reelscope/config.toml")
        );
    }

    #[test]
    fn test_no_candidate_is_an_error() {
        // Arrange
        let lookup = env(&[]);

        // Act
        let result = resolve_config_path_with(None, lookup);

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains(ENV_CONFIG_DIR));
    }
}
