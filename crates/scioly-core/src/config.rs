//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level scioly configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScioConfig {
    /// Question bank file.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Event to start on when none is given.
    #[serde(default)]
    pub default_event: Option<String>,
    /// Drill time per question, used when no valid limit is given.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u64,
    /// Shuffle questions at the start of every run.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Fixed shuffle seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where cheat sheets and summaries are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("questions.json")
}
fn default_seconds_per_question() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScioConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            default_event: None,
            seconds_per_question: default_seconds_per_question(),
            shuffle: true,
            seed: None,
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut pos = 0;
    while let Some(offset) = result[pos..].find("${") {
        let start = pos + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        pos = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `scioly.toml` in the current directory
/// 2. `~/.config/scioly/config.toml`
///
/// Environment variable overrides: `SCIOLY_BANK`, `SCIOLY_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ScioConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("scioly.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ScioConfig::default(),
    };

    if let Ok(bank) = std::env::var("SCIOLY_BANK") {
        config.bank_path = PathBuf::from(bank);
    }
    if let Ok(dir) = std::env::var("SCIOLY_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.bank_path = resolve_path(&config.bank_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str) -> Result<ScioConfig> {
    let config: ScioConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.seconds_per_question >= 1,
        "seconds_per_question must be at least 1"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("scioly"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_SCIOLY_TEST_VAR", "banks");
        assert_eq!(resolve_env_vars("${_SCIOLY_TEST_VAR}"), "banks");
        assert_eq!(
            resolve_env_vars("${_SCIOLY_TEST_VAR}/astro.json"),
            "banks/astro.json"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_SCIOLY_TEST_VAR");
    }

    #[test]
    fn self_referencing_env_var_terminates() {
        std::env::set_var("_SCIOLY_SELF_VAR", "${_SCIOLY_SELF_VAR}");
        assert_eq!(
            resolve_env_vars("${_SCIOLY_SELF_VAR}/q.json"),
            "${_SCIOLY_SELF_VAR}/q.json"
        );
        std::env::remove_var("_SCIOLY_SELF_VAR");
    }

    #[test]
    fn default_config() {
        let config = ScioConfig::default();
        assert_eq!(config.bank_path, PathBuf::from("questions.json"));
        assert_eq!(config.seconds_per_question, 30);
        assert!(config.shuffle);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
bank_path = "banks/regionals.json"
default_event = "Forensics"
seconds_per_question = 45
shuffle = false
seed = 7
output_dir = "sheets"
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.bank_path, PathBuf::from("banks/regionals.json"));
        assert_eq!(config.default_event.as_deref(), Some("Forensics"));
        assert_eq!(config.seconds_per_question, 45);
        assert!(!config.shuffle);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_dir, PathBuf::from("sheets"));
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let config = parse_config_str("default_event = \"Astronomy\"\n").unwrap();
        assert_eq!(config.bank_path, PathBuf::from("questions.json"));
        assert_eq!(config.seconds_per_question, 30);
        assert!(config.shuffle);
    }

    #[test]
    fn zero_seconds_per_question_rejected() {
        assert!(parse_config_str("seconds_per_question = 0\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scioly.toml");
        std::fs::write(&path, "seconds_per_question = 12\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.seconds_per_question, 12);
    }
}
