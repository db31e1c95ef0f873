//! Tutorial configuration, optionally loaded from a TOML file.
//!
//! The file is meant to be edited by hand and every field has a sensible
//! default, so a missing file is not an error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Tunable knobs for the tutorial engine (TOML).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuestConfig {
    /// Re-prompts a dependent follow-up challenge allows before the corrected
    /// fallback command runs.
    pub max_prompt_retries: u32,

    /// Truncate captured command stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            max_prompt_retries: 3,
            output_limit_bytes: 100_000,
        }
    }
}

impl QuestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<QuestConfig> {
    if !path.exists() {
        let cfg = QuestConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: QuestConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &QuestConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf).with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, QuestConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("quest.toml");
        let cfg = QuestConfig {
            max_prompt_retries: 5,
            ..QuestConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_falls_back_to_field_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("quest.toml");
        fs::write(&path, "max_prompt_retries = 1\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_prompt_retries, 1);
        assert_eq!(
            cfg.output_limit_bytes,
            QuestConfig::default().output_limit_bytes
        );
    }

    #[test]
    fn zero_output_limit_is_rejected() {
        let cfg = QuestConfig {
            output_limit_bytes: 0,
            ..QuestConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
