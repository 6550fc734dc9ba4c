use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compiler::DEFAULT_MAX_DEPTH;
use crate::errors::{CompileError, Result};

pub const CONFIG_ENV: &str = "JSONQUERY_CONFIG";
pub const MAX_DEPTH_ENV: &str = "JSONQUERY_MAX_DEPTH";
pub const ANCHOR_PATTERNS_ENV: &str = "JSONQUERY_ANCHOR_PATTERNS";
pub const CONFIG_FILE_NAME: &str = "jsonquery.toml";

/// Compiler settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub max_depth: usize,
    pub anchor_patterns: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, anchor_patterns: false }
    }
}

impl CompilerConfig {
    /// # Errors
    /// Returns `Config` if `s` is not valid TOML for this structure or is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).map_err(|e| CompileError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| CompileError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }

    /// Loads configuration with precedence: explicit file > `JSONQUERY_CONFIG` > `./jsonquery.toml`
    /// > defaults, then applies environment overrides.
    ///
    /// # Errors
    /// Returns `Config` if the chosen file is unreadable or invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().ok();
        Self::load_from(explicit, |k| std::env::var(k).ok(), cwd.as_deref())
    }

    /// [`CompilerConfig::load`] against an arbitrary environment lookup and working directory.
    ///
    /// # Errors
    /// Returns `Config` if the chosen file is unreadable or invalid.
    pub fn load_from<F: Fn(&str) -> Option<String>>(
        explicit: Option<&Path>,
        lookup: F,
        cwd: Option<&Path>,
    ) -> Result<Self> {
        let mut cfg = match Self::find_config_path_from(explicit, &lookup, cwd) {
            Some(p) => {
                log::info!("config: loading {}", p.display());
                Self::from_file(&p)?
            }
            None => Self::default(),
        };
        cfg.apply_env_from(lookup);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Picks the first config file that exists; an explicit path is returned unchecked.
    pub fn find_config_path_from<F: Fn(&str) -> Option<String>>(
        explicit: Option<&Path>,
        lookup: F,
        cwd: Option<&Path>,
    ) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }
        let mut paths: Vec<PathBuf> = vec![];
        if let Some(p) = lookup(CONFIG_ENV) {
            paths.push(PathBuf::from(p));
        }
        if let Some(cur) = cwd {
            paths.push(cur.join(CONFIG_FILE_NAME));
        }
        paths.into_iter().find(|p| p.exists())
    }

    /// Apply `JSONQUERY_MAX_DEPTH` / `JSONQUERY_ANCHOR_PATTERNS` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|k| std::env::var(k).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are logged and ignored.
    pub fn apply_env_from<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(s) = lookup(MAX_DEPTH_ENV) {
            match s.trim().parse::<usize>() {
                Ok(n) => self.max_depth = n,
                Err(_) => log::warn!("ignoring {MAX_DEPTH_ENV}={s}: not a number"),
            }
        }
        if let Some(s) = lookup(ANCHOR_PATTERNS_ENV) {
            match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.anchor_patterns = true,
                "0" | "false" | "no" => self.anchor_patterns = false,
                _ => log::warn!("ignoring {ANCHOR_PATTERNS_ENV}={s}: not a boolean"),
            }
        }
    }

    /// # Errors
    /// Returns `Config` when `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(CompileError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}
