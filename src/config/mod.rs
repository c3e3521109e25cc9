//! Tracker configuration.
//!
//! Handles loading and saving `texprogress.toml`. Relative paths in the file
//! are resolved against the directory that contains it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Config file name looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "texprogress.toml";

/// Tracker configuration stored in `texprogress.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// CSV ledger with one row per tracked day.
    pub ledger_path: PathBuf,

    /// Chart image, regenerated on every run.
    pub image_path: PathBuf,

    /// Directory holding the LaTeX sources.
    pub source_root: PathBuf,

    /// Root document, relative to `source_root`.
    pub source_filename: String,

    /// Compiled PDF.
    pub compiled_doc_path: PathBuf,

    /// Git repository root.
    pub repo_root: PathBuf,

    /// First day of tracking, written as `"YYYY-MM-DD"`.
    pub tracking_start_date: NaiveDate,

    /// External programs.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Program names for the external collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_texcount")]
    pub texcount: String,

    #[serde(default = "default_pdfinfo")]
    pub pdfinfo: String,

    #[serde(default = "default_git")]
    pub git: String,
}

fn default_texcount() -> String {
    "texcount".to_string()
}

fn default_pdfinfo() -> String {
    "pdfinfo".to_string()
}

fn default_git() -> String {
    "git".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            texcount: default_texcount(),
            pdfinfo: default_pdfinfo(),
            git: default_git(),
        }
    }
}

impl Config {
    /// Defaults for a document laid out as `main.tex` / `main.pdf` at the repo root.
    pub fn new(tracking_start_date: NaiveDate) -> Self {
        Self {
            ledger_path: PathBuf::from("progress/table.csv"),
            image_path: PathBuf::from("progress/progress_plot.png"),
            source_root: PathBuf::from("."),
            source_filename: "main.tex".to_string(),
            compiled_doc_path: PathBuf::from("main.pdf"),
            repo_root: PathBuf::from("."),
            tracking_start_date,
            tools: ToolsConfig::default(),
        }
    }

    /// Find the config file to use.
    ///
    /// An explicit path wins. Otherwise `./texprogress.toml`, then
    /// `<config dir>/texprogress/config.toml`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, Error> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = std::env::current_dir()?.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }

        if let Some(global) = Self::global_path() {
            if global.exists() {
                return Ok(global);
            }
        }

        Err(Error::ConfigNotFound(local))
    }

    /// Path to the per-user config file.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("texprogress").join("config.toml"))
    }

    /// Load config from a file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;

        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to a file, as written (relative paths stay relative).
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::ConfigParse(e.to_string()))?;

        let with_header = format!(
            "# texprogress configuration\n# Relative paths are resolved against this file's directory\n\n{}",
            content
        );

        fs::write(path, with_header)?;
        Ok(())
    }

    /// Join every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.ledger_path,
            &mut self.image_path,
            &mut self.source_root,
            &mut self.compiled_doc_path,
            &mut self.repo_root,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
