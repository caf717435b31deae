//! Runtime settings: an optional JSON file, then environment overrides.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Mode, TICK_MS};

/// File consulted when `NUMERATE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "numerate.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub scores_path: PathBuf,
    /// Milliseconds per simulation step.
    pub tick_ms: u64,
    /// Pre-filled into the name prompt.
    pub default_name: String,
    /// Logging is off unless this is set (the terminal is in raw mode).
    pub log_path: Option<PathBuf>,
    /// Highlighted first in the mode menu.
    pub default_mode: String,
    pub default_difficulty: String,
    /// Capture the mouse for pointing and clicking.
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from("scores.nmd"),
            tick_ms: TICK_MS as u64,
            default_name: "Player".to_string(),
            log_path: None,
            default_mode: Mode::default().as_str().to_string(),
            default_difficulty: Difficulty::default().as_str().to_string(),
            mouse: true,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse settings")
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                Self::from_json(&text).with_context(|| format!("in {}", path.display()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    /// File named by `NUMERATE_CONFIG` (or [`DEFAULT_CONFIG_PATH`]), then
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var("NUMERATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut settings = Self::from_file(Path::new(&path))?;
        settings.apply_env(|key| env::var(key).ok());
        Ok(settings)
    }

    /// Defaults plus environment overrides; used when the file is unusable.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env(|key| env::var(key).ok());
        settings
    }

    /// Apply `NUMERATE_*` overrides looked up through `var`.
    ///
    /// Blank values are ignored, as are tick lengths that do not parse.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(path) = get("NUMERATE_SCORES_PATH") {
            self.scores_path = PathBuf::from(path);
        }
        if let Some(ms) = get("NUMERATE_TICK_MS").and_then(|s| s.parse().ok()) {
            self.tick_ms = ms;
        }
        if let Some(path) = get("NUMERATE_LOG_PATH") {
            self.log_path = Some(PathBuf::from(path));
        }
        if let Some(name) = get("NUMERATE_NAME") {
            self.default_name = name;
        }
        if let Some(mouse) = get("NUMERATE_MOUSE").and_then(|s| parse_flag(&s)) {
            self.mouse = mouse;
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_str(&self.default_mode).unwrap_or_default()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_str(&self.default_difficulty).unwrap_or_default()
    }

    /// Step length, kept within 1ms..=1s.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(1, 1000))
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
