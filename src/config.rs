use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attribute written when a tag has no class attribute yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassAttribute {
    /// `className`, for JSX.
    #[default]
    #[serde(rename = "className")]
    ClassName,
    /// `class`, for plain HTML.
    #[serde(rename = "class")]
    Class,
}

impl ClassAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassAttribute::ClassName => "className",
            ClassAttribute::Class => "class",
        }
    }
}

/// Options for the tag rewrite strategies.
///
/// Read from `.inline-css.json`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub class_attribute: ClassAttribute,
    /// Collapse runs of whitespace left behind after removing a declaration.
    pub collapse_whitespace: bool,
    pub class_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_attribute: ClassAttribute::default(),
            collapse_whitespace: true,
            class_prompt: "Enter CSS class name".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    pub const FILE_NAME: &'static str = ".inline-css.json";

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `.inline-css.json` from `dir` if present, else defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(Self::FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
