use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

pub struct SourceReader {
    path: PathBuf,
}

type Result<T> = std::result::Result<T, ReaderError>;

impl SourceReader {
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_path(&self.path)
    }

    pub fn read_to_string(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|error| ReaderError::IoError {
            path: self.path.display().to_string(),
            message: error.to_string(),
        })
    }

    pub fn read_value(&self) -> Result<Value> {
        decode(&self.read_to_string()?, self.format())
    }
}

/// Decodes rule source text into the raw mapping/list tree.
pub fn decode(content: &str, format: SourceFormat) -> Result<Value> {
    match format {
        SourceFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        SourceFormat::Json => {
            let json: serde_json::Value = serde_json::from_str(content)?;
            Ok(serde_yaml::to_value(json)?)
        }
    }
}

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Could not read {}: {}", .path, .message)]
    IoError { path: String, message: String },

    #[error("Malformed YAML: {}", .0)]
    YamlError(String),

    #[error("Malformed JSON: {}", .0)]
    JsonError(String),
}

impl From<serde_yaml::Error> for ReaderError {
    fn from(value: serde_yaml::Error) -> Self {
        ReaderError::YamlError(value.to_string())
    }
}

impl From<serde_json::Error> for ReaderError {
    fn from(value: serde_json::Error) -> Self {
        ReaderError::JsonError(value.to_string())
    }
}
