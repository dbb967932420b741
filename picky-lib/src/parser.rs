use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::grammar::Level;
use crate::reader::{decode, ReaderError, SourceFormat, SourceReader};
use crate::validator::{validate, InstructionError};

enum Source {
    File(PathBuf),
    Text { content: String, format: SourceFormat },
}

/// Loads rule source and validates it into an instruction tree.
pub struct Parser {
    source: Source,
}

type Result<T> = std::result::Result<T, Error>;

impl Parser {
    pub fn for_file(file: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(file.into()),
        }
    }

    pub fn for_str(content: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            source: Source::Text {
                content: content.into(),
                format,
            },
        }
    }

    pub fn parse(&self) -> Result<Level> {
        let value = match &self.source {
            Source::File(file) => SourceReader::for_file(file).read_value()?,
            Source::Text { content, format } => decode(content, *format)?,
        };
        let level = validate(&value)?;
        debug!(root = level.tag_name(), leaves = level.leaf_paths().len(), "parsed instruction");
        Ok(level)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error while reading the rule source: {}", .0)]
    ReaderError(String),

    #[error("Error while decoding the rule source: {}", .0)]
    SourceError(String),

    #[error("Invalid instruction: {}", .0)]
    InstructionError(#[from] InstructionError),
}

impl From<ReaderError> for Error {
    fn from(value: ReaderError) -> Self {
        match value {
            ReaderError::IoError { .. } => Error::ReaderError(value.to_string()),
            ReaderError::YamlError(_) | ReaderError::JsonError(_) => {
                Error::SourceError(value.to_string())
            }
        }
    }
}
