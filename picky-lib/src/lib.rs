//! Interpreter for declarative HTML extraction rules.
//!
//! A rule document maps one root tag name to an ordered list of entries:
//! attribute filters (`id: col-A`), a `max-items` cap, a `do: catch`
//! directive, or nested levels. [`Parser`] loads and validates it into a
//! [`Level`] tree and [`evaluate`] walks that tree over a [`Document`].

pub mod config;
pub mod document;
pub mod evaluator;
pub mod grammar;
pub mod parser;
pub mod reader;
pub mod result;
pub mod validator;

#[cfg(feature = "soup")]
pub mod batch;
#[cfg(feature = "soup")]
pub mod html;

pub use config::{Cap, LevelConfig};
pub use document::Document;
pub use evaluator::evaluate;
pub use grammar::{Entry, Level, LevelKind, Operation, TagPath};
pub use parser::{Error, Parser};
pub use reader::SourceFormat;
pub use result::{ExtractionResult, ResultSet};
pub use validator::{validate, ErrorKind, InstructionError};

#[cfg(feature = "soup")]
pub use batch::{extract_page, extract_pages};
#[cfg(feature = "soup")]
pub use html::{HarvestedElement, Snapshot};
