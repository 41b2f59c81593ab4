//! Load, hold and rewrite ibus-table mapping files.
//!
//! A table file has three regions: free-form header lines, a body between
//! `BEGIN_TABLE` and `END_TABLE` holding `input<TAB>char<TAB>weight[<TAB>comment]`
//! rows, and free-form trailer lines from `END_TABLE` onward. [`TableFile`]
//! keeps the header and trailer byte-for-byte and parses the body into a
//! [`RecordStore`] keyed by `(input, character)`.
//!
//! Duplicate rows are merged while reading: the higher weight wins and a
//! warning is logged. Writing emits the header, the rows sorted by input key,
//! descending weight and code point, then the trailer.
//!
//! # Example
//! ```no_run
//! use imtable_db::{LoadMode, TableFile};
//!
//! # fn main() -> Result<(), imtable_db::TableError> {
//! let table = TableFile::load_with_mode("quick5.txt", LoadMode::Owned)?;
//! println!("{} rows", table.store().len());
//! table.write_to_path("quick5.txt.new")?;
//! # Ok(()) }
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;
use tracing::info;

mod reader;
mod store;
mod writer;

pub use reader::{BEGIN_MARKER, END_MARKER, parse_record_line};
pub use store::{RecordStore, Upsert};
pub use writer::{format_record, sorted_records, table_order, write_table};

/// Strategy for loading the input file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (zero-copy until rows are parsed).
    #[default]
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: input is not valid UTF-8")]
    Utf8 { line: usize },
    #[error("line {line}: {reason}: {text:?}")]
    Malformed {
        line: usize,
        reason: LineError,
        text: String,
    },
}

/// Why a single table row was rejected.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LineError {
    #[error("expected 3 or 4 tab-separated fields, got {0}")]
    FieldCount(usize),
    #[error("empty input key")]
    EmptyInputKey,
    #[error("character field must be exactly one code point, got {0:?}")]
    Character(String),
    #[error("weight is not an integer: {0:?}")]
    Weight(String),
}

/// A parsed table file: verbatim header, keyed rows and verbatim trailer.
#[derive(Debug, Clone, Default)]
pub struct TableFile {
    head: Vec<String>,
    store: RecordStore,
    tail: Vec<String>,
}

impl TableFile {
    /// Load a table, memory-mapping the source file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a table choosing between mmap and an owned buffer at runtime.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, TableError> {
        let path = path.as_ref();
        info!("input file={}", path.display());
        let buffer = load_file(path, mode).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(buffer.as_slice())
    }

    /// Parse a table from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, TableError> {
        reader::parse_table(bytes)
    }

    /// Header lines including the canonical `BEGIN_TABLE` line, with their
    /// original line terminators.
    pub fn head(&self) -> &[String] {
        &self.head
    }

    /// Lines from `END_TABLE` onward, with their original line terminators.
    pub fn tail(&self) -> &[String] {
        &self.tail
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// Write the table to `path`, creating or truncating it.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        info!("output file={}", path.display());
        let wrap = |source| TableError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(wrap)?;
        write_table(self, file).map_err(wrap)
    }
}

fn load_file(path: &Path, mode: LoadMode) -> io::Result<Buffer> {
    let mut file = File::open(path)?;
    match mode {
        LoadMode::Mmap => {
            // Zero-length mappings are rejected on some platforms.
            if file.metadata()?.len() == 0 {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }.map(Buffer::Mmap)
        }
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(Buffer::Owned(buf))
        }
    }
}
