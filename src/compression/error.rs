use crate::coding::run_length::RunLengthError;
use std::io;
use thiserror::Error;

/// Errors that may occur when compressing an image.
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    /// The image has rows but no columns, so a row cannot be run-length encoded.
    #[error("row {row} is empty")]
    EmptyRow { row: usize },
}

impl CompressionError {
    /// The process exit code a command line tool reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompressionError::IoError(_) => 1,
            CompressionError::EmptyRow { .. } => 8,
        }
    }
}

/// Errors that may occur when decompressing an image.
///
/// Rows are numbered from 0, lines of the container text from 1.
#[derive(Debug, Error)]
pub enum DecompressionError {
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    /// The compressed stream or the text inside it is damaged.
    #[error("corrupt data: {0}")]
    CorruptData(#[source] io::Error),
    /// The first line is not made of exactly three decimal numbers.
    #[error("malformed header `{header}`")]
    MalformedHeader { header: String },
    /// A palette line is missing or is not exactly six hex digits.
    #[error("malformed palette entry `{content}` on line {line}")]
    MalformedPalette { line: usize, content: String },
    #[error("malformed row {row}: {source}")]
    MalformedRow {
        row: usize,
        #[source]
        source: RunLengthError,
    },
    #[error("invalid color index {index} in row {row}, the palette has {palette_size} colors")]
    InvalidColorIndex {
        index: usize,
        row: usize,
        palette_size: usize,
    },
    /// The header declares a different number of rows than the container holds.
    #[error("expected {expected} rows, found {actual}")]
    RowCountMismatch { expected: usize, actual: usize },
    /// A row does not cover exactly the width declared by the header.
    #[error("row {row} holds {actual} pixels, expected {expected}")]
    RowLengthMismatch { row: usize, expected: u64, actual: u64 },
    /// The declared dimensions do not fit in memory.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl DecompressionError {
    /// Attaches the row number to an error found while decoding that row.
    pub fn in_row(row: usize, err: RunLengthError) -> DecompressionError {
        match err {
            RunLengthError::InvalidIndex {
                index,
                palette_size,
            } => DecompressionError::InvalidColorIndex {
                index,
                row,
                palette_size,
            },
            RunLengthError::LengthMismatch { expected, actual } => {
                DecompressionError::RowLengthMismatch {
                    row,
                    expected,
                    actual,
                }
            }
            source => DecompressionError::MalformedRow { row, source },
        }
    }

    /// The process exit code a command line tool reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DecompressionError::IoError(_) => 1,
            DecompressionError::CorruptData(_) => 3,
            DecompressionError::MalformedHeader { .. }
            | DecompressionError::InvalidDimensions { .. } => 4,
            DecompressionError::MalformedPalette { .. } => 5,
            DecompressionError::MalformedRow { .. }
            | DecompressionError::InvalidColorIndex { .. }
            | DecompressionError::RowLengthMismatch { .. } => 6,
            DecompressionError::RowCountMismatch { .. } => 7,
        }
    }
}
