use std::fmt;
use thiserror::Error;

/// The character that terminates every field of a run token.
pub const DELIMITER: char = '|';

/// A stretch of `length` consecutive pixels that share the palette entry `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub length: u64,
    pub index: usize,
}

impl Run {
    pub fn new(length: u64, index: usize) -> Run {
        Run { length, index }
    }
}

/// Formats the run as a `length|index|` token.
impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}{DELIMITER}", self.length, self.index)
    }
}

/// Errors produced while encoding, parsing or checking a single row of runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunLengthError {
    #[error("the row contains no pixels")]
    EmptyRow,
    /// The fields of the row do not form complete `length|index|` pairs.
    #[error("the row has an incomplete run: {fields} fields after splitting")]
    IncompleteRun { fields: usize },
    /// Text follows the last delimiter of the row.
    #[error("unterminated field `{field}` at the end of the row")]
    TrailingData { field: String },
    #[error("`{field}` is not a decimal number")]
    InvalidNumber { field: String },
    #[error("run of length zero")]
    ZeroLength,
    #[error("color index {index} is out of range for a palette of {palette_size} colors")]
    InvalidIndex { index: usize, palette_size: usize },
    #[error("the row holds {actual} pixels, expected {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}

/// Splits a row of palette indices into its maximal runs.
///
/// Two adjacent runs returned by this function never share the same index,
/// and their lengths always add up to `indices.len()`.
pub fn encode_row(indices: &[usize]) -> Result<Vec<Run>, RunLengthError> {
    let (&first, rest) = indices.split_first().ok_or(RunLengthError::EmptyRow)?;

    let mut runs = Vec::new();
    let mut current = Run::new(1, first);

    for &index in rest {
        if index == current.index {
            current.length += 1;
        } else {
            runs.push(current);
            current = Run::new(1, index);
        }
    }
    runs.push(current);

    Ok(runs)
}

/// Appends the tokens of every run to `to`, with nothing in between.
pub fn write_runs<W>(to: &mut W, runs: &[Run]) -> fmt::Result
where
    W: fmt::Write,
{
    for run in runs {
        write!(to, "{run}")?;
    }
    Ok(())
}

/// Parses a non-negative decimal number made of ASCII digits only.
///
/// Signs, whitespace and empty fields are rejected.
pub(crate) fn parse_decimal<T>(field: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parses one field of a run token.
///
/// A field made of digits that does not fit in `T` becomes `max`, so that
/// [`check_runs`] reports it as out of range rather than malformed.
fn parse_run_field<T>(field: &str, max: T) -> Result<T, RunLengthError>
where
    T: std::str::FromStr,
{
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RunLengthError::InvalidNumber {
            field: field.to_string(),
        });
    }
    // Digit-only fields only fail to parse on overflow.
    Ok(field.parse().unwrap_or(max))
}

/// Parses a row made of concatenated `length|index|` tokens.
///
/// The runs are not required to be maximal, and their indices are not
/// checked against any palette here: see [`check_runs`]. Numbers too large
/// to represent saturate, so an oversized index is reported as `usize::MAX`.
pub fn parse_runs(line: &str) -> Result<Vec<Run>, RunLengthError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    // A well formed row ends with a delimiter, so the last field is empty
    // and the rest come in pairs.
    if fields.len() % 2 != 1 {
        return Err(RunLengthError::IncompleteRun {
            fields: fields.len(),
        });
    }

    let (last, pairs) = fields.split_last().ok_or(RunLengthError::EmptyRow)?;
    if !last.is_empty() {
        return Err(RunLengthError::TrailingData {
            field: last.to_string(),
        });
    }
    if pairs.is_empty() {
        return Err(RunLengthError::EmptyRow);
    }

    pairs
        .chunks_exact(2)
        .map(|pair| {
            let length = parse_run_field(pair[0], u64::MAX)?;
            let index = parse_run_field(pair[1], usize::MAX)?;
            if length == 0 {
                return Err(RunLengthError::ZeroLength);
            }
            Ok(Run::new(length, index))
        })
        .collect()
}

/// Verifies that every run points into a palette of `palette_size` colors
/// and that the runs cover exactly `width` pixels.
///
/// Stops at the first run that pushes the row past `width`.
pub fn check_runs(runs: &[Run], palette_size: usize, width: u32) -> Result<(), RunLengthError> {
    let expected = u64::from(width);
    let mut total: u64 = 0;

    for run in runs {
        if run.index >= palette_size {
            return Err(RunLengthError::InvalidIndex {
                index: run.index,
                palette_size,
            });
        }
        total = total.saturating_add(run.length);
        if total > expected {
            return Err(RunLengthError::LengthMismatch {
                expected,
                actual: total,
            });
        }
    }

    if total != expected {
        return Err(RunLengthError::LengthMismatch {
            expected,
            actual: total,
        });
    }
    Ok(())
}

/// Expands the runs into the palette values they stand for.
///
/// # Panics
///
/// Panics if a run points outside of `palette`. Use [`check_runs`] first
/// on untrusted runs.
pub fn expand_runs<'a, T>(runs: &'a [Run], palette: &'a [T]) -> impl Iterator<Item = T> + 'a
where
    T: Copy,
{
    runs.iter()
        .flat_map(move |run| std::iter::repeat(palette[run.index]).take(run.length as usize))
}
