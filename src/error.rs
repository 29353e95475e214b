use thiserror::Error;

use crate::types::MIN_FIELDS;

pub type Result<T> = std::result::Result<T, CaddError>;

#[derive(Error, Debug)]
pub enum CaddError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not open input: {0}")]
    Input(#[from] niffler::Error),
    #[error("input is {0:?}-compressed, only plain text is supported")]
    CompressedInput(niffler::compression::Format),
    #[error("line {line}: expected at least {} tab-separated fields, found {fields}", MIN_FIELDS)]
    MalformedRecord { line: usize, fields: usize },
    #[error("line {line}: column {} is not valid UTF-8", .column + 1)]
    Encoding { line: usize, column: usize },
    #[error("line {line}: more than three rows accumulated for one position (position_count = {position_count})")]
    GroupingViolation { line: usize, position_count: usize },
    #[error("input ended with {rows} row(s) of an incomplete position group")]
    TruncatedGroup { rows: usize },
}
