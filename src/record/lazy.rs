use std::ops::Range;

use crate::error::{CaddError, Result};
use crate::parser::column_ranges;
use crate::record::Record;
use crate::types::{CHROM_COLUMN, MIN_FIELDS, PHRED_COLUMN, POS_COLUMN, REF_COLUMN};

const USED_COLUMNS: [usize; 4] = [CHROM_COLUMN, POS_COLUMN, REF_COLUMN, PHRED_COLUMN];

/// A data line together with the byte ranges of its columns.
///
/// Columns are only sliced out when asked for, so a row costs a single allocation.
#[derive(Debug, Clone)]
pub struct RawScoreRow {
    pub(crate) line: String,
    pub(crate) columns: Vec<Range<usize>>,
    pub(crate) line_number: usize,
}

impl RawScoreRow {
    /// Split an already trimmed line. Fails if it has fewer than six columns or if one of
    /// the carried over columns is not UTF-8. Other columns may hold any bytes.
    pub fn parse(line: Vec<u8>, line_number: usize) -> Result<Self> {
        let columns = column_ranges(&line);
        if columns.len() < MIN_FIELDS {
            return Err(CaddError::MalformedRecord {
                line: line_number,
                fields: columns.len(),
            });
        }
        let line = match String::from_utf8(line) {
            Ok(line) => line,
            Err(e) => {
                let bytes = e.into_bytes();
                if let Some(&column) = USED_COLUMNS
                    .iter()
                    .find(|&&idx| std::str::from_utf8(&bytes[columns[idx].clone()]).is_err())
                {
                    return Err(CaddError::Encoding {
                        line: line_number,
                        column,
                    });
                }
                // the bad bytes sit in ignored columns; tabs survive replacement but
                // offsets shift, so the columns are split again
                return Self::parse(
                    String::from_utf8_lossy(&bytes).into_owned().into_bytes(),
                    line_number,
                );
            }
        };
        Ok(Self {
            line,
            columns,
            line_number,
        })
    }

    fn column(&self, idx: usize) -> &str {
        // parse() guarantees at least MIN_FIELDS columns, all ending on a tab or the line end
        &self.line[self.columns[idx].clone()]
    }
}

impl Record for RawScoreRow {
    fn chrom(&self) -> &str {
        self.column(CHROM_COLUMN)
    }

    fn pos(&self) -> &str {
        self.column(POS_COLUMN)
    }

    fn ref_allele(&self) -> &str {
        self.column(REF_COLUMN)
    }

    fn phred(&self) -> &str {
        self.column(PHRED_COLUMN)
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_columns() {
        let row = RawScoreRow::parse(b"chr1\t100\tA\tG\t0.25\t1.2".to_vec(), 3).unwrap();
        assert_eq!(row.chrom(), "chr1");
        assert_eq!(row.pos(), "100");
        assert_eq!(row.ref_allele(), "A");
        assert_eq!(row.phred(), "1.2");
        assert_eq!(row.column(3), "G");
        assert_eq!(row.line_number(), 3);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let row = RawScoreRow::parse(b"1\t5\tC\tT\t0.1\t9.9\tGENE".to_vec(), 7).unwrap();
        assert_eq!(row.columns.len(), 7);
        assert_eq!(row.phred(), "9.9");
        assert_eq!(row.column(6), "GENE");
    }

    #[test]
    fn test_too_few_columns() {
        let err = RawScoreRow::parse(b"chr1\t100\tA\tG\t0.25".to_vec(), 12).unwrap_err();
        match err {
            CaddError::MalformedRecord { line, fields } => {
                assert_eq!(line, 12);
                assert_eq!(fields, 5);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_in_ignored_column() {
        let row = RawScoreRow::parse(b"1\t1\tA\t\xff\t0\xfe\t1.5".to_vec(), 3).unwrap();
        assert_eq!(row.chrom(), "1");
        assert_eq!(row.ref_allele(), "A");
        assert_eq!(row.phred(), "1.5");
        assert_eq!(row.column(3), "\u{fffd}");
    }

    #[test]
    fn test_invalid_utf8_in_used_column() {
        let err = RawScoreRow::parse(b"1\t1\tA\tG\t0\t1.\xff".to_vec(), 8).unwrap_err();
        match err {
            CaddError::Encoding { line, column } => {
                assert_eq!(line, 8);
                assert_eq!(column, PHRED_COLUMN);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
