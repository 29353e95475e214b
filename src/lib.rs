//! Collapse per-allele CADD rows into one line per reference position.
//!
//! A CADD file lists every possible single-nucleotide substitution on its own row, so
//! each reference position appears three times in a row, once per alternate base. This
//! crate streams such a file and writes `chrom, pos, ref` followed by the three phred
//! scores in input order.
pub mod accumulator;
pub mod diagnostics;
pub mod error;
pub mod grouper;
pub(crate) mod parser;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod types;

pub use error::{CaddError, Result};
pub use pipeline::{Pipeline, PipelineConfig, Summary};
pub use reader::ScoreRows;
pub use types::ScoreGroup;

#[cfg(test)]
mod test {

    use super::diagnostics::Silent;
    use super::reader::ScoreRows;
    use super::{Pipeline, PipelineConfig};

    const EXAMPLE: &str = "resources/example.cadd.tsv";

    #[test]
    fn test_header() {
        let records = ScoreRows::from_path(EXAMPLE).unwrap();
        assert_eq!(
            records.header()[1],
            "#Chrom\tPos\tRef\tAlt\tRawScore\tPHRED"
        );
    }

    #[test]
    fn test_example_file() {
        let records = ScoreRows::from_path(EXAMPLE).unwrap();
        let mut out = Vec::new();
        let summary = Pipeline::new(&mut out, PipelineConfig::default(), Silent)
            .run(records)
            .unwrap();
        assert_eq!(summary.rows, 12);
        assert_eq!(summary.groups, 4);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out.lines().next(),
            Some("1\t10001\tT\t8.478\t8.921\t8.701")
        );
        assert!(out.lines().all(|l| l.split('\t').count() == 6));
    }
}
