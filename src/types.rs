use std::fmt;

use getset::Getters;
use itertools::Itertools;
use num_enum::TryFromPrimitive;
use strum::{Display, EnumString};

/// Leading lines of a CADD file (version banner and column names) that carry no scores.
pub(crate) const HEADER_LINES: usize = 2;
/// One row per possible alternate base at a reference position.
pub const ALLELES_PER_POSITION: usize = 3;
pub(crate) const MIN_FIELDS: usize = 6;

pub(crate) const CHROM_COLUMN: usize = 0;
pub(crate) const POS_COLUMN: usize = 1;
pub(crate) const REF_COLUMN: usize = 2;
// columns 3 (alt) and 4 (raw score) are not carried over
pub(crate) const PHRED_COLUMN: usize = 5;

/// The three phred scores of one reference position, in the order they were read.
///
/// Position and scores are kept as the text found in the input so that nothing is
/// reformatted on the way through.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct ScoreGroup {
    pub(crate) chrom: String,
    pub(crate) pos: String,
    pub(crate) ref_allele: String,
    pub(crate) phred_scores: Vec<String>,
}

impl fmt::Display for ScoreGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.ref_allele,
            self.phred_scores.iter().join("\t")
        )
    }
}

/// Value of the positional `debug` argument.
#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive)]
#[repr(u8)]
pub enum DebugMode {
    Off = 0,
    On = 1,
}

impl Default for DebugMode {
    fn default() -> Self {
        DebugMode::Off
    }
}

/// What to do with rows left over when the input ends in the middle of a position.
#[derive(Debug, Clone, Copy, Eq, PartialEq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TrailingPolicy {
    /// Drop the rows and report how many were dropped.
    Lenient,
    /// Fail the run once all complete groups have been written.
    Strict,
}

impl Default for TrailingPolicy {
    fn default() -> Self {
        TrailingPolicy::Lenient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;
    use std::str::FromStr;

    #[test]
    fn test_score_group_display() {
        let group = ScoreGroup {
            chrom: "chr1".into(),
            pos: "100".into(),
            ref_allele: "A".into(),
            phred_scores: vec!["1.2".into(), "2.3".into(), "3.4".into()],
        };
        assert_eq!(group.to_string(), "chr1\t100\tA\t1.2\t2.3\t3.4");
        assert_eq!(group.phred_scores().len(), ALLELES_PER_POSITION);
    }

    #[test]
    fn test_debug_mode_from_flag() {
        assert_eq!(DebugMode::try_from(0u8).unwrap(), DebugMode::Off);
        assert_eq!(DebugMode::try_from(1u8).unwrap(), DebugMode::On);
        assert!(DebugMode::try_from(2u8).is_err());
    }

    #[test]
    fn test_trailing_policy_names() {
        assert_eq!(
            TrailingPolicy::from_str("strict").unwrap(),
            TrailingPolicy::Strict
        );
        assert_eq!(TrailingPolicy::Lenient.to_string(), "lenient");
        assert!(TrailingPolicy::from_str("lossy").is_err());
    }
}
