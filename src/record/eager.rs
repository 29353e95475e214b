use crate::record::{RawScoreRow, Record};

/// A row with its used columns copied out of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub(crate) chrom: String,
    pub(crate) pos: String,
    pub(crate) ref_allele: String,
    pub(crate) phred: String,
    pub(crate) line_number: usize,
}

impl ScoreRow {
    pub fn new(
        chrom: &str,
        pos: &str,
        ref_allele: &str,
        phred: &str,
        line_number: usize,
    ) -> Self {
        Self {
            chrom: chrom.to_owned(),
            pos: pos.to_owned(),
            ref_allele: ref_allele.to_owned(),
            phred: phred.to_owned(),
            line_number,
        }
    }
}

impl From<&RawScoreRow> for ScoreRow {
    fn from(raw: &RawScoreRow) -> Self {
        Self::new(
            raw.chrom(),
            raw.pos(),
            raw.ref_allele(),
            raw.phred(),
            raw.line_number(),
        )
    }
}

impl Record for ScoreRow {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn pos(&self) -> &str {
        &self.pos
    }

    fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    fn phred(&self) -> &str {
        &self.phred
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}
