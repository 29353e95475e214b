//! Regrouping of consecutive per-allele rows into one record per position.
//!
//! CADD lists the three possible alternate bases of a reference position on three
//! adjacent rows. The grouper relies on that ordering instead of keying by position,
//! so it only ever holds the one group being built.

use std::mem;

use crate::error::{CaddError, Result};
use crate::record::Record;
use crate::types::{ScoreGroup, ALLELES_PER_POSITION};

#[derive(Debug, Default)]
pub struct TripletGrouper {
    /// Rows taken into the current group, 0 to 2 between calls.
    position_count: usize,
    chrom: String,
    pos: String,
    ref_allele: String,
    phred_scores: Vec<String>,
}

impl TripletGrouper {
    pub fn new() -> Self {
        Self {
            phred_scores: Vec::with_capacity(ALLELES_PER_POSITION),
            ..Default::default()
        }
    }

    /// Take one row. Returns the finished group when `row` is the third of its position.
    pub fn push<R: Record>(&mut self, row: &R) -> Result<Option<ScoreGroup>> {
        match self.position_count {
            0 => {
                self.chrom.clear();
                self.chrom.push_str(row.chrom());
                self.pos.clear();
                self.pos.push_str(row.pos());
                self.ref_allele.clear();
                self.ref_allele.push_str(row.ref_allele());
                self.phred_scores.clear();
                self.phred_scores.push(row.phred().to_owned());
                self.position_count = 1;
                Ok(None)
            }
            n if n < ALLELES_PER_POSITION => {
                self.phred_scores.push(row.phred().to_owned());
                if n + 1 == ALLELES_PER_POSITION {
                    self.position_count = 0;
                    Ok(Some(self.take_group()))
                } else {
                    self.position_count = n + 1;
                    Ok(None)
                }
            }
            n => Err(CaddError::GroupingViolation {
                line: row.line_number(),
                position_count: n,
            }),
        }
    }

    /// Rows of a group that has been started but not finished.
    pub fn pending(&self) -> usize {
        self.position_count
    }

    /// Forget a partially built group.
    pub fn reset(&mut self) {
        self.position_count = 0;
        self.phred_scores.clear();
    }

    #[cfg(test)]
    pub(crate) fn force_pending(&mut self, position_count: usize) {
        self.position_count = position_count;
    }

    fn take_group(&mut self) -> ScoreGroup {
        ScoreGroup {
            chrom: mem::take(&mut self.chrom),
            pos: mem::take(&mut self.pos),
            ref_allele: mem::take(&mut self.ref_allele),
            phred_scores: mem::replace(
                &mut self.phred_scores,
                Vec::with_capacity(ALLELES_PER_POSITION),
            ),
        }
    }
}
