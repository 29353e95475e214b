use std::io::{BufRead, Write};

use crate::accumulator::{OutputAccumulator, DEFAULT_FLUSH_THRESHOLD};
use crate::diagnostics::Diagnostics;
use crate::error::{CaddError, Result};
use crate::grouper::TripletGrouper;
use crate::reader::ScoreRows;
use crate::record::RawScoreRow;
use crate::types::TrailingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Groups to buffer before writing to the sink.
    pub flush_threshold: usize,
    pub trailing: TrailingPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            trailing: TrailingPolicy::default(),
        }
    }
}

/// Counts for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Data rows read, header lines excluded.
    pub rows: usize,
    pub groups: usize,
    /// Non-empty writes to the sink.
    pub flushes: usize,
    /// Rows of an unfinished group at the end of the input.
    pub dropped_rows: usize,
}

/// Rows in, one line per position out.
pub struct Pipeline<W: Write, D: Diagnostics> {
    grouper: TripletGrouper,
    accumulator: OutputAccumulator<W>,
    trailing: TrailingPolicy,
    diagnostics: D,
    summary: Summary,
}

impl<W: Write, D: Diagnostics> Pipeline<W, D> {
    pub fn new(sink: W, config: PipelineConfig, diagnostics: D) -> Self {
        Self {
            grouper: TripletGrouper::new(),
            accumulator: OutputAccumulator::new(sink, config.flush_threshold),
            trailing: config.trailing,
            diagnostics,
            summary: Summary::default(),
        }
    }

    /// Drive `rows` to the end.
    ///
    /// On any error the groups completed so far are written before the error is
    /// returned; nothing is written after that.
    pub fn run<R: BufRead>(mut self, rows: ScoreRows<R>) -> Result<Summary> {
        self.diagnostics.accumulation_started();
        for row in rows {
            if let Err(e) = row.and_then(|row| self.consume(&row)) {
                return Err(self.abort(e));
            }
        }

        let flushed = self.accumulator.flush()?;
        self.note_flush(flushed);
        self.diagnostics.end_of_stream(flushed);

        let dropped = self.grouper.pending();
        self.summary.dropped_rows = dropped;
        if dropped > 0 && self.trailing == TrailingPolicy::Strict {
            let e = CaddError::TruncatedGroup { rows: dropped };
            self.diagnostics.failed(&e);
            return Err(e);
        }

        self.diagnostics.finished(&self.summary);
        Ok(self.summary)
    }

    fn consume(&mut self, row: &RawScoreRow) -> Result<()> {
        self.summary.rows += 1;
        if let Some(group) = self.grouper.push(row)? {
            self.summary.groups += 1;
            if let Some(flushed) = self.accumulator.push(&group)? {
                self.note_flush(flushed);
                self.diagnostics.flushed(flushed);
            }
        }
        Ok(())
    }

    fn note_flush(&mut self, groups: usize) {
        if groups > 0 {
            self.summary.flushes += 1;
        }
    }

    fn abort(&mut self, error: CaddError) -> CaddError {
        self.diagnostics.failed(&error);
        match self.accumulator.flush() {
            Ok(flushed) => {
                self.note_flush(flushed);
                error
            }
            // the sink is gone, that is the more pressing problem
            Err(flush_error) => flush_error,
        }
    }
}
