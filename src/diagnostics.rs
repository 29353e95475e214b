//! Progress reporting hooks for [`Pipeline`](crate::pipeline::Pipeline).
//!
//! The pipeline only talks to a [`Diagnostics`] value; whether anything is logged is
//! decided by whoever builds it.

use std::time::Instant;

use log::{debug, error, info};

use crate::error::CaddError;
use crate::pipeline::Summary;

pub trait Diagnostics {
    fn accumulation_started(&mut self) {}

    /// The flush threshold was reached and `groups` groups were written.
    fn flushed(&mut self, _groups: usize) {}

    /// Input is exhausted and the remaining `groups` groups were written.
    fn end_of_stream(&mut self, _groups: usize) {}

    fn failed(&mut self, _error: &CaddError) {}

    fn finished(&mut self, _summary: &Summary) {}
}

/// Reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {}

/// Reports through the `log` facade and times the run from construction on.
#[derive(Debug)]
pub struct LogDiagnostics {
    start: Instant,
}

impl LogDiagnostics {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for LogDiagnostics {
    fn accumulation_started(&mut self) {
        info!("accumulating score groups");
    }

    fn flushed(&mut self, groups: usize) {
        debug!("flush threshold reached, wrote {} groups", groups);
    }

    fn end_of_stream(&mut self, groups: usize) {
        info!("reached end of input, wrote remaining {} groups", groups);
    }

    fn failed(&mut self, error: &CaddError) {
        error!("{}", error);
    }

    fn finished(&mut self, summary: &Summary) {
        info!(
            "{} rows, {} groups, {} flushes",
            summary.rows, summary.groups, summary.flushes
        );
        info!(
            "Finished in {:.6} seconds",
            self.start.elapsed().as_secs_f64()
        );
    }
}
