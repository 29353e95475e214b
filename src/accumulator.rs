use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::types::ScoreGroup;

/// Flush cadence used by the command line tool, in groups.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 50_000_000;

/// Buffers formatted groups and hands them to `sink` in large writes.
pub struct OutputAccumulator<W: Write> {
    buffer: String,
    pending: usize,
    threshold: usize,
    sink: W,
}

impl<W: Write> OutputAccumulator<W> {
    /// A threshold of zero is treated as one, i.e. every group is written on its own.
    pub fn new(sink: W, threshold: usize) -> Self {
        Self {
            buffer: String::new(),
            pending: 0,
            threshold: threshold.max(1),
            sink,
        }
    }

    /// Append one group. Returns the number of groups written if this push filled the buffer.
    pub fn push(&mut self, group: &ScoreGroup) -> Result<Option<usize>> {
        // formatting into a String cannot fail
        let _ = writeln!(self.buffer, "{}", group);
        self.pending += 1;
        if self.pending >= self.threshold {
            Ok(Some(self.flush()?))
        } else {
            Ok(None)
        }
    }

    /// Write everything buffered so far, returning how many groups that was.
    pub fn flush(&mut self) -> Result<usize> {
        self.sink.write_all(self.buffer.as_bytes())?;
        self.sink.flush()?;
        let flushed = self.pending;
        self.buffer.clear();
        self.pending = 0;
        Ok(flushed)
    }

    /// Groups buffered since the last flush.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Flush the remainder and give back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Remembers every write call separately.
    #[derive(Default)]
    struct Chunks(Vec<Vec<u8>>);

    impl Write for Chunks {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn group(pos: usize) -> ScoreGroup {
        ScoreGroup {
            chrom: "chr1".into(),
            pos: pos.to_string(),
            ref_allele: "A".into(),
            phred_scores: vec!["1".into(), "2".into(), "3".into()],
        }
    }

    #[test]
    fn test_nothing_written_below_threshold() {
        let mut acc = OutputAccumulator::new(Chunks::default(), 10);
        for pos in 0..9 {
            assert_eq!(acc.push(&group(pos)).unwrap(), None);
        }
        assert_eq!(acc.pending(), 9);
        let sink = acc.into_inner().unwrap();
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].iter().filter(|&&b| b == b'\n').count(), 9);
    }

    #[test]
    fn test_flush_on_threshold() {
        let mut acc = OutputAccumulator::new(Chunks::default(), 2);
        assert_eq!(acc.push(&group(1)).unwrap(), None);
        assert_eq!(acc.push(&group(2)).unwrap(), Some(2));
        assert_eq!(acc.pending(), 0);
        assert_eq!(acc.push(&group(3)).unwrap(), None);
        let sink = acc.into_inner().unwrap();
        assert_eq!(
            sink.0,
            vec![
                b"chr1\t1\tA\t1\t2\t3\nchr1\t2\tA\t1\t2\t3\n".to_vec(),
                b"chr1\t3\tA\t1\t2\t3\n".to_vec(),
            ]
        );
    }

    #[test]
    fn test_small_threshold_concatenates_to_single_flush() {
        let mut small = OutputAccumulator::new(Chunks::default(), 3);
        let mut large = OutputAccumulator::new(Vec::new(), DEFAULT_FLUSH_THRESHOLD);
        for pos in 0..10 {
            small.push(&group(pos)).unwrap();
            large.push(&group(pos)).unwrap();
        }
        let small = small.into_inner().unwrap();
        let large = large.into_inner().unwrap();
        assert_eq!(small.0.len(), 4);
        assert_eq!(small.0.concat(), large);
    }

    #[test]
    fn test_zero_threshold_writes_every_group() {
        let mut acc = OutputAccumulator::new(Vec::new(), 0);
        assert_eq!(acc.threshold, 1);
        assert_eq!(acc.push(&group(5)).unwrap(), Some(1));
    }

    #[test]
    fn test_empty_flush_writes_nothing() {
        let mut acc = OutputAccumulator::new(Chunks::default(), 4);
        assert_eq!(acc.flush().unwrap(), 0);
        assert!(acc.into_inner().unwrap().0.is_empty());
    }
}
