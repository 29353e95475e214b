mod eager;
mod lazy;
pub use eager::ScoreRow;
pub use lazy::RawScoreRow;

/// The columns of a per-allele CADD row that survive aggregation.
pub trait Record {
    fn chrom(&self) -> &str;

    fn pos(&self) -> &str;

    fn ref_allele(&self) -> &str;

    fn phred(&self) -> &str;

    /// 1-based line in the input, header lines included.
    fn line_number(&self) -> usize;
}
