use std::ops::Range;

use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::multi::separated_list1;
use nom::IResult;

fn field(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till(|b| b == b'\t')(input)
}

fn fields(input: &[u8]) -> IResult<&[u8], Vec<&[u8]>> {
    separated_list1(char('\t'), field)(input)
}

/// Byte ranges of the tab-separated columns of `line`.
///
/// Empty columns are kept, so `"a\t\tb"` yields three ranges. Every input splits,
/// an empty line being a single empty column.
pub(crate) fn column_ranges(line: &[u8]) -> Vec<Range<usize>> {
    // take_till never fails on complete input and the list stops at the first non-tab
    let (_, columns) = fields(line).unwrap_or((line, vec![line]));
    let mut start = 0;
    columns
        .into_iter()
        .map(|column| {
            let range = start..start + column.len();
            // skip the tab
            start = range.end + 1;
            range
        })
        .collect()
}
