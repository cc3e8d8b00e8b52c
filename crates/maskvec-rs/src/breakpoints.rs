//! Per-column fill intervals derived straight from RLE counts.

use crate::error::Result;
use crate::mask;
use crate::types::{LineBreakpoints, Rle};

/// List the filled intervals of every column that holds a set pixel.
///
/// Counts are walked as (skip, fill) pairs over a running column-major pixel
/// index. A fill run that crosses column boundaries contributes
/// `(row_start, h)` to its first column, `(0, h)` to every column it fully
/// covers and `(0, row_end)` to its last column. Output is in increasing
/// column order; an empty mask yields an empty list.
pub fn extract_breakpoints(rle: &Rle) -> Result<Vec<LineBreakpoints>> {
    mask::validate(rle)?;
    let mut out: Vec<LineBreakpoints> = Vec::new();
    let h = rle.h as u64;
    if h == 0 {
        return Ok(out);
    }

    let mut sum = 0u64;
    for (i, &c) in rle.counts.iter().enumerate() {
        let c = c as u64;
        if i % 2 == 1 && c > 0 {
            let (start, end) = (sum, sum + c);
            let (col_start, row_start) = (start / h, start % h);
            let (col_end, row_end) = (end / h, end % h);

            if col_start == col_end {
                push_pair(&mut out, col_start, row_start, row_end);
            } else {
                push_pair(&mut out, col_start, row_start, h);
                for col in col_start + 1..col_end {
                    push_pair(&mut out, col, 0, h);
                }
                if row_end > 0 {
                    push_pair(&mut out, col_end, 0, row_end);
                }
            }
        }
        sum += c;
    }

    Ok(out)
}

fn push_pair(out: &mut Vec<LineBreakpoints>, col: u64, y1: u64, y2: u64) {
    let line = col as u32;
    match out.last_mut() {
        Some(last) if last.line == line => last.breakpoints.extend([y1 as u32, y2 as u32]),
        _ => out.push(LineBreakpoints {
            line,
            breakpoints: vec![y1 as u32, y2 as u32],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn line(line: u32, breakpoints: &[u32]) -> LineBreakpoints {
        LineBreakpoints {
            line,
            breakpoints: breakpoints.to_vec(),
        }
    }

    #[test]
    fn empty_mask_has_no_breakpoints() {
        let rle = Rle {
            h: 4,
            w: 5,
            counts: vec![20],
        };
        assert!(extract_breakpoints(&rle).unwrap().is_empty());
    }

    #[test]
    fn single_column_runs() {
        // 3x3, only the centre pixel set.
        let rle = Rle {
            h: 3,
            w: 3,
            counts: vec![4, 1, 4],
        };
        assert_eq!(extract_breakpoints(&rle).unwrap(), vec![line(1, &[1, 2])]);
    }

    #[test]
    fn several_runs_in_one_column_share_an_entry() {
        // h=5, column 0 rows {0, 2, 3}.
        let rle = Rle {
            h: 5,
            w: 2,
            counts: vec![0, 1, 1, 2, 6],
        };
        assert_eq!(
            extract_breakpoints(&rle).unwrap(),
            vec![line(0, &[0, 1, 2, 4])]
        );
    }

    #[test]
    fn multi_column_run_is_split_per_column() {
        // h=4, w=6: run from pixel 2 (col 0, row 2) to pixel 17 exclusive
        // (col 4, row 1) covers three whole columns in between.
        let rle = Rle {
            h: 4,
            w: 6,
            counts: vec![2, 15, 7],
        };
        assert_eq!(
            extract_breakpoints(&rle).unwrap(),
            vec![
                line(0, &[2, 4]),
                line(1, &[0, 4]),
                line(2, &[0, 4]),
                line(3, &[0, 4]),
                line(4, &[0, 1]),
            ]
        );
    }

    #[test]
    fn run_ending_on_column_boundary_has_no_empty_tail() {
        // h=3: run covers col 0 rows 1..3 and all of col 1.
        let rle = Rle {
            h: 3,
            w: 3,
            counts: vec![1, 5, 3],
        };
        assert_eq!(
            extract_breakpoints(&rle).unwrap(),
            vec![line(0, &[1, 3]), line(1, &[0, 3])]
        );
    }

    #[test]
    fn gap_columns_are_skipped() {
        let rle = Rle {
            h: 2,
            w: 4,
            counts: vec![0, 2, 4, 2],
        };
        assert_eq!(
            extract_breakpoints(&rle).unwrap(),
            vec![line(0, &[0, 2]), line(3, &[0, 2])]
        );
    }

    #[test]
    fn malformed_counts_are_rejected() {
        let rle = Rle {
            h: 2,
            w: 2,
            counts: vec![1, 1],
        };
        assert_eq!(
            extract_breakpoints(&rle),
            Err(Error::MalformedRle {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn pairs_iterates_intervals() {
        let lb = line(0, &[0, 1, 2, 4]);
        assert_eq!(lb.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 4)]);
    }
}
