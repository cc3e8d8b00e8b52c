//! Boundary tracing from column breakpoints to oriented lattice loops.
//!
//! Lattice lines are swept left to right. At line `x` the toggle rows of the
//! trailing column `x - 1` and the leading column `x` are merged in increasing
//! y order:
//! - a row toggling on one side only is the end of a vertical edge on line
//!   `x`, and ends (left side) or starts (right side) a horizontal run;
//! - a row toggling on both sides continues the horizontal run straight
//!   through, unless the four pixels around the corner form a checkerboard,
//!   in which case the corner becomes a degree-4 vertex.
//!
//! Horizontal runs are held open per row and only committed once a vertex on
//! some later line stops them, so a flat boundary of any length becomes a
//! single edge.

use log::debug;
use rayon::prelude::*;

use crate::breakpoints::extract_breakpoints;
use crate::error::Result;
use crate::graph::EdgeGraph;
use crate::mask;
use crate::params::Params;
use crate::polygon::{resolve_winding, ClosedPath};
use crate::types::{Bitmap, LineBreakpoints, Point, Rle};

const NO_RUN: u32 = u32::MAX;

/// Sorted rows at which a column switches between unset and set.
#[derive(Debug)]
struct Column {
    x: u32,
    toggles: Vec<u32>,
}

impl Column {
    /// Equal breakpoints cancel, so touching or empty intervals collapse.
    fn normalize(&mut self) {
        self.toggles.sort_unstable();
        let mut out: Vec<u32> = Vec::with_capacity(self.toggles.len());
        for &y in &self.toggles {
            if out.last() == Some(&y) {
                out.pop();
            } else {
                out.push(y);
            }
        }
        self.toggles = out;
    }

    fn is_filled(&self, row: u32) -> bool {
        self.toggles.partition_point(|&t| t <= row) % 2 == 1
    }
}

/// Group breakpoints by column, dropping columns outside `[0, w)` and
/// clamping rows to `h`.
fn group_columns(lines: &[LineBreakpoints], h: u32, w: u32) -> Vec<Column> {
    let mut sorted: Vec<&LineBreakpoints> = lines.iter().filter(|l| l.line < w).collect();
    sorted.sort_by_key(|l| l.line);

    let mut out: Vec<Column> = Vec::with_capacity(sorted.len());
    for lb in sorted {
        let ys = lb.breakpoints.iter().map(|&y| y.min(h));
        match out.last_mut() {
            Some(col) if col.x == lb.line => col.toggles.extend(ys),
            _ => out.push(Column {
                x: lb.line,
                toggles: ys.collect(),
            }),
        }
    }
    for col in &mut out {
        col.normalize();
    }
    out.retain(|c| !c.toggles.is_empty());
    out
}

fn column_at(columns: &[Column], x: i64) -> Option<&Column> {
    let x = u32::try_from(x).ok()?;
    columns
        .binary_search_by_key(&x, |c| c.x)
        .ok()
        .map(|i| &columns[i])
}

fn is_filled(columns: &[Column], x: i64, y: i64) -> bool {
    y >= 0 && column_at(columns, x).is_some_and(|c| c.is_filled(y as u32))
}

struct EdgeBuilder {
    graph: EdgeGraph,
    /// Open horizontal run start x, indexed by row.
    runs: Vec<u32>,
}

impl EdgeBuilder {
    fn new(h: u32) -> Self {
        EdgeBuilder {
            graph: EdgeGraph::new(h),
            runs: vec![NO_RUN; h as usize + 1],
        }
    }

    fn open_run(&mut self, x: u32, y: u32) {
        self.runs[y as usize] = x;
    }

    /// Commit the open run on row `y` so that it ends on line `x`, the line
    /// carrying the vertical edge that stopped it.
    fn close_run(&mut self, x: u32, y: u32) {
        let start = std::mem::replace(&mut self.runs[y as usize], NO_RUN);
        if start != NO_RUN {
            self.graph.add_edge(Point::new(start, y), Point::new(x, y));
        }
    }

    /// Emit the edges on lattice line `x` between `left` (column `x - 1`)
    /// and `right` (column `x`). Either side may be absent.
    fn sweep_line(&mut self, x: u32, left: Option<&Column>, right: Option<&Column>) {
        let lt: &[u32] = left.map_or(&[][..], |c| c.toggles.as_slice());
        let rt: &[u32] = right.map_or(&[][..], |c| c.toggles.as_slice());
        let (mut i, mut j) = (0, 0);
        let mut inside = false;
        let mut from = 0u32;

        loop {
            let (y, on_left, on_right) = match (lt.get(i), rt.get(j)) {
                (Some(&a), Some(&b)) if a == b => {
                    i += 1;
                    j += 1;
                    (a, true, true)
                }
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    (a, true, false)
                }
                (Some(&a), None) => {
                    i += 1;
                    (a, true, false)
                }
                (_, Some(&b)) => {
                    j += 1;
                    (b, false, true)
                }
                (None, None) => break,
            };

            if on_left && on_right {
                let filled_left = left.is_some_and(|c| c.is_filled(y));
                let filled_right = right.is_some_and(|c| c.is_filled(y));
                if filled_left == filled_right {
                    continue;
                }
                // Checkerboard corner: split both runs crossing here.
                self.close_run(x, y);
                self.open_run(x, y);
                if inside {
                    self.graph.add_edge(Point::new(x, from), Point::new(x, y));
                }
                from = y;
                continue;
            }

            if on_left {
                self.close_run(x, y);
            } else {
                self.open_run(x, y);
            }
            if inside {
                self.graph.add_edge(Point::new(x, from), Point::new(x, y));
            } else {
                from = y;
            }
            inside = !inside;
        }
    }
}

/// Pick the exit at a degree-4 vertex: the incoming edge borders exactly one
/// filled pixel at this corner, and the walk leaves along that pixel's other
/// edge.
fn turn(columns: &[Column], from: Point, at: Point, candidates: &[Point]) -> Point {
    let (ax, ay) = (at.x as i64, at.y as i64);
    let wanted = if from.x == at.x {
        let row = if from.y < at.y { ay - 1 } else { ay };
        let west = is_filled(columns, ax - 1, row);
        candidates
            .iter()
            .find(|c| c.y == at.y && (c.x < at.x) == west)
    } else {
        let col = if from.x < at.x { ax - 1 } else { ax };
        let north = is_filled(columns, col, ay - 1);
        candidates
            .iter()
            .find(|c| c.x == at.x && (c.y < at.y) == north)
    };
    wanted.copied().unwrap_or(candidates[0])
}

/// Trace the boundary of a mask given as column breakpoints.
///
/// Returns closed loops in extraction order (ascending first vertex). With
/// `params.resolve_holes` every loop is oriented so the filled side is on
/// the right when walking it in image coordinates, so outer boundaries run
/// clockwise on screen and holes counter-clockwise.
pub fn trace(lines: &[LineBreakpoints], h: u32, w: u32, params: &Params) -> Result<Vec<ClosedPath>> {
    let columns = group_columns(lines, h, w);
    let mut builder = EdgeBuilder::new(h);

    let mut prev: Option<&Column> = None;
    for col in &columns {
        match prev {
            Some(p) if p.x + 1 == col.x => builder.sweep_line(col.x, Some(p), Some(col)),
            Some(p) => {
                builder.sweep_line(p.x + 1, Some(p), None);
                builder.sweep_line(col.x, None, Some(col));
            }
            None => builder.sweep_line(col.x, None, Some(col)),
        }
        prev = Some(col);
    }
    if let Some(p) = prev {
        builder.sweep_line(p.x + 1, Some(p), None);
    }

    let edges = builder.graph.edge_count();
    let mut loops = builder
        .graph
        .extract_loops(|from, at, candidates| turn(&columns, from, at, candidates))?;

    if params.resolve_holes {
        loops = resolve_winding(loops);
    }
    if params.min_area > 0 {
        loops.retain(|l| l.signed_area().unsigned_abs() >= params.min_area);
    }

    debug!(
        "traced {} loops from {} edges over {} columns ({}x{})",
        loops.len(),
        edges,
        columns.len(),
        w,
        h
    );
    Ok(loops)
}

/// Decode-free tracing of an RLE mask into loops.
pub fn trace_rle(rle: &Rle, params: &Params) -> Result<Vec<ClosedPath>> {
    let lines = extract_breakpoints(rle)?;
    trace(&lines, rle.h, rle.w, params)
}

/// RLE to path strings, one per closed loop.
pub fn rle_to_paths(rle: &Rle, params: &Params) -> Result<Vec<String>> {
    Ok(trace_rle(rle, params)?
        .iter()
        .map(ClosedPath::to_path_string)
        .collect())
}

/// Bitmap to path strings via its canonical RLE.
pub fn bitmap_to_paths(bitmap: &Bitmap, params: &Params) -> Result<Vec<String>> {
    rle_to_paths(&mask::encode(bitmap), params)
}

/// Trace many masks in parallel. Results keep input order.
pub fn trace_many(rles: &[Rle], params: &Params) -> Vec<Result<Vec<String>>> {
    rles.par_iter().map(|rle| rle_to_paths(rle, params)).collect()
}
