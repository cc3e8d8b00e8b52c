//! Closed lattice loops, hole orientation and path-string output.

use std::fmt;

use crate::types::Point;

/// A cyclic sequence of lattice points; the last point connects back to the
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPath {
    points: Vec<Point>,
}

impl ClosedPath {
    pub fn new(points: Vec<Point>) -> Self {
        ClosedPath { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flip the traversal direction, keeping the first point in place.
    pub fn reverse(&mut self) {
        if self.points.len() > 1 {
            self.points[1..].reverse();
        }
    }

    /// Shoelace area in image coordinates (y down). Positive means the loop
    /// runs clockwise on screen.
    pub fn signed_area(&self) -> i64 {
        let n = self.points.len();
        let mut twice = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        }
        twice / 2
    }

    /// `[min_x, min_y, max_x, max_y]` over the vertices.
    pub fn bbox(&self) -> [u32; 4] {
        let mut bb = [u32::MAX, u32::MAX, 0, 0];
        for p in &self.points {
            bb[0] = bb[0].min(p.x);
            bb[1] = bb[1].min(p.y);
            bb[2] = bb[2].max(p.x);
            bb[3] = bb[3].max(p.y);
        }
        if self.points.is_empty() {
            return [0; 4];
        }
        bb
    }

    /// Even-odd ray casting test. Points exactly on the boundary give an
    /// unspecified answer; callers probe at pixel centres, which never lie
    /// on a lattice edge.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let n = self.points.len();
        let mut inside = false;
        for i in 0..n {
            let (ax, ay) = (self.points[i].x as f64, self.points[i].y as f64);
            let b = self.points[(i + 1) % n];
            let (bx, by) = (b.x as f64, b.y as f64);
            if (ay > py) != (by > py) {
                let xi = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < xi {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Centre of the pixel tucked into the corner at the first vertex.
    ///
    /// Loops start at their smallest vertex, whose edges run east and south,
    /// so this pixel is always enclosed by the loop itself.
    fn probe(&self) -> (f64, f64) {
        let p = self.points[0];
        (p.x as f64 + 0.5, p.y as f64 + 0.5)
    }

    /// `M x0 y0 L x1 y1 x2 y2 ...` without a closing `Z`.
    pub fn to_path_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClosedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Ok(());
        };
        write!(f, "M {} {}", first.x, first.y)?;
        if let Some(second) = iter.next() {
            write!(f, " L {} {}", second.x, second.y)?;
            for p in iter {
                write!(f, " {} {}", p.x, p.y)?;
            }
        }
        Ok(())
    }
}

/// Orient loops so a nonzero fill reproduces the mask.
///
/// Loops are taken in extraction order. Each one is probed at the pixel in
/// its starting corner; if an odd number of already resolved loops contain
/// that pixel the loop bounds a hole and is reversed. Outer boundaries start
/// at smaller vertices than the holes they enclose, so every enclosing loop
/// has been resolved by the time a hole is looked at.
pub fn resolve_winding(loops: Vec<ClosedPath>) -> Vec<ClosedPath> {
    let mut resolved: Vec<ClosedPath> = Vec::with_capacity(loops.len());
    for mut lp in loops {
        if lp.is_empty() {
            continue;
        }
        let (px, py) = lp.probe();
        let depth = resolved.iter().filter(|r| r.contains(px, py)).count();
        if depth % 2 == 1 {
            lp.reverse();
        }
        resolved.push(lp);
    }
    resolved
}

/// Nonzero winding number of `loops` around `(px, py)`.
///
/// Edges crossing the ray towards +x count +1 when heading down (increasing
/// y) and -1 when heading up. With resolved loops this is 1 on filled pixel
/// centres and 0 elsewhere.
pub fn winding_number(loops: &[ClosedPath], px: f64, py: f64) -> i32 {
    let mut wn = 0;
    for lp in loops {
        let n = lp.points.len();
        for i in 0..n {
            let (a, b) = (lp.points[i], lp.points[(i + 1) % n]);
            let (ax, ay) = (a.x as f64, a.y as f64);
            let (bx, by) = (b.x as f64, b.y as f64);
            if (ay > py) != (by > py) {
                let xi = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < xi {
                    wn += if by > ay { 1 } else { -1 };
                }
            }
        }
    }
    wn
}
