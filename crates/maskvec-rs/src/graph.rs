//! Pixel-corner edge graph and closed-walk extraction.

use std::collections::BTreeMap;

use log::trace;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::polygon::ClosedPath;
use crate::types::Point;

type Adjacency = SmallVec<[u64; 4]>;

/// Undirected boundary graph on the pixel-corner lattice.
///
/// Vertices are keyed by `x * (height + 1) + y`, so map order is
/// lexicographic `(x, y)` order and the first entry is always the smallest
/// remaining vertex. A mask boundary never gives a vertex more than four
/// neighbours.
#[derive(Debug, Clone)]
pub struct EdgeGraph {
    stride: u64,
    adjacency: BTreeMap<u64, Adjacency>,
    edges: usize,
}

impl EdgeGraph {
    /// Empty graph for a mask of the given height.
    pub fn new(height: u32) -> Self {
        EdgeGraph {
            stride: height as u64 + 1,
            adjacency: BTreeMap::new(),
            edges: 0,
        }
    }

    fn key(&self, p: Point) -> u64 {
        p.x as u64 * self.stride + p.y as u64
    }

    fn point(&self, key: u64) -> Point {
        Point::new((key / self.stride) as u32, (key % self.stride) as u32)
    }

    /// Connect `a` and `b`. Self loops and repeated edges are ignored.
    pub fn add_edge(&mut self, a: Point, b: Point) {
        if a == b {
            return;
        }
        let (ka, kb) = (self.key(a), self.key(b));
        let adj = self.adjacency.entry(ka).or_default();
        if adj.contains(&kb) {
            return;
        }
        adj.push(kb);
        self.adjacency.entry(kb).or_default().push(ka);
        self.edges += 1;
    }

    /// Remove the edge between `a` and `b`, dropping vertices left without
    /// neighbours. Returns whether the edge existed.
    pub fn remove_edge(&mut self, a: Point, b: Point) -> bool {
        let (ka, kb) = (self.key(a), self.key(b));
        if !self.detach(ka, kb) {
            return false;
        }
        self.detach(kb, ka);
        self.edges -= 1;
        true
    }

    fn detach(&mut self, from: u64, to: u64) -> bool {
        let Some(adj) = self.adjacency.get_mut(&from) else {
            return false;
        };
        let Some(pos) = adj.iter().position(|&k| k == to) else {
            return false;
        };
        adj.swap_remove(pos);
        if adj.is_empty() {
            self.adjacency.remove(&from);
        }
        true
    }

    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency
            .get(&self.key(p))
            .into_iter()
            .flat_map(|adj| adj.iter().map(|&k| self.point(k)))
    }

    pub fn degree(&self, p: Point) -> usize {
        self.adjacency.get(&self.key(p)).map_or(0, |adj| adj.len())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    /// Consume the graph into closed walks.
    ///
    /// Each walk starts at the smallest remaining vertex and leaves through
    /// its largest neighbour. Traversed edges are removed from both
    /// endpoints. Where more than one edge remains at a vertex, `turn` is
    /// called with the previous vertex, the current vertex and the remaining
    /// neighbours, and must return one of those neighbours.
    ///
    /// Fails with [`Error::UnclosedBoundary`] if a walk strands on a vertex
    /// before getting back to its start, which only happens on an odd-degree
    /// graph.
    pub fn extract_loops<F>(mut self, mut turn: F) -> Result<Vec<ClosedPath>>
    where
        F: FnMut(Point, Point, &[Point]) -> Point,
    {
        let mut loops = Vec::new();

        while let Some((start_key, first_key)) = self
            .adjacency
            .iter()
            .next()
            .map(|(&k, adj)| (k, adj.iter().copied().max()))
        {
            let start = self.point(start_key);
            let Some(first_key) = first_key else {
                self.adjacency.remove(&start_key);
                continue;
            };
            let first = self.point(first_key);
            self.remove_edge(start, first);

            let mut points = vec![start];
            let (mut prev, mut cur) = (start, first);
            while cur != start {
                points.push(cur);
                let candidates: SmallVec<[Point; 4]> = self.neighbors(cur).collect();
                let next = match candidates.len() {
                    0 => return Err(Error::UnclosedBoundary { x: cur.x, y: cur.y }),
                    1 => candidates[0],
                    _ => turn(prev, cur, &candidates),
                };
                if !self.remove_edge(cur, next) {
                    return Err(Error::UnclosedBoundary { x: cur.x, y: cur.y });
                }
                prev = cur;
                cur = next;
            }

            trace!(
                "closed loop of {} vertices starting at ({}, {})",
                points.len(),
                start.x,
                start.y
            );
            loops.push(ClosedPath::new(points));
        }

        Ok(loops)
    }
}
