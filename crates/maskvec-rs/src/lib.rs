//! Conversions between a binary mask bitmap, its COCO-style column-major
//! run-length encoding, and the closed boundary loops of the mask.
//!
//! ```
//! use maskvec_rs::{mask, rle_to_paths, Bitmap, Params};
//!
//! let mut bm = Bitmap::new(3, 3);
//! bm.set(1, 1, true);
//! let rle = mask::encode(&bm);
//! assert_eq!(rle.counts, vec![4, 1, 4]);
//! let paths = rle_to_paths(&rle, &Params::default()).unwrap();
//! assert_eq!(paths, vec!["M 1 1 L 2 1 2 2 1 2"]);
//! ```

pub mod breakpoints;
pub mod error;
pub mod graph;
pub mod mask;
pub mod params;
pub mod polygon;
pub mod trace;
pub mod types;

#[cfg(test)]
mod test_util;

pub use breakpoints::extract_breakpoints;
pub use error::{Error, Result};
pub use graph::EdgeGraph;
pub use params::Params;
pub use polygon::{resolve_winding, winding_number, ClosedPath};
pub use trace::{bitmap_to_paths, rle_to_paths, trace, trace_many, trace_rle};
pub use types::{checked_dims, Bitmap, LineBreakpoints, Point, Rle};
