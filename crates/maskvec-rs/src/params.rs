use serde::{Deserialize, Serialize};

/// Options controlling how traced loops are post-processed.
///
/// Defaults orient holes against their enclosing loops and keep every loop,
/// which is what a renderer filling with the nonzero rule expects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {
    /// Reverse loops nested an odd number of times so holes wind opposite to
    /// their outer boundary.
    pub resolve_holes: bool,
    /// Drop loops whose absolute enclosed area (in pixels) is below this value.
    /// Applied after hole resolution; `0` keeps everything.
    pub min_area: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            resolve_holes: true,
            min_area: 0,
        }
    }
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }
}
