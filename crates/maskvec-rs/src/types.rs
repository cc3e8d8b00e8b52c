use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mask;

/// Dense binary mask, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Bitmap {
    /// All-unset bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Bitmap {
            width,
            height,
            data: vec![false; pixel_count(width, height)],
        }
    }

    /// Wrap a row-major buffer; pixel `(row, col)` is at `row * width + col`.
    pub fn from_vec(width: u32, height: u32, data: Vec<bool>) -> Result<Self> {
        let expected = pixel_count(width, height);
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Bitmap {
            width,
            height,
            data,
        })
    }

    /// Build from a row-major alpha channel; any non-zero alpha is set.
    pub fn from_alpha(alpha: &[u8], width: u32, height: u32) -> Result<Self> {
        Self::from_vec(width, height, alpha.iter().map(|&a| a != 0).collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Panics if `row >= height` or `col >= width`.
    pub fn get(&self, row: u32, col: u32) -> bool {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.data[row as usize * self.width as usize + col as usize]
    }

    /// Panics if `row >= height` or `col >= width`.
    pub fn set(&mut self, row: u32, col: u32, value: bool) {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.data[row as usize * self.width as usize + col as usize] = value;
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.data
    }
}

/// Convert `(rows, cols)` of a host array into `(h, w)`.
pub fn checked_dims(rows: usize, cols: usize) -> Result<(u32, u32)> {
    let dim = |value: usize| u32::try_from(value).map_err(|_| Error::DimensionTooLarge { value });
    Ok((dim(rows)?, dim(cols)?))
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Run-length encoding for masks.
///
/// Serialized as `{"size": [h, w], "counts": [...]}`. Deserialization also
/// accepts COCO compressed string counts and rejects counts that do not cover
/// exactly `h * w` pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RleJson", into = "RleJson")]
pub struct Rle {
    pub h: u32,
    pub w: u32,
    /// Run counts: alternating runs of 0s and 1s, starting with 0s, column-major.
    pub counts: Vec<u32>,
}

impl Rle {
    /// Total pixel count `h * w`.
    pub fn len(&self) -> u64 {
        self.h as u64 * self.w as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build from raw counts, rejecting counts that do not cover `h * w`
    /// pixels.
    pub fn from_counts(h: u32, w: u32, counts: Vec<u32>) -> Result<Self> {
        let rle = Rle { h, w, counts };
        mask::validate(&rle)?;
        Ok(rle)
    }

    /// Parse COCO compressed counts with the same coverage check.
    pub fn from_compressed(s: &str, h: u32, w: u32) -> Result<Self> {
        let rle = mask::rle_from_string(s, h, w)?;
        mask::validate(&rle)?;
        Ok(rle)
    }
}

#[derive(Serialize, Deserialize)]
struct RleJson {
    size: [u32; 2],
    counts: Counts,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Counts {
    List(Vec<u32>),
    Compressed(String),
}

impl TryFrom<RleJson> for Rle {
    type Error = Error;

    fn try_from(json: RleJson) -> Result<Self> {
        let [h, w] = json.size;
        match json.counts {
            Counts::List(counts) => Rle::from_counts(h, w, counts),
            Counts::Compressed(s) => Rle::from_compressed(&s, h, w),
        }
    }
}

impl From<Rle> for RleJson {
    fn from(rle: Rle) -> Self {
        RleJson {
            size: [rle.h, rle.w],
            counts: Counts::List(rle.counts),
        }
    }
}

/// Filled intervals of one mask column.
///
/// `breakpoints` has even length; each consecutive pair `(y1, y2)` is the
/// half-open filled interval `[y1, y2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreakpoints {
    pub line: u32,
    pub breakpoints: Vec<u32>,
}

impl LineBreakpoints {
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.breakpoints.chunks_exact(2).map(|p| (p[0], p[1]))
    }
}

/// A pixel-corner lattice point. Ordering is lexicographic on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}
