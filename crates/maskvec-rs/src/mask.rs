//! Column-major run-length coding of binary masks.
//!
//! Counts follow the COCO convention: runs alternate starting with unset
//! pixels, pixels are visited column by column (all rows of column 0, then
//! column 1, ...), and a mask whose first pixel is set starts with an explicit
//! zero-length run. The compressed string form matches `rleToString` /
//! `rleFrString` from the COCO mask API.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::types::{pixel_count, Bitmap, Rle};

/// Encode a bitmap into canonical RLE.
///
/// Never emits a zero-length run except the leading one required when the
/// first pixel is set.
pub fn encode(bitmap: &Bitmap) -> Rle {
    let data = bitmap.as_slice();
    encode_with(bitmap.height(), bitmap.width(), |i| data[i])
}

/// Threshold a row-major score map (`value > threshold` is set) and encode it.
///
/// `scores.len()` must equal `h * w`.
pub fn encode_from_scores(scores: &[f32], h: u32, w: u32, threshold: f32) -> Result<Rle> {
    let expected = pixel_count(w, h);
    if scores.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: scores.len(),
        });
    }
    Ok(encode_with(h, w, |i| scores[i] > threshold))
}

/// Encode many bitmaps in parallel.
pub fn encode_many(bitmaps: &[Bitmap]) -> Vec<Rle> {
    bitmaps.par_iter().map(encode).collect()
}

/// Shared column-major run pass. `is_set` receives a row-major pixel index.
fn encode_with<F: Fn(usize) -> bool>(h: u32, w: u32, is_set: F) -> Rle {
    let (hu, wu) = (h as usize, w as usize);
    let mut counts = Vec::new();
    let mut p = false;
    let mut c: u32 = 0;

    for x in 0..wu {
        for y in 0..hu {
            let v = is_set(y * wu + x);
            if v != p {
                counts.push(c);
                c = 0;
                p = v;
            }
            c += 1;
        }
    }
    counts.push(c);

    Rle { h, w, counts }
}

/// Check that the counts cover exactly `h * w` pixels.
pub fn validate(rle: &Rle) -> Result<()> {
    let actual: u64 = rle.counts.iter().map(|&c| c as u64).sum();
    let expected = rle.len();
    if actual != expected {
        return Err(Error::MalformedRle { expected, actual });
    }
    Ok(())
}

/// Decode an RLE into a row-major bitmap.
///
/// Rejects the whole input with [`Error::MalformedRle`] if the counts do not
/// sum to `h * w`; nothing is partially decoded.
pub fn decode(rle: &Rle) -> Result<Bitmap> {
    validate(rle)?;
    let mut bitmap = Bitmap::new(rle.w, rle.h);
    let h = rle.h as usize;
    let w = rle.w as usize;
    let data = bitmap.as_mut_slice();

    let mut idx = 0usize;
    for (i, &c) in rle.counts.iter().enumerate() {
        let c = c as usize;
        if i % 2 == 1 {
            for k in idx..idx + c {
                data[(k % h) * w + k / h] = true;
            }
        }
        idx += c;
    }
    Ok(bitmap)
}

/// Drop zero-length runs (other than a required leading one) and merge the
/// runs they separated.
pub fn canonicalize(rle: &Rle) -> Rle {
    let mut counts: Vec<u32> = Vec::with_capacity(rle.counts.len());
    let mut last = false;

    for (i, &c) in rle.counts.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let v = i % 2 == 1;
        match counts.last_mut() {
            Some(tail) if v == last => *tail += c,
            Some(_) => counts.push(c),
            None => {
                if v {
                    counts.push(0);
                }
                counts.push(c);
            }
        }
        last = v;
    }
    if counts.is_empty() {
        counts.push(0);
    }

    Rle {
        h: rle.h,
        w: rle.w,
        counts,
    }
}

/// Number of set pixels. Only sums the odd-indexed runs.
pub fn area(rle: &Rle) -> u64 {
    rle.counts
        .iter()
        .skip(1)
        .step_by(2)
        .map(|&c| c as u64)
        .sum()
}

/// Bounding box `[x, y, w, h]` of the set pixels, all zeros for an empty mask.
pub fn to_bbox(rle: &Rle) -> [u32; 4] {
    let h = rle.h as u64;
    if h == 0 || rle.w == 0 {
        return [0; 4];
    }

    let mut xs = u64::MAX;
    let mut xe = 0u64;
    let mut ys = u64::MAX;
    let mut ye = 0u64;
    let mut has_any = false;

    let mut cc = 0u64;
    for (i, &c) in rle.counts.iter().enumerate() {
        let c = c as u64;
        if i % 2 == 1 && c > 0 {
            has_any = true;
            let (x1, y1) = (cc / h, cc % h);
            let end = cc + c - 1;
            let (x2, y2) = (end / h, end % h);

            xs = xs.min(x1);
            xe = xe.max(x2 + 1);
            if x1 != x2 {
                // Covers a column boundary, so every row is hit somewhere.
                ys = 0;
                ye = h;
            } else {
                ys = ys.min(y1);
                ye = ye.max(y2 + 1);
            }
        }
        cc += c;
    }

    if !has_any {
        return [0; 4];
    }
    [xs as u32, ys as u32, (xe - xs) as u32, (ye - ys) as u32]
}

/// Compress counts into the COCO string format.
///
/// Each count is written as 5-bit groups, least significant first, with 0x20
/// as the continuation flag and 0x10 as the sign bit of the final group, offset
/// by 48. Counts after index 2 are stored as the difference to `counts[i - 2]`.
pub fn rle_to_string(rle: &Rle) -> String {
    let mut s = String::new();
    for (i, &cnt) in rle.counts.iter().enumerate() {
        let mut x = cnt as i64;
        if i > 2 {
            x -= rle.counts[i - 2] as i64;
        }
        loop {
            let mut c = (x & 0x1f) as u8;
            x >>= 5;
            let more = if c & 0x10 != 0 { x != -1 } else { x != 0 };
            if more {
                c |= 0x20;
            }
            s.push((c + 48) as char);
            if !more {
                break;
            }
        }
    }
    s
}

/// Parse a COCO compressed counts string.
///
/// The result is not validated against `h * w`; see [`validate`].
pub fn rle_from_string(s: &str, h: u32, w: u32) -> Result<Rle> {
    let bytes = s.as_bytes();
    let mut counts: Vec<u32> = Vec::new();
    let mut p = 0usize;

    while p < bytes.len() {
        let start = p;
        let mut x: i64 = 0;
        let mut k = 0u32;
        loop {
            let c = match bytes.get(p) {
                Some(&b) if (48..48 + 64).contains(&b) => (b - 48) as i64,
                _ => return Err(Error::InvalidCompressedCounts { offset: p }),
            };
            if k >= 12 {
                return Err(Error::InvalidCompressedCounts { offset: start });
            }
            x |= (c & 0x1f) << (5 * k);
            p += 1;
            k += 1;
            if c & 0x20 == 0 {
                if c & 0x10 != 0 {
                    x |= -1i64 << (5 * k);
                }
                break;
            }
        }
        if counts.len() > 2 {
            x += counts[counts.len() - 2] as i64;
        }
        let cnt =
            u32::try_from(x).map_err(|_| Error::InvalidCompressedCounts { offset: start })?;
        counts.push(cnt);
    }

    Ok(Rle { h, w, counts })
}
