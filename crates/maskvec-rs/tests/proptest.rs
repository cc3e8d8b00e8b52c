use maskvec_rs::{bitmap_to_paths, mask, trace_rle, winding_number, Bitmap, ClosedPath, Params};
use proptest::prelude::*;

fn bitmap_strategy() -> impl Strategy<Value = Bitmap> {
    (0u32..14, 0u32..14, 0.05f64..0.95).prop_flat_map(|(w, h, density)| {
        proptest::collection::vec(prop::bool::weighted(density), (w * h) as usize)
            .prop_map(move |data| Bitmap::from_vec(w, h, data).unwrap())
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        prop_assert_eq!(mask::decode(&rle).unwrap(), bm);
    }

    #[test]
    fn counts_cover_every_pixel(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        let total: u64 = rle.counts.iter().map(|&c| c as u64).sum();
        prop_assert_eq!(total, bm.width() as u64 * bm.height() as u64);
        prop_assert_eq!((rle.h, rle.w), (bm.height(), bm.width()));
    }

    #[test]
    fn set_first_pixel_means_empty_leading_run(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        if bm.width() > 0 && bm.height() > 0 && bm.get(0, 0) {
            prop_assert_eq!(rle.counts[0], 0);
        }
        prop_assert!(rle.counts.iter().skip(1).all(|&c| c > 0));
    }

    #[test]
    fn encoding_is_idempotent(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        let again = mask::encode(&mask::decode(&rle).unwrap());
        prop_assert_eq!(&again, &rle);
        prop_assert_eq!(mask::canonicalize(&rle), rle);
    }

    #[test]
    fn compressed_counts_roundtrip(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        let s = mask::rle_to_string(&rle);
        prop_assert_eq!(mask::rle_from_string(&s, rle.h, rle.w).unwrap(), rle);
    }

    #[test]
    fn area_and_bbox_match_pixels(bm in bitmap_strategy()) {
        let rle = mask::encode(&bm);
        prop_assert_eq!(mask::area(&rle), bm.count_set() as u64);

        let set: Vec<(u32, u32)> = (0..bm.height())
            .flat_map(|r| (0..bm.width()).map(move |c| (r, c)))
            .filter(|&(r, c)| bm.get(r, c))
            .collect();
        let expected = if set.is_empty() {
            [0, 0, 0, 0]
        } else {
            let x0 = set.iter().map(|p| p.1).min().unwrap();
            let x1 = set.iter().map(|p| p.1).max().unwrap() + 1;
            let y0 = set.iter().map(|p| p.0).min().unwrap();
            let y1 = set.iter().map(|p| p.0).max().unwrap() + 1;
            [x0, y0, x1 - x0, y1 - y0]
        };
        prop_assert_eq!(mask::to_bbox(&rle), expected);
    }

    #[test]
    fn oriented_loops_fill_the_mask(bm in bitmap_strategy()) {
        let loops = trace_rle(&mask::encode(&bm), &Params::default()).unwrap();
        for row in 0..bm.height() {
            for col in 0..bm.width() {
                let wn = winding_number(&loops, col as f64 + 0.5, row as f64 + 0.5);
                prop_assert!(wn == 0 || wn == 1);
                prop_assert_eq!(wn == 1, bm.get(row, col));
            }
        }
        let total: i64 = loops.iter().map(ClosedPath::signed_area).sum();
        prop_assert_eq!(total, bm.count_set() as i64);
    }

    #[test]
    fn loops_are_closed_and_rectilinear(bm in bitmap_strategy()) {
        let loops = trace_rle(&mask::encode(&bm), &Params::default()).unwrap();
        for l in &loops {
            let p = l.points();
            prop_assert!(p.len() >= 4 && p.len() % 2 == 0);
            for i in 0..p.len() {
                let (a, b) = (p[i], p[(i + 1) % p.len()]);
                prop_assert!(a != b);
                prop_assert!(a.x == b.x || a.y == b.y);
                prop_assert!(a.x <= bm.width() && a.y <= bm.height());
            }
        }
    }

    #[test]
    fn path_strings_match_loops(bm in bitmap_strategy()) {
        let params = Params::default();
        let loops = trace_rle(&mask::encode(&bm), &params).unwrap();
        let paths = bitmap_to_paths(&bm, &params).unwrap();
        prop_assert_eq!(paths.len(), loops.len());
        for (s, l) in paths.iter().zip(&loops) {
            prop_assert!(s.starts_with("M "));
            prop_assert!(!s.contains('Z'));
            let numbers = s.split(' ').filter(|t| *t != "M" && *t != "L").count();
            prop_assert_eq!(numbers, l.len() * 2);
        }
    }
}
