use std::path::PathBuf;

use maskvec_rs::{mask, rle_to_paths, trace_many, Bitmap, Error, Params, Rle};
use serde::Deserialize;

#[derive(Deserialize)]
struct Fixture {
    name: String,
    rle: Rle,
    area: u64,
    bbox: [u32; 4],
    paths: Vec<String>,
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixtures() -> Vec<Fixture> {
    let file = std::fs::File::open(fixtures_dir().join("masks.json")).expect("open fixtures");
    serde_json::from_reader(std::io::BufReader::new(file)).expect("parse fixtures")
}

#[test]
fn test_fixture_paths() {
    for f in load_fixtures() {
        let paths = rle_to_paths(&f.rle, &Params::default()).expect("trace");
        assert_eq!(paths, f.paths, "fixture {}", f.name);
    }
}

#[test]
fn test_fixture_area_and_bbox() {
    for f in load_fixtures() {
        assert_eq!(mask::area(&f.rle), f.area, "fixture {}", f.name);
        assert_eq!(mask::to_bbox(&f.rle), f.bbox, "fixture {}", f.name);
        let bm = mask::decode(&f.rle).expect("decode");
        assert_eq!(bm.count_set() as u64, f.area, "fixture {}", f.name);
    }
}

#[test]
fn test_fixture_decode_encode_is_canonical() {
    for f in load_fixtures() {
        let bm = mask::decode(&f.rle).expect("decode");
        assert_eq!(mask::encode(&bm), mask::canonicalize(&f.rle), "fixture {}", f.name);
    }
}

#[test]
fn test_batch_matches_single() {
    let fixtures = load_fixtures();
    let rles: Vec<Rle> = fixtures.iter().map(|f| f.rle.clone()).collect();
    let params = Params::default();
    let batch = trace_many(&rles, &params);
    for (f, got) in fixtures.iter().zip(batch) {
        assert_eq!(got.expect("trace"), f.paths, "fixture {}", f.name);
    }
}

#[test]
fn test_malformed_json_is_rejected() {
    let res: Result<Rle, _> = serde_json::from_str(r#"{"size": [3, 3], "counts": [4, 1, 3]}"#);
    let err = res.unwrap_err().to_string();
    assert!(err.contains("malformed RLE"), "{err}");
}

#[test]
fn test_rle_json_roundtrip_through_bitmap() {
    let mut bm = Bitmap::new(6, 4);
    for (row, col) in [(0, 0), (1, 1), (1, 2), (3, 5)] {
        bm.set(row, col, true);
    }
    let rle = mask::encode(&bm);
    let json = serde_json::to_string(&rle).unwrap();
    let back: Rle = serde_json::from_str(&json).unwrap();
    assert_eq!(mask::decode(&back).unwrap(), bm);
}

#[test]
fn test_scores_share_the_encoder() {
    // A logit map for the 3x3 centre-pixel mask.
    let scores = [-4.0, -2.5, -3.0, -1.0, 3.2, -0.5, -2.0, -1.5, -6.0];
    let rle = mask::encode_from_scores(&scores, 3, 3, 0.0).unwrap();
    assert_eq!(rle.counts, vec![4, 1, 4]);
    assert_eq!(
        rle_to_paths(&rle, &Params::default()).unwrap(),
        vec!["M 1 1 L 2 1 2 2 1 2"]
    );
}

#[test]
fn test_decode_malformed_reports_sizes() {
    let rle = Rle {
        h: 2,
        w: 2,
        counts: vec![0, 5],
    };
    assert_eq!(
        mask::decode(&rle),
        Err(Error::MalformedRle {
            expected: 4,
            actual: 5
        })
    );
}
