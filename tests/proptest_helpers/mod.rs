#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use yolo2csv::ir::{ImageDimensions, NormalizedBox};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_dims() -> impl Strategy<Value = ImageDimensions> {
    (1u32..=4096, 1u32..=4096).prop_map(|(w, h)| ImageDimensions::new(w as f64, h as f64))
}

/// Any box with center and extent in `[0, 1]`. May hang over the image edge.
pub fn arb_normalized_box() -> impl Strategy<Value = NormalizedBox> {
    (0i64..5, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64)
        .prop_map(|(class_id, cx, cy, w, h)| NormalizedBox::new(class_id, cx, cy, w, h))
}

/// A box that lies fully inside the image.
pub fn arb_contained_box() -> impl Strategy<Value = NormalizedBox> {
    (0i64..3, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64).prop_map(
        |(class_id, tx, ty, w, h)| {
            let cx = w / 2.0 + tx * (1.0 - w);
            let cy = h / 2.0 + ty * (1.0 - h);
            NormalizedBox::new(class_id, cx, cy, w, h)
        },
    )
}
