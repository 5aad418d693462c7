//! Crop tests.
//!
//! Tests cover:
//! - Fixed per-side pixel amounts on images, keypoints and heatmaps
//! - Percent amounts (round half to even) and the 0.0 / 1.0 boundaries
//! - Pad followed by crop restores keypoints
//! - Crops never produce empty images

mod common;
use common::{hot_pixel, init_tracing, keypoints, ramp, seeded};

use anyhow::Result;
use ndarray::{s, Array3};
use size_augment::prelude::*;
use std::collections::HashSet;

fn fixed_crop(t: usize, r: usize, b: usize, l: usize) -> Result<Crop> {
    Ok(Crop::builder()
        .px((t, r, b, l))
        .keep_size(false)
        .config(seeded(0))
        .build()?)
}

const SIDE_CASES: [(usize, usize, usize, usize); 5] = [
    (1, 0, 0, 0),
    (0, 1, 0, 0),
    (0, 0, 1, 0),
    (0, 0, 0, 1),
    (1, 2, 0, 1),
];

#[test]
fn test_fixed_px_matches_slicing_on_all_views() -> Result<()> {
    init_tracing();
    let img = ramp(4, 5);
    for (t, r, b, l) in SIDE_CASES {
        let crop = fixed_crop(t, r, b, l)?;
        let expected = img.slice(s![t..4 - b, l..5 - r, ..]).to_owned();
        assert_eq!(crop.augment_image(img.clone())?, expected);

        let kps = crop.augment_keypoints(vec![keypoints(&[(3.0, 2.0)], (4, 5))])?;
        assert_eq!(kps[0].to_xy(), [(3.0 - l as f32, 2.0 - t as f32)]);
        assert_eq!(kps[0].shape(), (4 - t - b, 5 - l - r));

        let heatmaps = hot_pixel((4, 5), 2, 3);
        let expected = heatmaps.arr_0to1().slice(s![t..4 - b, l..5 - r, ..]).to_owned();
        let out = crop.augment_heatmaps(vec![heatmaps])?;
        assert_eq!(out[0].arr_0to1(), &expected);
    }
    Ok(())
}

#[test]
fn test_percent_rounds_half_to_even() -> Result<()> {
    // 0.25 * 10 = 2.5 -> 2 ; 0.25 * 6 = 1.5 -> 2 ; 0.3 * 5 = 1.5 -> 2
    let crop = Crop::builder()
        .percent((0.25, 0.0, 0.0, 0.0))
        .keep_size(false)
        .build()?;
    assert_eq!(crop.augment_image(ramp(10, 3))?.dim().0, 8);
    assert_eq!(crop.augment_image(ramp(6, 3))?.dim().0, 4);

    let crop = Crop::builder()
        .percent((0.0, 0.0, 0.0, 0.3))
        .keep_size(false)
        .build()?;
    assert_eq!(crop.augment_image(ramp(2, 5))?.dim().1, 3);
    Ok(())
}

#[test]
fn test_percent_boundaries() -> Result<()> {
    let none = Crop::builder().percent(0.0).keep_size(false).build()?;
    let img = ramp(4, 4);
    assert_eq!(none.augment_image(img.clone())?, img);

    // 100% from the top would remove everything; one row survives
    let all = Crop::builder()
        .percent((1.0, 0.0, 0.0, 0.0))
        .keep_size(false)
        .build()?;
    let out = all.augment_image(img.clone())?;
    assert_eq!(out.dim(), (1, 4, 1));
    assert_eq!(out, img.slice(s![3..4, .., ..]));
    Ok(())
}

#[test]
fn test_oversized_percent_keeps_one_pixel() -> Result<()> {
    let crop = Crop::builder().percent(1e30).keep_size(false).build()?;
    let img = ramp(4, 4);
    let out = crop.augment_image(img.clone())?;
    assert_eq!(out, img.slice(s![3..4, 3..4, ..]));

    let kps = crop.augment_keypoints(vec![keypoints(&[(3.0, 3.0)], (4, 4))])?;
    assert_eq!(kps[0].shape(), (1, 1));
    assert_eq!(kps[0].to_xy(), [(0.0, 0.0)]);

    let hms = crop.augment_heatmaps(vec![hot_pixel((4, 4), 3, 3)])?;
    assert_eq!(hms[0].shape(), (1, 1));
    Ok(())
}

#[test]
fn test_crop_reduces_bottom_before_top() -> Result<()> {
    let crop = fixed_crop(2, 0, 5, 0)?;
    let out = crop.augment_image(ramp(4, 2))?;
    assert_eq!(out, ramp(4, 2).slice(s![2..3, .., ..]));
    Ok(())
}

#[test]
fn test_pad_then_crop_restores_keypoints() -> Result<()> {
    let coords = [(0.0, 0.0), (1.5, 2.25), (3.0, 1.0)];
    for (t, r, b, l) in [(0, 0, 0, 0), (1, 2, 3, 4), (5, 0, 0, 5), (0, 3, 2, 0)] {
        let pad = Pad::builder().px((t, r, b, l)).keep_size(false).build()?;
        let crop = fixed_crop(t, r, b, l)?;
        let original = keypoints(&coords, (4, 4));
        let padded = pad.augment_keypoints(vec![original.clone()])?;
        let restored = crop.augment_keypoints(padded)?;
        assert_eq!(restored[0], original, "sides {:?}", (t, r, b, l));
    }
    Ok(())
}

#[test]
fn test_px_range_realizes_every_value() -> Result<()> {
    let crop = Crop::builder()
        .px((0, 0, 0, (0, 3)))
        .keep_size(false)
        .config(seeded(21))
        .build()?;
    let widths: HashSet<usize> = crop
        .augment_images(vec![ramp(2, 6); 150])?
        .iter()
        .map(|o| o.dim().1)
        .collect();
    assert_eq!(widths, HashSet::from([3, 4, 5, 6]));
    Ok(())
}

#[test]
fn test_keep_size_restores_shape_and_projects_keypoints() -> Result<()> {
    let crop = Crop::builder().px((0, 0, 0, 2)).build()?;
    let out = crop.augment_image(Array3::<u16>::from_elem((4, 4, 2), 1000))?;
    assert_eq!(out.dim(), (4, 4, 2));
    assert!(out.iter().all(|&v| v == 1000));

    let kps = crop.augment_keypoints(vec![keypoints(&[(3.0, 1.0)], (4, 4))])?;
    // x: 3 - 2 = 1 on a 2 px wide image, scaled by 4/2
    assert_eq!(kps[0].to_xy(), [(2.0, 1.0)]);
    assert_eq!(kps[0].shape(), (4, 4));
    Ok(())
}

#[test]
fn test_heatmaps_at_double_resolution() -> Result<()> {
    let crop = fixed_crop(1, 0, 1, 0)?;
    let mut arr = Array3::<f32>::zeros((8, 4, 1));
    arr.slice_mut(s![2..6, .., ..]).fill(1.0);
    let heatmaps = HeatmapsOnImage::new(arr, (4, 2), 0.0, 1.0)?;
    let out = crop.augment_heatmaps(vec![heatmaps])?;
    assert_eq!(out[0].shape(), (2, 2));
    assert_eq!(out[0].arr_shape(), (4, 4));
    assert!(out[0].arr_0to1().iter().all(|&v| v == 1.0));
    Ok(())
}

#[test]
fn test_config_errors() {
    for err in [
        Crop::builder().px((1, 2)).percent(0.1).build().err(),
        Crop::builder().percent(((0.5, 0.1), 0, 0, 0)).build().err(),
        Crop::builder().px(vec!["a"]).build().err(),
    ] {
        let err = err.expect("builder must fail");
        assert!(err.to_string().starts_with("Expected "), "{err}");
    }
}
