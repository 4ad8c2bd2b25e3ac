//! Intensity transform regression test
//!
//! Exercises the algebraic properties of the pointwise transforms on
//! synthetic gradients and checkerboards.

use imkit_core::{FPix, Pix};
use imkit_enhance::{
    AdjustParams, EnhanceError, binarize, binarize_pix, equalize_hist, imadjust, img_scale,
    imcomplement, imcomplement_pix,
};
use imkit_test::{RegParams, synth};

#[test]
fn intensity_reg_complement() {
    let mut rp = RegParams::new("intensity_complement");

    // Involution on [0, 255]
    let fpix = synth::make_gradient_fpix(256, 3).unwrap();
    let twice = imcomplement(&imcomplement(&fpix));
    rp.compare_fpix(&fpix, &twice, 0.0);

    let checker = FPix::from_rows(&[[0.0, 255.0], [255.0, 0.0]]).unwrap();
    let expected = FPix::from_rows(&[[255.0, 0.0], [0.0, 255.0]]).unwrap();
    rp.compare_fpix(&expected, &imcomplement(&checker), 0.0);

    // 8 bpp path agrees with the float path
    let pix = synth::make_checker(16, 16, 4, 30, 220).unwrap();
    let neg = imcomplement_pix(&pix).unwrap();
    rp.compare_fpix(&imcomplement(&FPix::from_pix(&pix)), &FPix::from_pix(&neg), 0.0);

    assert!(rp.cleanup(), "intensity_reg complement tests failed");
}

#[test]
fn intensity_reg_binarize() {
    let mut rp = RegParams::new("intensity_binarize");

    let uniform = FPix::new_with_value(4, 4, 100.0).unwrap();
    rp.compare_fpix(&FPix::new_with_value(4, 4, 255.0).unwrap(), &binarize(&uniform, 100.0), 0.0);
    rp.compare_fpix(&FPix::new_with_value(4, 4, 0.0).unwrap(), &binarize(&uniform, 101.0), 0.0);

    let fpix = synth::make_gradient_fpix(100, 5).unwrap();
    for t in [0.0f32, 64.5, 128.0, 255.0, 300.0] {
        let once = binarize(&fpix, t);
        let twice = binarize(&once, t);
        rp.compare_fpix(&once, &twice, 0.0);
        let two_level = once.data().iter().all(|&v| v == 0.0 || v == 255.0);
        rp.compare_values(1.0, two_level as u8 as f64, 0.0);
    }

    let pix = synth::make_gradient(100, 5).unwrap();
    let bin = binarize_pix(&pix, 128.0).unwrap();
    rp.compare_fpix(&binarize(&fpix, 128.0), &FPix::from_pix(&bin), 0.0);

    assert!(rp.cleanup(), "intensity_reg binarize tests failed");
}

#[test]
fn intensity_reg_scale() {
    let mut rp = RegParams::new("intensity_scale");

    let fpix = FPix::from_rows(&[[12.0, 40.0, 77.5], [90.0, 13.0, 100.0]]).unwrap();
    let out = img_scale(&fpix, 0.0, 255.0).unwrap();
    rp.compare_values(0.0, out.min_value() as f64, 1e-4);
    rp.compare_values(255.0, out.max_value() as f64, 1e-4);

    // Affine: equal input steps give equal output steps
    let ramp = FPix::from_rows(&[[1.0, 2.0, 3.0, 4.0, 5.0]]).unwrap();
    let out = img_scale(&ramp, -1.0, 1.0).unwrap();
    let steps: Vec<f32> = out.data().windows(2).map(|w| w[1] - w[0]).collect();
    for s in &steps {
        rp.compare_values(0.5, *s as f64, 1e-6);
    }

    let constant = FPix::new_with_value(3, 3, 42.0).unwrap();
    let err = img_scale(&constant, 0.0, 255.0);
    rp.compare_values(
        1.0,
        matches!(err, Err(EnhanceError::DegenerateInput(_))) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "intensity_reg scale tests failed");
}

#[test]
fn intensity_reg_adjust() {
    let mut rp = RegParams::new("intensity_adjust");

    // Defaults on a normalized image: proportional to the input
    let data: Vec<f32> = (1..=16).map(|i| i as f32 / 16.0).collect();
    let fpix = FPix::from_data(4, 4, data.clone()).unwrap();
    let out = imadjust(&fpix, &AdjustParams::default()).unwrap();
    for (x, y) in data.iter().zip(out.data()) {
        rp.compare_values((x * 255.0).trunc() as f64, *y as f64, 0.0);
    }

    // Raw 0..255 image is normalized by its own maximum first; truncation
    // may lose one level
    let gradient = synth::make_gradient_fpix(256, 1).unwrap();
    let out = imadjust(&gradient, &AdjustParams::default()).unwrap();
    rp.compare_fpix(&gradient, &out, 1.0);
    rp.compare_values(255.0, out.max_value() as f64, 0.0);

    // Low-maximum image is stretched to the full range as well
    let dim = FPix::from_rows(&[[0.0, 2.0, 4.0]]).unwrap();
    let out = imadjust(&dim, &AdjustParams::default()).unwrap();
    rp.compare_values(255.0, out.max_value() as f64, 0.0);
    rp.compare_values(127.0, out.data()[1] as f64, 0.0);

    // Gamma below one brightens mid-tones
    let brighter = imadjust(
        &gradient,
        &AdjustParams {
            gamma: 0.5,
            ..Default::default()
        },
    )
    .unwrap();
    let mid_in = gradient.get_pixel(64, 0).unwrap();
    let mid_out = brighter.get_pixel(64, 0).unwrap();
    rp.compare_values(1.0, (mid_out > mid_in) as u8 as f64, 0.0);

    let zero = FPix::new(2, 2).unwrap();
    let err = imadjust(&zero, &AdjustParams::default());
    rp.compare_values(
        1.0,
        matches!(err, Err(EnhanceError::DegenerateInput(_))) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "intensity_reg adjust tests failed");
}

#[test]
fn intensity_reg_equalize() {
    let mut rp = RegParams::new("intensity_equalize");

    let constant = synth::make_uniform(8, 8, 123).unwrap();
    rp.compare_pix(&constant, &equalize_hist(&constant).unwrap());

    let two = synth::make_checker(8, 8, 2, 40, 90).unwrap();
    let out = equalize_hist(&two).unwrap();
    let expected: Pix = {
        let bytes: Vec<u8> = two.data().iter().map(|&v| if v == 40 { 0 } else { 255 }).collect();
        Pix::from_gray_bytes(8, 8, &bytes).unwrap()
    };
    rp.compare_pix(&expected, &out);

    // A full gradient is already equalized up to rounding
    let gradient = synth::make_gradient(256, 2).unwrap();
    let out = equalize_hist(&gradient).unwrap();
    let diff = FPix::from_pix(&gradient)
        .data()
        .iter()
        .zip(FPix::from_pix(&out).data())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    rp.compare_values(0.0, diff as f64, 1.0);

    assert!(rp.cleanup(), "intensity_reg equalize tests failed");
}
