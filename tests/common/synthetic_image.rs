#![allow(dead_code)]

use std::f64::consts::PI;

/// Sinusoidal ridge pattern. `angle` is the ridge orientation measured from
/// the vertical axis; with `angle = 0` ridges are vertical and the darkest
/// columns sit at `x ≡ period / 2 (mod period)`.
pub fn sinusoid_ridges_u8(
    width: usize,
    height: usize,
    period: f64,
    angle: f64,
    amplitude: f64,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(period > 0.0, "period must be positive");

    let (s, c) = angle.sin_cos();
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            // Distance across the ridges.
            let u = x as f64 * c + y as f64 * s;
            let v = 128.0 + amplitude * (2.0 * PI * u / period).cos();
            img[y * width + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    img
}

/// Vertical ridges with period 8 and amplitude 60.
pub fn vertical_ridges_u8(width: usize, height: usize) -> Vec<u8> {
    sinusoid_ridges_u8(width, height, 8.0, 0.0, 60.0)
}

/// Constant image.
pub fn flat_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}
