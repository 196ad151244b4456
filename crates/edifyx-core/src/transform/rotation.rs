//! Image rotation about the center on a fixed-size canvas.
//!
//! The output has the same dimensions as the input. Content rotated past the
//! frame is lost, and pixels that no source pixel covers are filled according
//! to [`EdgeFill`].
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each output pixel we compute the
//! source position and interpolate there. Pixel centers sit on integer
//! coordinates and the pivot is the geometric center `((w-1)/2, (h-1)/2)`,
//! so a 180 degree turn is an exact mirror of the pixel grid.
//!
//! For a counter-clockwise rotation by θ (y axis pointing down):
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + cx
//! src_y = dx * sin(θ) + dy * cos(θ) + cy
//! ```
//! where `(dx, dy)` is the output pixel relative to the center.

use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;

/// Interpolation filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// Nearest neighbour: no blending, hard edges.
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
    /// Lanczos3 over a 6x6 neighbourhood; sharper, slower.
    Lanczos3,
}

/// How pixels exposed by the rotation are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeFill {
    /// Fill with a constant color.
    Constant([u8; 3]),
    /// Repeat the nearest edge pixel.
    Extend,
}

impl Default for EdgeFill {
    fn default() -> Self {
        EdgeFill::Constant([0, 0, 0])
    }
}

/// True when `angle_degrees` is a whole number of turns (within 0.001°).
pub fn is_whole_turn(angle_degrees: f64) -> bool {
    (angle_degrees % 360.0).abs() < 0.001 || (360.0 - (angle_degrees % 360.0).abs()).abs() < 0.001
}

/// Rotate an image about its center by `angle_degrees`.
///
/// Positive angles rotate counter-clockwise. The canvas keeps the input size.
///
/// # Example
///
/// ```ignore
/// use edifyx_core::transform::{apply_rotation, EdgeFill, InterpolationFilter};
///
/// let rotated = apply_rotation(&image, 15.0, InterpolationFilter::Bilinear, EdgeFill::default());
/// assert_eq!(rotated.width, image.width);
/// ```
pub fn apply_rotation(
    image: &ImageBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
    fill: EdgeFill,
) -> ImageBuffer {
    // Fast path: whole turns are the identity
    if image.is_empty() || is_whole_turn(angle_degrees) {
        return image.clone();
    }

    let (w, h) = (image.width, image.height);
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    let sampler = Sampler { image, fill };
    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..h {
        for dst_x in 0..w {
            let dx = dst_x as f64 - cx;
            let dy = dst_y as f64 - cy;

            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sampler.nearest(src_x, src_y),
                InterpolationFilter::Bilinear => sampler.bilinear(src_x, src_y),
                InterpolationFilter::Lanczos3 => sampler.lanczos3(src_x, src_y),
            };

            let dst_idx = (dst_y as usize * w as usize + dst_x as usize) * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    ImageBuffer::new(w, h, output)
}

struct Sampler<'a> {
    image: &'a ImageBuffer,
    fill: EdgeFill,
}

impl Sampler<'_> {
    /// Whether a source position falls on the image (half-pixel margin).
    #[inline]
    fn covers(&self, x: f64, y: f64) -> bool {
        let (w, h) = (self.image.width as f64, self.image.height as f64);
        x >= -0.5 && x <= w - 0.5 && y >= -0.5 && y <= h - 0.5
    }

    /// Fill color for an uncovered position, or `None` under `Extend`.
    #[inline]
    fn fill_for(&self, x: f64, y: f64) -> Option<[u8; 3]> {
        match self.fill {
            EdgeFill::Constant(color) if !self.covers(x, y) => Some(color),
            _ => None,
        }
    }

    /// Fetch a pixel with coordinates clamped to the edges.
    #[inline]
    fn fetch(&self, px: i64, py: i64) -> [f64; 3] {
        let x = px.clamp(0, self.image.width as i64 - 1) as usize;
        let y = py.clamp(0, self.image.height as i64 - 1) as usize;
        let idx = (y * self.image.width as usize + x) * 3;
        [
            self.image.pixels[idx] as f64,
            self.image.pixels[idx + 1] as f64,
            self.image.pixels[idx + 2] as f64,
        ]
    }

    fn nearest(&self, x: f64, y: f64) -> [u8; 3] {
        if let Some(color) = self.fill_for(x, y) {
            return color;
        }
        to_rgb(self.fetch(x.round() as i64, y.round() as i64))
    }

    fn bilinear(&self, x: f64, y: f64) -> [u8; 3] {
        if let Some(color) = self.fill_for(x, y) {
            return color;
        }

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let p00 = self.fetch(x0, y0);
        let p10 = self.fetch(x0 + 1, y0);
        let p01 = self.fetch(x0, y0 + 1);
        let p11 = self.fetch(x0 + 1, y0 + 1);

        let mut result = [0.0f64; 3];
        for i in 0..3 {
            result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
                + p10[i] * fx * (1.0 - fy)
                + p01[i] * (1.0 - fx) * fy
                + p11[i] * fx * fy;
        }
        to_rgb(result)
    }

    fn lanczos3(&self, x: f64, y: f64) -> [u8; 3] {
        if let Some(color) = self.fill_for(x, y) {
            return color;
        }

        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;

        let mut sum = [0.0f64; 3];
        let mut weight_sum = 0.0;

        for ky in -2..=3 {
            for kx in -2..=3 {
                let px = x0 + kx;
                let py = y0 + ky;
                let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

                let pixel = self.fetch(px, py);
                sum[0] += pixel[0] * weight;
                sum[1] += pixel[1] * weight;
                sum[2] += pixel[2] * weight;
                weight_sum += weight;
            }
        }

        if weight_sum.abs() < f64::EPSILON {
            return to_rgb(self.fetch(x.round() as i64, y.round() as i64));
        }
        to_rgb(sum.map(|v| v / weight_sum))
    }
}

#[inline]
fn to_rgb(values: [f64; 3]) -> [u8; 3] {
    values.map(|v| v.clamp(0.0, 255.0).round() as u8)
}

/// Lanczos kernel weight.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
