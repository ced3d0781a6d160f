//! Line fitting and error metrics used by the BC7 search.

use crate::interpolate::interpolate_color;

#[inline(always)]
pub(crate) const fn sq(x: f32) -> f32 {
    x * x
}

/// Squared error over the first `channels` channels.
#[inline]
pub(crate) fn color_error(a: [u8; 4], b: [u8; 4], channels: usize) -> f32 {
    a.iter()
        .zip(b.iter())
        .take(channels)
        .map(|(&x, &y)| sq(f32::from(x) - f32::from(y)))
        .sum()
}

/// Moves the `count` entries with the lowest error to the front, in ascending order.
pub(crate) fn partial_sort_by_error(list: &mut [(f32, usize)], count: usize) {
    for k in 0..usize::min(count, list.len()) {
        let mut best = k;
        for i in k + 1..list.len() {
            if list[i].0 < list[best].0 {
                best = i;
            }
        }
        list.swap(k, best);
    }
}

/// Index into the packed upper triangle of a symmetric 4x4 matrix.
const SYMMETRIC: [[usize; 4]; 4] = [[0, 1, 2, 3], [1, 4, 5, 6], [2, 5, 7, 8], [3, 6, 8, 9]];

/// Running sums over the pixels of one region of a planar RGBA block.
struct RegionStats {
    count: f32,
    sum: [f32; 4],
    products: [f32; 10],
}

impl RegionStats {
    fn gather(block: &[f32; 64], mask: u32, channels: usize) -> Self {
        let mut stats = Self {
            count: 0.0,
            sum: [0.0; 4],
            products: [0.0; 10],
        };

        for k in (0..16).filter(|k| mask & (1 << k) != 0) {
            let mut rgba = [0.0; 4];
            for p in 0..channels {
                rgba[p] = block[k + p * 16];
            }

            stats.count += 1.0;
            for p in 0..channels {
                stats.sum[p] += rgba[p];
                for q in p..channels {
                    stats.products[SYMMETRIC[p][q]] += rgba[p] * rgba[q];
                }
            }
        }

        stats
    }

    fn mean(&self, channels: usize) -> [f32; 4] {
        let mut mean = [0.0; 4];
        for p in 0..channels {
            mean[p] = self.sum[p] / self.count;
        }
        mean
    }

    fn covariance(&self, channels: usize) -> [f32; 10] {
        let mut covar = [0.0; 10];
        for p in 0..channels {
            for q in p..channels {
                let i = SYMMETRIC[p][q];
                covar[i] = self.products[i] - self.sum[p] * self.sum[q] / self.count;
            }
        }
        covar
    }
}

fn symmetric_mul(covar: &[f32; 10], v: &[f32; 4], channels: usize) -> [f32; 4] {
    let mut out = [0.0; 4];
    for p in 0..channels {
        for q in 0..channels {
            out[p] += covar[SYMMETRIC[p][q]] * v[q];
        }
    }
    out
}

/// Dominant eigenvector of the covariance matrix by power iteration.
fn principal_axis(covar: &[f32; 10], channels: usize) -> [f32; 4] {
    const POWER_ITERATIONS: u32 = 8;

    let mut axis = [1.0; 4];
    for i in 0..POWER_ITERATIONS {
        axis = symmetric_mul(covar, &axis, channels);

        // Renormalize every other iteration
        if i % 2 == 1 {
            let norm_sq: f32 = axis[..channels].iter().map(|&v| sq(v)).sum();
            let rnorm = 1.0 / norm_sq.sqrt();
            for value in axis[..channels].iter_mut() {
                *value *= rnorm;
            }
        }
    }
    axis
}

/// Fits a line through the pixels selected by `mask` and returns its extreme points.
///
/// `block` is planar (16 red values, then green, blue and alpha) in the 0..=255 range.
pub(crate) fn fit_line(block: &[f32; 64], mask: u32, channels: usize) -> [[f32; 4]; 2] {
    let stats = RegionStats::gather(block, mask, channels);
    let mean = stats.mean(channels);

    let mut covar = stats.covariance(channels);
    const INV_VAR: f32 = 1.0 / (256.0 * 256.0);
    for value in covar.iter_mut() {
        *value *= INV_VAR;
    }
    for p in 0..channels {
        covar[SYMMETRIC[p][p]] += f32::EPSILON;
    }

    let axis = principal_axis(&covar, channels);

    let mut ext = [f32::INFINITY, f32::NEG_INFINITY];
    for k in (0..16).filter(|k| mask & (1 << k) != 0) {
        let mut dot = 0.0;
        for p in 0..channels {
            dot += axis[p] * (block[k + p * 16] - mean[p]);
        }
        ext[0] = f32::min(ext[0], dot);
        ext[1] = f32::max(ext[1], dot);
    }

    // Create some distance if the endpoints collapse
    if ext[1] - ext[0] < 1.0 {
        ext[0] -= 0.5;
        ext[1] += 0.5;
    }

    let mut endpoints = [[0.0; 4]; 2];
    for (endpoint, t) in endpoints.iter_mut().zip(ext) {
        for p in 0..channels {
            endpoint[p] = t * axis[p] + mean[p];
        }
    }
    endpoints
}

/// Rounds a fitted endpoint to 8-bit channels.
#[inline]
pub(crate) fn to_color(endpoint: [f32; 4]) -> [u8; 4] {
    endpoint.map(|v| v.round().clamp(0.0, 255.0) as u8)
}

/// Interpolated colors of one region.
///
/// With a separate alpha plane the RGB entries and the alpha entries are indexed
/// independently and may have different counts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    entries: [[u8; 4]; 16],
    color_count: usize,
    alpha_count: usize,
    separate_alpha: bool,
}

impl Palette {
    /// Builds the palette of two unquantized endpoints.
    ///
    /// `alpha_prec` is 0 if alpha shares the color index.
    pub(crate) fn new(a: [u8; 4], b: [u8; 4], color_prec: u8, alpha_prec: u8) -> Self {
        let color_count = 1 << color_prec;
        let separate_alpha = alpha_prec != 0;
        let alpha_count = if separate_alpha {
            1 << alpha_prec
        } else {
            color_count
        };
        let alpha_prec = if separate_alpha { alpha_prec } else { color_prec };

        let mut entries = [[0; 4]; 16];
        for (i, entry) in entries.iter_mut().enumerate() {
            let color_index = usize::min(i, color_count - 1);
            let alpha_index = usize::min(i, alpha_count - 1);
            *entry = interpolate_color(a, b, color_index, alpha_index, color_prec, alpha_prec);
        }

        Self {
            entries,
            color_count,
            alpha_count,
            separate_alpha,
        }
    }

    /// Returns the error of the nearest entry and its color and alpha index.
    ///
    /// Ties resolve to the lowest index.
    pub(crate) fn nearest(&self, pixel: [u8; 4]) -> (f32, usize, usize) {
        let channels = if self.separate_alpha { 3 } else { 4 };

        let mut best_err = f32::INFINITY;
        let mut best_color = 0;
        for (i, entry) in self.entries[..self.color_count].iter().enumerate() {
            let err = color_error(pixel, *entry, channels);
            if err < best_err {
                best_err = err;
                best_color = i;
                if err == 0.0 {
                    break;
                }
            }
        }

        if !self.separate_alpha {
            return (best_err, best_color, best_color);
        }

        let mut best_alpha_err = f32::INFINITY;
        let mut best_alpha = 0;
        for (i, entry) in self.entries[..self.alpha_count].iter().enumerate() {
            let err = sq(f32::from(pixel[3]) - f32::from(entry[3]));
            if err < best_alpha_err {
                best_alpha_err = err;
                best_alpha = i;
                if err == 0.0 {
                    break;
                }
            }
        }

        (best_err + best_alpha_err, best_color, best_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar(pixels: &[[u8; 4]; 16]) -> [f32; 64] {
        let mut block = [0.0; 64];
        for (k, pixel) in pixels.iter().enumerate() {
            for p in 0..4 {
                block[k + p * 16] = f32::from(pixel[p]);
            }
        }
        block
    }

    #[test]
    fn line_fit_of_a_gradient_spans_its_extremes() {
        let pixels: [[u8; 4]; 16] = std::array::from_fn(|i| {
            let v = (i * 16) as u8;
            [v, v / 2, 255 - v, 255]
        });
        let [a, b] = fit_line(&planar(&pixels), 0xFFFF, 3);
        let (low, high) = if a[0] < b[0] { (a, b) } else { (b, a) };

        assert!(low[0].abs() < 1.0, "{low:?}");
        assert!((high[0] - 240.0).abs() < 1.0, "{high:?}");
        assert!((low[2] - 255.0).abs() < 1.0, "{low:?}");
        assert!((high[1] - 120.0).abs() < 1.0, "{high:?}");
    }

    #[test]
    fn line_fit_of_a_solid_region_rounds_back_to_its_color() {
        let pixels = [[200, 100, 50, 255]; 16];
        let [a, b] = fit_line(&planar(&pixels), 0b1010_0000_1111_0000, 4);
        assert_eq!(to_color(a), [200, 100, 50, 255]);
        assert_eq!(to_color(b), [200, 100, 50, 255]);
    }

    #[test]
    fn partial_sort_keeps_the_lowest_errors_in_front() {
        let mut list = [(5.0, 0), (1.0, 1), (4.0, 2), (0.5, 3), (3.0, 4)];
        partial_sort_by_error(&mut list, 2);
        assert_eq!(&list[..2], &[(0.5, 3), (1.0, 1)]);

        partial_sort_by_error(&mut list, 10);
        let shapes: Vec<usize> = list.iter().map(|&(_, shape)| shape).collect();
        assert_eq!(shapes, [3, 1, 4, 2, 0]);
    }

    #[test]
    fn nearest_entry_with_shared_and_separate_alpha() {
        let shared = Palette::new([0, 0, 0, 0], [255, 255, 255, 255], 2, 0);
        assert_eq!(shared.nearest([170, 170, 170, 170]), (4.0, 2, 2));

        let separate = Palette::new([0, 0, 0, 255], [255, 255, 255, 0], 2, 3);
        let (err, color, alpha) = separate.nearest([0, 0, 0, 0]);
        assert_eq!((err, color, alpha), (0.0, 0, 7));
    }
}
