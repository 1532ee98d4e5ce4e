//! Footprint rasterization.
//!
//! Every environment effect is a coverage mask composited over the image.
//! A mask is an `Array2<f32>` matching the image plane, 1.0 where the
//! effect applies in full, 0.0 where the image must pass through untouched,
//! with a narrow smoothstep ramp just inside the footprint boundary so
//! edges never band. Masks feather inward, which means a zero-extent
//! footprint rasterizes to an all-zero mask and the composite becomes a
//! no-op.

use ndarray::Array2;

/// Feather ramp width as a fraction of the short image side.
const FEATHER_FRACTION: f32 = 0.01;

/// Minimum feather ramp in pixels, so tiny images still get a ramp.
const FEATHER_FLOOR: f32 = 1.0;

/// Feather ramp width in pixels for an image plane.
fn feather_px(height: usize, width: usize) -> f32 {
    (FEATHER_FRACTION * height.min(width) as f32).max(FEATHER_FLOOR)
}

/// Cubic smoothstep, clamped to `[0, 1]`.
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of the way across the image a column sits, 0.0 at the left
/// edge and 1.0 at the right.
fn column_frac(col: usize, width: usize) -> f32 {
    if width <= 1 {
        0.0
    } else {
        col as f32 / (width - 1) as f32
    }
}

/// Rasterizes a feathered disc centered at `(center_row, center_col)`.
///
/// Coverage is exactly zero at and beyond `radius` from the center, so the
/// touched footprint never exceeds the disc itself.
pub fn disc(
    height: usize,
    width: usize,
    center_row: f32,
    center_col: f32,
    radius: f32,
) -> Array2<f32> {
    let feather = feather_px(height, width);
    Array2::from_shape_fn((height, width), |(row, col)| {
        let d_row = row as f32 - center_row;
        let d_col = col as f32 - center_col;
        let distance = (d_row * d_row + d_col * d_col).sqrt();
        smoothstep((radius - distance) / feather)
    })
}

/// Rasterizes a band hanging from the top edge.
///
/// The band reaches `depth_left` rows deep at the left edge and
/// `depth_right` at the right, interpolated linearly in between, so unequal
/// depths give a slanted lower boundary. Rows at or below the local depth
/// get exactly zero coverage.
pub fn top_band(height: usize, width: usize, depth_left: f32, depth_right: f32) -> Array2<f32> {
    let feather = feather_px(height, width);
    Array2::from_shape_fn((height, width), |(row, col)| {
        let depth = lerp(depth_left, depth_right, column_frac(col, width));
        smoothstep((depth - row as f32) / feather)
    })
}

/// Rasterizes a band rising from the bottom edge; mirror of [`top_band`].
pub fn bottom_band(height: usize, width: usize, depth_left: f32, depth_right: f32) -> Array2<f32> {
    let feather = feather_px(height, width);
    Array2::from_shape_fn((height, width), |(row, col)| {
        let depth = lerp(depth_left, depth_right, column_frac(col, width));
        let mirrored = (height - 1 - row) as f32;
        smoothstep((depth - mirrored) / feather)
    })
}

/// Rasterizes a horizontal band of the given `thickness` crossing the full
/// image width.
///
/// The centerline runs from `center_left` (row coordinate at the left edge)
/// to `center_right`, so unequal anchors tilt the band. Coverage is exactly
/// zero beyond half the thickness from the centerline.
pub fn cross_band(
    height: usize,
    width: usize,
    center_left: f32,
    center_right: f32,
    thickness: f32,
) -> Array2<f32> {
    let feather = feather_px(height, width);
    let half = thickness / 2.0;
    Array2::from_shape_fn((height, width), |(row, col)| {
        let centerline = lerp(center_left, center_right, column_frac(col, width));
        let distance = (row as f32 - centerline).abs();
        smoothstep((half - distance) / feather)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
        assert_relative_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_feather_scales_with_short_side_and_floors_at_one() {
        assert_eq!(feather_px(10, 10), 1.0);
        assert_eq!(feather_px(400, 600), 4.0);
    }

    #[test]
    fn test_disc_zero_radius_is_all_zero() {
        let mask = disc(8, 8, 4.0, 4.0, 0.0);
        assert!(mask.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_disc_is_zero_outside_radius() {
        let mask = disc(32, 32, 16.0, 16.0, 5.0);
        for ((row, col), &coverage) in mask.indexed_iter() {
            let d_row = row as f32 - 16.0;
            let d_col = col as f32 - 16.0;
            if (d_row * d_row + d_col * d_col).sqrt() >= 5.0 {
                assert_eq!(coverage, 0.0, "leak at ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_disc_saturates_at_center() {
        let mask = disc(32, 32, 16.0, 16.0, 10.0);
        assert_eq!(mask[[16, 16]], 1.0);
        assert_eq!(mask[[16, 12]], 1.0);
    }

    #[test]
    fn test_disc_coverage_decays_with_distance() {
        let mask = disc(64, 64, 32.0, 32.0, 20.0);
        let along_row: Vec<f32> = (32..64).map(|col| mask[[32, col]]).collect();
        for pair in along_row.windows(2) {
            assert!(pair[1] <= pair[0], "coverage rose with distance: {pair:?}");
        }
    }

    #[test]
    fn test_top_band_covers_only_rows_above_depth() {
        let mask = top_band(20, 10, 8.0, 8.0);
        for col in 0..10 {
            assert_eq!(mask[[0, col]], 1.0);
            assert_eq!(mask[[8, col]], 0.0);
            assert_eq!(mask[[19, col]], 0.0);
        }
        assert!(mask[[7, 0]] > 0.0);
    }

    #[test]
    fn test_top_band_slants_between_edge_depths() {
        let mask = top_band(30, 40, 2.0, 20.0);
        // Row 10 is below the shallow left edge but inside the deep right edge.
        assert_eq!(mask[[10, 0]], 0.0);
        assert!(mask[[10, 39]] > 0.0);
    }

    #[test]
    fn test_bottom_band_mirrors_top_band() {
        let top = top_band(24, 16, 7.0, 7.0);
        let bottom = bottom_band(24, 16, 7.0, 7.0);
        for row in 0..24 {
            for col in 0..16 {
                assert_eq!(top[[row, col]], bottom[[23 - row, col]]);
            }
        }
    }

    #[test]
    fn test_cross_band_straddles_centerline() {
        let mask = cross_band(40, 20, 20.0, 20.0, 10.0);
        for col in 0..20 {
            assert_eq!(mask[[20, col]], 1.0);
            assert_eq!(mask[[5, col]], 0.0);
            assert_eq!(mask[[35, col]], 0.0);
        }
    }

    #[test]
    fn test_cross_band_zero_thickness_is_all_zero() {
        let mask = cross_band(16, 16, 8.0, 8.0, 0.0);
        assert!(mask.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_cross_band_tilts_between_anchors() {
        let mask = cross_band(40, 40, 5.0, 35.0, 6.0);
        assert!(mask[[5, 0]] > 0.0);
        assert_eq!(mask[[35, 0]], 0.0);
        assert!(mask[[35, 39]] > 0.0);
        assert_eq!(mask[[5, 39]], 0.0);
    }
}
