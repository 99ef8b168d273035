//! Organic paint-mark primitives shared by the splatter painter.
//!
//! These are deliberately unseeded run to run — every splatter should
//! look different. Tests that need reproducibility pass a seeded Rng.

use glam::Vec2;
use std::f32::consts::TAU;

use super::{rgba, Raster};
use crate::util::rand_range;

/// Random-walk blob: `steps` control points, each offset from the last by
/// a bounded random delta, with a randomly sized/oriented ellipse filled
/// at every point. The overlap produces a non-uniform silhouette.
pub fn organic_smudge(
    raster: &mut Raster,
    rng: &mut fastrand::Rng,
    x: f32,
    y: f32,
    radius: f32,
    steps: u32,
    color: u32,
) {
    let mut px = x;
    let mut py = y;
    for _ in 0..steps {
        px += rand_range(rng, -radius * 0.4, radius * 0.4);
        py += rand_range(rng, -radius * 0.3, radius * 0.5);

        let rx = rand_range(rng, radius * 0.3, radius * 0.7);
        let ry = rand_range(rng, radius * 0.25, radius * 0.6);
        let angle = rand_range(rng, 0.0, TAU);
        raster.fill_ellipse(px, py, rx, ry, angle, color);
    }
}

/// Soft egg-white underlay: the same walk, but each ellipse carries a
/// radial gradient fading from translucent off-white to nearly nothing.
pub fn egg_white(raster: &mut Raster, rng: &mut fastrand::Rng, x: f32, y: f32, radius: f32) {
    let inner = rgba(241, 237, 237, 204);
    let outer = rgba(255, 255, 255, 26);
    let steps = rand_range(rng, 5.0, 8.0) as u32;
    let r = radius * 1.3;
    let mut px = x;
    let mut py = y;
    for _ in 0..steps {
        px += rand_range(rng, -r * 0.4, r * 0.4);
        py += rand_range(rng, -r * 0.3, r * 0.5);

        let rx = rand_range(rng, r * 0.3, r * 0.7);
        let ry = rand_range(rng, r * 0.25, r * 0.6);
        let angle = rand_range(rng, 0.0, TAU);
        raster.fill_gradient_ellipse(px, py, rx, ry, angle, inner, outer);
    }
}

/// Closed polygon with `points` perturbed spokes — the flattened shell
/// shards painted around an impact.
pub fn irregular_blob(
    raster: &mut Raster,
    rng: &mut fastrand::Rng,
    x: f32,
    y: f32,
    radius: f32,
    points: u32,
    color: u32,
) {
    let points = points.max(3);
    let mut poly = Vec::with_capacity(points as usize);
    for i in 0..points {
        let angle = i as f32 / points as f32 * TAU;
        let r = radius * rand_range(rng, 0.5, 1.3);
        poly.push(Vec2::new(
            x + angle.cos() * r,
            y + angle.sin() * r * rand_range(rng, 0.7, 1.3),
        ));
    }
    raster.fill_polygon(&poly, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{TRANSPARENT, WHITE};

    /// Count pixels that differ from `background`.
    fn marked_pixels(r: &Raster, background: u32) -> usize {
        let mut n = 0;
        for y in 0..r.height() {
            for x in 0..r.width() {
                if r.pixel(x, y) != background {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn smudge_leaves_a_mark() {
        let mut r = Raster::new(128, 128);
        r.clear(WHITE);
        let mut rng = fastrand::Rng::with_seed(42);
        organic_smudge(&mut r, &mut rng, 64.0, 64.0, 20.0, 12, rgba(200, 40, 40, 255));
        assert!(marked_pixels(&r, WHITE) > 50);
    }

    #[test]
    fn blob_stays_near_center() {
        let mut r = Raster::new(200, 200);
        let mut rng = fastrand::Rng::with_seed(3);
        irregular_blob(&mut r, &mut rng, 100.0, 100.0, 10.0, 5, WHITE);
        assert!(marked_pixels(&r, TRANSPARENT) > 10);
        // Max spoke is 1.3 * radius * 1.3 stretch — nothing lands far away.
        for x in 0..200u32 {
            assert_eq!(r.pixel(x, 10), TRANSPARENT);
            assert_eq!(r.pixel(x, 190), TRANSPARENT);
        }
    }
}
