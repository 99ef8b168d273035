//! The transient overlay pass: wipe and redraw every in-flight entity.
//!
//! Reads the simulation, never mutates it. The rng only feeds cosmetic
//! per-frame detail (egg speckles), not entity state.

use crate::raster::{rgba, Raster, TRANSPARENT};
use crate::sim::entities::{Ant, Egg, ShellFragment};
use crate::sim::Simulation;
use crate::util::rand_range;

/// Full overlay redraw for one frame.
pub fn draw(sim: &Simulation, overlay: &mut Raster, rng: &mut fastrand::Rng) {
    overlay.clear(TRANSPARENT);

    for egg in sim.eggs.iter().filter(|e| e.alive) {
        draw_egg(overlay, rng, egg);
    }
    if sim.ants_enabled {
        for ant in &sim.ants {
            draw_ant(overlay, ant);
        }
    }
    for frag in &sim.fragments {
        draw_fragment(overlay, frag);
    }
}

/// In-flight egg: tilted ellipse body, faint outline, speckles on the
/// speckled varieties.
fn draw_egg(overlay: &mut Raster, rng: &mut fastrand::Rng, egg: &Egg) {
    let tilt = egg.rotation * 0.2;
    overlay.fill_ellipse(egg.pos.x, egg.pos.y, egg.r, egg.r * 1.25, tilt, egg.shell);
    overlay.stroke_ellipse(
        egg.pos.x,
        egg.pos.y,
        egg.r,
        egg.r * 1.25,
        tilt,
        (egg.r * 0.04).max(1.0),
        rgba(0, 0, 0, 26),
    );

    if egg.speckled {
        let speckle = rgba(60, 40, 30, 128);
        let count = (egg.r / 3.0) as u32 + 6;
        let (s, c) = tilt.sin_cos();
        for _ in 0..count {
            let sx = rand_range(rng, -egg.r * 0.6, egg.r * 0.6);
            let sy = rand_range(rng, -egg.r * 0.4, egg.r * 0.6);
            // Speckle offsets live in the egg's tilted frame.
            let px = egg.pos.x + sx * c - sy * s;
            let py = egg.pos.y + sx * s + sy * c;
            overlay.fill_ellipse(
                px,
                py,
                (egg.r * 0.04).max(1.0),
                (egg.r * 0.03).max(1.0),
                0.0,
                speckle,
            );
        }
    }
}

/// Ant body: three overlapping ellipses, rear to head.
fn draw_ant(overlay: &mut Raster, a: &Ant) {
    let body = rgba(15, 15, 15, 242);
    let s = a.size;
    overlay.fill_ellipse(a.pos.x - s * 0.6, a.pos.y, s * 0.6, s * 0.5, 0.0, body);
    overlay.fill_ellipse(a.pos.x + s * 0.1, a.pos.y, s * 0.7, s * 0.45, 0.0, body);
    overlay.fill_ellipse(a.pos.x + s * 0.9, a.pos.y, s * 0.5, s * 0.35, 0.0, body);
}

/// Moving shell piece: a small spinning rectangle.
fn draw_fragment(overlay: &mut Raster, f: &ShellFragment) {
    overlay.fill_rect_rotated(
        f.pos.x,
        f.pos.y,
        f.size,
        (f.size / 1.4).max(1.0),
        f.rotation,
        f.color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use glam::Vec2;

    fn any_pixels(r: &Raster) -> bool {
        (0..r.height()).any(|y| (0..r.width()).any(|x| r.pixel(x, y) != TRANSPARENT))
    }

    #[test]
    fn live_egg_is_drawn_at_its_position() {
        let mut sim = Simulation::new(EngineConfig::default(), 400.0, 400.0);
        sim.rng = fastrand::Rng::with_seed(5);
        sim.request_egg_drop(Some(200.0), Some(350.0));
        // Move it on-screen so the body is visible.
        sim.eggs[0].pos = Vec2::new(200.0, 100.0);

        let mut ov = Raster::new(400, 400);
        let mut rng = fastrand::Rng::with_seed(6);
        draw(&sim, &mut ov, &mut rng);
        assert_eq!(ov.pixel(200, 100), sim.eggs[0].shell);
    }

    #[test]
    fn overlay_draw_never_mutates_entities() {
        let mut sim = Simulation::new(EngineConfig::default(), 400.0, 400.0);
        sim.rng = fastrand::Rng::with_seed(5);
        sim.request_egg_drop(None, None);
        crate::sim::spawn::spawn_ant(&mut sim, Some(100.0), Some(100.0));
        let egg_before = sim.eggs[0];
        let ant_before = sim.ants[0];

        let mut ov = Raster::new(400, 400);
        let mut rng = fastrand::Rng::with_seed(6);
        draw(&sim, &mut ov, &mut rng);
        draw(&sim, &mut ov, &mut rng);

        assert_eq!(sim.eggs[0].pos, egg_before.pos);
        assert_eq!(sim.eggs[0].vel, egg_before.vel);
        assert_eq!(sim.ants[0].pos, ant_before.pos);
    }

    #[test]
    fn ants_hidden_when_disabled() {
        let mut sim = Simulation::new(EngineConfig::default(), 400.0, 400.0);
        sim.rng = fastrand::Rng::with_seed(5);
        crate::sim::spawn::spawn_ant(&mut sim, Some(200.0), Some(200.0));
        assert_eq!(sim.ants.len(), 1);
        sim.set_ants_enabled(false);

        let mut ov = Raster::new(400, 400);
        let mut rng = fastrand::Rng::with_seed(6);
        draw(&sim, &mut ov, &mut rng);
        assert!(!any_pixels(&ov));
    }
}
