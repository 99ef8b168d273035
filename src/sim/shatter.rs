//! Impact resolution: one egg in, one permanent splatter plus a burst of
//! moving shell fragments out. Always succeeds; there is nothing to fail.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::raster::{smudge, Raster};
use crate::sim::entities::{Egg, ShellFragment};
use crate::sim::Simulation;
use crate::util::rand_range;

/// Resolve an egg that reached its impact line. Paints the splatter onto
/// the paint layer, then spawns the fragment burst.
pub fn resolve(sim: &mut Simulation, egg: &Egg, paint: &mut Raster) {
    let x = egg.pos.x;
    let y = egg.impact_y;
    let realistic = sim.realistic_yolk;
    let color = if realistic { egg.yolk } else { sim.brush_color };
    let rng = &mut sim.rng;
    let radius = egg.r * rand_range(rng, 0.9, 2.0);

    if realistic {
        smudge::egg_white(paint, rng, x, y, radius);
    }

    // Central blob, nudged slightly above the impact line.
    let steps = rand_range(rng, 2.0, 5.0) as u32;
    let blob_y = y - rand_range(rng, 0.0, radius * 0.3);
    let blob_r = rand_range(rng, radius * 0.8, radius * 1.2);
    smudge::organic_smudge(paint, rng, x, blob_y, blob_r, steps, color);

    // Droplets thrown off around the impact.
    let droplets = rand_range(rng, 2.0, 7.0) as u32;
    for _ in 0..droplets {
        let angle = rng.f32() * TAU;
        let dist = rand_range(rng, radius * 0.3, radius * 2.0);
        let dropr = rand_range(rng, radius * 0.06, radius * 0.4);
        let steps = rand_range(rng, 3.0, 6.0) as u32;
        smudge::organic_smudge(
            paint,
            rng,
            x + angle.cos() * dist,
            y + angle.sin() * dist,
            dropr,
            steps,
            color,
        );
    }

    // Shell shards flattened straight into the paint.
    let shards = rand_range(rng, 4.0, 10.0) as u32;
    for _ in 0..shards {
        let angle = rng.f32() * TAU;
        let dist = rand_range(rng, egg.r * 0.2, egg.r * 1.2);
        let size = rand_range(rng, egg.r * 0.1, egg.r * 0.3);
        let points = rand_range(rng, 4.0, 6.0) as u32;
        smudge::irregular_blob(
            paint,
            rng,
            x + angle.cos() * dist,
            y + angle.sin() * dist,
            size,
            points,
            egg.shell,
        );
    }

    burst(sim, egg);
}

/// Spawn the moving fragment burst. Count and launch speed scale with
/// egg radius; direction is uniform with an upward bias.
fn burst(sim: &mut Simulation, egg: &Egg) {
    let (lo, hi) = sim.config.fragment_burst;
    let count = (rand_range(&mut sim.rng, lo, hi) * egg.r / 18.0) as usize;
    let ground = sim.config.fragment_ground_clamp.then_some(egg.impact_y);

    for _ in 0..count {
        if sim.fragments.len() >= sim.config.max_fragments {
            log::debug!("fragment cap reached ({})", sim.config.max_fragments);
            break;
        }
        let rng = &mut sim.rng;
        let angle = rng.f32() * TAU;
        let speed = rand_range(rng, 40.0, 220.0) * (egg.r / 20.0);
        let frag = ShellFragment {
            pos: egg.pos,
            vel: Vec2::new(
                angle.cos() * speed,
                angle.sin() * speed - rand_range(rng, 0.0, 36.0),
            ),
            rotation: rand_range(rng, -4.0, 4.0),
            life: rand_range(rng, 0.5, 1.35),
            size: (egg.r * rand_range(rng, 0.06, 0.28)).round().max(1.0),
            color: egg.shell,
            ground,
        };
        sim.fragments.push(frag);
    }
}
