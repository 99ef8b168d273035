//! Per-frame physics: integrate every entity list, detect transitions
//! (impact, settle, off-screen, expiry), and burn one-shot marks into
//! the paint layer as entities finalize.

use glam::Vec2;

use crate::raster::Raster;
use crate::sim::{shatter, spawn, Simulation};
use crate::util::rand_range;

/// Upper bound on integration dt — a stalled frame must not slingshot
/// everything (seconds).
pub const MAX_DT: f32 = 0.04;
/// Fragments settle once both velocity components drop under this (px/s)
/// near the end of their life.
const SETTLE_SPEED: f32 = 12.0;
/// A fragment counts as "near the end" below this much remaining life.
const SETTLE_WINDOW: f32 = 0.1;
/// Ant removal margin around the surface (px).
const ANT_MARGIN: f32 = 60.0;
/// Expected ant disturbance marks per second of ant life.
const DISTURB_RATE: f32 = 3.6;
/// Disturbance erase strength.
const DISTURB_STRENGTH: f32 = 0.6;

/// One full physics step. Spawn timers first (append-only), then each
/// entity list; removal happens only here.
pub fn run(sim: &mut Simulation, dt: f32, paint: &mut Raster) {
    let dt = dt.clamp(0.0, MAX_DT);
    spawn::tick_timers(sim, dt);
    step_eggs(sim, dt, paint);
    step_fragments(sim, dt, paint);
    step_ants(sim, dt, paint);
}

fn step_eggs(sim: &mut Simulation, dt: f32, paint: &mut Raster) {
    let gravity = sim.config.gravity;
    let mut i = 0;
    while i < sim.eggs.len() {
        let e = &mut sim.eggs[i];
        e.vel.y += gravity * dt;
        e.pos += e.vel * dt;
        e.rotation += e.rotation_speed * dt;

        if e.pos.y >= e.impact_y {
            e.alive = false;
            let egg = *e;
            // swap_remove brings an unstepped egg into slot i; revisit it.
            sim.eggs.swap_remove(i);
            shatter::resolve(sim, &egg, paint);
        } else {
            i += 1;
        }
    }
}

fn step_fragments(sim: &mut Simulation, dt: f32, paint: &mut Raster) {
    let (fx, fy) = sim.config.fragment_friction;
    let gravity = sim.config.fragment_gravity;
    let ground_clamp = sim.config.fragment_ground_clamp;
    let floor = sim.height - 1.0;
    // Damping is exponential in elapsed time, anchored to the 60 fps
    // reference frame, so fragments behave the same at any refresh rate.
    let decay_x = fx.powf(dt * 60.0);
    let decay_y = fy.powf(dt * 60.0);

    let mut i = 0;
    while i < sim.fragments.len() {
        let f = &mut sim.fragments[i];
        f.vel.y += gravity * dt;
        f.pos += f.vel * dt;
        f.vel.x *= decay_x;
        f.vel.y *= decay_y;
        f.rotation += rand_range(&mut sim.rng, -0.08, 0.08) * dt * 60.0;
        f.life -= dt;

        let slow = f.vel.x.abs() < SETTLE_SPEED && f.vel.y.abs() < SETTLE_SPEED;
        let settled =
            f.life <= 0.0 || f.pos.y >= floor || (f.life < SETTLE_WINDOW && slow);
        if settled {
            let frag = *f;
            sim.fragments.swap_remove(i);
            stamp_fragment(paint, &mut sim.rng, &frag, ground_clamp);
        } else {
            i += 1;
        }
    }
}

fn step_ants(sim: &mut Simulation, dt: f32, paint: &mut Raster) {
    if !sim.ants_enabled {
        // Frozen: no motion, no expiry, no disturbance.
        return;
    }
    let (w, h) = (sim.width, sim.height);
    let mut i = 0;
    while i < sim.ants.len() {
        let a = &mut sim.ants[i];
        a.t += dt;
        // Pseudo-wander: personal-phase oscillators with per-frame
        // random amplitude.
        let amp_x = rand_range(&mut sim.rng, -30.0, 30.0);
        let amp_y = rand_range(&mut sim.rng, -30.0, 30.0);
        a.vel.x += (a.t * 20.0 + a.jitter).sin() * amp_x * dt;
        a.vel.y += (a.t * 16.0 + a.jitter * 0.5).cos() * amp_y * dt;
        a.pos += a.vel * dt;
        a.life -= dt;

        let gone = a.life <= 0.0
            || a.pos.x < -ANT_MARGIN
            || a.pos.x > w + ANT_MARGIN
            || a.pos.y < -ANT_MARGIN
            || a.pos.y > h + ANT_MARGIN;
        if gone {
            sim.ants.swap_remove(i);
            continue;
        }

        // Occasionally chew a bare patch into the paint.
        if sim.rng.f32() < DISTURB_RATE * dt {
            let a = sim.ants[i];
            paint.erase_ellipse(a.pos.x, a.pos.y, a.size * 1.6, a.size * 0.9, DISTURB_STRENGTH);
        }
        i += 1;
    }
}

/// Burn a settled fragment into the paint layer: a small quadrilateral,
/// corners jittered by ±1 px so no two pieces look alike.
fn stamp_fragment(
    paint: &mut Raster,
    rng: &mut fastrand::Rng,
    f: &crate::sim::entities::ShellFragment,
    ground_clamp: bool,
) {
    let y = match (ground_clamp, f.ground) {
        (true, Some(g)) => f.pos.y.min(g),
        _ => f.pos.y,
    };
    let w = f.size.max(1.0);
    let h = (f.size * 0.6).round().max(1.0);
    let (s, c) = f.rotation.sin_cos();
    let center = Vec2::new(f.pos.x, y);
    let corners = [
        Vec2::new(-w / 2.0, -h / 2.0),
        Vec2::new(w / 2.0, -h / 3.0),
        Vec2::new(w / 4.0, h / 2.0),
        Vec2::new(-w / 3.0, h / 3.0),
    ]
    .map(|p| {
        let p = p + Vec2::new(rand_range(rng, -1.0, 1.0), rand_range(rng, -1.0, 1.0));
        center + Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c)
    });
    paint.fill_polygon(&corners, f.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::raster::{Raster, TRANSPARENT, WHITE};
    use crate::sim::entities::{Ant, Egg, ShellFragment};
    use crate::sim::{overlay, Simulation};

    const DT: f32 = 1.0 / 60.0;

    fn test_sim() -> Simulation {
        let mut config = EngineConfig::default();
        config.ants_enabled = false; // keep ambient spawns out of egg tests
        let mut sim = Simulation::new(config, 800.0, 600.0);
        sim.rng = fastrand::Rng::with_seed(0xBEEF);
        sim
    }

    fn drop_egg(sim: &mut Simulation, impact_y: f32) {
        let spec = crate::catalog::EggKind::White.spec();
        sim.eggs.push(Egg {
            pos: glam::Vec2::new(100.0, -22.0),
            impact_y,
            vel: glam::Vec2::new(0.0, 60.0),
            r: spec.r,
            shell: spec.shell,
            yolk: spec.yolk,
            speckled: spec.speckled,
            rotation: 0.0,
            rotation_speed: 1.0,
            alive: true,
        });
    }

    #[test]
    fn egg_descends_monotonically_until_impact() {
        let mut sim = test_sim();
        let mut paint = Raster::new(800, 600);
        paint.clear(WHITE);
        drop_egg(&mut sim, 300.0);

        let mut last_y = sim.eggs[0].pos.y;
        let mut steps = 0;
        while !sim.eggs.is_empty() {
            sim.step(DT, &mut paint);
            if let Some(e) = sim.eggs.first() {
                assert!(e.pos.y > last_y, "descent must be monotonic");
                last_y = e.pos.y;
            }
            steps += 1;
            assert!(steps < 120, "egg never impacted");
        }

        // impact_y = 300 from y = -22 under g = 1200 with vy0 = 60:
        // 60t + 600t^2 = 322  =>  t ~ 0.69 s  =>  ~42 steps at 1/60.
        assert!(steps >= 20 && steps <= 60, "took {steps} steps");
        // Impact resolved exactly once: egg gone, debris spawned.
        assert!(sim.eggs.is_empty());
        assert!(!sim.fragments.is_empty());
    }

    #[test]
    fn fragment_settles_exactly_once_and_leaves_overlay() {
        let mut sim = test_sim();
        let mut paint = Raster::new(800, 600);
        paint.clear(WHITE);
        sim.fragments.push(ShellFragment {
            pos: glam::Vec2::new(400.0, 200.0),
            vel: glam::Vec2::new(3.0, 3.0),
            rotation: 0.3,
            life: 0.001, // expires on the first step
            size: 6.0,
            color: crate::raster::rgba(200, 60, 60, 255),
            ground: None,
        });

        sim.step(DT, &mut paint);
        assert!(sim.fragments.is_empty(), "settled fragment must be removed");

        // The stamp landed on the paint layer.
        let mut stamped = false;
        for y in 190..215u32 {
            for x in 390..415u32 {
                if paint.pixel(x, y) != WHITE {
                    stamped = true;
                }
            }
        }
        assert!(stamped);

        // And it never shows up in the overlay pass again.
        let mut ov = Raster::new(800, 600);
        let mut rng = fastrand::Rng::with_seed(1);
        overlay::draw(&sim, &mut ov, &mut rng);
        for y in 0..ov.height() {
            for x in 0..ov.width() {
                assert_eq!(ov.pixel(x, y), TRANSPARENT);
            }
        }
    }

    #[test]
    fn settled_stamp_respects_ground_clamp() {
        let mut sim = test_sim();
        let mut paint = Raster::new(200, 400);
        paint.clear(WHITE);
        sim.fragments.push(ShellFragment {
            pos: glam::Vec2::new(100.0, 350.0),
            vel: glam::Vec2::ZERO,
            rotation: 0.0,
            life: 0.001,
            size: 8.0,
            color: crate::raster::rgba(10, 10, 10, 255),
            ground: Some(300.0),
        });
        sim.step(DT, &mut paint);
        // Nothing below the impact line (plus jitter + half-height slack).
        for y in 310..400u32 {
            for x in 0..200u32 {
                assert_eq!(paint.pixel(x, y), WHITE, "stamp leaked below ground at y={y}");
            }
        }
    }

    #[test]
    fn disabled_ants_are_frozen() {
        let mut sim = test_sim();
        let mut paint = Raster::new(800, 600);
        paint.clear(WHITE);
        let ant = Ant {
            pos: glam::Vec2::new(100.0, 100.0),
            vel: glam::Vec2::new(120.0, 0.0),
            life: 0.001, // would expire immediately if updated
            t: 0.0,
            jitter: 0.0,
            size: 5.0,
        };
        sim.ants.push(ant);
        for _ in 0..30 {
            sim.step(DT, &mut paint);
        }
        assert_eq!(sim.ants.len(), 1, "frozen ants must not be removed");
        assert_eq!(sim.ants[0].pos, ant.pos, "frozen ants must not move");
        assert_eq!(sim.ants[0].life, ant.life);
    }

    #[test]
    fn enabled_ants_expire_and_leave() {
        let mut sim = test_sim();
        sim.set_ants_enabled(true);
        let mut paint = Raster::new(800, 600);
        paint.clear(WHITE);
        sim.ants.push(Ant {
            pos: glam::Vec2::new(400.0, 300.0),
            vel: glam::Vec2::new(100.0, 0.0),
            life: 0.05,
            t: 0.0,
            jitter: 10.0,
            size: 5.0,
        });
        for _ in 0..10 {
            sim.step(DT, &mut paint);
        }
        assert!(sim.ants.is_empty());
    }

    #[test]
    fn huge_dt_is_clamped() {
        let mut sim = test_sim();
        let mut paint = Raster::new(800, 600);
        drop_egg(&mut sim, 500.0);
        sim.step(10.0, &mut paint); // tab stall
        let e = &sim.eggs[0];
        // One clamped step from vy0 = 60: at most (60 + 1200*0.04) * 0.04.
        assert!(e.pos.y < -22.0 + 5.0);
    }
}
