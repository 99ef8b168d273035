//! Entity spawning and the three cooperative spawn timers.
//!
//! Timers are plain accumulators ticked by the physics step's dt; they
//! only ever append to the entity lists. Removal is the step's job.

use glam::Vec2;

use crate::catalog::{EggKind, ALL_KINDS};
use crate::sim::entities::{Ant, Egg};
use crate::sim::Simulation;
use crate::util::rand_range;

/// Egg-rain tick interval (seconds).
const RAIN_INTERVAL: f32 = 0.35;
/// Ambient ant check interval (seconds).
const AMBIENT_INTERVAL: f32 = 3.0;
/// Chance of one ambient ant per check.
const AMBIENT_CHANCE: f32 = 0.25;
/// Frenzy reschedule delay range (seconds).
const FRENZY_DELAY: (f32, f32) = (5.0, 22.0);
/// Frenzy burst size range.
const FRENZY_COUNT: (f32, f32) = (20.0, 80.0);

/// Cooperative spawn timers.
pub struct Timers {
    pub rain_active: bool,
    pub rain_acc: f32,
    pub ambient_acc: f32,
    /// Countdown to the next frenzy burst.
    pub frenzy_next: f32,
    /// Staggered start delays for frenzy ants not yet on screen.
    pub pending_ants: Vec<f32>,
}

impl Timers {
    pub fn new() -> Self {
        Self {
            rain_active: false,
            rain_acc: 0.0,
            ambient_acc: 0.0,
            // First frenzy lands in the normal window after startup.
            frenzy_next: 10.0,
            pending_ants: Vec::new(),
        }
    }
}

/// Advance all spawn timers by dt, appending whatever comes due.
pub fn tick_timers(sim: &mut Simulation, dt: f32) {
    // Egg rain
    if sim.timers.rain_active {
        sim.timers.rain_acc += dt;
        while sim.timers.rain_acc >= RAIN_INTERVAL {
            sim.timers.rain_acc -= RAIN_INTERVAL;
            rain_tick(sim);
        }
    }

    // Ambient ants
    sim.timers.ambient_acc += dt;
    while sim.timers.ambient_acc >= AMBIENT_INTERVAL {
        sim.timers.ambient_acc -= AMBIENT_INTERVAL;
        if sim.rng.f32() < AMBIENT_CHANCE {
            spawn_ant(sim, None, None);
        }
    }

    // Frenzy: reschedule, queueing staggered arrivals over ~half a second
    sim.timers.frenzy_next -= dt;
    if sim.timers.frenzy_next <= 0.0 {
        let count = rand_range(&mut sim.rng, FRENZY_COUNT.0, FRENZY_COUNT.1) as usize;
        for i in 0..count {
            let delay = i as f32 * 0.05 + rand_range(&mut sim.rng, 0.0, 0.4);
            sim.timers.pending_ants.push(delay);
        }
        sim.timers.frenzy_next = rand_range(&mut sim.rng, FRENZY_DELAY.0, FRENZY_DELAY.1);
        log::debug!("ant frenzy: {count} ants queued");
    }

    let mut due = 0;
    for d in &mut sim.timers.pending_ants {
        *d -= dt;
        if *d <= 0.0 {
            due += 1;
        }
    }
    sim.timers.pending_ants.retain(|d| *d > 0.0);
    for _ in 0..due {
        spawn_ant(sim, None, None);
    }
}

/// One rain interval: usually a drizzle, occasionally a volley. Variety
/// is weighted toward the user's selection.
fn rain_tick(sim: &mut Simulation) {
    let n = if sim.rng.f32() > 0.85 {
        rand_range(&mut sim.rng, 3.0, 8.0) as usize
    } else {
        rand_range(&mut sim.rng, 1.0, 2.0) as usize
    };
    for _ in 0..n {
        let kind = if sim.rng.f32() < 0.6 {
            sim.selected
        } else {
            ALL_KINDS[sim.rng.usize(0..ALL_KINDS.len())]
        };
        spawn_egg(sim, None, kind, 0.0, None);
    }
}

/// Append one egg. Spawns above the surface and falls to `impact_y`
/// (click height, or a random band leaving top/bottom margins).
pub fn spawn_egg(
    sim: &mut Simulation,
    x: Option<f32>,
    kind: EggKind,
    vx_bias: f32,
    impact_y: Option<f32>,
) {
    if sim.eggs.len() >= sim.config.max_eggs {
        log::debug!("egg cap reached ({}), drop ignored", sim.config.max_eggs);
        return;
    }
    let spec = kind.spec();
    let x = x.unwrap_or_else(|| rand_range(&mut sim.rng, spec.r, sim.width - spec.r));
    let impact_y = impact_y.unwrap_or_else(|| rand_range(&mut sim.rng, 50.0, sim.height - 50.0));
    let rng = &mut sim.rng;
    sim.eggs.push(Egg {
        pos: Vec2::new(x, -spec.r * 1.2),
        impact_y,
        vel: Vec2::new(
            vx_bias + rand_range(rng, -60.0, 60.0),
            rand_range(rng, 60.0, 180.0),
        ),
        r: spec.r,
        shell: spec.shell,
        yolk: spec.yolk,
        speckled: spec.speckled,
        rotation: rand_range(rng, -0.6, 0.6),
        rotation_speed: rand_range(rng, -3.0, 3.0),
        alive: true,
    });
}

/// Append one ant, entering from a random point on either side edge.
/// A strict no-op while ants are disabled.
pub fn spawn_ant(sim: &mut Simulation, x: Option<f32>, y: Option<f32>) {
    if !sim.ants_enabled {
        return;
    }
    if sim.ants.len() >= sim.config.max_ants {
        log::debug!("ant cap reached ({}), spawn ignored", sim.config.max_ants);
        return;
    }
    let ax = x.unwrap_or(if sim.rng.bool() { -20.0 } else { sim.width + 20.0 });
    let ay = y.unwrap_or_else(|| rand_range(&mut sim.rng, 20.0, sim.height - 20.0));
    let rng = &mut sim.rng;
    let vx = if ax < 0.0 {
        rand_range(rng, 80.0, 180.0)
    } else {
        rand_range(rng, -180.0, -80.0)
    };
    sim.ants.push(Ant {
        pos: Vec2::new(ax, ay),
        vel: Vec2::new(vx, rand_range(rng, -50.0, 50.0)),
        life: rand_range(rng, 2.0, 6.0),
        t: 0.0,
        jitter: rng.f32() * 400.0,
        size: rand_range(rng, 3.0, 7.0),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::raster::Raster;

    fn test_sim() -> Simulation {
        let mut sim = Simulation::new(EngineConfig::default(), 800.0, 600.0);
        sim.rng = fastrand::Rng::with_seed(0xE66);
        sim
    }

    #[test]
    fn egg_spawns_above_surface_within_bounds() {
        let mut sim = test_sim();
        for _ in 0..50 {
            spawn_egg(&mut sim, None, EggKind::Goose, 0.0, None);
        }
        for e in &sim.eggs {
            assert!(e.pos.y < 0.0);
            assert!(e.pos.x >= e.r && e.pos.x <= sim.width - e.r);
            assert!(e.impact_y >= 50.0 && e.impact_y <= sim.height - 50.0);
            assert!(e.alive);
        }
    }

    #[test]
    fn spawn_ant_is_noop_when_disabled() {
        let mut sim = test_sim();
        sim.set_ants_enabled(false);
        for _ in 0..10 {
            spawn_ant(&mut sim, None, None);
        }
        assert!(sim.ants.is_empty());
    }

    #[test]
    fn ants_enter_from_an_edge_walking_inward() {
        let mut sim = test_sim();
        for _ in 0..40 {
            spawn_ant(&mut sim, None, None);
        }
        for a in &sim.ants {
            if a.pos.x < 0.0 {
                assert!(a.vel.x > 0.0);
            } else {
                assert!(a.pos.x > sim.width);
                assert!(a.vel.x < 0.0);
            }
        }
    }

    #[test]
    fn rain_spawns_and_double_stop_is_clean() {
        let mut sim = test_sim();
        let mut paint = Raster::new(800, 600);
        sim.set_rain(true);
        for _ in 0..120 {
            sim.step(1.0 / 60.0, &mut paint);
        }
        assert!(!sim.eggs.is_empty() || !sim.fragments.is_empty());

        sim.set_rain(false);
        sim.set_rain(false); // second stop must be a no-op
        assert!(!sim.rain_active());
        sim.eggs.clear();
        sim.fragments.clear();
        // A whole simulated second of stopped rain spawns nothing.
        for _ in 0..60 {
            spawn_rainless_step(&mut sim, &mut paint);
        }
        assert!(sim.eggs.is_empty());
    }

    fn spawn_rainless_step(sim: &mut Simulation, paint: &mut Raster) {
        // Frenzy/ambient only make ants; eggs can only come from rain here.
        sim.step(1.0 / 60.0, paint);
    }

    #[test]
    fn egg_cap_drops_extra_spawns() {
        let mut sim = test_sim();
        sim.config.max_eggs = 3;
        for _ in 0..10 {
            sim.request_egg_drop(None, None);
        }
        assert_eq!(sim.eggs.len(), 3);
    }

    #[test]
    fn ant_cap_drops_extra_spawns() {
        let mut sim = test_sim();
        sim.config.max_ants = 3;
        for _ in 0..10 {
            spawn_ant(&mut sim, None, None);
        }
        assert_eq!(sim.ants.len(), 3);
    }

    #[test]
    fn frenzy_queues_a_staggered_burst() {
        let mut sim = test_sim();
        sim.timers.frenzy_next = 0.0;
        tick_timers(&mut sim, 1.0 / 60.0);
        // Everything queued is either still pending or already on screen.
        assert!(sim.timers.pending_ants.len() + sim.ants.len() >= 20);
        // Rescheduled into the normal window.
        assert!(sim.timers.frenzy_next > 0.0);
        // Delays are staggered, not instantaneous.
        let max = sim.timers.pending_ants.iter().cloned().fold(0.0, f32::max);
        assert!(max > 0.5);
    }
}
