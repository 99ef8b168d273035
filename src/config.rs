use crate::catalog::EggKind;

/// Tuning knobs for the simulation engine.
///
/// The toy shipped in two near-identical builds that disagreed only on a
/// handful of constants; those live here so one engine covers both.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Variety used when a drop doesn't name one.
    pub default_kind: EggKind,
    /// Whether ants wander in at all. When false the ant list is frozen.
    pub ants_enabled: bool,
    /// Splatter with the egg's own yolk color instead of the brush color.
    pub realistic_yolk: bool,
    /// Egg gravity, px/s².
    pub gravity: f32,
    /// Gravity applied to shell fragments, px/s².
    pub fragment_gravity: f32,
    /// Per-axis fragment damping factors at the 60 fps reference frame.
    /// Applied as `f.powf(dt * 60)` so decay is frame-rate independent.
    pub fragment_friction: (f32, f32),
    /// Fragment burst count range before radius scaling (count is
    /// `U(lo, hi) * r / 18`).
    pub fragment_burst: (f32, f32),
    /// Clamp settled fragment stamps to the parent egg's impact line so
    /// debris doesn't land visually below its own splatter.
    pub fragment_ground_clamp: bool,
    /// Hard caps on active entities. Spawns past a cap are dropped.
    pub max_eggs: usize,
    pub max_fragments: usize,
    pub max_ants: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_kind: EggKind::White,
            ants_enabled: true,
            realistic_yolk: false,
            gravity: 1200.0,
            fragment_gravity: 3900.0,
            fragment_friction: (0.985, 0.99),
            fragment_burst: (12.0, 30.0),
            fragment_ground_clamp: true,
            max_eggs: 256,
            max_fragments: 4096,
            max_ants: 512,
        }
    }
}
