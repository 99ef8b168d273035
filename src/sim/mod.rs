pub mod entities;
pub mod overlay;
pub mod shatter;
pub mod spawn;
pub mod step;

use crate::catalog::EggKind;
use crate::config::EngineConfig;
use crate::raster::{rgba, Raster, WHITE};

use self::entities::{Ant, Egg, ShellFragment};
use self::spawn::Timers;

/// What a pointer click means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    /// Freehand brush strokes straight onto the paint layer.
    Pen,
    /// Clicks drop an egg aimed at the click point.
    Egg,
}

/// The whole toy state: entity lists, toggles, brush, spawn timers, RNG.
///
/// Owns all three entity lists exclusively. Spawning appends, the physics
/// step mutates and removes, the overlay pass only reads. The front end
/// talks to it through the command methods; it never touches presentation.
pub struct Simulation {
    pub config: EngineConfig,
    /// Logical surface size in pixels (fixed at startup).
    pub width: f32,
    pub height: f32,

    pub eggs: Vec<Egg>,
    pub fragments: Vec<ShellFragment>,
    pub ants: Vec<Ant>,
    pub timers: Timers,

    pub mode: ToolMode,
    pub selected: EggKind,
    pub brush_color: u32,
    pub brush_size: f32,
    pub realistic_yolk: bool,
    pub ants_enabled: bool,

    pub rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(config: EngineConfig, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            eggs: Vec::with_capacity(config.max_eggs),
            fragments: Vec::with_capacity(256),
            ants: Vec::with_capacity(64),
            timers: Timers::new(),
            mode: ToolMode::Egg,
            selected: config.default_kind,
            brush_color: rgba(0x22, 0x22, 0x22, 0xFF),
            brush_size: 6.0,
            realistic_yolk: config.realistic_yolk,
            ants_enabled: config.ants_enabled,
            rng: fastrand::Rng::new(),
            config,
        }
    }

    /// Advance the whole toy by one frame. `dt` is clamped internally;
    /// permanent marks (splatter, settled fragments, ant disturbances)
    /// land on `paint`.
    pub fn step(&mut self, dt: f32, paint: &mut Raster) {
        step::run(self, dt, paint);
    }

    // ------------------------------------------------------------------
    // Commands (invoked by the UI layer)
    // ------------------------------------------------------------------

    /// Drop one egg of the selected variety. `x`/`impact_y` from a click,
    /// or None for a random drop.
    pub fn request_egg_drop(&mut self, x: Option<f32>, impact_y: Option<f32>) {
        spawn::spawn_egg(self, x, self.selected, 0.0, impact_y);
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn set_egg_kind(&mut self, kind: EggKind) {
        self.selected = kind;
    }

    pub fn set_brush_color(&mut self, color: u32) {
        self.brush_color = color;
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.max(1.0);
    }

    pub fn set_realistic_yolk(&mut self, on: bool) {
        self.realistic_yolk = on;
    }

    pub fn set_ants_enabled(&mut self, on: bool) {
        self.ants_enabled = on;
    }

    /// Start/stop egg rain. Stopping is idempotent: a second stop is a
    /// no-op and leaves no pending interval.
    pub fn set_rain(&mut self, on: bool) {
        self.timers.rain_active = on;
        self.timers.rain_acc = 0.0;
    }

    pub fn rain_active(&self) -> bool {
        self.timers.rain_active
    }

    /// Reset the paint layer to its white base coat.
    pub fn clear(&self, paint: &mut Raster) {
        paint.clear(WHITE);
    }

    /// Freehand pen segment (only meaningful in pen mode; the caller
    /// gates on `mode`).
    pub fn pen_stroke(&self, paint: &mut Raster, from: glam::Vec2, to: glam::Vec2) {
        paint.brush_line(from, to, self.brush_size, self.brush_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn clear_restores_uniform_white() {
        let sim = Simulation::new(EngineConfig::default(), 64.0, 64.0);
        let mut paint = Raster::new(64, 64);
        sim.pen_stroke(&mut paint, Vec2::new(5.0, 5.0), Vec2::new(60.0, 60.0));
        sim.clear(&mut paint);
        for &(x, y) in &[(0, 0), (63, 0), (0, 63), (63, 63), (32, 32)] {
            assert_eq!(paint.pixel(x, y), WHITE);
        }
    }

    #[test]
    fn pen_stroke_uses_brush_state() {
        let mut sim = Simulation::new(EngineConfig::default(), 64.0, 64.0);
        let pink = rgba(0xFF, 0x40, 0x90, 0xFF);
        sim.set_brush_color(pink);
        sim.set_brush_size(8.0);
        let mut paint = Raster::new(64, 64);
        paint.clear(WHITE);
        sim.pen_stroke(&mut paint, Vec2::new(20.0, 20.0), Vec2::new(40.0, 20.0));
        assert_eq!(paint.pixel(30, 20), pink);
        // Brush size never drops below 1.
        sim.set_brush_size(-3.0);
        assert_eq!(sim.brush_size, 1.0);
    }
}
