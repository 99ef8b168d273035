use glam::Vec2;

/// A falling egg. Lives until its y reaches `impact_y`, then shatters.
#[derive(Debug, Clone, Copy)]
pub struct Egg {
    /// Position in logical pixels; y grows downward.
    pub pos: Vec2,
    /// Height at which the egg hits the paint.
    pub impact_y: f32,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Body radius.
    pub r: f32,
    /// Shell color, packed RGBA.
    pub shell: u32,
    /// Yolk color — splatter color in realistic-yolk mode.
    pub yolk: u32,
    pub speckled: bool,
    /// Tumble angle (radians) and rate (radians/s).
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Cleared exactly once, on the impact frame.
    pub alive: bool,
}

/// A shell piece thrown out by a shattering egg. Transient: once it
/// settles it is stamped onto the paint layer and removed.
#[derive(Debug, Clone, Copy)]
pub struct ShellFragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    /// Remaining flight time in seconds.
    pub life: f32,
    /// Stamp size in pixels, never below 1.
    pub size: f32,
    /// Parent egg's shell color.
    pub color: u32,
    /// Parent egg's impact line, for ground-clamped stamping.
    pub ground: Option<f32>,
}

/// An ambient ant wandering across the paint.
#[derive(Debug, Clone, Copy)]
pub struct Ant {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in seconds.
    pub life: f32,
    /// Elapsed personal time driving the wander oscillators.
    pub t: f32,
    /// Per-ant phase seed so ants don't wiggle in lockstep.
    pub jitter: f32,
    pub size: f32,
}
