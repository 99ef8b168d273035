use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::catalog::EggKind;
use crate::config::EngineConfig;
use crate::export;
use crate::raster::{rgba, Raster, WHITE};
use crate::render::GpuState;
use crate::sim::{overlay, Simulation, ToolMode};

/// Logical canvas size. Fixed at startup; the window blit stretches.
const CANVAS_W: u32 = 1024;
const CANVAS_H: u32 = 768;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Brush colors cycled with the B key.
const BRUSH_PALETTE: [u32; 6] = [
    rgba(0x22, 0x22, 0x22, 0xFF), // ink
    rgba(0xC0, 0x26, 0x26, 0xFF), // red
    rgba(0x1A, 0x6B, 0xC7, 0xFF), // blue
    rgba(0x2E, 0x8B, 0x3A, 0xFF), // green
    rgba(0xE8, 0x9C, 0x1C, 0xFF), // amber
    rgba(0x7A, 0x2E, 0xA8, 0xFF), // violet
];

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, entities: (usize, usize, usize)) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            let (eggs, frags, ants) = entities;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | frames: {} | eggs: {} frags: {} ants: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
                eggs,
                frags,
                ants,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    sim: Simulation,
    paint: Raster,
    overlay: Raster,
    /// Cosmetic per-frame randomness for the overlay pass (speckles).
    overlay_rng: fastrand::Rng,

    // Pointer state, scaled to canvas coordinates
    cursor: Vec2,
    pen_down: bool,
    pen_last: Vec2,
    brush_index: usize,

    last_frame_time: Option<Instant>,
    frame_stats: FrameStats,
}

impl App {
    fn new() -> Self {
        let mut config = EngineConfig::default();
        if let Ok(key) = std::env::var("EGGSPLAT_VARIETY") {
            config.default_kind = EggKind::from_key(&key, config.default_kind);
        }
        let mut paint = Raster::new(CANVAS_W, CANVAS_H);
        paint.clear(WHITE);
        Self {
            window: None,
            gpu: None,
            sim: Simulation::new(config, CANVAS_W as f32, CANVAS_H as f32),
            paint,
            overlay: Raster::new(CANVAS_W, CANVAS_H),
            overlay_rng: fastrand::Rng::new(),
            cursor: Vec2::ZERO,
            pen_down: false,
            pen_last: Vec2::ZERO,
            brush_index: 0,
            last_frame_time: None,
            frame_stats: FrameStats::new(),
        }
    }

    /// Map a window-space position to canvas coordinates (the blit
    /// stretches when the window was resized).
    fn to_canvas(&self, x: f64, y: f64) -> Vec2 {
        let (ww, wh) = match &self.window {
            Some(w) => {
                let s = w.inner_size();
                (s.width.max(1) as f32, s.height.max(1) as f32)
            }
            None => (CANVAS_W as f32, CANVAS_H as f32),
        };
        Vec2::new(
            x as f32 * CANVAS_W as f32 / ww,
            y as f32 * CANVAS_H as f32 / wh,
        )
    }

    fn handle_key(&mut self, code: KeyCode, event_loop: &ActiveEventLoop) {
        match code {
            KeyCode::Escape => {
                log::info!("ESC pressed, exiting");
                event_loop.exit();
            }
            KeyCode::KeyE => {
                self.sim.set_mode(ToolMode::Egg);
                log::info!("mode: egg");
            }
            KeyCode::KeyP => {
                self.sim.set_mode(ToolMode::Pen);
                log::info!("mode: pen");
            }
            KeyCode::Space => {
                if self.sim.mode == ToolMode::Egg {
                    self.sim.request_egg_drop(None, None);
                }
            }
            KeyCode::KeyT => {
                let next = self.sim.selected.next();
                self.sim.set_egg_kind(next);
                log::info!("egg variety: {}", next.spec().name);
            }
            KeyCode::KeyR => {
                let on = !self.sim.rain_active();
                self.sim.set_rain(on);
                log::info!("egg rain: {}", if on { "on" } else { "off" });
            }
            KeyCode::KeyY => {
                let on = !self.sim.realistic_yolk;
                self.sim.set_realistic_yolk(on);
                log::info!("realistic yolk: {}", if on { "on" } else { "off" });
            }
            KeyCode::KeyA => {
                let on = !self.sim.ants_enabled;
                self.sim.set_ants_enabled(on);
                log::info!("ants: {}", if on { "on" } else { "off" });
            }
            KeyCode::KeyB => {
                self.brush_index = (self.brush_index + 1) % BRUSH_PALETTE.len();
                self.sim.set_brush_color(BRUSH_PALETTE[self.brush_index]);
            }
            KeyCode::BracketLeft => {
                self.sim.set_brush_size(self.sim.brush_size - 2.0);
            }
            KeyCode::BracketRight => {
                self.sim.set_brush_size(self.sim.brush_size + 2.0);
            }
            KeyCode::KeyC => {
                self.sim.clear(&mut self.paint);
                log::info!("canvas cleared");
            }
            KeyCode::KeyS => {
                let stamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                let path = PathBuf::from(format!("eggsplat-{stamp}.png"));
                if let Err(e) = export::save_png(&self.paint, &path) {
                    log::error!("export failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            self.frame_stats.record_frame(
                dt,
                (self.sim.eggs.len(), self.sim.fragments.len(), self.sim.ants.len()),
            );
            // Physics + permanent stamps (dt clamp happens inside).
            self.sim.step(dt as f32, &mut self.paint);
        }
        self.last_frame_time = Some(now);

        // Transient redraw of everything still in flight.
        overlay::draw(&self.sim, &mut self.overlay, &mut self.overlay_rng);

        if let Some(gpu) = &mut self.gpu {
            gpu.upload_layers(self.paint.data(), self.overlay.data());
            gpu.render_frame();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("eggsplat")
            .with_inner_size(winit::dpi::LogicalSize::new(CANVAS_W, CANVAS_H));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone(), CANVAS_W, CANVAS_H);
        self.gpu = Some(gpu);
        log::info!("wgpu + layer pipeline initialized");

        // Continuous loop — the toy animates even when idle.
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_key(code, event_loop);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.to_canvas(position.x, position.y);
                if self.pen_down && self.sim.mode == ToolMode::Pen {
                    self.sim.pen_stroke(&mut self.paint, self.pen_last, self.cursor);
                    self.pen_last = self.cursor;
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => match self.sim.mode {
                    ToolMode::Pen => {
                        self.pen_down = true;
                        self.pen_last = self.cursor;
                        // Dot even without movement.
                        self.sim.pen_stroke(&mut self.paint, self.cursor, self.cursor);
                    }
                    ToolMode::Egg => {
                        self.sim
                            .request_egg_drop(Some(self.cursor.x), Some(self.cursor.y));
                    }
                },
                ElementState::Released => {
                    self.pen_down = false;
                }
            },
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
