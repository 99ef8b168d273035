pub mod smudge;

use glam::Vec2;

/// Opaque white, the paint layer's base coat.
pub const WHITE: u32 = 0xFFFFFFFF;
/// Fully transparent, the overlay layer's clear value.
pub const TRANSPARENT: u32 = 0x00000000;

/// Pack RGBA bytes into a u32 (0xRRGGBBAA).
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

fn unpack(color: u32) -> [f32; 4] {
    [
        ((color >> 24) & 0xFF) as f32 / 255.0,
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

/// A CPU raster target — straight-alpha RGBA8, row-major.
///
/// Two of these back the toy: a persistent paint layer that accumulates
/// splatter marks, and a transient overlay cleared every frame. The byte
/// buffer is uploaded directly as an `Rgba8Unorm` texture.
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes for GPU upload / PNG encode.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Packed RGBA at (x, y). Out-of-bounds reads return TRANSPARENT.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return TRANSPARENT;
        }
        let i = ((y * self.width + x) * 4) as usize;
        rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Fill the whole target with one color (no blending).
    pub fn clear(&mut self, color: u32) {
        let [r, g, b, a] = [
            (color >> 24) as u8,
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
        ];
        for px in self.data.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }

    /// Source-over blend of a straight-alpha color into one pixel.
    pub fn blend_px(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let [sr, sg, sb, sa] = unpack(color);
        if sa >= 1.0 {
            self.data[i] = (sr * 255.0) as u8;
            self.data[i + 1] = (sg * 255.0) as u8;
            self.data[i + 2] = (sb * 255.0) as u8;
            self.data[i + 3] = 255;
            return;
        }
        if sa <= 0.0 {
            return;
        }
        let da = self.data[i + 3] as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        if oa <= 0.0 {
            return;
        }
        let blend = |d: u8, s: f32| -> u8 {
            let d = d as f32 / 255.0;
            (((s * sa + d * da * (1.0 - sa)) / oa) * 255.0).round() as u8
        };
        self.data[i] = blend(self.data[i], sr);
        self.data[i + 1] = blend(self.data[i + 1], sg);
        self.data[i + 2] = blend(self.data[i + 2], sb);
        self.data[i + 3] = (oa * 255.0).round() as u8;
    }

    /// Destination-out erase: scales pixel alpha down by `strength` (0..1).
    pub fn erase_px(&mut self, x: i32, y: i32, strength: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4 + 3) as usize;
        self.data[i] = (self.data[i] as f32 * (1.0 - strength.clamp(0.0, 1.0))) as u8;
    }

    /// Filled ellipse, rotated by `rot` radians around its center.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rot: f32, color: u32) {
        self.ellipse_op(cx, cy, rx, ry, rot, 0.0, |d2| d2 <= 1.0, |r, x, y| {
            r.blend_px(x, y, color)
        });
    }

    /// Ellipse outline of roughly `line_width` pixels.
    pub fn stroke_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rot: f32,
        line_width: f32,
        color: u32,
    ) {
        let half = (line_width * 0.5) / rx.min(ry).max(1.0);
        self.ellipse_op(
            cx,
            cy,
            rx,
            ry,
            rot,
            line_width,
            move |d2| (d2.sqrt() - 1.0).abs() <= half,
            |r, x, y| r.blend_px(x, y, color),
        );
    }

    /// Destination-out ellipse — the ant disturbance mark.
    pub fn erase_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, strength: f32) {
        self.ellipse_op(cx, cy, rx, ry, 0.0, 0.0, |d2| d2 <= 1.0, |r, x, y| {
            r.erase_px(x, y, strength)
        });
    }

    /// Radial-gradient ellipse: `inner` color at the center fading to
    /// `outer` at the rim. Colors are straight-alpha RGBA.
    pub fn fill_gradient_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rot: f32,
        inner: u32,
        outer: u32,
    ) {
        let ic = unpack(inner);
        let oc = unpack(outer);
        self.ellipse_op(cx, cy, rx, ry, rot, 0.0, |d2| d2 <= 1.0, move |r, x, y| {
            // Re-derive normalized distance for the gradient lerp.
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let (s, c) = rot.sin_cos();
            let lx = (dx * c + dy * s) / rx;
            let ly = (-dx * s + dy * c) / ry;
            let t = (lx * lx + ly * ly).sqrt().min(1.0);
            let lerp = |a: f32, b: f32| a + (b - a) * t;
            let color = rgba(
                (lerp(ic[0], oc[0]) * 255.0) as u8,
                (lerp(ic[1], oc[1]) * 255.0) as u8,
                (lerp(ic[2], oc[2]) * 255.0) as u8,
                (lerp(ic[3], oc[3]) * 255.0) as u8,
            );
            r.blend_px(x, y, color);
        });
    }

    /// Filled closed polygon (even-odd scanline fill).
    pub fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        if points.len() < 3 {
            return;
        }
        let y_min = points.iter().map(|p| p.y).fold(f32::MAX, f32::min).floor().max(0.0) as i32;
        let y_max = points
            .iter()
            .map(|p| p.y)
            .fold(f32::MIN, f32::max)
            .ceil()
            .min(self.height as f32) as i32;

        let mut xs: Vec<f32> = Vec::with_capacity(points.len());
        for y in y_min..y_max {
            let sy = y as f32 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                    xs.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.chunks_exact(2) {
                let x0 = pair[0].round().max(0.0) as i32;
                let x1 = pair[1].round().min(self.width as f32) as i32;
                for x in x0..x1 {
                    self.blend_px(x, y, color);
                }
            }
        }
    }

    /// Filled rectangle centered at (cx, cy), rotated by `rot` radians.
    pub fn fill_rect_rotated(&mut self, cx: f32, cy: f32, w: f32, h: f32, rot: f32, color: u32) {
        let (s, c) = rot.sin_cos();
        let center = Vec2::new(cx, cy);
        let corners = [
            Vec2::new(-w * 0.5, -h * 0.5),
            Vec2::new(w * 0.5, -h * 0.5),
            Vec2::new(w * 0.5, h * 0.5),
            Vec2::new(-w * 0.5, h * 0.5),
        ]
        .map(|p| center + Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c));
        self.fill_polygon(&corners, color);
    }

    /// Round-capped stroke from `a` to `b` — the pen tool.
    pub fn brush_line(&mut self, a: Vec2, b: Vec2, width: f32, color: u32) {
        let r = (width * 0.5).max(0.5);
        let len = a.distance(b);
        let steps = (len / (r * 0.5).max(1.0)).ceil() as u32 + 1;
        for i in 0..=steps {
            let p = a.lerp(b, i as f32 / steps as f32);
            self.fill_ellipse(p.x, p.y, r, r, 0.0, color);
        }
    }

    /// Shared bounding-box scan for ellipse-shaped operations. `hit` gets
    /// the squared normalized distance; `op` runs on accepted pixels.
    /// `pad` widens the scan box without changing the normalization
    /// (strokes sit half outside the rim).
    #[allow(clippy::too_many_arguments)]
    fn ellipse_op(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rot: f32,
        pad: f32,
        hit: impl Fn(f32) -> bool,
        mut op: impl FnMut(&mut Self, i32, i32),
    ) {
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let ext = rx.max(ry) + pad;
        let x0 = (cx - ext).floor().max(0.0) as i32;
        let x1 = (cx + ext).ceil().min(self.width as f32) as i32;
        let y0 = (cy - ext).floor().max(0.0) as i32;
        let y1 = (cy + ext).ceil().min(self.height as f32) as i32;
        let (s, c) = rot.sin_cos();
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let lx = (dx * c + dy * s) / rx;
                let ly = (-dx * s + dy * c) / ry;
                if hit(lx * lx + ly * ly) {
                    op(self, x, y);
                }
            }
        }
    }
}
