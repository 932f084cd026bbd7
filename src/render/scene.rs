//! Scene composition
//!
//! A [`Scene`] is what gets painted onto the logical square canvas for one
//! frame. Composing it is a pure function of [`GameState`]; turning it into
//! terminal cells is the board widget's job.
//!
//! The checkerboard is not stored as shapes: its colour follows from the
//! tile a point falls in. Only food, snake segments and the eye are kept as
//! shapes, indexed by the tiles they touch, so sampling a point only looks
//! at the few shapes on its own tile.

use crate::game::{GameState, Position};

/// A colour with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Gradient interpolation in premultiplied space, like a canvas gradient
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= 0.0 {
            return Rgba::rgba(0, 0, 0, 0.0);
        }

        let mix = |s: u8, o: u8| {
            let from = s as f32 * self.a;
            let to = o as f32 * other.a;
            ((from + (to - from) * t) / a).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a,
        }
    }

    /// Source-over compositing onto an opaque backdrop
    pub fn over(self, dst: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        Rgba::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

/// Visible only outside the grid
pub const BACKGROUND: Rgba = Rgba::rgb(0x05, 0x07, 0x08);
/// Tiles where `x + y` is even
pub const TILE_EVEN: Rgba = Rgba::rgb(0x0b, 0x11, 0x20);
/// Tiles where `x + y` is odd
pub const TILE_ODD: Rgba = Rgba::rgb(0x02, 0x06, 0x17);
pub const FOOD_CORE: Rgba = Rgba::rgb(0x4a, 0xde, 0x80);
pub const FOOD_HALO: Rgba = Rgba::rgba(34, 197, 94, 0.1);
pub const SNAKE: Rgba = Rgba::rgb(56, 189, 248);
pub const EYE: Rgba = Rgba::rgba(248, 250, 252, 0.8);

const SEGMENT_INSET: f32 = 2.0;
const SEGMENT_RADIUS: f32 = 8.0;
const EYE_RADIUS: f32 = 4.0;
const FOOD_GRADIENT_START: f32 = 2.0;
const MIN_SEGMENT_ALPHA: f32 = 0.25;
const SEGMENT_FADE: f32 = 0.03;

/// Something painted over the checkerboard
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Rgba,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
    },
    /// Circle filled with a radial gradient running from `start` to `end`
    /// (distances from the centre); clipped to `radius`
    RadialGradientCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        from: Rgba,
        to: Rgba,
    },
}

impl Shape {
    /// Colour this shape contributes at (px, py), if it covers that point
    pub fn color_at(&self, px: f32, py: f32) -> Option<Rgba> {
        match *self {
            Shape::RoundedRect {
                x,
                y,
                w,
                h,
                radius,
                color,
            } => {
                if px < x || px > x + w || py < y || py > y + h {
                    return None;
                }
                let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
                // Nearest point of the rect shrunk by the corner radius
                let nx = px.max(x + r).min(x + w - r);
                let ny = py.max(y + r).min(y + h - r);
                let (dx, dy) = (px - nx, py - ny);
                (dx * dx + dy * dy <= r * r).then_some(color)
            }
            Shape::Circle {
                cx,
                cy,
                radius,
                color,
            } => (distance(px, py, cx, cy) <= radius).then_some(color),
            Shape::RadialGradientCircle {
                cx,
                cy,
                radius,
                start,
                end,
                from,
                to,
            } => {
                let d = distance(px, py, cx, cy);
                if d > radius {
                    return None;
                }
                let t = if end > start {
                    (d - start) / (end - start)
                } else {
                    0.0
                };
                Some(from.lerp(to, t))
            }
        }
    }

    /// Bounding box as (left, top, right, bottom)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match *self {
            Shape::RoundedRect { x, y, w, h, .. } => (x, y, x + w, y + h),
            Shape::Circle { cx, cy, radius, .. }
            | Shape::RadialGradientCircle { cx, cy, radius, .. } => {
                (cx - radius, cy - radius, cx + radius, cy + radius)
            }
        }
    }
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Opacity of the snake segment at `index` (0 is the head)
pub fn segment_alpha(index: usize) -> f32 {
    (1.0 - index as f32 * SEGMENT_FADE).max(MIN_SEGMENT_ALPHA)
}

/// Everything painted for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Side of the square canvas in logical pixels
    pub size: f32,
    pub tile: f32,
    pub grid_size: usize,
    /// Food, snake segments and eye, in paint order
    pub shapes: Vec<Shape>,
    /// Indices into `shapes` touching each tile, row-major
    tile_shapes: Vec<Vec<usize>>,
}

impl Scene {
    /// Compose the frame for `state` on a `canvas_size` x `canvas_size` canvas
    pub fn compose(state: &GameState, canvas_size: u32) -> Self {
        let size = canvas_size as f32;
        let n = state.grid_size.max(1);
        let tile = size / n as f32;
        let mut shapes = Vec::with_capacity(state.snake.len() + 2);

        let (fx, fy) = tile_center(state.food, tile);
        shapes.push(Shape::RadialGradientCircle {
            cx: fx,
            cy: fy,
            radius: tile / 2.2,
            start: FOOD_GRADIENT_START,
            end: tile,
            from: FOOD_CORE,
            to: FOOD_HALO,
        });

        for (index, segment) in state.snake.body.iter().enumerate() {
            shapes.push(Shape::RoundedRect {
                x: segment.x as f32 * tile + SEGMENT_INSET,
                y: segment.y as f32 * tile + SEGMENT_INSET,
                w: tile - 2.0 * SEGMENT_INSET,
                h: tile - 2.0 * SEGMENT_INSET,
                radius: SEGMENT_RADIUS,
                color: SNAKE.with_alpha(segment_alpha(index)),
            });
        }

        if let Some(head) = state.snake.body.first() {
            let (hx, hy) = tile_center(*head, tile);
            shapes.push(Shape::Circle {
                cx: hx,
                cy: hy,
                radius: EYE_RADIUS,
                color: EYE,
            });
        }

        let mut tile_shapes = vec![Vec::new(); n * n];
        let tile_index = |v: f32| ((v / tile).floor().max(0.0) as usize).min(n - 1);
        for (i, shape) in shapes.iter().enumerate() {
            let (left, top, right, bottom) = shape.bounds();
            if right < 0.0 || bottom < 0.0 || left >= size || top >= size {
                continue;
            }
            for ty in tile_index(top)..=tile_index(bottom) {
                for tx in tile_index(left)..=tile_index(right) {
                    tile_shapes[ty * n + tx].push(i);
                }
            }
        }

        Self {
            size,
            tile,
            grid_size: n,
            shapes,
            tile_shapes,
        }
    }

    /// Checkerboard colour under (x, y)
    pub fn base_color(&self, x: f32, y: f32) -> Rgba {
        match self.tile_at(x, y) {
            Some((tx, ty)) if (tx + ty) % 2 == 0 => TILE_EVEN,
            Some(_) => TILE_ODD,
            None => BACKGROUND,
        }
    }

    /// Indices of the shapes that may cover (x, y)
    pub fn candidates(&self, x: f32, y: f32) -> &[usize] {
        match self.tile_at(x, y) {
            Some((tx, ty)) => &self.tile_shapes[ty * self.grid_size + tx],
            None => &[],
        }
    }

    /// Composite the shapes covering (x, y) over the checkerboard
    pub fn sample(&self, x: f32, y: f32) -> Rgba {
        self.candidates(x, y)
            .iter()
            .filter_map(|&i| self.shapes[i].color_at(x, y))
            .fold(self.base_color(x, y), |dst, src| src.over(dst))
    }

    fn tile_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x >= 0.0 && y >= 0.0 && x < self.size && y < self.size) {
            return None;
        }
        let n = self.grid_size;
        let tx = ((x / self.tile) as usize).min(n - 1);
        let ty = ((y / self.tile) as usize).min(n - 1);
        Some((tx, ty))
    }
}

fn tile_center(pos: Position, tile: f32) -> (f32, f32) {
    (
        pos.x as f32 * tile + tile / 2.0,
        pos.y as f32 * tile + tile / 2.0,
    )
}
