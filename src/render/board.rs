use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::scene::{Rgba, Scene};

/// Samples per axis averaged into one half-cell
const SUPERSAMPLE: usize = 3;
/// Upper half block: fg paints the top half of the cell, bg the bottom half
const HALF_BLOCK: &str = "▀";

/// Rasterises a [`Scene`] into terminal cells.
///
/// Every cell shows two vertically stacked pixels, so a square canvas needs
/// twice as many columns as rows. See [`BoardWidget::fit`].
pub struct BoardWidget<'a> {
    scene: &'a Scene,
}

impl<'a> BoardWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Largest (columns, rows) a board can use inside `width` x `height`.
    ///
    /// Prefers one or two terminal rows per grid row so tiles stay aligned,
    /// and shrinks below that only when the terminal is too small.
    pub fn fit(width: u16, height: u16, grid_size: usize) -> (u16, u16) {
        let max_rows = height.min(width / 2);
        let n = u16::try_from(grid_size).unwrap_or(u16::MAX).max(1);

        let rows = if max_rows >= n {
            (max_rows / n).min(2) * n
        } else {
            max_rows
        };

        (rows * 2, rows)
    }

    /// Mean colour of the scene over a rectangle of the canvas
    fn average(&self, (x, y, w, h): (f32, f32, f32, f32)) -> Rgba {
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);

        for (sx, sy) in sample_points(x, y, w, h) {
            let c = self.scene.sample(sx, sy);
            r += c.r as u32;
            g += c.g as u32;
            b += c.b as u32;
        }

        let count = (SUPERSAMPLE * SUPERSAMPLE) as u32;
        Rgba::rgb(
            (r / count) as u8,
            (g / count) as u8,
            (b / count) as u8,
        )
    }
}

/// Supersample grid covering a rectangle of the canvas
fn sample_points(x: f32, y: f32, w: f32, h: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..SUPERSAMPLE).flat_map(move |j| {
        (0..SUPERSAMPLE).map(move |i| {
            (
                x + (i as f32 + 0.5) * w / SUPERSAMPLE as f32,
                y + (j as f32 + 0.5) * h / SUPERSAMPLE as f32,
            )
        })
    })
}

/// Canvas rectangles for the top and bottom half of every cell in a
/// `width` x `height` board, row by row
fn half_cells(size: f32, width: u16, height: u16) -> impl Iterator<Item = (f32, f32, f32, f32)> {
    let cell_w = size / width as f32;
    let cell_h = size / height as f32;
    let half_h = cell_h / 2.0;

    (0..height).flat_map(move |row| {
        (0..width).flat_map(move |col| {
            let x = col as f32 * cell_w;
            let y = row as f32 * cell_h;
            [(x, y, cell_w, half_h), (x, y + half_h, cell_w, half_h)]
        })
    })
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mut halves = half_cells(self.scene.size, area.width, area.height);

        for row in 0..area.height {
            for col in 0..area.width {
                let (Some(top), Some(bottom)) = (halves.next(), halves.next()) else {
                    return;
                };
                let top = self.average(top);
                let bottom = self.average(bottom);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}
