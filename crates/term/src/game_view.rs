//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell as GridCell, PALETTE};

const PLAYFIELD_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_DOT: CellStyle = CellStyle::new(Rgb::new(60, 60, 70), PLAYFIELD_BG);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PLAYFIELD_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PLAYFIELD_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PLAYFIELD_BG);
const HELP: CellStyle = CellStyle::new(Rgb::new(130, 130, 140), PLAYFIELD_BG);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PLAYFIELD_BG).bold();

const KEY_HELP: [&str; 6] = [
    "←/→  move",
    "↓    drop",
    "q    rotate ⟲",
    "w    rotate ⟳",
    "r    restart",
    "esc  quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board placement computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (snap.height as u16).saturating_mul(self.cell_h).saturating_add(2);
        let frame = Frame {
            x: 0,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(v) if v != 0 => self.draw_block(fb, frame, x as i32, y as i32, v),
                    _ => self.fill_cell(fb, frame, x as u16, y as u16, '·', GRID_DOT),
                }
            }
        }

        if snap.game_over() {
            self.draw_game_over(fb, frame, snap.last_final_score.unwrap_or(0));
        } else {
            for (x, y, v) in snap.active_cells() {
                self.draw_block(fb, frame, x, y, v);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let right = f.x + f.w - 1;
        let bottom = f.y + f.h - 1;

        fb.put_char(f.x, f.y, '┌', BORDER);
        fb.put_char(right, f.y, '┐', BORDER);
        fb.put_char(f.x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', BORDER);
            fb.put_char(x, bottom, '─', BORDER);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', BORDER);
            fb.put_char(right, y, '│', BORDER);
        }
    }

    /// Draw a filled cell in its palette color; cells outside the grid are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: i32, y: i32, value: GridCell) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(&color) = PALETTE.get(value as usize) else {
            return;
        };
        let style = CellStyle::new(color.into(), PLAYFIELD_BG);
        self.fill_cell(fb, f, x as u16, y as u16, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x + 1 + x * self.cell_w;
        let py = f.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", LABEL);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, VALUE);
        y = y.saturating_add(2);

        if let Some(last) = snap.last_final_score {
            fb.put_str(panel_x, y, "LAST GAME", LABEL);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, last, VALUE);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "KEYS", LABEL);
        for line in KEY_HELP {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, HELP);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, f: Frame, final_score: u32) {
        let mid_y = f.y.saturating_add(f.h / 2);
        self.put_centered(fb, f, mid_y.saturating_sub(1), "GAME OVER");

        let digits = final_score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let x = f.x + f.w.saturating_sub(digits) / 2;
        fb.put_u32(x, mid_y, final_score, OVERLAY);

        self.put_centered(fb, f, mid_y.saturating_add(1), "press r");
    }

    fn put_centered(&self, fb: &mut FrameBuffer, f: Frame, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = f.x + f.w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, OVERLAY);
    }
}
