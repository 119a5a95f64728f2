//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

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

const BOARD_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

    /// Terminal size of the bordered board for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width.saturating_mul(self.cell_w).saturating_add(2),
            snap.height.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport and fully redrawn.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::plain(Rgb::new(60, 60, 60), BOARD_BG),
        );
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), BOARD_BG),
        );

        // Locked cells.
        for y in 0..snap.height as i32 {
            for x in 0..snap.width as i32 {
                if let Some(color) = snap.cell(x, y) {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, color);
                }
            }
        }

        // Active piece.
        if let Some(active) = &snap.active {
            for (x, y) in active.filled_cells() {
                if x >= 0 && x < snap.width as i32 && y >= 0 && y < snap.height as i32 {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_score(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.status.is_game_over() {
            self.draw_game_over(fb, snap, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        color: Color,
    ) {
        let style = CellStyle::plain(Rgb::from(color), BOARD_BG);
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_score(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_str(panel_x, start_y, "SCORE", label);
        fb.put_u32(panel_x, start_y.saturating_add(1), snap.score, value);
    }

    /// Centered three-line overlay: title, final score, restart hint.
    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), BOARD_BG)
        };
        let mid_y = start_y.saturating_add(frame_h / 2);
        let centered = |text_w: u16| start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);

        let title = "GAME OVER";
        fb.put_str(centered(title.len() as u16), mid_y.saturating_sub(2), title, style);

        let digits = snap.score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let score_x = centered("SCORE ".len() as u16 + digits);
        fb.put_str(score_x, mid_y, "SCORE ", style);
        fb.put_u32(score_x + 6, mid_y, snap.score, style);

        let hint = "PRESS R TO RESTART";
        fb.put_str(centered(hint.len() as u16), mid_y.saturating_add(2), hint, style);
    }
}
