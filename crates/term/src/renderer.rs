//! TerminalRenderer: puts framebuffers on a real terminal.
//!
//! The renderer remembers the frame currently on screen. A frame with the same
//! size is written as a cell diff; the first frame, a resized frame, or a
//! frame after [`TerminalRenderer::invalidate`] repaints everything.
//!
//! Output for one frame is assembled in memory by [`Painter`] and written with
//! a single flush.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a repaint.
    front: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        queue!(self.out, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        queue!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            EnableLineWrap,
            Show,
            LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint the whole screen on the next draw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Show `fb`, then hand back the previous frame's buffer in its place.
    ///
    /// The contents of `fb` afterwards are stale; callers redraw into it.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut back = match self.front.take() {
            Some(front) if same_size(&front, fb) => {
                paint_diff(&front, fb, &mut self.out)?;
                front
            }
            _ => {
                paint_full(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut back, fb);
        self.front = Some(back);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn paint_full(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            painter.cell(x, y, fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

fn paint_diff(front: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        for x in 0..next.width() {
            let cell = next.get(x, y).unwrap_or_default();
            if front.get(x, y) != Some(cell) {
                painter.cell(x, y, cell)?;
            }
        }
    }
    painter.finish()
}

/// Writes cells while tracking the terminal cursor and the active style, so
/// runs of adjacent cells need one cursor move and style changes are only
/// emitted when the style actually differs.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
        }
    }

    fn cell(&mut self, x: u16, y: u16, cell: Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            self.set_style(cell.style)?;
        }
        queue!(self.out, Print(cell.ch))?;
        // Assumes single-width glyphs, which is all the view draws.
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> io::Result<()> {
        let colors = Colors::new(term_color(style.fg), term_color(style.bg));
        let weight = if style.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        queue!(self.out, SetColors(colors), SetAttribute(weight))?;
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_moves(out: &[u8]) -> usize {
        // MoveTo encodes as CSI row;col H.
        out.iter().filter(|&&b| b == b'H').count()
    }

    #[test]
    fn full_paint_prints_every_cell() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        for (i, ch) in "abcdef".chars().enumerate() {
            fb.put_char(i as u16 % 3, i as u16 / 3, ch, style);
        }

        let mut out = Vec::new();
        paint_full(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        for ch in ["a", "b", "c", "d", "e", "f"] {
            assert!(text.contains(ch), "missing {ch}");
        }
        // One move per row; cells within a row follow the cursor.
        assert_eq!(count_moves(&out), 2);
    }

    #[test]
    fn identical_frames_paint_nothing() {
        let a = FrameBuffer::new(4, 2);
        let b = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        paint_diff(&a, &b, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn diff_moves_once_per_run() {
        let front = FrameBuffer::new(8, 2);
        let mut next = FrameBuffer::new(8, 2);
        let style = CellStyle::default();
        next.put_str(1, 0, "xyz", style);
        next.put_char(6, 1, 'w', style);

        let mut out = Vec::new();
        paint_diff(&front, &next, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("xyz"));
        assert!(text.contains('w'));
        assert_eq!(count_moves(&out), 2);
    }

    #[test]
    fn style_is_emitted_only_on_change() {
        let mut painter_out = Vec::new();
        let mut painter = Painter::new(&mut painter_out);
        let red = CellStyle::plain(Rgb::from(crate::types::Color::Red), Rgb::new(0, 0, 0));
        painter.cell(0, 0, red.into_cell('a')).unwrap();
        let after_first = painter.out.len();
        painter.cell(1, 0, red.into_cell('b')).unwrap();
        // Same style and adjacent: only the glyph is written.
        assert_eq!(painter.out.len(), after_first + 1);
    }

    #[test]
    fn palette_colors_map_to_truecolor() {
        let rgb = Rgb::from(crate::types::Color::Orange);
        assert_eq!(
            term_color(rgb),
            Color::Rgb {
                r: 0xFF,
                g: 0xA5,
                b: 0x00
            }
        );
    }
}
