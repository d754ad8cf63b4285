//! Terminal output for the board screen.
//!
//! Each frame is diffed against the last one drawn, so a tick where nothing
//! moved writes no bytes at all. A double-width tile is printed once and the
//! cursor is then placed after its tail explicitly. Terminals disagree about
//! emoji widths, and re-anchoring keeps one misjudged tile from shifting the
//! rest of the row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
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
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the last frame; the next draw repaints the whole screen.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb` and keep it as the reference for the next frame.
    ///
    /// `fb` comes back holding the previous frame's buffer, ready to be
    /// rendered into again. Returns whether any bytes were written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<bool> {
        self.buf.clear();
        match &self.last {
            Some(prev) => encode_diff_into(prev, fb, &mut self.buf)?,
            None => encode_full_into(fb, &mut self.buf)?,
        }
        let wrote = !self.buf.is_empty();
        if wrote {
            self.flush_buf()?;
        }

        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(wrote)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a clear screen plus every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        print_span(fb, 0, y, fb.width(), &mut pen, out)?;
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Frames of different sizes fall back to a full redraw. Identical frames
/// encode nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut pen = Pen::default();
    for_each_changed_run(prev, next, |x, y, len| {
        // A run that starts on a tail must reprint the glyph it belongs to.
        let starts_on_tail = x > 0 && next.get(x, y).is_some_and(|c| c.is_wide_tail());
        let (x, len) = if starts_on_tail { (x - 1, len + 1) } else { (x, len) };
        print_span(next, x, y, len, &mut pen, out)
    })?;
    pen.finish(out)
}

/// Style last sent to the terminal while encoding one frame
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.style == Some(style) {
            return Ok(());
        }
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        out.queue(SetAttribute(Attribute::Reset))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    /// Reset attributes, if anything was printed.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Print `len` cells of row `y` starting at column `x`.
fn print_span(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    pen: &mut Pen,
    out: &mut Vec<u8>,
) -> Result<()> {
    let end = x.saturating_add(len).min(fb.width());
    out.queue(cursor::MoveTo(x, y))?;

    let mut cx = x;
    while cx < end {
        let cell = fb.get(cx, y).unwrap_or_default();
        cx += 1;
        if cell.is_wide_tail() {
            continue;
        }

        pen.set(out, cell.style)?;
        out.queue(Print(cell.ch))?;

        if fb.get(cx, y).is_some_and(|c| c.is_wide_tail()) {
            cx += 1;
            if cx < end {
                out.queue(cursor::MoveTo(cx, y))?;
            }
        }
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of changed cells.
/// Both frames must be the same size.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let changed = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    for y in 0..next.height() {
        let mut x = 0;
        while x < next.width() {
            if !changed(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < next.width() && changed(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
