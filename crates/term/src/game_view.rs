//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CascadeStage, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Coord;

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

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(200, 170, 40);
const SELECTED_BG: Rgb = Rgb::new(170, 60, 170);
const HINT_BG: Rgb = Rgb::new(210, 210, 210);
const MATCH_BG: Rgb = Rgb::new(40, 170, 190);

impl Default for GameView {
    fn default() -> Self {
        // Emoji tiles are two columns wide.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board frame for a snapshot
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let board_px_w = (snap.cols as u16).saturating_mul(self.cell_w);
        let board_px_h = (snap.rows as u16).saturating_mul(self.cell_h);
        (board_px_w.saturating_add(2), board_px_h.saturating_add(2))
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        // Leave one row under the frame for the message line.
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h.saturating_add(1)) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                self.draw_board_cell(fb, snap, start_x, start_y, Coord::new(row, col));
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);
        self.draw_message(fb, snap, start_x, start_y.saturating_add(frame_h));

        if snap.no_moves() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "NO MOVES");
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

    /// Background for a cell; the cursor wins over selection, hints and matches.
    fn cell_bg(snap: &GameSnapshot, coord: Coord) -> Rgb {
        if snap.cursor == Some(coord) {
            CURSOR_BG
        } else if snap.selected == Some(coord) {
            SELECTED_BG
        } else if snap.is_matched(coord) {
            MATCH_BG
        } else if snap.is_hinted(coord) {
            HINT_BG
        } else {
            BOARD_BG
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        coord: Coord,
    ) {
        let style = CellStyle {
            fg: Rgb::new(230, 230, 230),
            bg: Self::cell_bg(snap, coord),
            bold: true,
            dim: false,
        };
        let px = start_x
            .saturating_add(1)
            .saturating_add((coord.col as u16).saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add((coord.row as u16).saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        match snap.cell(coord).flatten() {
            Some(tile) if self.cell_w >= 2 => {
                fb.put_glyph(px, py, tile.symbol(), style);
            }
            Some(tile) => fb.put_char(px, py, tile.symbol(), style),
            None => {
                let empty = CellStyle {
                    fg: Rgb::new(90, 90, 100),
                    dim: true,
                    bold: false,
                    ..style
                };
                fb.put_char(px, py, '·', empty);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let total = snap.score.total();
        let round = snap.score.round();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, total.total_removed(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBOS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, total.combos, value);
        if panel_w >= 16 {
            let dim = CellStyle { dim: true, ..value };
            fb.put_char(panel_x + 5, y, '+', dim);
            fb.put_u32(panel_x + 6, y, total.combo_removed, dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LAST SWAP", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, round.total_removed(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        match snap.valid_moves {
            Some(n) => fb.put_u32(panel_x, y, n as u32, value),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        if snap.stage != CascadeStage::Idle {
            fb.put_str(panel_x, y, "STAGE", label);
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, snap.stage.as_str(), value);
        }
    }

    fn draw_message(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        if snap.message.is_empty() || y >= fb.height() {
            return;
        }
        let style = CellStyle {
            fg: Rgb::new(240, 220, 120),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        fb.put_str(x, y, &snap.message, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::fb::Cell {
        crate::fb::Cell { ch, style: self }
    }
}
