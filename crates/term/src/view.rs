//! VolumeView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. Layout from left to right:
//!
//! - front view: x across, y up, each column showing the nearest filled cell
//!   along z; the active piece and its landing position are overlaid
//! - top view: x across, z down, each column labelled with its stack height
//! - side panel: score, level, cleared layers, next shape, message

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};

const BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(24, 26, 36);
const BORDER: CellStyle = CellStyle::plain(Rgb::new(190, 190, 200), BG);
const LABEL: CellStyle = CellStyle {
    fg: Rgb::new(220, 220, 220),
    bg: BG,
    bold: true,
    dim: false,
};
const VALUE: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), BG);
const EMPTY: CellStyle = CellStyle {
    fg: Rgb::new(70, 72, 90),
    bg: WELL_BG,
    bold: false,
    dim: true,
};

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

pub struct VolumeView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    help: &'static [(&'static str, &'static str)],
}

impl Default for VolumeView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            help: &[],
        }
    }
}

impl VolumeView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    /// Key bindings listed at the bottom of the side panel
    pub fn with_help(mut self, help: &'static [(&'static str, &'static str)]) -> Self {
        self.help = help;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::plain(VALUE.fg, BG).cell(' '));

        let pane_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let front_h = BOARD_HEIGHT as u16 + 2;

        let total_w = pane_w * 2 + 2 + 24;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(front_h + 1) / 2;

        fb.put_str(start_x + 1, start_y, "FRONT", LABEL);
        self.draw_front(fb, snap, start_x, start_y + 1);

        let top_x = start_x + pane_w + 2;
        fb.put_str(top_x + 1, start_y, "TOP", LABEL);
        self.draw_top(fb, snap, top_x, start_y + 1);

        let panel_x = top_x + pane_w + 2;
        self.draw_side_panel(fb, snap, panel_x, start_y + 1, viewport);

        let overlay = if snap.game_over {
            Some("GAME OVER")
        } else if snap.paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, start_x, start_y + 1, pane_w, front_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_front(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x0: u16, y0: u16) {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        draw_border(fb, x0, y0, w, BOARD_HEIGHT as u16 + 2);

        // Row 0 of the volume is the bottom row on screen.
        let screen_row = |y: i32| y0 + 1 + (BOARD_HEIGHT as i32 - 1 - y) as u16;
        let in_view = |x: i32, y: i32| {
            (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y)
        };

        for y in 0..BOARD_HEIGHT as i32 {
            let clearing = snap.is_clearing(y as usize);
            for x in 0..BOARD_WIDTH as i32 {
                let nearest = (0..BOARD_DEPTH as i32)
                    .find_map(|z| snap.grid.get(x, y, z).flatten().map(|c| (z, c)));
                let (ch, style) = match nearest {
                    _ if clearing => ('▒', CellStyle::plain(Rgb::new(255, 255, 255), WELL_BG)),
                    Some((z, color)) => ('█', depth_style(color, z)),
                    None => ('·', EMPTY),
                };
                self.fill_cell(fb, x0, screen_row(y), x as u16, ch, style);
            }
        }

        let Some(active) = snap.active.as_ref() else {
            return;
        };

        if let Some(landing_y) = snap.landing_y {
            let ghost = CellStyle {
                dim: true,
                ..CellStyle::plain(Rgb::from(active.color).scaled(2, 3), WELL_BG)
            };
            let lift = active.anchor.y - landing_y;
            for cell in active.world_cells() {
                let (x, y) = (cell.x, cell.y - lift);
                if lift > 0 && in_view(x, y) {
                    self.fill_cell(fb, x0, screen_row(y), x as u16, '░', ghost);
                }
            }
        }

        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::from(active.color), WELL_BG)
        };
        for cell in active.world_cells() {
            if in_view(cell.x, cell.y) {
                self.fill_cell(fb, x0, screen_row(cell.y), cell.x as u16, '▓', style);
            }
        }
    }

    fn draw_top(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x0: u16, y0: u16) {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        draw_border(fb, x0, y0, w, BOARD_DEPTH as u16 + 2);

        for z in 0..BOARD_DEPTH as i32 {
            let row = y0 + 1 + z as u16;
            for x in 0..BOARD_WIDTH as i32 {
                let px = x0 + 1 + x as u16 * self.cell_w;
                match snap.grid.column_top(x, z) {
                    Some((top_y, color)) => {
                        let style = CellStyle::plain(Rgb::new(10, 10, 10), Rgb::from(color));
                        let label = format!("{:>w$}", top_y + 1, w = self.cell_w as usize);
                        let label = &label[label.len().saturating_sub(self.cell_w as usize)..];
                        fb.put_str(px, row, label, style);
                    }
                    None => fb.fill_rect(px, row, self.cell_w, 1, '·', EMPTY),
                }
            }
        }

        if let Some(active) = snap.active.as_ref() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(Rgb::from(active.color), WELL_BG)
            };
            for cell in active.world_cells() {
                if (0..BOARD_WIDTH as i32).contains(&cell.x)
                    && (0..BOARD_DEPTH as i32).contains(&cell.z)
                {
                    let px = x0 + 1 + cell.x as u16 * self.cell_w;
                    fb.fill_rect(px, y0 + 1 + cell.z as u16, self.cell_w, 1, '▓', style);
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        x: u16,
        top: u16,
        viewport: Viewport,
    ) {
        if x.saturating_add(12) > viewport.width {
            return;
        }

        let mut y = top;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LAYERS", snap.lines_cleared),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x + 8, y, value, VALUE);
            y += 1;
        }

        fb.put_str(x, y, "NEXT", LABEL);
        let next_style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::from(snap.next.color), BG)
        };
        fb.put_str(x + 8, y, snap.next.kind.as_str(), next_style);
        y += 1;

        fb.put_str(x, y, "TICK", LABEL);
        fb.put_str(x + 8, y, &format!("{}ms", snap.tick_interval_ms), VALUE);
        y += 2;

        if let Some(message) = snap.message {
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(Rgb::new(250, 204, 21), BG)
            };
            fb.put_str(x, y, message, style);
        }
        y += 2;

        let help_style = CellStyle { dim: true, ..VALUE };
        for (keys, action) in self.help {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, keys, help_style);
            fb.put_str(x + 11, y, action, help_style);
            y += 1;
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        row: u16,
        cell_x: u16,
        ch: char,
        style: CellStyle,
    ) {
        fb.fill_rect(x0 + 1 + cell_x * self.cell_w, row, self.cell_w, 1, ch, style);
    }
}

/// Cells further back are drawn darker.
fn depth_style(color: Color, z: i32) -> CellStyle {
    let depth = BOARD_DEPTH as u16;
    let shade = Rgb::from(color).scaled(2 * depth - z.clamp(0, depth as i32) as u16, 2 * depth);
    CellStyle::plain(shade, WELL_BG)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', BORDER);
    fb.put_char(x + w - 1, y, '┐', BORDER);
    fb.put_char(x, y + h - 1, '└', BORDER);
    fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', BORDER);
        fb.put_char(x + dx, y + h - 1, '─', BORDER);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', BORDER);
        fb.put_char(x + w - 1, y + dy, '│', BORDER);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), BG)
    };
    fb.put_str(x + w.saturating_sub(text_w) / 2, y + h / 2, text, style);
}
