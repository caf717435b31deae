//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{victory_line, Phase, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Pos, Valence};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_W: u16 = 24;
const CLOCK_MAX_MINUTES: u64 = 999;
const PANEL_GAP: u16 = 2;

const BG: Rgb = Rgb::new(0, 0, 0);
const GRID_BG: Rgb = Rgb::new(30, 30, 40);
const REACHABLE_BG: Rgb = Rgb::new(35, 85, 60);
const SELECTED_BG: Rgb = Rgb::new(215, 175, 60);
const CURSOR_BG: Rgb = Rgb::new(75, 75, 125);

/// Tile colours by value, `1..=10`.
const VALUE_COLORS: [Rgb; 10] = [
    Rgb::new(170, 170, 180),
    Rgb::new(80, 200, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(230, 100, 100),
    Rgb::new(100, 140, 240),
    Rgb::new(255, 165, 0),
    Rgb::new(240, 140, 190),
    Rgb::new(255, 255, 255),
];

/// Where things land on screen for a given grid size and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Top-left corner of the grid border.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Left edge of the side panel, if it fits.
    pub panel_x: Option<u16>,
    pub title_y: u16,
    pub status_y: u16,
}

/// A lightweight terminal renderer for the puzzle grid.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for two digits plus a gap and roughly squares tiles.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, side: u16, viewport: Viewport) -> GridLayout {
        let frame_w = side * self.cell_w + 2;
        let frame_h = side * self.cell_h + 2;
        let with_panel = viewport.width >= frame_w + PANEL_GAP + PANEL_W;
        let total_w = if with_panel {
            frame_w + PANEL_GAP + PANEL_W
        } else {
            frame_w
        };
        // title, gap, grid, gap, status
        let block_h = frame_h + 4;

        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(block_h) / 2,
            AnchorY::Top => 0,
        };

        GridLayout {
            frame_x: left,
            frame_y: top + 2,
            frame_w,
            frame_h,
            panel_x: with_panel.then_some(left + frame_w + PANEL_GAP),
            title_y: top,
            status_y: top + 2 + frame_h + 1,
        }
    }

    /// Map a terminal coordinate to the tile under it.
    pub fn hit_test(&self, side: u8, viewport: Viewport, x: u16, y: u16) -> Option<Pos> {
        let layout = self.layout(side as u16, viewport);
        let inner_x = x.checked_sub(layout.frame_x + 1)?;
        let inner_y = y.checked_sub(layout.frame_y + 1)?;
        let col = inner_x / self.cell_w;
        let row = inner_y / self.cell_h;
        if col >= side as u16 || row >= side as u16 {
            return None;
        }
        Some(Pos::new(row as usize, col as usize))
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let side = snap.side as u16;
        let layout = self.layout(side, viewport);

        let title = CellStyle::new(Rgb::new(240, 240, 240), BG).bold();
        let total_w = layout
            .panel_x
            .map(|px| px + PANEL_W - layout.frame_x)
            .unwrap_or(layout.frame_w);
        fb.put_str_centered(layout.frame_x, total_w, layout.title_y, snap.mode.label(), title);

        let border = CellStyle::new(Rgb::new(200, 200, 200), BG);
        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            side * self.cell_w,
            side * self.cell_h,
            ' ',
            CellStyle::new(GRID_BG, GRID_BG),
        );
        fb.draw_box(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..snap.side as usize {
            for col in 0..snap.side as usize {
                self.draw_tile(fb, snap, &layout, Pos::new(row, col));
            }
        }

        if let Some(panel_x) = layout.panel_x {
            self.draw_side_panel(fb, snap, viewport, panel_x, layout.frame_y);
        }

        let status = CellStyle::new(valence_color(snap.status.valence), BG);
        fb.put_str_centered(0, viewport.width, layout.status_y, snap.status.message.text(), status);

        match snap.phase {
            Phase::Starting => self.draw_countdown(fb, snap, &layout),
            Phase::Victorious => self.draw_victory_panel(fb, snap, viewport),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, layout: &GridLayout, pos: Pos) {
        let value = snap.cell(pos.row, pos.col);
        let fg = VALUE_COLORS[(value.max(1) as usize - 1).min(VALUE_COLORS.len() - 1)];

        let selected = snap.selection == Some(pos);
        let under_cursor = snap.focused && snap.cursor == Some(pos);
        let reachable = snap.reachable[pos.row][pos.col];

        let mut style = if selected {
            CellStyle::new(Rgb::new(20, 20, 20), SELECTED_BG).bold()
        } else if reachable {
            CellStyle::new(fg, REACHABLE_BG).bold()
        } else if under_cursor && snap.grid_active {
            CellStyle::new(fg, CURSOR_BG)
        } else {
            CellStyle::new(fg, GRID_BG)
        };
        if under_cursor && snap.grid_active {
            style = style.bold().underline();
        }
        if !snap.grid_active {
            style = style.dim();
        }

        let px = layout.frame_x + 1 + pos.col as u16 * self.cell_w;
        let py = layout.frame_y + 1 + pos.row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let digits = if value >= 10 { 2 } else { 1 };
        let tx = px + self.cell_w.saturating_sub(digits) / 2;
        let ty = py + self.cell_h / 2;
        fb.put_u32(tx, ty, value as u32, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        top: u16,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let value_x = panel_x + 8;

        let mut y = top;
        fb.put_str(panel_x, y, "GRID", label);
        fb.put_str(value_x, y, snap.difficulty.short_label(), value);
        y += 2;

        fb.put_str(panel_x, y, "TIME", label);
        put_clock(fb, value_x, y, snap.whole_seconds, value);
        y += 1;
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(value_x, y, snap.moves, value);
        y += 1;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(value_x, y, snap.score.max(0) as u32, value);
        y += 2;

        if snap.phase == Phase::Starting {
            fb.put_str(panel_x, y, "STARTS IN", label);
            fb.put_u32(panel_x + 10, y, snap.countdown, value.bold());
            y += 2;
        }

        let undo = if snap.undo_enabled { value } else { value.dim() };
        let end = fb.put_str(panel_x, y, "[u] ", undo);
        fb.put_str(end, y, snap.undo_label.text(), undo);
        y += 2;

        let help = value.dim();
        for line in ["arrows  move", "enter   select", "esc     back", "q       quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_countdown(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, layout: &GridLayout) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
        let mid_y = layout.frame_y + layout.frame_h / 2;
        let digits = if snap.countdown >= 10 { 2 } else { 1 };
        let x = layout.frame_x + layout.frame_w.saturating_sub(digits + 2) / 2;
        fb.fill_rect(x, mid_y, digits + 2, 1, ' ', style);
        fb.put_u32(x + 1, mid_y, snap.countdown, style);
    }

    fn draw_victory_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) {
        let w = viewport.width.min(36);
        let h = viewport.height.min(9);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let panel = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(20, 20, 30));
        fb.fill_rect(x, y, w, h, ' ', panel);
        fb.draw_box(x, y, w, h, panel.bold());

        let headline = CellStyle {
            fg: valence_color(Valence::Positive),
            ..panel
        }
        .bold();
        fb.put_str_centered(x, w, y + 1, snap.status.message.text(), headline);
        fb.put_str_centered(
            x,
            w,
            y + 2,
            &victory_line(snap.placement, snap.seed as usize),
            panel,
        );

        let row = |fb: &mut FrameBuffer, dy: u16, label: &str, text: &str| {
            fb.put_str(x + 4, y + dy, label, panel.bold());
            fb.put_str(x + 12, y + dy, text, panel);
        };
        row(fb, 4, "TIME", &snap.final_time());
        row(fb, 5, "MOVES", &snap.moves.to_string());
        row(fb, 6, "SCORE", &snap.score.to_string());

        fb.put_str_centered(x, w, y + 7, "enter to continue", panel.dim());
    }
}

/// Same text as [`SessionSnapshot::clock`], written without allocating.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, seconds: u64, style: CellStyle) -> u16 {
    let (minutes, secs) = match seconds / 60 {
        m if m > CLOCK_MAX_MINUTES => (CLOCK_MAX_MINUTES, 59),
        m => (m, seconds % 60),
    };
    let mut cx = x;
    if minutes < 10 {
        cx = fb.put_u32(cx, y, 0, style);
    }
    cx = fb.put_u32(cx, y, minutes as u32, style);
    fb.put_char(cx, y, ':', style);
    cx += 1;
    if secs < 10 {
        cx = fb.put_u32(cx, y, 0, style);
    }
    fb.put_u32(cx, y, secs as u32, style)
}

fn valence_color(valence: Valence) -> Rgb {
    match valence {
        Valence::Positive => Rgb::new(120, 220, 120),
        Valence::Neutral => Rgb::new(200, 200, 200),
        Valence::Negative => Rgb::new(235, 110, 110),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_skips_panel_when_narrow() {
        let view = GameView::default();
        let layout = view.layout(4, Viewport::new(20, 10));
        assert_eq!(layout.frame_w, 14);
        assert_eq!(layout.frame_h, 6);
        assert_eq!(layout.panel_x, None);

        let wide = view.layout(4, Viewport::new(80, 10));
        assert!(wide.panel_x.is_some());
    }

    #[test]
    fn test_hit_test_maps_interior_columns() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = Viewport::new(14, 10);
        // Frame at (0, 2); interior starts at (1, 3).
        assert_eq!(view.hit_test(4, vp, 1, 3), Some(Pos::new(0, 0)));
        assert_eq!(view.hit_test(4, vp, 3, 3), Some(Pos::new(0, 0)));
        assert_eq!(view.hit_test(4, vp, 4, 3), Some(Pos::new(0, 1)));
        assert_eq!(view.hit_test(4, vp, 12, 6), Some(Pos::new(3, 3)));
        assert_eq!(view.hit_test(4, vp, 0, 3), None);
        assert_eq!(view.hit_test(4, vp, 13, 3), None);
        assert_eq!(view.hit_test(4, vp, 5, 7), None);
    }

    #[test]
    fn test_clock_matches_formatted_time() {
        use crate::core::format_time;
        use crate::types::{MAX_MINUTE_DIGITS, MIN_MINUTE_DIGITS};

        for secs in [0, 9, 65, 600, 3599, 59_999, 60_000, 1_000_000] {
            let mut fb = FrameBuffer::new(10, 1);
            let end = put_clock(&mut fb, 0, 0, secs, CellStyle::default());
            let expected = format_time(secs, MIN_MINUTE_DIGITS, MAX_MINUTE_DIGITS);
            assert_eq!(fb.row_text(0).trim_end(), expected);
            assert_eq!(end as usize, expected.len());
        }
    }

    #[test]
    fn test_valence_colors_differ() {
        assert_ne!(
            valence_color(Valence::Positive),
            valence_color(Valence::Negative)
        );
    }
}
