//! MenuView: menus, name entry, and the high score table.
//!
//! Pure rendering like [`crate::game_view`]; the app shell owns the state.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::scores::ScoreLedger;
use crate::types::{Difficulty, MAX_NAME_LENGTH, SCORES_PER_LIST};

const BG: Rgb = Rgb::new(0, 0, 0);
const ITEM_W: u16 = 28;

/// One menu screen.
#[derive(Debug, Clone, Copy)]
pub struct MenuPage<'a> {
    pub title: &'a str,
    pub items: &'a [&'a str],
    pub selected: usize,
    /// Shown under the list, e.g. the goal of the highlighted mode.
    pub caption: &'a str,
}

/// The name prompt shown after a placing victory.
#[derive(Debug, Clone, Copy)]
pub struct NameEntryPage<'a> {
    pub headline: &'a str,
    pub difficulty: Difficulty,
    pub score: i32,
    pub name: &'a str,
}

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn new() -> Self {
        Self
    }

    fn menu_top(&self, items: usize, viewport: Viewport) -> u16 {
        // title, gap, items, gap, caption
        let block_h = items as u16 + 4;
        viewport.height.saturating_sub(block_h) / 2
    }

    /// Map a terminal coordinate to the menu item under it.
    pub fn item_at(&self, page: &MenuPage<'_>, viewport: Viewport, x: u16, y: u16) -> Option<usize> {
        let first = self.menu_top(page.items.len(), viewport) + 2;
        let left = viewport.width.saturating_sub(ITEM_W) / 2;
        if x < left || x >= left + ITEM_W {
            return None;
        }
        let index = y.checked_sub(first)? as usize;
        (index < page.items.len()).then_some(index)
    }

    pub fn render_menu_into(&self, page: &MenuPage<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let top = self.menu_top(page.items.len(), viewport);
        let title = CellStyle::new(Rgb::new(240, 240, 240), BG).bold();
        fb.put_str_centered(0, viewport.width, top, page.title, title);

        let left = viewport.width.saturating_sub(ITEM_W) / 2;
        let normal = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let highlight = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(215, 175, 60)).bold();
        for (i, item) in page.items.iter().enumerate() {
            let y = top + 2 + i as u16;
            let style = if i == page.selected { highlight } else { normal };
            fb.fill_rect(left, y, ITEM_W, 1, ' ', style);
            fb.put_str_centered(left, ITEM_W, y, item, style);
        }

        let caption_y = top + 3 + page.items.len() as u16;
        fb.put_str_centered(0, viewport.width, caption_y, page.caption, normal.dim());
    }

    pub fn render_name_entry_into(
        &self,
        page: &NameEntryPage<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let top = viewport.height.saturating_sub(7) / 2;
        let title = CellStyle::new(Rgb::new(120, 220, 120), BG).bold();
        let normal = CellStyle::new(Rgb::new(200, 200, 200), BG);

        fb.put_str_centered(0, viewport.width, top, page.headline, title);

        let line = format!("{}  {}", page.difficulty.short_label(), page.score);
        fb.put_str_centered(0, viewport.width, top + 1, &line, normal);
        fb.put_str_centered(0, viewport.width, top + 3, "Enter your name:", normal);

        let field_w = MAX_NAME_LENGTH as u16 + 2;
        let field_x = viewport.width.saturating_sub(field_w) / 2;
        let field = CellStyle::new(Rgb::new(240, 240, 240), Rgb::new(40, 40, 60));
        fb.fill_rect(field_x, top + 4, field_w, 1, ' ', field);
        let end = fb.put_str(field_x + 1, top + 4, page.name, field);
        fb.put_char(end, top + 4, '_', field.bold());

        fb.put_str_centered(
            0,
            viewport.width,
            top + 6,
            "enter to save, esc to skip",
            normal.dim(),
        );
    }

    /// All four buckets, in a 2x2 grid when there is room, else stacked.
    pub fn render_scores_into(&self, ledger: &ScoreLedger, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let title = CellStyle::new(Rgb::new(240, 240, 240), BG).bold();
        let header = CellStyle::new(Rgb::new(215, 175, 60), BG).bold();
        let normal = CellStyle::new(Rgb::new(200, 200, 200), BG);

        let block_w = ITEM_W;
        let block_h = SCORES_PER_LIST as u16 + 2;
        let columns: u16 = if viewport.width >= block_w * 2 + 4 { 2 } else { 1 };
        let rows = 4 / columns;
        let total_w = block_w * columns + 4 * (columns - 1);
        let total_h = 2 + block_h * rows + 1;
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = viewport.height.saturating_sub(total_h) / 2;

        fb.put_str_centered(0, viewport.width, top, "High Scores", title);

        for difficulty in Difficulty::ALL {
            let i = difficulty.index() as u16;
            let bx = left + (i % columns) * (block_w + 4);
            let by = top + 2 + (i / columns) * block_h;
            fb.put_str(bx, by, difficulty.short_label(), header);

            let entries = ledger.entries(difficulty);
            for rank in 0..SCORES_PER_LIST {
                let y = by + 1 + rank as u16;
                let end = fb.put_u32(bx, y, rank as u32 + 1, normal);
                fb.put_char(end, y, '.', normal);
                match entries.get(rank) {
                    Some(entry) => {
                        fb.put_str(bx + 4, y, &entry.name, normal);
                        let score = entry.score.max(0) as u32;
                        let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
                        fb.put_u32(bx + block_w - digits, y, score, normal);
                    }
                    None => {
                        fb.put_str(bx + 4, y, "---", normal.dim());
                    }
                }
            }
        }

        fb.put_str_centered(
            0,
            viewport.width,
            top + total_h - 1,
            "esc to return",
            normal.dim(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [&str; 3] = ["Play", "High Scores", "Quit"];

    fn page(selected: usize) -> MenuPage<'static> {
        MenuPage {
            title: "NUMERATE",
            items: &ITEMS,
            selected,
            caption: "",
        }
    }

    #[test]
    fn test_menu_item_hit_test() {
        let view = MenuView::new();
        let vp = Viewport::new(40, 7);
        // block_h = 7, top = 0, items start at row 2.
        let x = 20;
        assert_eq!(view.item_at(&page(0), vp, x, 2), Some(0));
        assert_eq!(view.item_at(&page(0), vp, x, 4), Some(2));
        assert_eq!(view.item_at(&page(0), vp, x, 5), None);
        assert_eq!(view.item_at(&page(0), vp, x, 1), None);
        assert_eq!(view.item_at(&page(0), vp, 0, 2), None);
    }

    #[test]
    fn test_selected_item_is_highlighted() {
        let view = MenuView::new();
        let vp = Viewport::new(40, 7);
        let mut fb = FrameBuffer::new(40, 7);
        view.render_menu_into(&page(1), vp, &mut fb);
        let left = (40 - ITEM_W) / 2;
        assert!(fb.get(left, 3).unwrap().style.bold);
        assert!(!fb.get(left, 2).unwrap().style.bold);
        assert!(fb.row_text(3).contains("High Scores"));
    }
}
