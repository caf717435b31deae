use numerate::core::{Phase, PuzzleGrid, PuzzleSession, SessionSnapshot};
use numerate::scores::ScoreLedger;
use numerate::term::{AnchorY, GameView, MenuView, Viewport};
use numerate::types::{Difficulty, Pos, Status, StatusMessage, Valence};

fn easy_snapshot() -> SessionSnapshot {
    let grid = PuzzleGrid::from_rows(
        numerate::types::Mode::LineUp,
        &[&[2, 3, 1, 4], &[1, 2, 4, 3], &[4, 1, 3, 2], &[3, 4, 2, 1]],
    );
    PuzzleSession::with_grid(grid).snapshot()
}

fn playing(mut snap: SessionSnapshot) -> SessionSnapshot {
    snap.phase = Phase::Playing;
    snap.grid_active = true;
    snap.countdown = 0;
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = easy_snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 4 tiles * 3 columns + border = 14 wide, 4 rows + border = 6 tall,
    // below a title row and a gap.
    let fb = view.render(&snap, Viewport::new(14, 10));

    assert_eq!(fb.get(0, 2).unwrap().ch, '┌');
    assert_eq!(fb.get(13, 2).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 7).unwrap().ch, '└');
    assert_eq!(fb.get(13, 7).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_tiles_three_columns_wide() {
    let snap = playing(easy_snapshot());
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(14, 10));

    // First interior row holds 2 3 1 4, each centred in its 3-column tile.
    assert_eq!(fb.row_text(3), "│ 2  3  1  4 │");
    assert_eq!(fb.row_text(6), "│ 3  4  2  1 │");
}

#[test]
fn term_view_highlights_selection_and_reachable_tiles() {
    let mut snap = playing(easy_snapshot());
    snap.selection = Some(Pos::new(1, 2));
    snap.reachable[1][3] = true;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(14, 10));

    let selected = fb.get(1 + 2 * 3 + 1, 4).unwrap().style;
    let reachable = fb.get(1 + 3 * 3 + 1, 4).unwrap().style;
    let plain = fb.get(1 + 1, 4).unwrap().style;
    assert_ne!(selected.bg, plain.bg);
    assert_ne!(reachable.bg, plain.bg);
    assert_ne!(selected.bg, reachable.bg);
}

#[test]
fn term_view_underlines_cursor_only_when_focused() {
    let mut snap = playing(easy_snapshot());
    snap.cursor = Some(Pos::new(0, 0));
    snap.focused = true;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(14, 10));
    assert!(fb.get(2, 3).unwrap().style.underline);

    snap.focused = false;
    let fb = view.render(&snap, Viewport::new(14, 10));
    assert!(!fb.get(2, 3).unwrap().style.underline);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing(easy_snapshot());
    snap.score = 49_871;
    snap.moves = 7;
    snap.whole_seconds = 42;

    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("49871"));
    assert!(fb.contains_text("00:42"));
    assert!(fb.contains_text("Undo"));
}

#[test]
fn term_view_shows_countdown_before_start() {
    let snap = easy_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    assert!(fb.contains_text("STARTS IN 4"));
    assert!(fb.contains_text(StatusMessage::Waiting.text()));
}

#[test]
fn term_view_colours_status_by_valence() {
    let mut snap = playing(easy_snapshot());
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(80, 12);
    let text = StatusMessage::CannotSelectOne.text();

    snap.status = Status::new(StatusMessage::CannotSelectOne, Valence::Negative);
    let fb = view.render(&snap, vp);
    let y = (0..fb.height()).find(|&y| fb.row_text(y).contains(text)).unwrap();
    let x = fb.row_text(y).chars().position(|c| c == 'Y').unwrap() as u16;
    let negative = fb.get(x, y).unwrap().style.fg;

    snap.status = Status::new(StatusMessage::CannotSelectOne, Valence::Neutral);
    let fb = view.render(&snap, vp);
    assert_ne!(fb.get(x, y).unwrap().style.fg, negative);
}

#[test]
fn term_view_shows_victory_panel() {
    let mut snap = playing(easy_snapshot());
    snap.phase = Phase::Victorious;
    snap.grid_active = false;
    snap.placement = Some(1);
    snap.status = Status::new(StatusMessage::Victory, Valence::Positive);

    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    assert!(fb.contains_text("You win!"));
    assert!(fb.contains_text("#1 high score"));
}

#[test]
fn term_view_hit_test_matches_rendered_tiles() {
    let snap = easy_snapshot();
    let view = GameView::default();
    let vp = Viewport::new(60, 20);
    let fb = view.render(&snap, vp);

    // Find the top-left border corner, then probe the first tile.
    let (x0, y0) = (0..fb.height())
        .find_map(|y| {
            (0..fb.width())
                .find(|&x| fb.get(x, y).unwrap().ch == '┌')
                .map(|x| (x, y))
        })
        .unwrap();
    assert_eq!(view.hit_test(snap.side, vp, x0 + 1, y0 + 1), Some(Pos::new(0, 0)));
    assert_eq!(view.hit_test(snap.side, vp, x0 + 12, y0 + 4), Some(Pos::new(3, 3)));
    assert_eq!(view.hit_test(snap.side, vp, x0, y0), None);
}

#[test]
fn score_view_lists_every_bucket() {
    let mut ledger = ScoreLedger::new();
    ledger.insert(Difficulty::Hard, "grace", 141_000);

    let mut fb = numerate::term::FrameBuffer::new(80, 24);
    MenuView::new().render_scores_into(&ledger, Viewport::new(80, 24), &mut fb);
    for d in Difficulty::ALL {
        assert!(fb.contains_text(d.short_label()));
    }
    assert!(fb.contains_text("grace"));
    assert!(fb.contains_text("141000"));
}
