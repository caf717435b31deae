use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use numerate::core::{Phase, PuzzleSession};
use numerate::scores::ScoreLedger;
use numerate::term::{FrameBuffer, GameView, Viewport};
use numerate::types::{Difficulty, Direction, GameAction, Mode};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn term_game_view_render_is_allocation_free_while_playing() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let ledger = ScoreLedger::new();

    let mut session = PuzzleSession::new(Mode::LineUp, Difficulty::Hard, 7);
    while session.phase() == Phase::Starting {
        session.elapse_time(0.25, &ledger);
    }

    // Warm-up (resize/initial clears).
    let mut snap = session.snapshot();
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            if i % 10 == 0 {
                session.apply_action(GameAction::Cursor(Direction::Right));
            }
            session.elapse_time(0.5, &ledger);
            session.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(allocs, 0);
}
