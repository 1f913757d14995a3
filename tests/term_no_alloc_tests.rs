use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{EngineConfig, GameEngine, GameSnapshot};
use blockfall::term::{for_each_changed_run, FrameBuffer, GameView, Viewport};

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

// One test per binary: the counter is global and tests run on parallel threads.
#[test]
fn term_render_and_diff_are_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);

    let mut engine = GameEngine::new(EngineConfig::default().with_seed(1)).unwrap();
    let mut snap = GameSnapshot::default();
    let mut prev = FrameBuffer::new(viewport.width, viewport.height);
    let mut next = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up sizes the snapshot grid.
    engine.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut prev);

    let mut changed = 0u32;
    let allocs = with_alloc_counting(|| {
        for step in 0..200 {
            engine.player_move(if step % 2 == 0 { 1 } else { -1 });
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut next);
            for_each_changed_run(&prev, &next, |_, _, len| {
                changed += len as u32;
                Ok(())
            })
            .unwrap();
            std::mem::swap(&mut prev, &mut next);
        }
    });

    assert_eq!(allocs, 0);
    assert!(changed > 0);
}
