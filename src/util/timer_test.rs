use super::*;
use std::cell::Cell;

fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Task) {
    let hits = Rc::new(Cell::new(0));
    let make = {
        let hits = hits.clone();
        move || -> Task {
            let hits = hits.clone();
            Box::new(move || hits.set(hits.get() + 1))
        }
    };
    (hits, make)
}

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn task_does_not_run_before_deadline() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let _handle = scheduler.schedule(Duration::from_secs(60), task());

    scheduler.advance(Duration::from_secs(59));
    assert_eq!(hits.get(), 0);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn task_runs_exactly_at_deadline() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let _handle = scheduler.schedule(Duration::from_secs(60), task());

    scheduler.advance(Duration::from_secs(60));
    assert_eq!(hits.get(), 1);
    assert_eq!(scheduler.pending(), 0);

    scheduler.advance(Duration::from_secs(600));
    assert_eq!(hits.get(), 1);
}

#[test]
fn dropping_handle_cancels_task() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let handle = scheduler.schedule(Duration::from_secs(1), task());
    drop(handle);

    assert_eq!(scheduler.pending(), 0);
    scheduler.advance(Duration::from_secs(5));
    assert_eq!(hits.get(), 0);
}

#[test]
fn cancel_after_run_is_harmless() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let handle = scheduler.schedule(Duration::from_secs(1), task());
    scheduler.advance(Duration::from_secs(1));
    handle.cancel();
    assert_eq!(hits.get(), 1);
}

#[test]
fn advance_moves_clock_to_target() {
    let scheduler = ManualScheduler::new();
    scheduler.advance(Duration::from_secs(3));
    scheduler.advance(Duration::from_millis(500));
    assert_eq!(scheduler.now(), Duration::from_millis(3500));
}

#[test]
fn tasks_run_in_deadline_order() {
    let scheduler = ManualScheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut handles = Vec::new();
    for (label, secs) in [("late", 30), ("early", 10), ("middle", 20)] {
        let order = order.clone();
        handles.push(scheduler.schedule(
            Duration::from_secs(secs),
            Box::new(move || order.borrow_mut().push(label)),
        ));
    }

    scheduler.advance(Duration::from_secs(30));
    assert_eq!(*order.borrow(), vec!["early", "middle", "late"]);
}

#[test]
fn task_can_reschedule_itself_within_window() {
    let scheduler = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

    let inner_hits = hits.clone();
    let inner_scheduler = scheduler.clone();
    let inner_slot = slot.clone();
    let handle = scheduler.schedule(
        Duration::from_secs(10),
        Box::new(move || {
            inner_hits.set(inner_hits.get() + 1);
            let again_hits = inner_hits.clone();
            let again = inner_scheduler.schedule(
                Duration::from_secs(10),
                Box::new(move || again_hits.set(again_hits.get() + 1)),
            );
            *inner_slot.borrow_mut() = Some(again);
        }),
    );

    scheduler.advance(Duration::from_secs(25));
    assert_eq!(hits.get(), 2);
    drop(handle);
}

// =============================================================
// TimerSlot
// =============================================================

struct Tracked(Rc<Cell<u32>>);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn dropping_slot_handle_releases_unfired_timer() {
    let drops = Rc::new(Cell::new(0));
    let slot = TimerSlot::new();
    let take_fired = slot.taker();
    slot.fill(Tracked(drops.clone()));

    drop(slot.into_handle());
    assert_eq!(drops.get(), 1);
    assert!(take_fired().is_none());
}

#[test]
fn fired_timer_is_handed_to_callback_not_handle() {
    let drops = Rc::new(Cell::new(0));
    let slot = TimerSlot::new();
    let take_fired = slot.taker();
    slot.fill(Tracked(drops.clone()));
    let handle = slot.into_handle();

    let fired = take_fired();
    assert!(fired.is_some());
    // The task re-arms and drops its own handle while the timer is still out.
    drop(handle);
    assert_eq!(drops.get(), 0);

    drop(fired);
    assert_eq!(drops.get(), 1);
}

// =============================================================
// BrowserScheduler outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_scheduler_is_inert_off_browser() {
    let (hits, task) = counter();
    let handle = BrowserScheduler.schedule(Duration::ZERO, task());
    handle.cancel();
    assert_eq!(hits.get(), 0);
}

#[test]
fn inert_handle_debug_reports_not_live() {
    assert_eq!(format!("{:?}", TimerHandle::inert()), "TimerHandle { live: false }");
}
