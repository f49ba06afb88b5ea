//! Cancellable delayed tasks.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page-state inactivity timer is the only timed resource in the client.
//! It is scheduled through `Scheduler` so the browser event loop can be swapped
//! for `ManualScheduler`, a virtual clock advanced explicitly by tests.
//!
//! TRADE-OFFS
//! ==========
//! `BrowserScheduler` arms a native `setTimeout` through gloo's `Timeout`,
//! which clears itself on drop. Dropping the handle therefore releases the
//! timer immediately. A handle dropped from inside its own task (a reset that
//! re-arms) finds the slot already emptied by the callback, and the fired
//! `Timeout` is released on the next tick instead of mid-callback.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task. Dropping or cancelling it prevents the task from
/// running if it has not run yet.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A handle with nothing behind it.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("live", &self.cancel.is_some()).finish()
    }
}

/// Something that can run a task once after a delay.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Schedules on the browser event loop. Off-browser, tasks never run.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        #[cfg(feature = "hydrate")]
        {
            let slot = TimerSlot::new();
            let take_fired = slot.taker();
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            slot.fill(gloo_timers::callback::Timeout::new(millis, move || {
                if let Some(fired) = take_fired() {
                    // Still on this timeout's stack; drop it afterwards.
                    leptos::task::spawn_local(async move { drop(fired) });
                }
                task();
            }));
            slot.into_handle()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (delay, task);
            TimerHandle::inert()
        }
    }
}

/// Native timer held until it fires or its handle is dropped, whichever comes
/// first. The other side then finds the slot empty.
#[cfg(any(test, feature = "hydrate"))]
struct TimerSlot<T>(Rc<RefCell<Option<T>>>);

#[cfg(any(test, feature = "hydrate"))]
impl<T: 'static> TimerSlot<T> {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    fn fill(&self, timer: T) {
        *self.0.borrow_mut() = Some(timer);
    }

    /// For the timer callback: takes the timer out, or `None` once cancelled.
    fn taker(&self) -> impl FnOnce() -> Option<T> + 'static {
        let weak = Rc::downgrade(&self.0);
        move || weak.upgrade().and_then(|slot| slot.borrow_mut().take())
    }

    fn into_handle(self) -> TimerHandle {
        TimerHandle::new(move || {
            let pending = self.0.borrow_mut().take();
            drop(pending);
        })
    }
}

/// Virtual-clock scheduler. Time only moves when [`ManualScheduler::advance`]
/// is called; due tasks run in deadline order, ties in scheduling order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

struct PendingTask {
    id: u64,
    due: Duration,
    task: Task,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of tasks that are scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled by a running task are eligible in the same call if
    /// their deadline is within the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(task) = self.pop_due(target) {
            task();
        }
        self.inner.borrow_mut().now = target;
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut inner = self.inner.borrow_mut();
        let index = inner
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        let next = inner.pending.remove(index);
        inner.now = next.due;
        Some(next.task)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let due = inner.now + delay;
            inner.pending.push(PendingTask { id, due, task });
            id
        };
        let weak = Rc::downgrade(&self.inner);
        TimerHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().pending.retain(|p| p.id != id);
            }
        })
    }
}
