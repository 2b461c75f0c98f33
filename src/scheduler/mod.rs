//! Frame pacing and the cooperative deferred-task queue.
//!
//! All deferred work in the viewer — scheduler ticks, fade interpolation
//! steps, the slow-open notice, deferred opens — runs through one
//! deadline-ordered [`TimerQueue`] drained by the host. No task overlaps
//! another; a task that needs to continue schedules its successor after
//! completing its own body.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::NotNan;

/// Ideal spacing between scheduler ticks when idle.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Floor applied to every computed tick delay.
pub const MIN_TICK_DELAY_MS: f64 = 1.0;

/// Delay until the next scheduler tick.
///
/// While animating, ticks chain at the minimum delay to keep motion smooth.
/// When idle, the delay targets `prev_tick + 1000/60` so steady state
/// converges to 60 ticks per second without accumulating timer jitter.
#[must_use]
pub fn next_frame_delay(animating: bool, prev_tick_ms: Option<f64>, now_ms: f64) -> f64 {
    if animating {
        return MIN_TICK_DELAY_MS;
    }
    let prev_tick_ms = prev_tick_ms.unwrap_or(now_ms);
    let target_ms = prev_tick_ms + FRAME_INTERVAL_MS;
    (target_ms - now_ms).max(MIN_TICK_DELAY_MS)
}

struct Entry<T> {
    deadline: NotNan<f64>,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap surfaces the earliest deadline; equal
    // deadlines pop in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deadline-ordered queue of deferred tasks, drained by the host clock.
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Queues `task` to become due at `deadline_ms`.
    ///
    /// A non-finite deadline is treated as immediately due.
    pub fn schedule(&mut self, deadline_ms: f64, task: T) {
        let deadline = NotNan::new(deadline_ms).unwrap_or_default();
        self.next_seq += 1;
        self.heap.push(Entry {
            deadline,
            seq: self.next_seq,
            task,
        });
    }

    /// Removes and returns the earliest task whose deadline has passed.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<T> {
        let due = self
            .heap
            .peek()
            .is_some_and(|entry| entry.deadline.into_inner() <= now_ms);
        if !due {
            return None;
        }
        self.heap.pop().map(|entry| entry.task)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.deadline.into_inner())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{FRAME_INTERVAL_MS, MIN_TICK_DELAY_MS, TimerQueue, next_frame_delay};

    #[test]
    fn animating_ticks_use_minimum_delay() {
        assert_eq!(next_frame_delay(true, Some(0.0), 1000.0), MIN_TICK_DELAY_MS);
        assert_eq!(next_frame_delay(true, None, 0.0), MIN_TICK_DELAY_MS);
    }

    #[test]
    fn idle_ticks_target_sixty_hertz() {
        let delay = next_frame_delay(false, Some(1000.0), 1000.0);
        assert!((delay - FRAME_INTERVAL_MS).abs() < 1e-9);
    }

    #[test]
    fn late_ticks_shorten_the_next_delay() {
        // Tick ran 5ms late: the next delay compensates instead of drifting.
        let delay = next_frame_delay(false, Some(1000.0), 1005.0);
        assert!((delay - (FRAME_INTERVAL_MS - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn very_late_ticks_clamp_to_the_floor() {
        let delay = next_frame_delay(false, Some(1000.0), 1100.0);
        assert_eq!(delay, MIN_TICK_DELAY_MS);
    }

    #[test]
    fn queue_pops_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(30.0, "late");
        queue.schedule(10.0, "early");
        queue.schedule(20.0, "middle");

        assert_eq!(queue.next_deadline(), Some(10.0));
        assert_eq!(queue.pop_due(100.0), Some("early"));
        assert_eq!(queue.pop_due(100.0), Some("middle"));
        assert_eq!(queue.pop_due(100.0), Some("late"));
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_pop_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(10.0, "first");
        queue.schedule(10.0, "second");
        queue.schedule(10.0, "third");

        assert_eq!(queue.pop_due(10.0), Some("first"));
        assert_eq!(queue.pop_due(10.0), Some("second"));
        assert_eq!(queue.pop_due(10.0), Some("third"));
    }

    #[test]
    fn tasks_are_not_due_before_their_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(50.0, "tick");
        assert_eq!(queue.pop_due(49.9), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(50.0), Some("tick"));
    }
}
