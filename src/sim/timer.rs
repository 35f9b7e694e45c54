//! One-shot deferred actions on the simulation clock
//!
//! Runs on the same single-threaded tick loop as everything else: a timer
//! fires on the first tick whose accumulated time reaches its due time.

/// Handle to a scheduled timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Put the ball back at its spawn point
    RespawnBall,
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    due_ms: f64,
    action: TimerAction,
}

/// Scheduler for one-shot timers
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: f64,
    next_handle: u64,
    /// Kept in scheduling order
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: f32, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + delay_ms as f64,
            action,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer (scene teardown)
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance the clock and return the timers that came due, earliest first
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(TimerHandle, TimerAction)> {
        self.now_ms += dt_ms;
        let now = self.now_ms;

        let mut fired: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                fired.push(p.clone());
                false
            } else {
                true
            }
        });
        // stable sort keeps scheduling order for equal due times
        fired.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fired.into_iter().map(|p| (p.handle, p.action)).collect()
    }
}
