//! Tick-driven deferred tasks.
//!
//! Replaces ad-hoc browser timers: a task is scheduled a number of ticks into
//! the future and handed back from [`Scheduler::advance`] once due. Each
//! task gets a [`TaskId`] that can be used to cancel it before it fires.
//! Time only moves when the caller advances it, so tests control it exactly.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct Pending<T> {
    id: TaskId,
    due: u64,
    task: T,
}

pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `task` to fire `delay` ticks from now.
    pub fn schedule(&mut self, delay: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move time forward and return the tasks that became due, ordered by
    /// due time, then by scheduling order.
    pub fn advance(&mut self, ticks: u64) -> Vec<T> {
        self.now += ticks;
        let now = self.now;

        let mut due: Vec<Pending<T>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_when_due() {
        let mut s = Scheduler::new();
        s.schedule(10, "advance");
        assert!(s.advance(9).is_empty());
        assert_eq!(s.advance(1), vec!["advance"]);
        assert!(!s.has_pending());
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut s = Scheduler::new();
        s.schedule(0, 1);
        assert_eq!(s.advance(0), vec![1]);
    }

    #[test]
    fn large_step_fires_everything_in_order() {
        let mut s = Scheduler::new();
        s.schedule(30, "late");
        s.schedule(10, "early");
        s.schedule(10, "early-second");
        assert_eq!(s.advance(100), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let id = s.schedule(5, "expire");
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.is_pending(id));
        assert!(s.advance(10).is_empty());
        assert!(!s.cancel(id));
    }

    #[test]
    fn cancel_after_fire_returns_false() {
        let mut s = Scheduler::new();
        let id = s.schedule(1, ());
        assert_eq!(s.advance(1).len(), 1);
        assert!(!s.cancel(id));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance(50);
        s.schedule(10, "x");
        assert!(s.advance(9).is_empty());
        assert_eq!(s.advance(1), vec!["x"]);
    }
}
