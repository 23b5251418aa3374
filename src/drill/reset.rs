//! Two-step reset confirmation.
//!
//! The first trigger arms the guard and schedules an expiry. A second trigger
//! before the expiry confirms; the expiry itself disarms without resetting.

use crate::config::RESET_CONFIRM_TICKS;
use crate::schedule::{Scheduler, TaskId};

use super::Deferred;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetGuard {
    Idle,
    PendingConfirm(TaskId),
}

/// What a trigger did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetStep {
    /// First trigger: ask for confirmation.
    Armed,
    /// Second trigger within the window: perform the reset.
    Confirmed,
}

impl ResetGuard {
    pub fn trigger(&mut self, scheduler: &mut Scheduler<Deferred>) -> ResetStep {
        match *self {
            ResetGuard::Idle => {
                let id = scheduler.schedule(RESET_CONFIRM_TICKS, Deferred::ExpireResetConfirm);
                *self = ResetGuard::PendingConfirm(id);
                ResetStep::Armed
            }
            ResetGuard::PendingConfirm(id) => {
                scheduler.cancel(id);
                *self = ResetGuard::Idle;
                ResetStep::Confirmed
            }
        }
    }

    /// Called when the expiry task fires. Returns true if the guard was armed.
    pub fn expire(&mut self) -> bool {
        let was_armed = self.is_pending();
        *self = ResetGuard::Idle;
        was_armed
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResetGuard::PendingConfirm(_))
    }
}
