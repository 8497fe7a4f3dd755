//! # State Observers
//!
//! Side effects that follow a dispatch (auto-save, preview refresh, logging)
//! live outside the reducer. The engine calls every subscribed observer
//! after each dispatch with the state before and after, in subscription
//! order.
//!
//! Observers must not block: hand work off to a channel or task.

use crate::session::BuilderState;

pub trait StateObserver: Send {
    fn state_changed(&mut self, previous: &BuilderState, current: &BuilderState);
}

/// Plain closures work as observers
impl<F> StateObserver for F
where
    F: FnMut(&BuilderState, &BuilderState) + Send,
{
    fn state_changed(&mut self, previous: &BuilderState, current: &BuilderState) {
        self(previous, current)
    }
}

/// Whether the document moved between two states
pub fn document_changed(previous: &BuilderState, current: &BuilderState) -> bool {
    previous.revision != current.revision
}
