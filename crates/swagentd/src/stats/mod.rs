//! Runtime counter reconciliation.
//!
//! Counters are runtime entities, not configuration: they come and go as
//! the hardware layer allocates and frees stat slots, and their values are
//! refreshed by a collection tick. They live in a separately synchronized
//! cache, deliberately outside the immutable state tree, reconciled
//! through a queued-intent idiom instead of the copy-on-write appliers.

mod counter;
mod updater;

pub use counter::MonotonicCounter;
pub use updater::{CounterIntent, StatUpdater};
