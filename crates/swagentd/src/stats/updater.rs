//! Intent-queue reconciler for the live counter collection.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use log::debug;

use swagent_state::{StateError, StateResult};
use swagent_types::CounterId;

use crate::stats::MonotonicCounter;

/// A queued add/remove intent for one counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterIntent {
    /// Start tracking a counter under the given stat name.
    Add { id: CounterId, name: String },
    /// Stop tracking a counter.
    Remove { id: CounterId },
}

/// Reconciles queued counter intents into the live collection.
///
/// Producers (the hardware layer reacting to state deltas) enqueue intents
/// from any thread; a single consumer drains them on its stat tick. Both
/// locks are narrow: the queue mutex covers one push or one pop, the
/// collection mutex covers one intent's mutation or one sample update,
/// and neither is ever held across hardware or I/O calls.
#[derive(Debug, Default)]
pub struct StatUpdater {
    pending: Mutex<VecDeque<CounterIntent>>,
    counters: Mutex<HashMap<CounterId, MonotonicCounter>>,
}

impl StatUpdater {
    /// Creates an updater with no counters and no pending intents.
    pub fn new() -> Self {
        StatUpdater::default()
    }

    /// Queues an intent to start tracking a counter.
    pub fn queue_add(&self, id: CounterId, name: impl Into<String>) {
        self.pending
            .lock()
            .expect("counter intent queue poisoned")
            .push_back(CounterIntent::Add {
                id,
                name: name.into(),
            });
    }

    /// Queues an intent to stop tracking a counter.
    pub fn queue_remove(&self, id: CounterId) {
        self.pending
            .lock()
            .expect("counter intent queue poisoned")
            .push_back(CounterIntent::Remove { id });
    }

    /// Drains all queued intents into the live collection.
    ///
    /// Returns the number of intents applied. Adding an existing ID fails
    /// with [`StateError::DuplicateId`]; removing an absent ID fails with
    /// [`StateError::UnknownId`]. On failure the offending intent is
    /// consumed, intents applied before it stay applied, and intents
    /// queued after it stay queued for the next drain.
    pub fn drain(&self) -> StateResult<usize> {
        let mut applied = 0;
        loop {
            let intent = self
                .pending
                .lock()
                .expect("counter intent queue poisoned")
                .pop_front();
            let Some(intent) = intent else {
                break;
            };
            self.apply(intent)?;
            applied += 1;
        }
        if applied > 0 {
            debug!("applied {applied} counter intents");
        }
        Ok(applied)
    }

    fn apply(&self, intent: CounterIntent) -> StateResult<()> {
        let mut counters = self.counters.lock().expect("counter collection poisoned");
        match intent {
            CounterIntent::Add { id, name } => match counters.entry(id) {
                Entry::Occupied(_) => Err(StateError::duplicate_id(format!("counter {id}"))),
                Entry::Vacant(vacant) => {
                    vacant.insert(MonotonicCounter::new(name));
                    Ok(())
                }
            },
            CounterIntent::Remove { id } => match counters.remove(&id) {
                Some(_) => Ok(()),
                None => Err(StateError::unknown_id(format!("counter {id}"))),
            },
        }
    }

    /// Records a new sample for a tracked counter.
    pub fn update_value(&self, id: CounterId, value: u64) -> StateResult<()> {
        let mut counters = self.counters.lock().expect("counter collection poisoned");
        match counters.get_mut(&id) {
            Some(counter) => {
                counter.update_value(value);
                Ok(())
            }
            None => Err(StateError::unknown_id(format!("counter {id}"))),
        }
    }

    /// Returns the latest sample for a tracked counter.
    pub fn counter_value(&self, id: CounterId) -> Option<u64> {
        self.counters
            .lock()
            .expect("counter collection poisoned")
            .get(&id)
            .map(|counter| counter.value())
    }

    /// Returns the number of tracked counters.
    pub fn len(&self) -> usize {
        self.counters
            .lock()
            .expect("counter collection poisoned")
            .len()
    }

    /// Returns true if no counters are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of queued, not-yet-drained intents.
    pub fn pending_len(&self) -> usize {
        self.pending
            .lock()
            .expect("counter intent queue poisoned")
            .len()
    }
}
