//! Process-wide holder of the current published root.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use log::debug;

use crate::error::StateResult;
use crate::node::Node;
use crate::state_delta::StateDelta;
use crate::switch_state::SwitchState;

/// The current-root slot.
///
/// # Lifecycle
///
/// The manager starts with an empty, already-published root, so readers
/// have a valid tree from the first instant. Dropping the manager releases
/// its reference to the last root; nodes stay alive as long as any reader
/// or in-flight [`StateDelta`] still holds them.
///
/// # Concurrency
///
/// Readers call [`current`](StateManager::current) and traverse the
/// returned root without any locking; the slot swap is a single atomic
/// pointer replacement, so a reader that loaded the previous root keeps a
/// fully consistent tree.
///
/// Updates follow a single-writer model: one thread owns the
/// clone-build-publish sequence. The manager still serializes
/// [`update`](StateManager::update) calls through an internal mutex so an
/// accidental second writer queues instead of racing; readers never touch
/// that mutex.
#[derive(Debug)]
pub struct StateManager {
    current: ArcSwap<SwitchState>,
    update_lock: Mutex<()>,
}

impl StateManager {
    /// Creates a manager holding an empty published root.
    pub fn new() -> Self {
        let initial = Arc::new(SwitchState::new());
        initial.publish();
        StateManager {
            current: ArcSwap::from(initial),
            update_lock: Mutex::new(()),
        }
    }

    /// Returns the currently published root.
    pub fn current(&self) -> Arc<SwitchState> {
        self.current.load_full()
    }

    /// Runs one update against the current root.
    ///
    /// `build` receives the current root and returns either a new
    /// unpublished root, `None` when nothing changed, or an error. On
    /// success the new root is published, swapped in, and returned as a
    /// [`StateDelta`] against its predecessor. On `None` or error nothing
    /// is swapped: the previous root stays current and fully valid.
    pub fn update<F>(&self, build: F) -> StateResult<Option<StateDelta>>
    where
        F: FnOnce(&Arc<SwitchState>) -> StateResult<Option<Arc<SwitchState>>>,
    {
        let _writer = self.update_lock.lock().expect("state writer mutex poisoned");
        let old = self.current.load_full();
        let new = match build(&old)? {
            Some(new) => new,
            None => {
                debug!("state update produced no changes");
                return Ok(None);
            }
        };
        new.publish();
        self.current.store(Arc::clone(&new));
        debug!(
            "published new switch state: {} ports, {} acls, {} load balancers, {} routes",
            new.ports().len(),
            new.acls().len(),
            new.load_balancers().len(),
            new.routes().len(),
        );
        Ok(Some(StateDelta::new(old, new)))
    }
}

impl Default for StateManager {
    fn default() -> Self {
        StateManager::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use crate::port::Port;
    use swagent_types::{AdminState, PortId};

    #[test]
    fn test_initial_root_is_empty_and_published() {
        let manager = StateManager::new();
        let root = manager.current();
        assert!(root.is_published());
        assert!(root.ports().is_empty());
    }

    #[test]
    fn test_update_publishes_and_swaps() {
        let manager = StateManager::new();
        let before = manager.current();

        let delta = manager
            .update(|state| {
                let mut handle = Arc::clone(state);
                let ports = SwitchState::modify_ports(&mut handle);
                ports
                    .insert(
                        PortId(1),
                        Arc::new(Port::new(PortId(1), "Ethernet0", 25_000, 9100, AdminState::Up)),
                    )
                    .unwrap();
                Ok(Some(handle))
            })
            .unwrap()
            .expect("update changed state");

        let after = manager.current();
        assert!(after.is_published());
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(delta.old_state(), &before));
        assert!(Arc::ptr_eq(delta.new_state(), &after));
        // The reader that captured the old root still sees it unchanged.
        assert!(before.ports().is_empty());
    }

    #[test]
    fn test_noop_update_keeps_current_root() {
        let manager = StateManager::new();
        let before = manager.current();
        let result = manager.update(|_| Ok(None)).unwrap();
        assert!(result.is_none());
        assert!(Arc::ptr_eq(&before, &manager.current()));
    }

    #[test]
    fn test_failed_update_keeps_current_root() {
        let manager = StateManager::new();
        let before = manager.current();
        let err = manager
            .update(|_| Err::<Option<Arc<SwitchState>>, _>(StateError::duplicate_id("port 1")))
            .unwrap_err();
        assert_eq!(err, StateError::duplicate_id("port 1"));
        assert!(Arc::ptr_eq(&before, &manager.current()));
    }
}
