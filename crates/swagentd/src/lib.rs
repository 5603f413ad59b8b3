//! Switch agent daemon library.
//!
//! This crate turns externally supplied desired configuration into new
//! generations of the state tree, with as little churn as possible:
//!
//! 1. Desired-configuration records arrive per domain
//!    ([`config::AgentConfig`]), already structurally validated upstream.
//! 2. Per-domain parsers build candidate nodes, applying deterministic
//!    defaults from the [`platform::Platform`] context.
//! 3. Per-domain appliers reconcile candidates against the current map,
//!    reusing the original node instance for every entry whose fields did
//!    not change ([`applier`]).
//! 4. If any domain changed, [`applier::apply_config`] returns a new
//!    unpublished root; the caller publishes it through the state manager
//!    and hands the resulting delta to the hardware-sync backend ([`hw`]).
//!
//! Runtime counters follow a separate, smaller reconciliation idiom: an
//! intent queue drained into a live collection under a narrow lock
//! ([`stats`]). That collection is deliberately not part of the immutable
//! tree.

pub mod applier;
pub mod config;
pub mod error;
pub mod hw;
pub mod platform;
pub mod stats;

pub use error::{AgentError, AgentResult};
