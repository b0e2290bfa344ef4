//! Status lifecycle
//!
//! - [`TransitionTable`] - allowed moves per status type
//! - [`AuthContext`] / [`Capability`] - who may change what
//! - [`LifecycleManager`] - applies staff-driven changes

pub mod context;
pub mod manager;
pub mod transitions;

pub use context::{AuthContext, Capability};
pub use manager::{LifecycleError, LifecycleManager, LifecycleResult};
pub use transitions::{InvalidTransition, ManagedStatus, TransitionTable, parse_status};
