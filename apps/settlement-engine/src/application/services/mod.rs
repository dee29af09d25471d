//! Application Services
//!
//! Application services coordinate domain logic and infrastructure adapters.
//! They hold cross-request state that no single use case owns.

mod position_locks;

pub use position_locks::{PositionGuard, PositionLocks};
