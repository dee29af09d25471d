//! Trade Settlement Domain Services
//!
//! Stateless business logic that doesn't fit in aggregates.

mod position_calculator;

pub use position_calculator::PositionCalculator;
