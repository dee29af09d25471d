//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer, following
//! hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: in-memory trade ledger, share rate and portfolio stores
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: dependency injection container

pub mod config;
pub mod http;
pub mod persistence;
