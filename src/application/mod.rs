//! Application layer - Managers and the Pro panel controller.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//!
//! - `entitlement` - License loading, activation and gating
//! - `backup` - Backup, restore and wipe of user data
//! - `controller` - Entitlement-gated Pro panel
//! - `context` - Startup wiring

pub mod backup;
pub mod context;
pub mod controller;
pub mod entitlement;
mod outcome;

pub use context::{AppContext, AppServices};
pub use outcome::OperationResult;
