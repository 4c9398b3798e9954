//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamp, errors)
//! - `license` - License record, Pro status rules and feature gating
//! - `backup` - Backup snapshot format and validation
//! - `account` - Confirmation protocol for deleting all data

pub mod account;
pub mod backup;
pub mod foundation;
pub mod license;
