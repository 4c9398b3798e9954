//! SkyPost Pro - License entitlements for the SkyPost notes extension
//!
//! This crate decides whether a user holds an active Pro license, gates
//! Pro-only features on that answer, and offers Pro users backup, restore
//! and full deletion of their data.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
