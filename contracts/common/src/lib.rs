//! Shared limits and storage helpers for the MedicDapp contract suite.
//!
//! This crate provides:
//! - [`limits`]: field bounds and byte-level format checks used on-chain by
//!   `medical_records` and off-chain by the `content_store` SDK, so both sides
//!   reject the same payloads.
//! - [`ttl`]: persistent/instance TTL extension helpers.

#![no_std]

pub mod limits;
pub mod ttl;

pub use limits::*;
pub use ttl::*;
