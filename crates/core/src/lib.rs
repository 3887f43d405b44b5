//! MORELUFS Core - Shared types library.
//!
//! This crate provides the domain types used across the storefront
//! components:
//! - `shop` - the client-side commerce core (cart, checkout, submission)
//! - `integration-tests` - end-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   phone numbers, and garment sizes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
