//! VoltCart Core - Domain types and client-side state.
//!
//! This crate provides the pieces of the storefront that have no I/O:
//! - [`types`] - Newtype wrappers for IDs, prices, quantities and statuses,
//!   plus the `Product` and `Category` entities
//! - [`cart`] - The cart state container and its update rules
//! - [`catalog`] - Fetched catalog data and the product filter
//! - [`navigation`] - The screen stack
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no HTTP, no
//! async runtime, no locks. The `storefront` crate wraps these in shared
//! handles and drives them from request handlers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod navigation;
pub mod types;

pub use types::*;
