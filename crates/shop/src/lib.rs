//! MORELUFS Shop - client-side commerce core.
//!
//! This crate implements the storefront state machine that runs inside
//! the host chat platform's embedded web surface: browse the catalog,
//! pick a size, accumulate a cart, compute a checkout total and submit
//! an order through the two-step order/payment protocol.
//!
//! # Architecture
//!
//! - [`catalog`] - static product lookup
//! - [`cart`] - the cart aggregate (merge/quantity/clear)
//! - [`navigation`] - the page navigation state machine
//! - [`checkout`] - delivery/payment selections and the price breakdown
//! - [`forms`] - checkout form draft and validation
//! - [`storage`] - durable local storage for the cart and form draft
//! - [`api`] - the remote order/payment protocol client
//! - [`bridge`] - the host platform bridge seam (alerts, link opening)
//! - [`submit`] - the order submission pipeline and its state machine
//! - [`app`] - the [`Shop`](app::Shop) state container tying it together
//!
//! All external callers mutate state through the entry points on
//! [`app::Shop`]; the inner aggregates enforce their own invariants and
//! never reach out to storage or the network themselves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod bridge;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod forms;
pub mod navigation;
pub mod storage;
pub mod submit;
