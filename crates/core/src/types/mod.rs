//! Core types for the MORELUFS storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod price;
pub mod size;

pub use email::{Email, EmailError};
pub use id::{CartItemId, OrderId, ProductId};
pub use phone::{Phone, PhoneError};
pub use price::Price;
pub use size::{Size, SizeError};
