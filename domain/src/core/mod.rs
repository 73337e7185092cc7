//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`route::Route`]: a validated client-side route path

pub mod error;
pub mod route;
