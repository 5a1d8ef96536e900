//! newsfront: company and news front end over a remote company/news API.
//!
//! Each request fetches a fresh snapshot from the upstream API, joins and
//! queries it with [`newsfront_upstream`], and returns the page's data
//! bundle as JSON.
//!
//! # Architecture
//!
//! - **Upstream client**: typed HTTP lookups (`newsfront_upstream::client`)
//! - **Join resolver**: article → company (`newsfront_upstream::join`)
//! - **Query engine**: filter, rank, bound (`newsfront_upstream::query`)
//! - **Page assemblers**: one recipe per page ([`pages`])
//! - **HTTP front end**: axum routes and error mapping ([`server`], [`error`])

pub mod config;
pub mod error;
pub mod logging;
pub mod pages;
pub mod server;

pub use config::FrontConfig;
pub use error::{FrontError, Result};
pub use server::FrontServer;
