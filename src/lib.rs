//! # Sakram Portal
//!
//! Marketing and demo web front-end for the Sakram cybersecurity
//! governance platform. The pages are static product copy; the dashboard
//! hosts the one real piece of procedural logic, a simulated diagnostic
//! workflow that writes a scripted ten-step trace to the record store.
//!
//! ## Modules
//!
//! - `auth` - Session-based authentication collaborator
//! - `config` - TOML configuration with environment overrides
//! - `diagnostic` - The scripted diagnostic workflow runner
//! - `notify` - User-facing notification queue (toasts)
//! - `password` - Password strength evaluation
//! - `seed` - Demo dataset for the dashboard
//! - `server` - axum routes, pages and JSON API
//! - `storage` - Record store abstraction with memory and file backends

pub mod auth;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod notify;
pub mod password;
pub mod seed;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
