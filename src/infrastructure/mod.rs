//! Infrastructure layer for external integrations.
//!
//! This layer implements the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`storage`] - History slot backends (file and in-memory)
//! - [`http`] - reqwest client for the remote shortening service

pub mod http;
pub mod storage;
