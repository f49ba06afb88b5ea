//! Networking modules for the Discover REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` holds the wire DTOs shared by every page; `api` wraps each REST
//! endpoint as an async function returning those types.

pub mod api;
pub mod types;
