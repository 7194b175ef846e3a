#![deny(missing_docs)]
//! Shared data models for the WOPI file-preview integration: host store
//! records (posts, users, channels), the per-file edit-scope marker
//! convention, and the payloads exchanged with the plugin HTTP api

pub mod api;
pub mod capability;
pub mod channel;
pub mod config;
pub mod edit_scope;
pub mod file;
pub mod post;
pub mod user;
