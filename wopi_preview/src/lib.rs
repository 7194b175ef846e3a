#![deny(missing_docs)]
//! This crate defines the edit-permission and modal-state model of the WOPI
//! file preview following the hexagonal architecture pattern

pub mod domain;
#[cfg(feature = "outbound")]
pub mod outbound;
