//! This module defines all members of the preview permission domain:
//! its models, the ports it requires and the services it exposes

pub mod models;
pub mod ports;
pub mod services;
