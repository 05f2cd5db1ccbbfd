//! # Ports Module
//!
//! Hexagonal architecture ports for header sync.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
