//! # Algorithms Module
//!
//! Verification and peer set derivation. Nothing here touches the store.

pub mod header_verifier;
pub mod msg_verifier;
pub mod peer_set_updater;
pub mod quorum;

pub use header_verifier::verify_header;
pub use msg_verifier::{check_msg_height, verify_cross_chain_msg};
pub use peer_set_updater::{EmbeddedPeerSetPolicy, PeerSetPolicy};
pub use quorum::verify_quorum;
