//! # Adapters
//!
//! Store implementations and the typed chain-state layer.

pub mod chain_state;
pub mod memory_store;
pub mod overlay;

pub use chain_state::ChainStateStore;
pub use memory_store::InMemoryKVStore;
pub use overlay::StateOverlay;
