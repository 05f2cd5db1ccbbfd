//! # Header Sync Metrics
//!
//! Prometheus counters for committed syncs and rejections.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! rc-header-sync = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `header_sync_genesis_synced_total` - Chains bootstrapped
//! - `header_sync_headers_synced_total` - Headers committed
//! - `header_sync_peer_set_rotations_total` - Peer set versions written after genesis
//! - `header_sync_cross_chain_msgs_synced_total` - Cross-chain messages committed
//! - `header_sync_rejections_total` - Rejected calls (by error kind)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Chains bootstrapped via genesis sync
    pub static ref GENESIS_SYNCED: IntCounter = register_int_counter!(
        "header_sync_genesis_synced_total",
        "Total number of side-chains bootstrapped"
    )
    .expect("Failed to create GENESIS_SYNCED metric");

    /// Headers committed
    pub static ref HEADERS_SYNCED: IntCounter = register_int_counter!(
        "header_sync_headers_synced_total",
        "Total number of side-chain headers committed"
    )
    .expect("Failed to create HEADERS_SYNCED metric");

    /// Peer set rotations committed
    pub static ref PEER_SET_ROTATIONS: IntCounter = register_int_counter!(
        "header_sync_peer_set_rotations_total",
        "Total number of consensus peer set rotations committed"
    )
    .expect("Failed to create PEER_SET_ROTATIONS metric");

    /// Cross-chain messages committed
    pub static ref CROSS_CHAIN_MSGS_SYNCED: IntCounter = register_int_counter!(
        "header_sync_cross_chain_msgs_synced_total",
        "Total number of cross-chain messages committed"
    )
    .expect("Failed to create CROSS_CHAIN_MSGS_SYNCED metric");

    /// Rejected calls, labeled by error kind
    pub static ref REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "header_sync_rejections_total",
        "Total number of rejected header sync calls",
        &["kind"]
    )
    .expect("Failed to create REJECTIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a chain bootstrapped
#[cfg(feature = "metrics")]
pub fn record_genesis_synced() {
    GENESIS_SYNCED.inc();
}

/// Record a committed header batch
#[cfg(feature = "metrics")]
pub fn record_headers_synced(count: u64, rotations: u64) {
    HEADERS_SYNCED.inc_by(count);
    PEER_SET_ROTATIONS.inc_by(rotations);
}

/// Record a committed message batch
#[cfg(feature = "metrics")]
pub fn record_cross_chain_msgs_synced(count: u64) {
    CROSS_CHAIN_MSGS_SYNCED.inc_by(count);
}

/// Record a rejected call
#[cfg(feature = "metrics")]
pub fn record_rejection(kind: &str) {
    REJECTIONS.with_label_values(&[kind]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_genesis_synced() {}

#[cfg(not(feature = "metrics"))]
pub fn record_headers_synced(_count: u64, _rotations: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_cross_chain_msgs_synced(_count: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_kind: &str) {}
