//! # Relay-Chain Header Sync Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # End-to-end flows through the public API
//! │   ├── header_flows.rs
//! │   └── msg_flows.rs
//! └── benches/           # criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rc-tests
//!
//! # Benchmarks
//! cargo bench -p rc-tests
//! ```

pub mod integration;
