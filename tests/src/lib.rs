//! # LIMS Test Suite
//!
//! Cross-subsystem flows that no single crate can test on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # lifecycle writes feeding statistics reads
//!     └── runtime.rs     # notifications through the running handlers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lims-tests
//! cargo test -p lims-tests integration::runtime
//! ```

pub mod integration;
