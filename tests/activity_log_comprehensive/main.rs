//! Activity Log Comprehensive Test Suite
//!
//! End-to-end tests through the public `kiosklog` API.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Append semantics** - sequential ids, validation, nothing
//!   persisted on rejection
//! - **Tier 2: Query semantics** - per-field sets, resource entries, the
//!   half-open time window, log order
//! - **Tier 3: Concurrency** - no lost appends under either strategy
//! - **Tier 4: Durability** - reopen, read-only handles, config overrides
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test activity_log_comprehensive
//! ```

mod test_utils;

mod append_tests;
mod concurrency_tests;
mod durability_tests;
mod query_tests;
