//! Command handlers organized by namespace.
//!
//! | Module | Commands | Backed by |
//! |--------|----------|-----------|
//! | `activity` | 5 | ActivityStore, QueryExecutor |
//! | `raw` | 2 | Ledger (`raw/` namespace) |

pub mod activity;
pub mod raw;
