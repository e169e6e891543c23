//! Duplicate grouping and reconciliation planning.
//!
//! - [`index`]: merges per-directory signature maps into one global index
//! - [`planner`]: turns every signature group into a move-one/delete-rest
//!   plan

pub mod index;
pub mod planner;

pub use index::SignatureIndex;
pub use planner::{build_plan, ReconcilePlan};
