//! Reconciliation of UptimeRobot monitors into Cachet
//!
//! The Reconciler drives the two seam traits; the HTTP clients in
//! `adapters` implement them.

mod reconciler;
mod traits;

pub use reconciler::*;
pub use traits::*;
