//! Session state
//!
//! Progress is never stored separately from the dataset. It is derived by
//! scanning the records:
//! - Total and completed counts
//! - Ordered unannotated positions
//! - The next position to present
//! - Whether the session is complete

mod session;

pub use session::{SessionPhase, SessionState};
