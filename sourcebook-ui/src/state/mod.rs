//! State Management
//!
//! Global toast state and the per-project load pipeline.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use session::{use_project_session, Existence, ProjectSession};
