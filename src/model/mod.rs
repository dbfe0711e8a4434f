//! Data models for huddle.
//!
//! This module contains the domain models:
//! - Case
//! - HuddleSession

pub mod case;
pub mod session;

pub use case::{Case, IssueType};
pub use session::{HuddleSession, SessionStatus};
