//! Huddle CLI - track support cases and huddle session notes
//!
//! This crate provides the core functionality for the `huddle` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Case, HuddleSession)
//! - [`store`] - The case store: cases plus product/label vocabularies
//! - [`storage`] - SQLite key/value persistence layer
//! - [`view`] - Cases table projection (filter + sort)
//! - [`editor`] - Per-session editor state machine and stopwatch
//! - [`csv`] - CSV import/export of the case collection
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod csv;
pub mod editor;
pub mod error;
pub mod format;
pub mod model;
pub mod storage;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
