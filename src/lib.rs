//! Library crate for userreg-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state and update loop (`app`)
//! - Error and result types (`error`)
//! - Draft records and field validation (`form`)
//! - Remote document-store client (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userreg-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod error;
pub mod form;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
