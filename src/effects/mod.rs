//! Card effect resolution.
//!
//! [`resolve`] applies one card from a source fighter to a target fighter
//! and reports what happened as a [`Resolution`].

pub mod resolver;

pub use resolver::{resolve, Resolution};
