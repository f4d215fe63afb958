//! Core logic of the pet-care log bot.
//!
//! This crate is framework-agnostic. The chat platform lives behind
//! [`messaging::port::MessagingPort`], implemented in adapter crates.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod desk;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
