//! # Listeners and payloads.
//!
//! - [`Handler`] async trait implemented by anything that reacts to events
//! - [`Listener`] identity handle stored by the emitter
//! - [`Args`] type-erased payload passed from `publish` to every handler

mod args;
mod listener;

pub use args::Args;
pub use listener::{Handler, Listener};
