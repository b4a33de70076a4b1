//! Core of genpad: cleaning model output and running the generation tool.
//!
//! The terminal UI in `main.rs` talks to this crate only through
//! [`generate::Invoker::invoke`] (or [`generate::spawn_generation`]) and
//! [`generate::clean`].

pub mod buffer;
pub mod config;
pub mod generate;
