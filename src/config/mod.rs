// src/config/mod.rs
//! Configuration assembly for plainconf
//!
//! Resolves load options, reads each source and merges them into a
//! [`Config`].

pub use app::{Assembler, Config};
pub use options::Options;

mod app;
mod defaults;
mod options;
