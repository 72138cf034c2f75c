//! Word-level Markov chain text generation library.
//!
//! This crate provides a fixed-order Markov chain over whitespace-delimited
//! tokens, including:
//! - A prefix index mapping every window of N tokens to the tokens that
//!   followed it, duplicates kept as sampling weight
//! - A builder training that index from a token stream
//! - A lazy generator sampling new text from a trained index
//! - A bounded token reader and a run configuration
//!
//! The index is built once, then only read: generation never mutates it.

/// Chain model: tokens, prefix index, building and generation.
pub mod model;

/// Run configuration (prefix order, output length, seed).
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Token reader splitting any `BufRead` on whitespace.
pub mod io;

pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use model::builder::{build, ChainBuilder};
pub use model::generator::{generate, generate_text, Generation, GenerationState};
pub use model::prefix_index::{ChainEntry, EntryId, PrefixIndex};
pub use model::token::Token;
