//! Top-level module for the Markov chain.
//!
//! - Tokens and the reserved sentinel (`Token`)
//! - The sliding window of recent tokens (`Window`)
//! - The prefix to suffix-bag table (`PrefixIndex`)
//! - Training (`ChainBuilder`) and sampling (`Generation`)

/// Lazy sampling of new text from a trained index.
///
/// Exposes the generation state machine and its stop reasons.
pub mod generator;

/// Training: turns a token stream into a `PrefixIndex`.
pub mod builder;

/// Hash-backed map from N-token prefixes to their suffix bags.
pub mod prefix_index;

/// Word and sentinel tokens.
pub mod token;

/// Fixed-size sliding window used while building and generating.
pub mod window;
