use std::collections::TryReserveError;

use thiserror::Error;

/// Failures surfaced by the chain library.
///
/// Only `Allocation` can happen while building or generating from a valid
/// index; everything else is a misuse of the API or a configuration problem.
/// Running out of suffixes or prefixes during generation is never an error,
/// see [`GenerationState`](crate::model::generator::GenerationState).
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("Prefix order must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("Prefix length mismatch: expected {expected}, got {found}")]
	PrefixLength { expected: usize, found: usize },

	#[error("Unknown chain entry: {0}")]
	UnknownEntry(usize),

	#[error("Allocation failed: {0}")]
	Allocation(#[from] TryReserveError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Configuration error: {0}")]
	Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChainError>;
