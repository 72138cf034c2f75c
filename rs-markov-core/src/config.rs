use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::DEFAULT_MAX_TOKEN_LEN;

/// Options recognized when building and sampling a chain.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// config file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
	/// Number of tokens in a prefix.
	pub prefix_order: usize,

	/// Maximum number of words to generate. Zero or negative generates nothing.
	pub output_length: i64,

	/// Fixed seed for reproducible output. Time-based when absent.
	pub random_seed: Option<u64>,

	/// Longest word read as a single token (0 = unbounded).
	pub max_token_len: usize,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			prefix_order: 2,
			output_length: 100,
			random_seed: None,
			max_token_len: DEFAULT_MAX_TOKEN_LEN,
		}
	}
}

impl ChainConfig {
	/// Loads a config from a JSON file.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = fs::read_to_string(path)?;
		Ok(serde_json::from_str(&contents)?)
	}

	/// Output length as a word budget, negative values clamped to 0.
	pub fn max_tokens(&self) -> usize {
		usize::try_from(self.output_length).unwrap_or(0)
	}

	/// Creates the random source for a whole run.
	///
	/// Call it once and reuse the result for every generation.
	pub fn rng(&self) -> StdRng {
		let seed = self.random_seed.unwrap_or_else(time_seed);
		debug!("Random seed: {}", seed);
		StdRng::seed_from_u64(seed)
	}
}

fn time_seed() -> u64 {
	match SystemTime::now().duration_since(UNIX_EPOCH) {
		Ok(elapsed) => elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()),
		Err(_) => 0,
	}
}
