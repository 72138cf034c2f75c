use clap::Parser;
use std::path::PathBuf;

use rs_markov_core::ChainConfig;

#[derive(Parser)]
#[command(name = "rs-markov")]
#[command(version, about = "Generate random text from a word-level Markov chain")]
pub struct Cli {
    /// Text file to train the chain on
    pub file: PathBuf,

    /// Maximum number of words to generate (<= 0 generates nothing)
    #[arg(allow_negative_numbers = true)]
    pub nwords: Option<i64>,

    /// JSON config file; command-line values take precedence
    #[arg(long, env = "RS_MARKOV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of words in a prefix
    #[arg(short, long)]
    pub order: Option<usize>,

    /// Seed for reproducible output (defaults to the current time)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Longest word read as one token; longer words are split (0 = unbounded)
    #[arg(long)]
    pub max_token_len: Option<usize>,
}

impl Cli {
    /// Applies the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ChainConfig) -> ChainConfig {
        if let Some(nwords) = self.nwords {
            config.output_length = nwords;
        }
        if let Some(order) = self.order {
            config.prefix_order = order;
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        if let Some(max_token_len) = self.max_token_len {
            config.max_token_len = max_token_len;
        }
        config
    }
}
