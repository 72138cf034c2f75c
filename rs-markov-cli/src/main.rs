use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use rs_markov_core::io::read_tokens;
use rs_markov_core::{build, generate, ChainConfig};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr; stdout only carries the generated text
    env_logger::init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ChainConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChainConfig::default(),
    };
    let config = cli.apply(base);
    debug!("{:?}", config);

    // Seeded once for the whole run
    let mut rng = config.rng();

    let file = File::open(&cli.file).with_context(|| format!("{}", cli.file.display()))?;
    let tokens = read_tokens(BufReader::new(file), config.max_token_len);
    let index = build(tokens, config.prefix_order)
        .with_context(|| format!("Failed to build chain from {}", cli.file.display()))?;
    info!("Loaded {}", cli.file.display());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut first = true;
    for word in generate(&index, &mut rng, config.max_tokens()) {
        if !first {
            out.write_all(b" ")?;
        }
        out.write_all(word.as_bytes())?;
        first = false;
    }
    out.write_all(b"\n")?;
    out.flush()?;

    Ok(())
}
