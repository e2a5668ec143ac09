//!
//! Train CBOW word embeddings and write them in the word2vec text format.
//!
use clap::Parser;
use statnlp::embed::{train_embeddings, EmbeddingConfig};
use statnlp::error::Result;
use statnlp::io::{read_training_text, write_embeddings, write_json};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Opts {
    /// one tokenized sentence per line
    #[clap(long)]
    training_data: PathBuf,
    #[clap(long)]
    output: PathBuf,
    #[clap(long, default_value_t = 100)]
    size: usize,
    #[clap(long, default_value_t = 5)]
    window: usize,
    #[clap(long, default_value_t = 0.025)]
    alpha: f64,
    #[clap(long, default_value_t = 5)]
    negative: usize,
    #[clap(long, default_value_t = 5)]
    iter: usize,
    /// train with negative sampling only
    #[clap(long)]
    no_hs: bool,
    #[clap(long, default_value_t = 0)]
    seed: u64,
    /// dump the training config as json
    #[clap(long)]
    save_config: Option<PathBuf>,
    /// log the nearest neighbours of these words
    #[clap(long)]
    probe: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    let config = EmbeddingConfig {
        dimension: opts.size,
        window: opts.window,
        alpha: opts.alpha,
        negative_samples: opts.negative,
        iterations: opts.iter,
        hierarchical_softmax: !opts.no_hs,
        seed: opts.seed,
    };
    if let Some(path) = &opts.save_config {
        write_json(path, &config)?;
    }

    let sentences = read_training_text(&opts.training_data)?;
    let embeddings = train_embeddings(&sentences, &config)?;
    for word in opts.probe.iter() {
        println!("# {} -> {:?}", word, embeddings.most_similar(word, 10));
    }
    write_embeddings(&opts.output, &embeddings)?;

    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
