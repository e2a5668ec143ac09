//!
//! Train a word aligner, score it against reference alignments and write
//! predictions for the test corpus.
//!
//! ```text
//! statnlp-align --path data --data validate --model hmm --sentences 10000
//! ```
//!
use clap::{Parser, ValueEnum};
use statnlp::align::{
    align_all, Alignment, AlignmentScore, BaselineAligner, DiceAligner, HmmAligner, HmmConfig,
    Ibm1Aligner, Ibm2Aligner, WordAligner,
};
use statnlp::error::Result;
use statnlp::io::{read_alignments, read_corpus_dir, write_alignments};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Model {
    Baseline,
    Dice,
    Ibm1,
    Ibm2,
    Hmm,
    HmmIbm2,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dataset {
    /// `<path>/mini`, no extra training data
    Mini,
    /// `<path>/trial`
    Validate,
}

#[derive(Parser, Debug)]
struct Opts {
    /// directory holding `mini/`, `trial/`, `training/` and `test/`
    #[clap(long, default_value = ".")]
    path: PathBuf,
    #[clap(long, value_enum, default_value = "mini")]
    data: Dataset,
    #[clap(long, value_enum, default_value = "baseline")]
    model: Model,
    /// number of extra training pairs read from `<path>/training`
    #[clap(long, default_value_t = 0)]
    sentences: usize,
    #[clap(long, default_value_t = 5)]
    iterations: usize,
    /// print every sentence's alignment grid
    #[clap(long)]
    verbose: bool,
    /// prediction file, `<path>/<model>.out` by default
    #[clap(long)]
    output: Option<PathBuf>,
}

fn build_aligner(model: Model, iterations: usize) -> Box<dyn WordAligner> {
    match model {
        Model::Baseline => Box::new(BaselineAligner),
        Model::Dice => Box::new(DiceAligner::new()),
        Model::Ibm1 => Box::new(Ibm1Aligner::new(iterations)),
        Model::Ibm2 => Box::new(Ibm2Aligner::new(iterations)),
        Model::Hmm => Box::new(HmmAligner::new(HmmConfig {
            n_iterations: iterations,
            ..HmmConfig::hmm()
        })),
        Model::HmmIbm2 => Box::new(HmmAligner::new(HmmConfig {
            n_iterations: iterations,
            ..HmmConfig::hmm_ibm2()
        })),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    let (test_dir, reference_file) = match opts.data {
        Dataset::Mini => (opts.path.join("mini"), opts.path.join("mini/mini.wa")),
        Dataset::Validate => (opts.path.join("trial"), opts.path.join("trial/trial.wa")),
    };
    let test_pairs = read_corpus_dir(&test_dir, usize::MAX)?;
    let references = read_alignments(&reference_file)?;

    let mut training_pairs = match opts.data {
        Dataset::Validate if opts.sentences > 0 => {
            read_corpus_dir(opts.path.join("training"), opts.sentences)?
        }
        _ => Vec::new(),
    };
    training_pairs.extend(test_pairs.iter().cloned());

    let mut aligner = build_aligner(opts.model, opts.iterations);
    aligner.train(&training_pairs)?;

    let proposed = align_all(aligner.as_ref(), &test_pairs);
    if opts.verbose {
        for (pair, alignment) in test_pairs.iter().zip(proposed.iter()) {
            if let Some(reference) = references.get(&pair.id) {
                println!("Alignment:\n{}", Alignment::render(reference, alignment, pair));
            }
        }
    }
    let score = AlignmentScore::evaluate(&test_pairs, &proposed, &references)?;
    println!("{}", score);

    let blind_dir = opts.path.join("test");
    if blind_dir.is_dir() {
        let blind_pairs = read_corpus_dir(&blind_dir, usize::MAX)?;
        let predictions = align_all(aligner.as_ref(), &blind_pairs);
        let output = match &opts.output {
            Some(output) => output.clone(),
            None => opts.path.join(format!("{:?}.out", opts.model).to_lowercase()),
        };
        write_alignments(&output, &predictions)?;
        println!("# predictions={}", output.display());
    }

    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
