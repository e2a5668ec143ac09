//!
//! Train a trigram POS tagger, evaluate it on in-domain and out-of-domain
//! dev sets and tag the blind test set.
//!
use clap::{Parser, ValueEnum};
use statnlp::decode::{FallbackDecoder, GreedyDecoder, TrellisDecoder, ViterbiDecoder};
use statnlp::error::Result;
use statnlp::io::{read_sentences, read_tagged_sentences, write_tagged};
use statnlp::score::LogProb;
use statnlp::tagger::{
    contains_tag, vocabulary, InterpolatedTrigramScorer, InterpolationWeights,
    LocalTrigramScorer, MostFrequentTagScorer, PosTagger, TagState, TaggerEvaluation,
};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scorer {
    MostFrequent,
    Interpolated,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Decoder {
    Viterbi,
    Greedy,
    /// viterbi, replaced by greedy on failure or on a `--fallback-tag`
    Fallback,
}

#[derive(Parser, Debug)]
struct Opts {
    /// directory holding the `en-wsj-*` and `en-web-*` files
    #[clap(long, default_value = ".")]
    path: PathBuf,
    #[clap(long, value_enum, default_value = "interpolated")]
    scorer: Scorer,
    #[clap(long, value_enum, default_value = "viterbi")]
    decoder: Decoder,
    /// only allow tag trigrams seen in training
    #[clap(long)]
    restrict_trigrams: bool,
    /// tags that make the fallback decoder distrust a viterbi path
    #[clap(long = "fallback-tag")]
    fallback_tags: Vec<String>,
}

fn run<Sc, D>(opts: &Opts, mut tagger: PosTagger<Sc, D>) -> Result<()>
where
    Sc: LocalTrigramScorer,
    D: TrellisDecoder<TagState, LogProb> + Sync,
{
    let train = read_tagged_sentences(opts.path.join("en-wsj-train.pos"), true)?;
    let dev_in = read_tagged_sentences(opts.path.join("en-wsj-dev.pos"), true)?;
    let dev_out = read_tagged_sentences(opts.path.join("en-web-weblogs-dev.pos"), true)?;
    let training_vocabulary = vocabulary(&train);

    tagger.train(&train)?;

    println!("Evaluating on in-domain data:");
    println!("{}", TaggerEvaluation::evaluate(&tagger, &dev_in, &training_vocabulary)?);
    println!("Evaluating on out-of-domain data:");
    println!("{}", TaggerEvaluation::evaluate(&tagger, &dev_out, &training_vocabulary)?);

    let blind = opts.path.join("en-web-test.blind");
    if blind.is_file() {
        let sentences = read_sentences(&blind)?;
        let tags = tagger.tag_all(&sentences)?;
        let output = opts.path.join("en-web-test.tagged");
        write_tagged(&output, &sentences, &tags)?;
        println!("# tagged={}", output.display());
    }
    Ok(())
}

fn with_scorer<D>(opts: &Opts, decoder: D) -> Result<()>
where
    D: TrellisDecoder<TagState, LogProb> + Sync,
{
    match opts.scorer {
        Scorer::MostFrequent => run(
            opts,
            PosTagger::new(MostFrequentTagScorer::new(opts.restrict_trigrams), decoder),
        ),
        Scorer::Interpolated => run(
            opts,
            PosTagger::new(
                InterpolatedTrigramScorer::new(InterpolationWeights::default(), opts.restrict_trigrams),
                decoder,
            ),
        ),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    match opts.decoder {
        Decoder::Viterbi => with_scorer(&opts, ViterbiDecoder)?,
        Decoder::Greedy => with_scorer(&opts, GreedyDecoder)?,
        Decoder::Fallback => {
            let tags: Vec<&str> = opts.fallback_tags.iter().map(|t| t.as_str()).collect();
            with_scorer(&opts, FallbackDecoder::new(contains_tag(&tags)))?
        }
    }

    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
