//!
//! End-to-end tests of the word aligners
//!
#[macro_use]
extern crate approx;

use statnlp::align::{
    align_all, AlignmentScore, BaselineAligner, DiceAligner, HmmAligner, HmmConfig, Ibm1Aligner,
    Ibm2Aligner, SentencePair, WordAligner,
};
use statnlp::io::{read_alignments, read_corpus_dir, write_alignments, write_string};
use test_case::test_case;

fn training_pairs() -> Vec<SentencePair> {
    vec![
        SentencePair::from_strs(0, "the", "le"),
        SentencePair::from_strs(1, "cat", "chat"),
        SentencePair::from_strs(2, "the dog", "le chien"),
        SentencePair::from_strs(3, "a cat", "un chat"),
    ]
}

fn aligner(name: &str) -> Box<dyn WordAligner> {
    match name {
        "baseline" => Box::new(BaselineAligner),
        "dice" => Box::new(DiceAligner::new()),
        "ibm1" => Box::new(Ibm1Aligner::default()),
        "ibm2" => Box::new(Ibm2Aligner::default()),
        "hmm" => Box::new(HmmAligner::new(HmmConfig::hmm())),
        "hmm_ibm2" => Box::new(HmmAligner::new(HmmConfig::hmm_ibm2())),
        _ => unreachable!(),
    }
}

#[test_case("baseline")]
#[test_case("dice")]
#[test_case("ibm1")]
#[test_case("ibm2")]
#[test_case("hmm")]
#[test_case("hmm_ibm2")]
fn the_cat_aligns_diagonally(name: &str) {
    let mut a = aligner(name);
    a.train(&training_pairs()).unwrap();
    let alignment = a.align(&SentencePair::from_strs(9, "the cat", "le chat"));
    assert_eq!(alignment.pairs(), vec![(0, 0), (1, 1)]);
}

#[test_case("dice")]
#[test_case("ibm1")]
#[test_case("ibm2")]
#[test_case("hmm")]
fn every_french_word_is_linked_once(name: &str) {
    let mut a = aligner(name);
    let pairs = training_pairs();
    a.train(&pairs).unwrap();
    let pair = SentencePair::from_strs(10, "a dog", "un chien le");
    let alignment = a.align(&pair);
    let mut french: Vec<usize> = alignment.links().iter().map(|l| l.french).collect();
    french.sort_unstable();
    assert_eq!(french, vec![0, 1, 2]);
}

#[test]
fn align_and_score_files() {
    let dir = tempfile::tempdir().unwrap();
    let mini = dir.path().join("mini");
    std::fs::create_dir(&mini).unwrap();
    write_string(
        mini.join("mini.e"),
        "<s snum=1> the dog </s>\n<s snum=2> a cat </s>\n<s snum=3> the cat </s>\n",
    )
    .unwrap();
    write_string(
        mini.join("mini.f"),
        "<s snum=1> le chien </s>\n<s snum=2> un chat </s>\n<s snum=3> le chat </s>\n",
    )
    .unwrap();
    write_string(
        mini.join("mini.wa"),
        "1 1 1 S\n1 2 2 S\n2 1 1 S\n2 2 2 S\n3 1 1 S\n3 2 2 P\n",
    )
    .unwrap();

    let test_pairs = read_corpus_dir(&mini, usize::MAX).unwrap();
    assert_eq!(test_pairs.len(), 3);
    let references = read_alignments(mini.join("mini.wa")).unwrap();

    let mut training = training_pairs();
    training.extend(test_pairs.iter().cloned());
    let mut a = Ibm1Aligner::default();
    a.train(&training).unwrap();

    let proposed = align_all(&a, &test_pairs);
    let score = AlignmentScore::evaluate(&test_pairs, &proposed, &references).unwrap();
    assert_abs_diff_eq!(score.precision(), 1.0);
    assert_abs_diff_eq!(score.recall(), 1.0);
    assert_abs_diff_eq!(score.aer(), 0.0);

    let out = dir.path().join("ibm1.out");
    write_alignments(&out, &proposed).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "0-0 1-1 \n0-0 1-1 \n0-0 1-1 \n"
    );
}

#[test]
fn missing_reference_is_an_error() {
    let pairs = vec![SentencePair::from_strs(42, "a", "un")];
    let proposed = align_all(&BaselineAligner, &pairs);
    let references = Default::default();
    assert!(AlignmentScore::evaluate(&pairs, &proposed, &references).is_err());
}
