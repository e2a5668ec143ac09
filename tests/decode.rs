//!
//! Decoders on generated lattices
//!
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use statnlp::decode::{never, DecodedBy, FallbackDecoder, GreedyDecoder, TrellisDecoder, ViterbiDecoder};
use statnlp::score::{lp, rp, LogProb, RawProb};
use statnlp::trellis::{TransitionModel, Trellis};
use test_case::test_case;

///
/// `n_layers` layers of `width` states. The weight of `u -> v` depends only
/// on `v`, so the locally best successor is also globally best.
///
struct TargetOnly {
    width: usize,
    n_layers: usize,
    scores: Vec<Vec<f64>>,
}

impl TargetOnly {
    fn random(width: usize, n_layers: usize, seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let scores = (0..n_layers)
            .map(|_| (0..width).map(|_| -rng.gen::<f64>() * 10.0).collect())
            .collect();
        TargetOnly {
            width,
            n_layers,
            scores,
        }
    }
}

impl TransitionModel for TargetOnly {
    /// (layer, index), with `(n_layers + 1, 0)` as end
    type State = (usize, usize);
    type Weight = LogProb;
    fn successors(&self, &(layer, _): &(usize, usize)) -> Vec<((usize, usize), LogProb)> {
        if layer == self.n_layers {
            vec![((layer + 1, 0), lp(0.0))]
        } else {
            (0..self.width)
                .map(|i| ((layer + 1, i), lp(self.scores[layer][i])))
                .collect()
        }
    }
}

#[test_case(2, 3, 0)]
#[test_case(3, 5, 1)]
#[test_case(5, 8, 2)]
#[test_case(8, 4, 3)]
fn greedy_agrees_with_viterbi_without_ties(width: usize, n_layers: usize, seed: u64) {
    let model = TargetOnly::random(width, n_layers, seed);
    let end = (n_layers + 1, 0);
    let t = Trellis::build(&model, (0, 0), end, n_layers + 1);
    let viterbi = ViterbiDecoder.best_path(&t).unwrap();
    let greedy = GreedyDecoder.best_path(&t).unwrap();
    assert_eq!(viterbi, greedy);
    assert_eq!(viterbi.len(), n_layers + 2);
    let (path, by) = FallbackDecoder::new(never::<(usize, usize)>).decode(&t).unwrap();
    assert_eq!(path, viterbi);
    assert_eq!(by, DecodedBy::Viterbi);
}

#[test_case(0.9, 0.1 ; "likely path")]
#[test_case(1e-9, 1e-12 ; "unlikely path")]
fn single_path_lattice_is_returned_by_every_decoder(w1: f64, w2: f64) {
    let mut t: Trellis<&str, RawProb> = Trellis::new("S", "E");
    t.push_layer(vec!["a"]);
    t.push_layer(vec!["b"]);
    t.push_layer(vec!["E"]);
    t.set_transition("S", "a", rp(w1));
    t.set_transition("a", "b", rp(w2));
    t.set_transition("b", "E", rp(1.0));
    let expected = vec!["S", "a", "b", "E"];
    assert_eq!(ViterbiDecoder.best_path(&t).unwrap(), expected);
    assert_eq!(GreedyDecoder.best_path(&t).unwrap(), expected);
    assert_eq!(
        FallbackDecoder::new(never::<&str>).best_path(&t).unwrap(),
        expected
    );
}

#[test]
fn path_weight_of_viterbi_path_is_its_score() {
    let model = TargetOnly::random(4, 6, 7);
    let t = Trellis::build(&model, (0, 0), (7, 0), 7);
    let (path, score) = ViterbiDecoder.decode(&t).unwrap();
    let expected: f64 = model
        .scores
        .iter()
        .map(|layer| layer.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
        .sum();
    assert_eq!(t.path_weight(&path), Some(score));
    assert!((score.to_log_value() - expected).abs() < 1e-9);
}
