//!
//! Transition weight algebra
//!
//! Every trellis is parameterized by a weight type implementing `Weight`,
//! a max-times semiring: paths are scored by `times` along the edges and
//! compared with `PartialOrd`.
//!
//! * `LogProb` stores `log p` and multiplies by adding logs.
//!   Used by the tagger and the classifier.
//! * `RawProb` stores `p` directly and multiplies raw values.
//!   Used by the HMM aligner, whose edge scores are not normalized.
//!
//! The two are deliberately separate types so a model cannot silently mix
//! log-space and raw-space scores on one trellis.
//!
use approx::AbsDiffEq;
use std::fmt::Debug;

///
/// Path weight for trellis decoding.
///
pub trait Weight: Copy + PartialOrd + Debug + Send + Sync {
    /// Identity of `times`; weight of the empty path.
    fn one() -> Self;
    /// Absorbing element of `times`; weight of an impossible path.
    fn zero() -> Self;
    /// Extend a path weight by an edge weight.
    fn times(self, other: Self) -> Self;
    fn is_zero(self) -> bool;
}

///
/// Log probability `log p` (`-inf` is `p = 0`)
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LogProb(f64);

///
/// short-hand of `LogProb::from_log_prob`
///
pub fn lp(log_value: f64) -> LogProb {
    LogProb::from_log_prob(log_value)
}

///
/// short-hand of `RawProb::new`
///
pub fn rp(value: f64) -> RawProb {
    RawProb::new(value)
}

impl LogProb {
    pub fn from_prob(value: f64) -> LogProb {
        LogProb(value.ln())
    }
    pub fn from_log_prob(log_value: f64) -> LogProb {
        LogProb(log_value)
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0.exp()
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    /// prob=0.0
    pub fn zero() -> LogProb {
        LogProb(f64::NEG_INFINITY)
    }
    /// prob=1.0
    pub fn one() -> LogProb {
        LogProb(0.0)
    }
}

impl Weight for LogProb {
    fn one() -> Self {
        LogProb::one()
    }
    fn zero() -> Self {
        LogProb::zero()
    }
    fn times(self, other: Self) -> Self {
        self * other
    }
    fn is_zero(self) -> bool {
        LogProb::is_zero(self)
    }
}

/// p=0 (LogProb(-inf)) as a default value
impl Default for LogProb {
    fn default() -> Self {
        LogProb::zero()
    }
}

impl num_traits::One for LogProb {
    fn one() -> Self {
        LogProb::one()
    }
}

impl num_traits::Zero for LogProb {
    fn zero() -> Self {
        LogProb::zero()
    }
    fn is_zero(&self) -> bool {
        LogProb::is_zero(*self)
    }
}

impl std::fmt::Display for LogProb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.4})", self.0, self.to_value())
    }
}

/// Addition of two probabilities `px + py` in log space
///
/// If `px > py`:
///
/// ```text
/// log(exp(x) + exp(y))
///  = x + log(1 + exp(y-x))
/// ```
impl std::ops::Add for LogProb {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let (x, y) = if self.0 >= other.0 {
            (self.0, other.0)
        } else {
            (other.0, self.0)
        };
        if y == f64::NEG_INFINITY {
            LogProb(x)
        } else {
            LogProb(x + (y - x).exp().ln_1p())
        }
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for LogProb {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        LogProb(self.0 + other.0)
    }
}

impl std::ops::MulAssign for LogProb {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::iter::Product for LogProb {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogProb::one(), |a, b| a * b)
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for LogProb {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (self.is_zero() && other.is_zero()) || f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

///
/// Raw non-negative score `p`, multiplied directly.
///
/// Values are not required to be `<= 1`.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RawProb(f64);

impl RawProb {
    pub fn new(value: f64) -> RawProb {
        RawProb(value)
    }
    pub fn to_value(self) -> f64 {
        self.0
    }
    pub fn zero() -> RawProb {
        RawProb(0.0)
    }
    pub fn one() -> RawProb {
        RawProb(1.0)
    }
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
    /// `p^exponent`
    pub fn powf(self, exponent: f64) -> RawProb {
        RawProb(self.0.powf(exponent))
    }
}

impl Weight for RawProb {
    fn one() -> Self {
        RawProb::one()
    }
    fn zero() -> Self {
        RawProb::zero()
    }
    fn times(self, other: Self) -> Self {
        self * other
    }
    fn is_zero(self) -> bool {
        RawProb::is_zero(self)
    }
}

impl Default for RawProb {
    fn default() -> Self {
        RawProb::zero()
    }
}

impl num_traits::One for RawProb {
    fn one() -> Self {
        RawProb::one()
    }
}

impl num_traits::Zero for RawProb {
    fn zero() -> Self {
        RawProb::zero()
    }
    fn is_zero(&self) -> bool {
        RawProb::is_zero(*self)
    }
}

impl std::fmt::Display for RawProb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl std::ops::Add for RawProb {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        RawProb(self.0 + other.0)
    }
}

impl std::ops::Mul for RawProb {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        RawProb(self.0 * other.0)
    }
}

impl std::iter::Product for RawProb {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(RawProb::one(), |a, b| a * b)
    }
}

impl AbsDiffEq for RawProb {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_prob_mul_is_log_add() {
        let x = LogProb::from_prob(0.5);
        let y = LogProb::from_prob(0.2);
        assert_abs_diff_eq!((x * y).to_value(), 0.1, epsilon = 1e-12);
        assert_eq!(x * LogProb::one(), x);
        assert!((x * LogProb::zero()).is_zero());
    }
    #[test]
    fn log_prob_add_is_logaddexp() {
        let x = LogProb::from_prob(0.3);
        assert_abs_diff_eq!((x + x).to_value(), 0.6, epsilon = 1e-12);
        assert_eq!(x + LogProb::zero(), x);
        assert!((LogProb::zero() + LogProb::zero()).is_zero());
    }
    #[test]
    fn log_prob_product() {
        let xs = vec![lp(-1.0), lp(-2.0), lp(-0.5)];
        let x: LogProb = xs.into_iter().product();
        assert_abs_diff_eq!(x.to_log_value(), -3.5);
        let empty: Vec<LogProb> = vec![];
        assert!(empty.into_iter().product::<LogProb>().is_one());
    }
    #[test]
    fn log_prob_order() {
        assert!(lp(-0.1) > lp(-0.2));
        assert!(LogProb::zero() < lp(-1000.0));
        assert!(LogProb::one() > LogProb::from_prob(0.99));
    }
    #[test]
    fn raw_prob_times() {
        let x = rp(0.5);
        let y = rp(3.0);
        assert_abs_diff_eq!(x.times(y), rp(1.5));
        assert_eq!(x.times(RawProb::one()), x);
        assert!(x.times(RawProb::zero()).is_zero());
        assert_abs_diff_eq!(rp(4.0).powf(0.5), rp(2.0));
    }
    #[test]
    fn weight_trait_generic() {
        fn path<W: Weight>(ws: &[W]) -> W {
            ws.iter().fold(W::one(), |a, &b| a.times(b))
        }
        assert_abs_diff_eq!(path(&[lp(-1.0), lp(-1.0)]), lp(-2.0));
        assert_abs_diff_eq!(path(&[rp(2.0), rp(0.25)]), rp(0.5));
        assert!(<LogProb as Weight>::zero().is_zero());
        assert!(<RawProb as Weight>::zero().is_zero());
    }
}
