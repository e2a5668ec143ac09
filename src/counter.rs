//!
//! Sparse event counter
//!
//! Mapping from a discrete key to an accumulated real-valued count.
//! Missing keys read as `0.0`.
//!
//! ## Iteration order
//!
//! Keys are kept in insertion order, so every iteration (and therefore every
//! tie-break) is deterministic. `arg_max` returns the *first inserted* key
//! among the keys sharing the maximum value.
//!
pub mod map;

pub use map::CounterMap;

use fnv::FnvHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::hash::Hash;

///
/// Counter of `K`.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash + Clone",
    deserialize = "K: Deserialize<'de> + Eq + Hash + Clone"
))]
#[serde(from = "Vec<(K, f64)>", into = "Vec<(K, f64)>")]
pub struct Counter<K: Eq + Hash> {
    index: HashMap<K, usize>,
    entries: Vec<(K, f64)>,
}

impl<K: Eq + Hash + Clone> Counter<K> {
    /// Empty counter
    pub fn new() -> Self {
        Counter {
            index: HashMap::default(),
            entries: Vec::new(),
        }
    }
    ///
    /// Add `amount` to the count of `key`.
    /// A missing key starts from `0.0`.
    ///
    pub fn increment(&mut self, key: K, amount: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => self.push(key, amount),
        }
    }
    ///
    /// Overwrite the count of `key`.
    ///
    pub fn set(&mut self, key: K, value: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => self.push(key, value),
        }
    }
    fn push(&mut self, key: K, value: f64) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }
    ///
    /// Count of `key`, or `0.0` if it was never seen.
    ///
    pub fn get<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1,
            None => 0.0,
        }
    }
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }
    /// the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// sum of all counts
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
    ///
    /// New counter whose values are divided by their sum.
    ///
    /// If the total is zero the keys are kept and every value becomes `0.0`.
    ///
    pub fn normalize(&self) -> Counter<K> {
        let total = self.total();
        let mut ret = self.clone();
        for (_, v) in ret.entries.iter_mut() {
            *v = if total == 0.0 { 0.0 } else { *v / total };
        }
        ret
    }
    ///
    /// New counter with `ln` applied to every value.
    ///
    pub fn log_transform(&self) -> Counter<K> {
        let mut ret = self.clone();
        for (_, v) in ret.entries.iter_mut() {
            *v = v.ln();
        }
        ret
    }
    ///
    /// Key with the greatest value.
    /// Ties go to the first inserted key.
    ///
    pub fn arg_max(&self) -> Option<&K> {
        self.max().map(|(k, _)| k)
    }
    ///
    /// `(key, value)` of the greatest value, with the `arg_max` tie-break.
    ///
    pub fn max(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (k, v) in self.iter() {
            match best {
                Some((_, b)) if !(v > b) => {}
                _ => best = Some((k, v)),
            }
        }
        best
    }
    ///
    /// Add every count of `other` into `self`.
    /// Keys new to `self` are appended in `other`'s order.
    ///
    pub fn merge(&mut self, other: Counter<K>) {
        for (k, v) in other.entries {
            self.increment(k, v);
        }
    }
}

impl<K: Eq + Hash + Clone> Default for Counter<K> {
    fn default() -> Self {
        Counter::new()
    }
}

impl<K: Eq + Hash + Clone> PartialEq for Counter<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == v)
    }
}

impl<K: Eq + Hash + Clone> std::iter::FromIterator<(K, f64)> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for (k, v) in iter {
            counter.increment(k, v);
        }
        counter
    }
}

impl<K: Eq + Hash + Clone> From<Vec<(K, f64)>> for Counter<K> {
    fn from(entries: Vec<(K, f64)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Eq + Hash + Clone> From<Counter<K>> for Vec<(K, f64)> {
    fn from(counter: Counter<K>) -> Self {
        counter.entries
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Display> std::fmt::Display for Counter<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.4}", k, v)?;
        }
        write!(f, "]")
    }
}
