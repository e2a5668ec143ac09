//!
//! CounterMap: counters over key pairs `(outer, inner)`
//!
//! Used for conditional distributions `P(inner | outer)` such as
//! translation tables `t[source][target]` and distortion tables.
//!
use super::Counter;
use fnv::FnvHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::hash::Hash;

///
/// Two-level counter.
/// Outer keys keep insertion order like `Counter`.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash + Clone, V: Serialize + Eq + Hash + Clone",
    deserialize = "K: Deserialize<'de> + Eq + Hash + Clone, V: Deserialize<'de> + Eq + Hash + Clone"
))]
#[serde(from = "Vec<(K, Counter<V>)>", into = "Vec<(K, Counter<V>)>")]
pub struct CounterMap<K: Eq + Hash, V: Eq + Hash> {
    index: HashMap<K, usize>,
    counters: Vec<(K, Counter<V>)>,
}

impl<K, V> CounterMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        CounterMap {
            index: HashMap::default(),
            counters: Vec::new(),
        }
    }
    fn counter_mut(&mut self, key: K) -> &mut Counter<V> {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.counters.len();
                self.index.insert(key.clone(), i);
                self.counters.push((key, Counter::new()));
                i
            }
        };
        &mut self.counters[i].1
    }
    ///
    /// Add `amount` to the count of `(key, value)`.
    ///
    pub fn increment(&mut self, key: K, value: V, amount: f64) {
        self.counter_mut(key).increment(value, amount);
    }
    ///
    /// Overwrite the count of `(key, value)`.
    ///
    pub fn set(&mut self, key: K, value: V, count: f64) {
        self.counter_mut(key).set(value, count);
    }
    ///
    /// Count of `(key, value)`, `0.0` if either level is unseen.
    ///
    pub fn get<Q, R>(&self, key: &Q, value: &R) -> f64
    where
        K: Borrow<Q>,
        V: Borrow<R>,
        Q: Eq + Hash + ?Sized,
        R: Eq + Hash + ?Sized,
    {
        match self.counter(key) {
            Some(counter) => counter.get(value),
            None => 0.0,
        }
    }
    /// Inner counter of `key` if it exists.
    pub fn counter<Q>(&self, key: &Q) -> Option<&Counter<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| &self.counters[i].1)
    }
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }
    /// the number of outer keys
    pub fn len(&self) -> usize {
        self.counters.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.counters.iter().map(|(k, _)| k)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Counter<V>)> + '_ {
        self.counters.iter().map(|(k, c)| (k, c))
    }
    /// sum over every `(key, value)`
    pub fn total_count(&self) -> f64 {
        self.counters.iter().map(|(_, c)| c.total()).sum()
    }
    ///
    /// Normalize each inner counter independently, so that for every outer
    /// key the inner values sum to 1 (or are all zero if the outer key had
    /// no mass).
    ///
    pub fn conditional_normalize(&self) -> CounterMap<K, V> {
        CounterMap {
            index: self.index.clone(),
            counters: self
                .counters
                .iter()
                .map(|(k, c)| (k.clone(), c.normalize()))
                .collect(),
        }
    }
    ///
    /// Add every count of `other` into `self`.
    ///
    pub fn merge(&mut self, other: CounterMap<K, V>) {
        for (k, c) in other.counters {
            self.counter_mut(k).merge(c);
        }
    }
}

impl<K, V> Default for CounterMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        CounterMap::new()
    }
}

impl<K, V> From<Vec<(K, Counter<V>)>> for CounterMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn from(counters: Vec<(K, Counter<V>)>) -> Self {
        let mut map = CounterMap::new();
        for (k, c) in counters {
            map.counter_mut(k).merge(c);
        }
        map
    }
}

impl<K, V> From<CounterMap<K, V>> for Vec<(K, Counter<V>)>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn from(map: CounterMap<K, V>) -> Self {
        map.counters
    }
}
