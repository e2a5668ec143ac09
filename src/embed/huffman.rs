//!
//! Huffman coding of a vocabulary
//!
//! Frequent words get short codes. For a vocabulary of `V` words the tree
//! has `V - 1` inner nodes, numbered `0..V-1`; `points` of a word lists the
//! inner nodes on its root-to-leaf path and `code` the branch taken at each.
//!
use crate::counter::Counter;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

///
/// Leaf of the Huffman tree.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanNode {
    pub word: String,
    /// vocabulary index (rows of the input matrix)
    pub index: usize,
    pub count: usize,
    /// branch bits from the root
    pub code: Vec<u8>,
    /// inner nodes from the root, parallel to `code`
    pub points: Vec<usize>,
}

///
/// Code every word of `counts`.
///
/// Words are indexed by decreasing count, ties in first-seen order.
///
pub fn huffman_coding(counts: &Counter<String>) -> Vec<HuffmanNode> {
    let mut words: Vec<(&String, usize)> = counts.iter().map(|(w, c)| (w, c.round() as usize)).collect();
    // stable: equal counts keep insertion order
    words.sort_by_key(|&(_, c)| Reverse(c));
    let n = words.len();
    if n == 0 {
        return Vec::new();
    }

    // nodes 0..n are leaves, n..2n-1 inner nodes
    let mut parent = vec![0usize; 2 * n - 1];
    let mut branch = vec![0u8; 2 * n - 1];
    let mut heap: BinaryHeap<Reverse<(usize, usize)>> = words
        .iter()
        .enumerate()
        .map(|(i, &(_, c))| Reverse((c, i)))
        .collect();
    let mut next = n;
    while let (Some(Reverse((c1, a))), Some(Reverse((c2, b)))) = (heap.pop(), heap.pop()) {
        parent[a] = next;
        parent[b] = next;
        branch[b] = 1;
        heap.push(Reverse((c1 + c2, next)));
        next += 1;
    }
    let root = 2 * n - 2;

    words
        .iter()
        .enumerate()
        .map(|(i, &(word, count))| {
            let mut code = Vec::new();
            let mut points = Vec::new();
            let mut node = i;
            while node != root {
                code.push(branch[node]);
                node = parent[node];
                points.push(node - n);
            }
            code.reverse();
            points.reverse();
            HuffmanNode {
                word: word.clone(),
                index: i,
                count,
                code,
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(xs: &[(&str, f64)]) -> Counter<String> {
        xs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn huffman_frequent_words_are_shorter() {
        let nodes = huffman_coding(&counts(&[("b", 2.0), ("a", 10.0), ("c", 1.0), ("d", 1.0)]));
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].word, "a");
        assert_eq!(nodes[0].index, 0);
        assert_eq!(nodes[0].code.len(), 1);
        assert_eq!(nodes[3].code.len(), 3);
        for node in nodes.iter() {
            assert_eq!(node.code.len(), node.points.len());
            // the root is the last inner node
            assert_eq!(node.points[0], 2);
            assert!(node.points.iter().all(|&p| p < 3));
        }
    }
    #[test]
    fn huffman_codes_are_prefix_free() {
        let nodes = huffman_coding(&counts(&[("a", 5.0), ("b", 4.0), ("c", 3.0), ("d", 2.0), ("e", 1.0)]));
        for x in nodes.iter() {
            for y in nodes.iter() {
                if x.word != y.word {
                    assert!(!y.code.starts_with(&x.code));
                }
            }
        }
    }
    #[test]
    fn huffman_single_word() {
        let nodes = huffman_coding(&counts(&[("a", 3.0)]));
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].code.is_empty());
        assert!(huffman_coding(&Counter::new()).is_empty());
    }
}
