//!
//! Sentence pairs and word alignments
//!
use fnv::FnvHashSet as HashSet;
use serde::{Deserialize, Serialize};

///
/// Parallel sentence. `id` is used to look up the reference alignment.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub id: usize,
    pub english: Vec<String>,
    pub french: Vec<String>,
}

impl SentencePair {
    pub fn new(id: usize, english: Vec<String>, french: Vec<String>) -> Self {
        SentencePair {
            id,
            english,
            french,
        }
    }
    ///
    /// Sentence pair from whitespace separated sentences.
    ///
    /// ```
    /// use statnlp::align::SentencePair;
    /// let p = SentencePair::from_strs(3, "the cat", "le chat");
    /// assert_eq!(p.french, vec!["le", "chat"]);
    /// ```
    pub fn from_strs(id: usize, english: &str, french: &str) -> Self {
        SentencePair::new(
            id,
            english.split_whitespace().map(String::from).collect(),
            french.split_whitespace().map(String::from).collect(),
        )
    }
}

impl std::fmt::Display for SentencePair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, word) in self.english.iter().enumerate() {
            write!(f, "{}:{} ", i, word)?;
        }
        writeln!(f)?;
        for (j, word) in self.french.iter().enumerate() {
            write!(f, "{}:{} ", j, word)?;
        }
        writeln!(f)
    }
}

///
/// Link of a french position to an english position, or to null (`None`).
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub english: Option<usize>,
    pub french: usize,
}

impl Link {
    pub fn new(english: Option<usize>, french: usize) -> Self {
        Link { english, french }
    }
    pub fn null(french: usize) -> Self {
        Link {
            english: None,
            french,
        }
    }
}

/// `english-french`, null is `-1`
impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.english {
            Some(e) => write!(f, "{}-{}", e, self.french),
            None => write!(f, "-1-{}", self.french),
        }
    }
}

///
/// Word alignment of one sentence pair.
///
/// Proposed alignments only hold sure links. Reference alignments also hold
/// possible links; every sure link is possible too.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alignment {
    sure: HashSet<Link>,
    possible: HashSet<Link>,
}

impl Alignment {
    pub fn new() -> Self {
        Alignment::default()
    }
    pub fn add_link(&mut self, english: Option<usize>, french: usize, sure: bool) {
        let link = Link::new(english, french);
        if sure {
            self.sure.insert(link);
        }
        self.possible.insert(link);
    }
    pub fn contains_sure(&self, english: usize, french: usize) -> bool {
        self.sure.contains(&Link::new(Some(english), french))
    }
    pub fn contains_possible(&self, english: usize, french: usize) -> bool {
        self.possible.contains(&Link::new(Some(english), french))
    }
    ///
    /// Sure links sorted by `(english, french)`, null links first.
    ///
    pub fn links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.sure.iter().copied().collect();
        links.sort();
        links
    }
    ///
    /// Sure links to real english words as `(english, french)`, sorted.
    ///
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.links()
            .into_iter()
            .filter_map(|link| link.english.map(|e| (e, link.french)))
            .collect()
    }
    /// number of sure links
    pub fn len(&self) -> usize {
        self.sure.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sure.is_empty()
    }
    ///
    /// Grid of `proposed` over `reference`.
    ///
    /// One row per french word. `[ ]` is a sure reference link, `( )` a
    /// possible one, and `#` marks a proposed link. English words are
    /// printed vertically below the grid.
    ///
    pub fn render(reference: &Alignment, proposed: &Alignment, pair: &SentencePair) -> String {
        let mut s = String::new();
        for (j, french) in pair.french.iter().enumerate() {
            for i in 0..pair.english.len() {
                let mark = if proposed.contains_sure(i, j) { '#' } else { ' ' };
                if reference.contains_sure(i, j) {
                    s.push('[');
                    s.push(mark);
                    s.push(']');
                } else if reference.contains_possible(i, j) {
                    s.push('(');
                    s.push(mark);
                    s.push(')');
                } else {
                    s.push(' ');
                    s.push(mark);
                    s.push(' ');
                }
            }
            s.push_str("| ");
            s.push_str(french);
            s.push('\n');
        }
        s.push_str(&"---".repeat(pair.english.len()));
        s.push_str("'\n");
        let english: Vec<Vec<char>> = pair.english.iter().map(|w| w.chars().collect()).collect();
        let height = english.iter().map(|w| w.len()).max().unwrap_or(0);
        for index in 0..height {
            for word in english.iter() {
                match word.get(index) {
                    Some(c) => {
                        s.push(' ');
                        s.push(*c);
                        s.push(' ');
                    }
                    None => s.push_str("   "),
                }
            }
            s.push('\n');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_sure_is_possible() {
        let mut a = Alignment::new();
        a.add_link(Some(0), 1, true);
        a.add_link(Some(1), 1, false);
        a.add_link(None, 0, true);
        assert!(a.contains_sure(0, 1));
        assert!(a.contains_possible(0, 1));
        assert!(!a.contains_sure(1, 1));
        assert!(a.contains_possible(1, 1));
        assert_eq!(a.links(), vec![Link::null(0), Link::new(Some(0), 1)]);
        assert_eq!(a.pairs(), vec![(0, 1)]);
        assert_eq!(a.len(), 2);
    }
    #[test]
    fn link_display() {
        assert_eq!(Link::new(Some(2), 3).to_string(), "2-3");
        assert_eq!(Link::null(3).to_string(), "-1-3");
    }
    #[test]
    fn render_grid() {
        let pair = SentencePair::from_strs(0, "a bc", "x y");
        let mut reference = Alignment::new();
        reference.add_link(Some(0), 0, true);
        reference.add_link(Some(1), 1, false);
        let mut proposed = Alignment::new();
        proposed.add_link(Some(0), 0, true);
        proposed.add_link(Some(0), 1, true);
        let s = Alignment::render(&reference, &proposed, &pair);
        let expected = "[#]   | x\n # ( )| y\n------'\n a  b \n    c \n";
        assert_eq!(s, expected);
    }
}
