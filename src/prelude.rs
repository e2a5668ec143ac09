//!
//! globally-available parts
//!
pub use crate::align::{Alignment, SentencePair, WordAligner};
pub use crate::counter::{Counter, CounterMap};
pub use crate::decode::{FallbackDecoder, GreedyDecoder, TrellisDecoder, ViterbiDecoder};
pub use crate::error::{Error, Result};
pub use crate::score::{lp, rp, LogProb, RawProb, Weight};
pub use crate::tagger::{PosTagger, TagState, TaggedSentence};
pub use crate::trellis::{TransitionModel, Trellis};
