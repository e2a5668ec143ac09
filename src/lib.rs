pub mod align;
pub mod classify;
pub mod counter;
pub mod decode;
pub mod em;
pub mod embed;
pub mod error;
pub mod io;
pub mod prelude;
pub mod score;
pub mod tagger;
pub mod trellis;
pub mod utils;

#[macro_use]
extern crate approx;
#[macro_use]
extern crate derive_new;
