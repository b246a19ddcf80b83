//! Text module: sentences as sequences of word and punctuation tokens.
//!
//! - [`Token`]: a word or single punctuation mark, optionally carrying the
//!   attached-space marker
//! - [`TokenSequence`]: an immutable tokenized sentence
//! - [`tokenize`]: the splitter

mod token;
mod tokenizer;

pub use token::{Token, TokenSequence, ATTACHED_SPACE};
pub use tokenizer::tokenize;
