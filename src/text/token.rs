//! Token and TokenSequence: the unit of word-level animation.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Non-breaking space appended to tokens that were followed by a space.
///
/// Word elements are laid out side by side, so ordinary whitespace between
/// them would collapse. Carrying the space inside the token keeps the gap.
pub const ATTACHED_SPACE: char = '\u{a0}';

/// A single word or punctuation mark.
///
/// Two tokens are equal only if both the text and the attached-space marker
/// match, so `"very"` at the end of a clause differs from `"very "` in the
/// middle of one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    spaced: bool,
}

impl Token {
    /// Create a token without the attached-space marker.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spaced: false,
        }
    }

    /// Create a token that was followed by a space in the source text.
    pub fn spaced(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spaced: true,
        }
    }

    /// The word or punctuation mark, without the marker.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the token carries the attached-space marker.
    #[inline]
    pub const fn is_spaced(&self) -> bool {
        self.spaced
    }

    /// The text as displayed, with the marker appended when present.
    pub fn display(&self) -> String {
        let mut out = self.text.clone();
        if self.spaced {
            out.push(ATTACHED_SPACE);
        }
        out
    }

    pub(crate) fn mark_spaced(&mut self) {
        self.spaced = true;
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spaced {
            write!(f, "{:?}+sp", self.text)
        } else {
            write!(f, "{:?}", self.text)
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// An immutable, cheaply clonable sentence.
///
/// Plans hold both of their endpoint sentences, and a tour over N sentences
/// references each of them twice, so the tokens live behind an `Arc`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TokenSequence {
    tokens: Arc<[Token]>,
}

impl TokenSequence {
    /// Wrap an ordered list of tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// The empty sentence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The tokens as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Rebuild readable text: tokens concatenated, with a single space
    /// wherever the attached-space marker was set.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        for token in self.iter() {
            out.push_str(token.text());
            if token.is_spaced() {
                out.push(' ');
            }
        }
        out
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
