//! Tokenizer: split a sentence into words and punctuation marks.

use super::token::{Token, TokenSequence};
use crate::error::{Error, Result};

/// Characters that end a word and are emitted as tokens of their own.
const PUNCTUATION: &[char] = &[
    '.', ',', '"', '/', '!', '?', '*', '+', ';', ':', '{', '}', '=', '(', ')', '[', ']',
];

#[inline]
fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Split `sentence` into tokens.
///
/// Words run until a punctuation mark or whitespace. A punctuation mark
/// becomes its own one-character token; whitespace produces nothing but
/// sets the attached-space marker on the token right before it.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty string.
pub fn tokenize(sentence: &str) -> Result<TokenSequence> {
    if sentence.is_empty() {
        return Err(Error::InvalidInput("cannot tokenize an empty sentence".to_string()));
    }

    let mut tokens: Vec<Token> = Vec::new();
    let mut word = String::new();
    // True when the last emitted token ends at the previous character.
    let mut adjacent = false;

    for c in sentence.chars() {
        if c.is_whitespace() {
            if !word.is_empty() {
                tokens.push(Token::spaced(std::mem::take(&mut word)));
            } else if adjacent {
                if let Some(last) = tokens.last_mut() {
                    last.mark_spaced();
                }
            }
            adjacent = false;
        } else if is_punctuation(c) {
            if !word.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut word)));
            }
            tokens.push(Token::new(c.to_string()));
            adjacent = true;
        } else {
            word.push(c);
            adjacent = false;
        }
    }

    if !word.is_empty() {
        tokens.push(Token::new(word));
    }

    Ok(TokenSequence::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(seq: &TokenSequence) -> Vec<&str> {
        seq.iter().map(Token::text).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let seq = tokenize("We're here (in Wilkes-Barre), finally!").unwrap();
        assert_eq!(
            texts(&seq),
            vec!["We're", "here", "(", "in", "Wilkes-Barre", ")", ",", "finally", "!"]
        );
    }

    #[test]
    fn test_space_markers() {
        let seq = tokenize("We're here (in Wilkes-Barre), finally!").unwrap();
        let spaced: Vec<bool> = seq.iter().map(Token::is_spaced).collect();
        assert_eq!(
            spaced,
            vec![true, true, false, true, false, false, true, false, false]
        );
    }

    #[test]
    fn test_round_trip() {
        for sentence in [
            "We're here (in Wilkes-Barre), finally!",
            "The quick brown fox is very cool, supposedly.",
            "a ,b",
            "x=y+z; {done}",
        ] {
            assert_eq!(tokenize(sentence).unwrap().to_plain_string(), sentence);
        }
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        let seq = tokenize("  one   two\tthree ").unwrap();
        assert_eq!(texts(&seq), vec!["one", "two", "three"]);
        assert_eq!(seq.to_plain_string(), "one two three ");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(matches!(tokenize(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_deterministic() {
        let a = tokenize("Same input, same output.").unwrap();
        let b = tokenize("Same input, same output.").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_punctuation() {
        let seq = tokenize("Wait?! \"Yes.\"").unwrap();
        assert_eq!(texts(&seq), vec!["Wait", "?", "!", "\"", "Yes", ".", "\""]);
        assert!(seq[2].is_spaced());
        assert!(!seq[1].is_spaced());
    }
}
