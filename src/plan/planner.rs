//! Edit planner: greedy word alignment with one step of lookahead.
//!
//! This is not a minimum edit distance. The planner walks both sentences
//! with a cursor pair and decides each mismatch locally, peeking at the
//! next destination word to choose between inserting, removing and
//! substituting. Its tie-breaks are part of the observable output, so the
//! decision tree below must stay exactly as it is.
//!
//! # Probe encoding
//!
//! The lookahead probe answers "where does `to[to_index]` next occur in
//! `from`, starting at `from_index`?" through a single integer:
//!
//! - `0` when `from[from_index]` matches directly
//! - the absolute index of the first later match
//! - `-1` when there is no match
//! - the number of remaining `from` tokens when `to` is already exhausted
//!
//! `0` is relative while other hits are absolute. Comparisons against the
//! probe therefore mix the two, which shows up in the tie test below.

use super::action::{EditPlan, PlanBuilder};
use crate::text::{Token, TokenSequence};

const NOT_FOUND: isize = -1;

#[allow(clippy::cast_possible_wrap)]
#[inline]
const fn signed(index: usize) -> isize {
    index as isize
}

/// First index at or after `start` where `from` holds `word`.
fn find_from(from: &TokenSequence, word: &Token, start: usize) -> Option<usize> {
    from.as_slice()[start..]
        .iter()
        .position(|token| token == word)
        .map(|offset| start + offset)
}

/// Side-effect free lookahead at `(from_index, to_index)`.
fn probe(from: &TokenSequence, to: &TokenSequence, from_index: usize, to_index: usize) -> isize {
    if from_index >= from.len() {
        return signed(to.len().saturating_sub(to_index));
    }
    if to_index >= to.len() {
        return signed(from.len() - from_index);
    }
    if from[from_index] == to[to_index] {
        return 0;
    }
    find_from(from, &to[to_index], from_index).map_or(NOT_FOUND, signed)
}

/// Compute the edit plan turning `from` into `to`.
///
/// Every `from` position ends up in exactly one keep, substitution or
/// removal; every `to` position in exactly one keep, substitution or
/// insertion.
pub fn plan(from: &TokenSequence, to: &TokenSequence) -> EditPlan {
    let mut builder = PlanBuilder::new(from, to);
    let from_len = from.len();
    let to_len = to.len();
    let mut fi = 0;
    let mut ti = 0;

    loop {
        if fi >= from_len {
            for index in ti..to_len {
                builder.insert(index);
            }
            break;
        }
        if ti >= to_len {
            for index in fi..from_len {
                builder.remove(index);
            }
            break;
        }

        if from[fi] == to[ti] {
            builder.keep(fi, ti);
            fi += 1;
            ti += 1;
            continue;
        }

        let found = find_from(from, &to[ti], fi);

        if fi == from_len - 1 && found.is_none() {
            builder.substitute(fi, ti);
            fi += 1;
            ti += 1;
            continue;
        }

        let future = probe(from, to, fi, ti + 1);

        match found {
            None => {
                if future == 0 {
                    // The next destination word lines up with the current
                    // source word: open a gap for this one.
                    builder.insert(ti);
                    ti += 1;
                } else {
                    builder.substitute(fi, ti);
                    fi += 1;
                    ti += 1;
                }
            }
            Some(found) => {
                let found_at = signed(found);
                let tie = (found == fi + 1 && future == signed(fi)) || found_at == future;

                if tie {
                    if from_len - fi > to_len - ti {
                        builder.insert(ti);
                        ti += 1;
                    } else {
                        builder.remove(fi);
                        fi += 1;
                    }
                } else if found_at > future && future != NOT_FOUND {
                    builder.substitute(fi, ti);
                    fi += 1;
                    ti += 1;
                } else {
                    for index in fi..found {
                        builder.remove(index);
                    }
                    builder.keep(found, ti);
                    fi = found + 1;
                    ti += 1;
                }
            }
        }
    }

    builder.finish()
}
