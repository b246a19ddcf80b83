//! Edit actions and the plans that group them.

use crate::text::{Token, TokenSequence};

/// One per-word operation turning a `from` sentence into a `to` sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// The word survives unchanged; only its position label moves.
    Keep {
        /// Position in the `from` sentence.
        from_index: usize,
        /// Position in the `to` sentence.
        to_index: usize,
        /// The word being kept, as it appears in `from`.
        from_word: Token,
        /// The same word, as it appears in `to`.
        to_word: Token,
    },
    /// The word is replaced in place.
    Substitute {
        /// Position in the `from` sentence.
        from_index: usize,
        /// Position in the `to` sentence.
        to_index: usize,
        /// The word leaving.
        from_word: Token,
        /// The word arriving.
        to_word: Token,
    },
    /// The word disappears.
    Remove {
        /// Position in the `from` sentence.
        from_index: usize,
        /// The word leaving.
        from_word: Token,
    },
    /// A new word appears.
    Insert {
        /// Position in the `to` sentence.
        to_index: usize,
        /// The word arriving.
        to_word: Token,
    },
}

impl EditAction {
    /// Position in the `from` sentence, if this action consumes one.
    pub const fn from_index(&self) -> Option<usize> {
        match self {
            Self::Keep { from_index, .. }
            | Self::Substitute { from_index, .. }
            | Self::Remove { from_index, .. } => Some(*from_index),
            Self::Insert { .. } => None,
        }
    }

    /// Position in the `to` sentence, if this action produces one.
    pub const fn to_index(&self) -> Option<usize> {
        match self {
            Self::Keep { to_index, .. }
            | Self::Substitute { to_index, .. }
            | Self::Insert { to_index, .. } => Some(*to_index),
            Self::Remove { .. } => None,
        }
    }

    /// The word that ends up displayed, if any.
    pub const fn to_word(&self) -> Option<&Token> {
        match self {
            Self::Keep { to_word, .. }
            | Self::Substitute { to_word, .. }
            | Self::Insert { to_word, .. } => Some(to_word),
            Self::Remove { .. } => None,
        }
    }

    /// Unit cost of this action; keeps are free.
    pub const fn cost(&self) -> usize {
        match self {
            Self::Keep { .. } => 0,
            _ => 1,
        }
    }
}

/// The full set of actions transforming one sentence into another.
///
/// Built once by [`plan`](super::plan) and never mutated. The cost always
/// equals the number of substitutions, removals and insertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    from: TokenSequence,
    to: TokenSequence,
    keeps: Vec<EditAction>,
    substitutions: Vec<EditAction>,
    removals: Vec<EditAction>,
    insertions: Vec<EditAction>,
    cost: usize,
}

impl EditPlan {
    /// Source sentence.
    #[inline]
    pub const fn from(&self) -> &TokenSequence {
        &self.from
    }

    /// Destination sentence.
    #[inline]
    pub const fn to(&self) -> &TokenSequence {
        &self.to
    }

    /// Kept words, in discovery order.
    pub fn keeps(&self) -> &[EditAction] {
        &self.keeps
    }

    /// Substituted words, in discovery order.
    pub fn substitutions(&self) -> &[EditAction] {
        &self.substitutions
    }

    /// Removed words, in discovery order.
    pub fn removals(&self) -> &[EditAction] {
        &self.removals
    }

    /// Inserted words, in ascending `to` position.
    pub fn insertions(&self) -> &[EditAction] {
        &self.insertions
    }

    /// Total transition cost.
    #[inline]
    pub const fn cost(&self) -> usize {
        self.cost
    }

    /// All actions: keeps, substitutions, removals, then insertions.
    pub fn actions(&self) -> impl Iterator<Item = &EditAction> {
        self.keeps
            .iter()
            .chain(&self.substitutions)
            .chain(&self.removals)
            .chain(&self.insertions)
    }
}

/// Accumulates actions while the planner walks both sentences.
pub(crate) struct PlanBuilder {
    from: TokenSequence,
    to: TokenSequence,
    keeps: Vec<EditAction>,
    substitutions: Vec<EditAction>,
    removals: Vec<EditAction>,
    insertions: Vec<EditAction>,
}

impl PlanBuilder {
    pub(crate) fn new(from: &TokenSequence, to: &TokenSequence) -> Self {
        Self {
            from: from.clone(),
            to: to.clone(),
            keeps: Vec::new(),
            substitutions: Vec::new(),
            removals: Vec::new(),
            insertions: Vec::new(),
        }
    }

    pub(crate) fn keep(&mut self, from_index: usize, to_index: usize) {
        self.keeps.push(EditAction::Keep {
            from_index,
            to_index,
            from_word: self.from[from_index].clone(),
            to_word: self.to[to_index].clone(),
        });
    }

    pub(crate) fn substitute(&mut self, from_index: usize, to_index: usize) {
        self.substitutions.push(EditAction::Substitute {
            from_index,
            to_index,
            from_word: self.from[from_index].clone(),
            to_word: self.to[to_index].clone(),
        });
    }

    pub(crate) fn remove(&mut self, from_index: usize) {
        self.removals.push(EditAction::Remove {
            from_index,
            from_word: self.from[from_index].clone(),
        });
    }

    pub(crate) fn insert(&mut self, to_index: usize) {
        self.insertions.push(EditAction::Insert {
            to_index,
            to_word: self.to[to_index].clone(),
        });
    }

    pub(crate) fn finish(self) -> EditPlan {
        let cost = self.substitutions.len() + self.removals.len() + self.insertions.len();
        EditPlan {
            from: self.from,
            to: self.to,
            keeps: self.keeps,
            substitutions: self.substitutions,
            removals: self.removals,
            insertions: self.insertions,
            cost,
        }
    }
}
