//! Index-addressed label registry.
//!
//! Every displayed word element carries position labels. While a plan is
//! in flight an element is found either by its position in the sentence
//! being left (`Source`) or in the sentence being built (`Dest`). The
//! registry maps each label to exactly one element handle.

use super::ElementId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Which sentence a position label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Position in the sentence being transitioned away from.
    Source,
    /// Position in the sentence being transitioned to.
    Dest,
}

/// A namespaced word position label.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WordLabel {
    namespace: Arc<str>,
    side: Side,
    index: usize,
}

impl WordLabel {
    /// Label for position `index` in the source sentence.
    pub fn source(namespace: &Arc<str>, index: usize) -> Self {
        Self {
            namespace: Arc::clone(namespace),
            side: Side::Source,
            index,
        }
    }

    /// Label for position `index` in the destination sentence.
    pub fn dest(namespace: &Arc<str>, index: usize) -> Self {
        Self {
            namespace: Arc::clone(namespace),
            side: Side::Dest,
            index,
        }
    }

    /// Namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Which sentence the position refers to.
    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Word position.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for WordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Source => "from",
            Side::Dest => "to",
        };
        write!(f, "{}-{}-{}", self.namespace, side, self.index)
    }
}

impl fmt::Debug for WordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordLabel({self})")
    }
}

/// Bidirectional label ↔ element map.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    by_label: HashMap<WordLabel, ElementId>,
    by_element: HashMap<ElementId, Vec<WordLabel>>,
}

impl LabelRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `label` to `element`, returning the element that held it.
    pub fn assign(&mut self, label: WordLabel, element: ElementId) -> Option<ElementId> {
        let previous = self.by_label.insert(label.clone(), element);
        if let Some(old) = previous {
            self.unlink(old, &label);
        }
        self.by_element.entry(element).or_default().push(label);
        previous
    }

    /// Remove `label`, returning the element that held it.
    pub fn release(&mut self, label: &WordLabel) -> Option<ElementId> {
        let element = self.by_label.remove(label)?;
        self.unlink(element, label);
        Some(element)
    }

    /// Element currently holding `label`.
    pub fn resolve(&self, label: &WordLabel) -> Option<ElementId> {
        self.by_label.get(label).copied()
    }

    /// Labels held by `element`.
    pub fn labels_of(&self, element: ElementId) -> &[WordLabel] {
        self.by_element.get(&element).map_or(&[], Vec::as_slice)
    }

    /// Drop every label held by `element`.
    pub fn forget(&mut self, element: ElementId) {
        if let Some(labels) = self.by_element.remove(&element) {
            for label in labels {
                self.by_label.remove(&label);
            }
        }
    }

    /// Turn every `Dest` label of `namespace` into the `Source` label with
    /// the same index.
    ///
    /// Run before each plan so that positions assigned by the previous plan
    /// become the positions the next plan reads from. Any element still
    /// holding a stale `Source` label at one of those indices loses it.
    pub fn sweep(&mut self, namespace: &str) {
        let moving: Vec<(WordLabel, ElementId)> = self
            .by_label
            .iter()
            .filter(|(label, _)| label.side == Side::Dest && &*label.namespace == namespace)
            .map(|(label, element)| (label.clone(), *element))
            .collect();

        for (label, _) in &moving {
            self.release(label);
        }
        for (label, element) in moving {
            let source = WordLabel {
                side: Side::Source,
                ..label
            };
            self.assign(source, element);
        }
    }

    /// Number of labels in use.
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Whether no labels are in use.
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    fn unlink(&mut self, element: ElementId, label: &WordLabel) {
        if let Some(labels) = self.by_element.get_mut(&element) {
            labels.retain(|held| held != label);
            if labels.is_empty() {
                self.by_element.remove(&element);
            }
        }
    }
}
