//! The stack of matched nodes for the path walked so far.

use crate::error::PatternError;

use super::ast::PatternNode;

/// Matched nodes for one traversal path, root first.
///
/// The walker pushes a node when it descends into a matched key and pops it
/// on the way back up, so the stack never outlives the path it describes.
/// References address it by distance from the end: 0 is the most recent
/// match.
#[derive(Debug, Clone, Default)]
pub struct AncestorContext {
    nodes: Vec<PatternNode>,
}

impl AncestorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: PatternNode) {
        self.nodes.push(node);
    }

    pub fn pop(&mut self) -> Option<PatternNode> {
        self.nodes.pop()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node `distance` levels up from the most recent match.
    pub fn from_end(&self, distance: usize) -> Result<&PatternNode, PatternError> {
        self.nodes
            .len()
            .checked_sub(distance)
            .and_then(|above| above.checked_sub(1))
            .map(|index| &self.nodes[index])
            .ok_or(PatternError::AncestorOutOfRange {
                distance,
                depth: self.nodes.len(),
            })
    }

    /// Iterate root first.
    pub fn iter(&self) -> impl Iterator<Item = &PatternNode> {
        self.nodes.iter()
    }
}

impl FromIterator<PatternNode> for AncestorContext {
    fn from_iter<T: IntoIterator<Item = PatternNode>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
