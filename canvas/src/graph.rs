//! Connection graph: undirected yarn edges between cards.
//!
//! At most one edge exists per unordered pair of card ids; direction is only
//! kept so the document round-trips. Every lookup checks both orientations.
//! Self-loops are rejected.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_YARN_COLOR;
use crate::doc::{ItemId, ItemKind, ItemRef, new_id};

/// A yarn edge as stored in the board document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YarnConnection {
    pub id: ItemId,
    pub from_item_id: ItemId,
    pub to_item_id: ItemId,
    pub from_item_type: ItemKind,
    pub to_item_type: ItemKind,
    /// CSS color of the yarn.
    pub color: String,
}

impl YarnConnection {
    #[must_use]
    pub fn from_ref(&self) -> ItemRef {
        ItemRef::new(self.from_item_type, self.from_item_id.clone())
    }

    #[must_use]
    pub fn to_ref(&self) -> ItemRef {
        ItemRef::new(self.to_item_type, self.to_item_id.clone())
    }

    /// Whether either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.from_item_id == id || self.to_item_id == id
    }

    /// Whether this edge joins `a` and `b`, in either direction.
    #[must_use]
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from_item_id == a && self.to_item_id == b) || (self.from_item_id == b && self.to_item_id == a)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    #[must_use]
    pub fn other_end(&self, id: &str) -> Option<ItemRef> {
        if self.from_item_id == id {
            Some(self.to_ref())
        } else if self.to_item_id == id {
            Some(self.from_ref())
        } else {
            None
        }
    }
}

/// Result of [`ConnectionGraph::toggle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle {
    /// No edge existed; this one was created.
    Added(YarnConnection),
    /// The existing edge between the pair was removed.
    Removed(YarnConnection),
    /// Both endpoints were the same card; nothing changed.
    SelfLoop,
}

/// Ordered list of yarn edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionGraph {
    edges: Vec<YarnConnection>,
}

impl ConnectionGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap edges loaded from a document, keeping their order.
    #[must_use]
    pub fn from_vec(edges: Vec<YarnConnection>) -> Self {
        Self { edges }
    }

    /// [`Self::toggle_with_color`] using the default yarn color.
    pub fn toggle(&mut self, from: &ItemRef, to: &ItemRef) -> Toggle {
        self.toggle_with_color(from, to, DEFAULT_YARN_COLOR)
    }

    /// Remove the edge between `from` and `to` if one exists, otherwise add
    /// one with the given yarn color.
    pub fn toggle_with_color(&mut self, from: &ItemRef, to: &ItemRef, color: &str) -> Toggle {
        if from.id == to.id {
            return Toggle::SelfLoop;
        }

        if let Some(idx) = self.edges.iter().position(|e| e.joins(&from.id, &to.id)) {
            let removed = self.edges.remove(idx);
            debug!("yarn removed: {} ({} <-> {})", removed.id, from.id, to.id);
            return Toggle::Removed(removed);
        }

        let edge = YarnConnection {
            id: new_id("connection"),
            from_item_id: from.id.clone(),
            to_item_id: to.id.clone(),
            from_item_type: from.kind,
            to_item_type: to.kind,
            color: color.to_owned(),
        };
        debug!("yarn added: {} ({} <-> {})", edge.id, from.id, to.id);
        self.edges.push(edge.clone());
        Toggle::Added(edge)
    }

    /// Remove every edge touching `id`, returning the removed edges.
    pub fn remove_referencing(&mut self, id: &str) -> Vec<YarnConnection> {
        self.remove_where(|e| e.touches(id))
    }

    /// Remove every edge matching `pred`, returning the removed edges in order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&YarnConnection) -> bool) -> Vec<YarnConnection> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| pred(e));
        self.edges = kept;
        removed
    }

    /// Whether an edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.find(a, b).is_some()
    }

    /// The edge joining `a` and `b`, if any.
    #[must_use]
    pub fn find(&self, a: &str, b: &str) -> Option<&YarnConnection> {
        self.edges.iter().find(|e| e.joins(a, b))
    }

    /// Cards directly connected to `id`.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<ItemRef> {
        self.edges.iter().filter_map(|e| e.other_end(id)).collect()
    }

    /// Number of edges touching `id`.
    #[must_use]
    pub fn degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YarnConnection> {
        self.edges.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[YarnConnection] {
        &self.edges
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<YarnConnection> {
        self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConnectionGraph {
    type Item = &'a YarnConnection;
    type IntoIter = std::slice::Iter<'a, YarnConnection>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
