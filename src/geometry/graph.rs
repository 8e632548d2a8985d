//! Node deduplication and frame graph construction
//!
//! Raw line segments are interned into a graph of unique nodes and an ordered
//! edge list. Nodes are identified by a key derived from their converted
//! coordinates; under the default policy two endpoints merge only when their
//! converted coordinates are bit-identical - there is no proximity snapping
//! unless `MergePolicy::Snap` is selected.

use std::collections::HashMap;
use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::LineSegment;

/// Coordinate-derived node identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Derive a key from a converted position
    pub fn from_position(position: &Point3<f64>) -> Self {
        NodeKey(format!("node_{}_{}_{}", position.x, position.y, position.z))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeKey {
    fn from(raw: String) -> Self {
        NodeKey(raw)
    }
}

impl From<&str> for NodeKey {
    fn from(raw: &str) -> Self {
        NodeKey(raw.to_string())
    }
}

/// How endpoint coordinates are matched when deduplicating nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergePolicy {
    /// Merge only bit-identical converted coordinates
    Exact,
    /// Snap coordinates to a tolerance grid before matching; stored positions
    /// are canonicalized the same way
    Snap { tolerance: f64 },
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::Exact
    }
}

impl MergePolicy {
    fn canonical(self, value: f64) -> f64 {
        match self {
            Self::Exact => value,
            Self::Snap { tolerance } => {
                let snapped = (value / tolerance).round() * tolerance;
                // normalize negative zero so -eps and +eps share a key
                if snapped == 0.0 {
                    0.0
                } else {
                    snapped
                }
            }
        }
    }

    fn canonical_point(self, point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            self.canonical(point.x),
            self.canonical(point.y),
            self.canonical(point.z),
        )
    }
}

/// A deduplicated node in the frame graph
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Coordinate-derived identity
    pub key: NodeKey,
    /// Sequence id, 1-based in first-seen order
    pub id: u32,
    /// Position in analysis units (z is the elevation)
    pub position: Point3<f64>,
}

/// An edge between two nodes, referenced by key
///
/// Duplicate input lines yield duplicate edges - edges are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Key of the start node
    pub start: NodeKey,
    /// Key of the end node
    pub end: NodeKey,
}

/// Deduplicated node set plus ordered edge list
#[derive(Debug, Clone, Default)]
pub struct FrameGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeKey, usize>,
    edges: Vec<Edge>,
}

impl FrameGraph {
    /// Build a graph from raw segments
    ///
    /// Each coordinate component is converted by dividing by `units_per_meter`
    /// (e.g. 1000 for millimetre input). Node ids start at 1 and increment in
    /// first-seen order; an edge is appended per segment regardless of whether
    /// either endpoint was newly created.
    pub fn from_segments(
        segments: &[LineSegment],
        units_per_meter: f64,
        policy: MergePolicy,
    ) -> Self {
        let mut graph = FrameGraph::default();

        for segment in segments {
            let start = graph.intern(convert(&segment.start, units_per_meter), policy);
            let end = graph.intern(convert(&segment.end, units_per_meter), policy);
            graph.edges.push(Edge { start, end });
        }

        log::debug!(
            "built frame graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        graph
    }

    fn intern(&mut self, position: Point3<f64>, policy: MergePolicy) -> NodeKey {
        let canonical = policy.canonical_point(&position);
        let key = NodeKey::from_position(&canonical);

        if !self.index.contains_key(&key) {
            let id = self.nodes.len() as u32 + 1;
            self.index.insert(key.clone(), self.nodes.len());
            self.nodes.push(GraphNode {
                key: key.clone(),
                id,
                position: canonical,
            });
        }

        key
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in input order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by key
    pub fn node(&self, key: &NodeKey) -> Option<&GraphNode> {
        self.index.get(key).map(|&i| &self.nodes[i])
    }

    /// Number of unique nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn convert(raw: &[f64; 3], units_per_meter: f64) -> Point3<f64> {
    Point3::new(
        raw[0] / units_per_meter,
        raw[1] / units_per_meter,
        raw[2] / units_per_meter,
    )
}
