//! Frame model - solver-ready node, element and load tables
//!
//! The model is rebuilt from scratch for every analysis request; nothing here
//! is cached between runs.

use std::collections::BTreeMap;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::geometry::{FrameGraph, NodeKey};

/// Structural section constants shared by every element
///
/// These are fixed application constants, not derived from the input
/// geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Cross-sectional area
    pub area: f64,
    /// Young's modulus
    pub elastic_modulus: f64,
    /// Shear modulus
    pub shear_modulus: f64,
    /// Torsional moment of inertia
    pub torsional_constant: f64,
    /// Second moment of area about the local y-axis
    pub inertia_y: f64,
    /// Second moment of area about the local z-axis
    pub inertia_z: f64,
    /// Element mass per unit length (lumped mass formulation)
    pub mass_per_length: f64,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            area: 50.0,
            elastic_modulus: 29500.0,
            shear_modulus: 1000.0,
            torsional_constant: 1000.0,
            inertia_y: 2150.0,
            inertia_z: 2150.0,
            mass_per_length: 0.0,
        }
    }
}

/// Geometric transformation class of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberClass {
    /// Vertical or inclined member
    Column,
    /// Horizontal member (both endpoints at the same elevation)
    Beam,
}

impl MemberClass {
    /// Classify a member from its endpoint elevations
    ///
    /// The comparison is exact, matching the node deduplication contract.
    pub fn classify(start_elevation: f64, end_elevation: f64) -> Self {
        if start_elevation == end_elevation {
            Self::Beam
        } else {
            Self::Column
        }
    }

    /// Transformation tag declared to the solver
    pub fn transform_tag(self) -> u32 {
        match self {
            Self::Column => 1,
            Self::Beam => 2,
        }
    }

    /// Local xz orientation vector for the transformation
    pub fn xz_vector(self) -> [f64; 3] {
        match self {
            Self::Column => [1.0, 0.0, 0.0],
            Self::Beam => [0.0, 0.0, 1.0],
        }
    }
}

/// Direction of a user point load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    X,
    Y,
    Z,
}

impl LoadDirection {
    /// Expand a signed magnitude into a 6-component nodal force vector
    ///
    /// The z contribution is applied with inverted sign relative to x/y:
    /// a positive z magnitude loads the node downward.
    pub fn force_vector(self, magnitude: f64) -> [f64; 6] {
        match self {
            Self::X => [magnitude, 0.0, 0.0, 0.0, 0.0, 0.0],
            Self::Y => [0.0, magnitude, 0.0, 0.0, 0.0, 0.0],
            Self::Z => [0.0, 0.0, -magnitude, 0.0, 0.0, 0.0],
        }
    }
}

/// One row of the user's load table
///
/// Rows arrive from the input boundary partially filled; a row missing any
/// field is skipped during model building.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadEntry {
    /// Signed load magnitude
    pub magnitude: Option<f64>,
    /// Load direction
    pub direction: Option<LoadDirection>,
    /// Key of the target node, as handed back by a 3D pick
    pub node: Option<String>,
}

impl LoadEntry {
    /// Create a complete load row
    pub fn force(magnitude: f64, direction: LoadDirection, node: &str) -> Self {
        Self {
            magnitude: Some(magnitude),
            direction: Some(direction),
            node: Some(node.to_string()),
        }
    }

    fn complete(&self) -> Option<(f64, LoadDirection, &str)> {
        match (self.magnitude, self.direction, self.node.as_deref()) {
            (Some(magnitude), Some(direction), Some(node)) => {
                Some((magnitude, direction, node))
            }
            _ => None,
        }
    }
}

/// A node in the solver model
#[derive(Debug, Clone)]
pub struct ModelNode {
    /// Sequence id, 1-based
    pub id: u32,
    /// Coordinate-derived identity
    pub key: NodeKey,
    /// Position in analysis units
    pub position: Point3<f64>,
    /// Fully restrained in all six degrees of freedom
    pub fixed: bool,
}

/// A frame element in the solver model
#[derive(Debug, Clone)]
pub struct ModelElement {
    /// Element id, 1-based in input order
    pub id: u32,
    /// Start node id
    pub start: u32,
    /// End node id
    pub end: u32,
    /// Transformation class
    pub class: MemberClass,
}

/// Accumulated nodal force vector
#[derive(Debug, Clone, Copy)]
pub struct AppliedLoad {
    /// Target node id
    pub node: u32,
    /// Force components [FX, FY, FZ, MX, MY, MZ]
    pub components: [f64; 6],
}

/// Solver-ready frame model
#[derive(Debug, Clone)]
pub struct FrameModel {
    /// Node table in id order
    pub nodes: Vec<ModelNode>,
    /// Element table in input order
    pub elements: Vec<ModelElement>,
    /// Per-node accumulated loads, in node id order
    pub loads: Vec<AppliedLoad>,
    /// Section constants shared by every element
    pub section: SectionProperties,
}

impl FrameModel {
    /// Build a model from a frame graph and the user's load table
    pub fn from_graph(graph: &FrameGraph, loads: &[LoadEntry]) -> FrameResult<Self> {
        Self::with_section(graph, loads, SectionProperties::default())
    }

    /// Build a model with explicit section constants
    pub fn with_section(
        graph: &FrameGraph,
        loads: &[LoadEntry],
        section: SectionProperties,
    ) -> FrameResult<Self> {
        let nodes: Vec<ModelNode> = graph
            .nodes()
            .iter()
            .map(|node| ModelNode {
                id: node.id,
                key: node.key.clone(),
                position: node.position,
                // ground-floor nodes are the columns' base supports
                fixed: node.position.z == 0.0,
            })
            .collect();

        let elements: Vec<ModelElement> = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let start = graph.node(&edge.start).unwrap();
                let end = graph.node(&edge.end).unwrap();
                ModelElement {
                    id: i as u32 + 1,
                    start: start.id,
                    end: end.id,
                    class: MemberClass::classify(start.position.z, end.position.z),
                }
            })
            .collect();

        let loads = accumulate_loads(graph, loads)?;

        Ok(Self {
            nodes,
            elements,
            loads,
            section,
        })
    }

    /// Look up a node by id
    pub fn node(&self, id: u32) -> Option<&ModelNode> {
        self.nodes.get(id.checked_sub(1)? as usize)
    }

    /// Look up a node by key
    pub fn node_by_key(&self, key: &NodeKey) -> Option<&ModelNode> {
        self.nodes.iter().find(|node| &node.key == key)
    }
}

/// Translate user load rows into per-node force vectors
///
/// Incomplete rows are skipped; a complete row targeting an unknown node is a
/// validation error carrying the row's 1-based index. Multiple rows on the
/// same node accumulate.
fn accumulate_loads(graph: &FrameGraph, entries: &[LoadEntry]) -> FrameResult<Vec<AppliedLoad>> {
    let mut per_node: BTreeMap<u32, [f64; 6]> = BTreeMap::new();

    for (i, entry) in entries.iter().enumerate() {
        let index = i + 1;
        let Some((magnitude, direction, key)) = entry.complete() else {
            log::debug!("load {index} is incomplete, skipping");
            continue;
        };

        let node = graph
            .node(&NodeKey::from(key))
            .ok_or_else(|| FrameError::LoadTargetNotFound {
                index,
                key: key.to_string(),
            })?;

        let components = direction.force_vector(magnitude);
        let total = per_node.entry(node.id).or_insert([0.0; 6]);
        for (slot, component) in total.iter_mut().zip(components) {
            *slot += component;
        }
    }

    Ok(per_node
        .into_iter()
        .map(|(node, components)| AppliedLoad { node, components })
        .collect())
}
