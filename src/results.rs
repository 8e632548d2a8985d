//! Displacement results returned by the solver boundary

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Translational displacement of a single node, in analysis units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Node id
    pub node: u32,
    /// Displacement along x
    pub ux: f64,
    /// Displacement along y
    pub uy: f64,
    /// Displacement along z
    pub uz: f64,
}

impl NodeDisplacement {
    /// Create a displacement record
    pub fn new(node: u32, ux: f64, uy: f64, uz: f64) -> Self {
        Self { node, ux, uy, uz }
    }

    /// Euclidean displacement magnitude
    pub fn magnitude(&self) -> f64 {
        (self.ux.powi(2) + self.uy.powi(2) + self.uz.powi(2)).sqrt()
    }

    /// Displacement as a vector
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.ux, self.uy, self.uz)
    }
}

/// Displacements for every node of one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplacementSet {
    entries: Vec<NodeDisplacement>,
}

impl DisplacementSet {
    /// Create a result set from per-node records
    pub fn new(entries: Vec<NodeDisplacement>) -> Self {
        Self { entries }
    }

    /// Look up a node's displacement
    pub fn get(&self, node: u32) -> Option<&NodeDisplacement> {
        self.entries.iter().find(|entry| entry.node == node)
    }

    /// Iterate over the per-node records
    pub fn iter(&self) -> impl Iterator<Item = &NodeDisplacement> {
        self.entries.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum displacement magnitude across the set, 0.0 when empty
    ///
    /// Used only for colour normalization.
    pub fn max_magnitude(&self) -> f64 {
        self.entries
            .iter()
            .map(NodeDisplacement::magnitude)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_is_euclidean() {
        let disp = NodeDisplacement::new(1, 3.0, 4.0, 0.0);
        assert_relative_eq!(disp.magnitude(), 5.0);
    }

    #[test]
    fn test_max_magnitude() {
        let set = DisplacementSet::new(vec![
            NodeDisplacement::new(1, 0.0, 0.0, 0.0),
            NodeDisplacement::new(2, 0.001, 0.0, 0.0),
            NodeDisplacement::new(3, 0.0, 0.002, 0.0),
        ]);
        assert_relative_eq!(set.max_magnitude(), 0.002);
    }

    #[test]
    fn test_empty_set_has_zero_maximum() {
        assert_eq!(DisplacementSet::default().max_magnitude(), 0.0);
    }
}
