//! HTTP client implementation of the solver boundary
//!
//! Declared model state is buffered locally; `solve_static` ships the whole
//! model to the engine service in one request and keeps the returned
//! displacements for the query calls that follow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DofAxis, StructuralSolver};
use crate::error::{FrameError, FrameResult};
use crate::model::SectionProperties;

/// Client for a remote finite-element engine service
pub struct RemoteSolver {
    base_url: String,
    client: reqwest::blocking::Client,
    model: ModelPayload,
    displacements: HashMap<u32, [f64; 3]>,
}

impl RemoteSolver {
    /// Create a client for the engine at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
            model: ModelPayload::default(),
            displacements: HashMap::new(),
        }
    }

    /// Get the base URL for the client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl StructuralSolver for RemoteSolver {
    fn reset(&mut self) {
        self.model = ModelPayload::default();
        self.displacements.clear();
    }

    fn define_node(&mut self, id: u32, position: [f64; 3]) -> FrameResult<()> {
        self.model.nodes.push(NodePayload {
            id,
            x: position[0],
            y: position[1],
            z: position[2],
        });
        Ok(())
    }

    fn fix_node(&mut self, id: u32, restraints: [bool; 6]) -> FrameResult<()> {
        self.model.supports.push(SupportPayload {
            node: id,
            dx: restraints[0],
            dy: restraints[1],
            dz: restraints[2],
            rx: restraints[3],
            ry: restraints[4],
            rz: restraints[5],
        });
        Ok(())
    }

    fn define_transform(&mut self, tag: u32, xz_vector: [f64; 3]) -> FrameResult<()> {
        self.model.transforms.push(TransformPayload {
            tag,
            xz: xz_vector,
        });
        Ok(())
    }

    fn define_element(
        &mut self,
        id: u32,
        start: u32,
        end: u32,
        section: &SectionProperties,
        transform_tag: u32,
    ) -> FrameResult<()> {
        self.model.elements.push(ElementPayload {
            id,
            i_node: start,
            j_node: end,
            area: section.area,
            elastic_modulus: section.elastic_modulus,
            shear_modulus: section.shear_modulus,
            torsional_constant: section.torsional_constant,
            inertia_y: section.inertia_y,
            inertia_z: section.inertia_z,
            mass_per_length: section.mass_per_length,
            transform: transform_tag,
        });
        Ok(())
    }

    fn begin_load_pattern(&mut self) -> FrameResult<()> {
        // the pattern is implicit in the request payload
        Ok(())
    }

    fn apply_load(&mut self, node: u32, components: [f64; 6]) -> FrameResult<()> {
        self.model.loads.push(LoadPayload {
            node,
            fx: components[0],
            fy: components[1],
            fz: components[2],
            mx: components[3],
            my: components[4],
            mz: components[5],
        });
        Ok(())
    }

    fn solve_static(&mut self, steps: u32) -> FrameResult<()> {
        let url = format!("{}/api/v1/analyze", self.base_url);
        let request = AnalysisRequest {
            model: self.model.clone(),
            options: AnalysisOptions { steps },
        };

        let response: AnalysisResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if !response.success {
            return Err(FrameError::Solver(
                response
                    .error
                    .unwrap_or_else(|| "engine returned failure without a message".to_string()),
            ));
        }

        let results = response
            .results
            .ok_or_else(|| FrameError::Solver("engine returned no results".to_string()))?;

        self.displacements = results
            .node_displacements
            .into_iter()
            .map(|row| (row.node, [row.ux, row.uy, row.uz]))
            .collect();

        Ok(())
    }

    fn node_displacement(&self, node: u32, axis: DofAxis) -> FrameResult<f64> {
        let components = self
            .displacements
            .get(&node)
            .ok_or(FrameError::NodeNotFound(node))?;
        Ok(components[axis.index() as usize - 1])
    }
}

// ========================
// Wire Types
// ========================

#[derive(Debug, Clone, Default, Serialize)]
struct ModelPayload {
    nodes: Vec<NodePayload>,
    supports: Vec<SupportPayload>,
    transforms: Vec<TransformPayload>,
    elements: Vec<ElementPayload>,
    loads: Vec<LoadPayload>,
}

#[derive(Debug, Clone, Serialize)]
struct NodePayload {
    id: u32,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Clone, Serialize)]
struct SupportPayload {
    node: u32,
    dx: bool,
    dy: bool,
    dz: bool,
    rx: bool,
    ry: bool,
    rz: bool,
}

#[derive(Debug, Clone, Serialize)]
struct TransformPayload {
    tag: u32,
    xz: [f64; 3],
}

#[derive(Debug, Clone, Serialize)]
struct ElementPayload {
    id: u32,
    i_node: u32,
    j_node: u32,
    area: f64,
    elastic_modulus: f64,
    shear_modulus: f64,
    torsional_constant: f64,
    inertia_y: f64,
    inertia_z: f64,
    mass_per_length: f64,
    transform: u32,
}

#[derive(Debug, Clone, Serialize)]
struct LoadPayload {
    node: u32,
    fx: f64,
    fy: f64,
    fz: f64,
    mx: f64,
    my: f64,
    mz: f64,
}

#[derive(Debug, Clone, Serialize)]
struct AnalysisRequest {
    model: ModelPayload,
    options: AnalysisOptions,
}

#[derive(Debug, Clone, Serialize)]
struct AnalysisOptions {
    steps: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Option<ResultsPayload>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResultsPayload {
    node_displacements: Vec<DisplacementRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct DisplacementRow {
    node: u32,
    ux: f64,
    uy: f64,
    uz: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_accumulate_until_solve() {
        let mut solver = RemoteSolver::new("http://localhost:8086");

        solver.define_node(1, [0.0, 0.0, 0.0]).unwrap();
        solver.define_node(2, [0.0, 0.0, 3.0]).unwrap();
        solver.fix_node(1, [true; 6]).unwrap();
        solver.define_transform(1, [1.0, 0.0, 0.0]).unwrap();
        solver
            .define_element(1, 1, 2, &SectionProperties::default(), 1)
            .unwrap();
        solver.begin_load_pattern().unwrap();
        solver
            .apply_load(2, [100.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();

        assert_eq!(solver.model.nodes.len(), 2);
        assert_eq!(solver.model.supports.len(), 1);
        assert_eq!(solver.model.elements.len(), 1);
        assert_eq!(solver.model.loads.len(), 1);
    }

    #[test]
    fn test_reset_drops_buffered_state() {
        let mut solver = RemoteSolver::new("http://localhost:8086");
        solver.define_node(1, [0.0, 0.0, 0.0]).unwrap();
        solver.displacements.insert(1, [0.0; 3]);

        solver.reset();

        assert!(solver.model.nodes.is_empty());
        assert!(solver.displacements.is_empty());
    }

    #[test]
    fn test_query_before_solve_is_an_error() {
        let solver = RemoteSolver::new("http://localhost:8086");
        let err = solver.node_displacement(1, DofAxis::X).unwrap_err();
        assert!(matches!(err, FrameError::NodeNotFound(1)));
    }
}
