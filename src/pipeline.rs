//! Request orchestration
//!
//! One user action is one synchronous pass: parse geometry, deduplicate,
//! build the model, drive a fresh solver session, colour the results. Nothing
//! is cached between passes.

use serde::{Deserialize, Serialize};

use crate::error::FrameResult;
use crate::geometry::{FrameGraph, LineSegment, MergePolicy, MM_PER_M};
use crate::model::{FrameModel, LoadEntry};
use crate::scene::{deformed_scene, undeformed_scene, Scene};
use crate::solver::{SolverSession, StructuralSolver};

/// Opacity of the undeformed overlay behind a deformed view
const OVERLAY_OPACITY: f64 = 0.6;

/// Headline numbers for one analysis run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Unique nodes in the model
    pub node_count: usize,
    /// Frame elements in the model
    pub beam_count: usize,
    /// Maximum displacement magnitude, in analysis units
    pub max_displacement: f64,
}

/// Everything the result view renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisView {
    /// Undeformed geometry (loads included) at overlay opacity
    pub undeformed: Scene,
    /// Deformed nodes and beams, coloured by displacement
    pub deformed: Scene,
    /// Headline numbers
    pub summary: AnalysisSummary,
}

/// Assemble the undeformed geometry view for the given upload
pub fn preview(segments: &[LineSegment], loads: &[LoadEntry]) -> FrameResult<Scene> {
    let graph = FrameGraph::from_segments(segments, MM_PER_M, MergePolicy::Exact);
    undeformed_scene(&graph, loads, 1.0)
}

/// Run the full analysis pipeline
///
/// `deformation_scale` exaggerates displacements for display only; it has no
/// physical meaning.
pub fn analyze<S: StructuralSolver>(
    segments: &[LineSegment],
    loads: &[LoadEntry],
    deformation_scale: f64,
    solver: S,
) -> FrameResult<AnalysisView> {
    let graph = FrameGraph::from_segments(segments, MM_PER_M, MergePolicy::Exact);
    let undeformed = undeformed_scene(&graph, loads, OVERLAY_OPACITY)?;
    let model = FrameModel::from_graph(&graph, loads)?;
    log::info!(
        "model created ({} nodes | {} beams)",
        model.nodes.len(),
        model.elements.len()
    );

    log::info!("running static analysis...");
    let results = SolverSession::new(solver).run(&model)?;
    log::info!("analysis completed");

    let deformed = deformed_scene(&model, &results, deformation_scale)?;
    let summary = AnalysisSummary {
        node_count: model.nodes.len(),
        beam_count: model.elements.len(),
        max_displacement: results.max_magnitude(),
    };

    Ok(AnalysisView {
        undeformed,
        deformed,
        summary,
    })
}
