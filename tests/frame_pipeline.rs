use std::collections::HashMap;

use approx::assert_relative_eq;
use nalgebra::Point3;
use frame_viz::error::{FrameError, FrameResult};
use frame_viz::model::SectionProperties;
use frame_viz::prelude::*;

/// Engine fake serving canned displacements keyed by node id
struct CannedSolver {
    displacements: HashMap<u32, [f64; 3]>,
}

impl CannedSolver {
    fn new(displacements: &[(u32, [f64; 3])]) -> Self {
        Self {
            displacements: displacements.iter().copied().collect(),
        }
    }
}

impl StructuralSolver for CannedSolver {
    fn reset(&mut self) {}

    fn define_node(&mut self, _id: u32, _position: [f64; 3]) -> FrameResult<()> {
        Ok(())
    }

    fn fix_node(&mut self, _id: u32, _restraints: [bool; 6]) -> FrameResult<()> {
        Ok(())
    }

    fn define_transform(&mut self, _tag: u32, _xz_vector: [f64; 3]) -> FrameResult<()> {
        Ok(())
    }

    fn define_element(
        &mut self,
        _id: u32,
        _start: u32,
        _end: u32,
        _section: &SectionProperties,
        _transform_tag: u32,
    ) -> FrameResult<()> {
        Ok(())
    }

    fn begin_load_pattern(&mut self) -> FrameResult<()> {
        Ok(())
    }

    fn apply_load(&mut self, _node: u32, _components: [f64; 6]) -> FrameResult<()> {
        Ok(())
    }

    fn solve_static(&mut self, _steps: u32) -> FrameResult<()> {
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

const PORTAL_JSON: &str = r#"{"beams": [
    {"start": [0.0, 0.0, 0.0], "end": [0.0, 0.0, 3000.0]},
    {"start": [0.0, 0.0, 3000.0], "end": [3000.0, 0.0, 3000.0]}
]}"#;

fn portal_segments() -> Vec<LineSegment> {
    GeometryFile::from_json(PORTAL_JSON).unwrap().beams
}

#[test]
fn portal_frame_model_matches_the_input_geometry() {
    let segments = portal_segments();
    let graph = FrameGraph::from_segments(&segments, MM_PER_M, MergePolicy::Exact);
    let model = FrameModel::from_graph(&graph, &[]).unwrap();

    assert_eq!(model.nodes.len(), 3);
    assert_eq!(model.elements.len(), 2);

    // (0,0,0), (0,0,3), (3,0,3) in metres, first-seen order
    assert_eq!(model.nodes[0].position, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(model.nodes[1].position, Point3::new(0.0, 0.0, 3.0));
    assert_eq!(model.nodes[2].position, Point3::new(3.0, 0.0, 3.0));

    // only the ground node is fixed
    assert!(model.nodes[0].fixed);
    assert!(!model.nodes[1].fixed && !model.nodes[2].fixed);

    assert_eq!(model.elements[0].class, MemberClass::Column);
    assert_eq!(model.elements[1].class, MemberClass::Beam);
}

#[test]
fn full_pipeline_produces_both_views() {
    let segments = portal_segments();
    let loads = [LoadEntry::force(100.0, LoadDirection::X, "node_3_0_3")];
    let solver = CannedSolver::new(&[
        (1, [0.0, 0.0, 0.0]),
        (2, [0.003, 0.0, 0.0]),
        (3, [0.004, 0.0, -0.001]),
    ]);

    let view = analyze(&segments, &loads, 1000.0, solver).unwrap();

    assert_eq!(view.summary.node_count, 3);
    assert_eq!(view.summary.beam_count, 2);
    let expected_max = (0.004_f64.powi(2) + 0.001_f64.powi(2)).sqrt();
    assert_relative_eq!(view.summary.max_displacement, expected_max);

    // base overlay keeps the load arrow and renders semi-transparent
    assert_eq!(view.undeformed.loads.len(), 1);
    assert_relative_eq!(view.undeformed.nodes[0].material.opacity, 0.6);

    // deformed nodes move by displacement * scale
    assert_relative_eq!(view.deformed.nodes[1].center[0], 3.0);
    assert_relative_eq!(view.deformed.nodes[2].center[0], 7.0);
    assert_relative_eq!(view.deformed.nodes[2].center[2], 2.0);

    // fixed node stays cold, the most displaced node is hot
    assert_eq!(view.deformed.nodes[0].material.color, jet(0.0));
    assert_eq!(view.deformed.nodes[2].material.color, jet(1.0));

    // deformed beams span the displaced endpoints
    assert_relative_eq!(view.deformed.beams[1].start[0], 3.0);
    assert_relative_eq!(view.deformed.beams[1].end[0], 7.0);
}

#[test]
fn unknown_load_target_fails_before_the_solve() {
    let segments = portal_segments();
    let loads = [LoadEntry::force(100.0, LoadDirection::Z, "node_9_9_9")];
    let solver = CannedSolver::new(&[]);

    let err = analyze(&segments, &loads, 1000.0, solver).unwrap_err();

    match err {
        FrameError::LoadTargetNotFound { index, ref key } => {
            assert_eq!(index, 1);
            assert_eq!(key, "node_9_9_9");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn preview_renders_without_a_solver() {
    let segments = portal_segments();
    let loads = [LoadEntry::force(-50.0, LoadDirection::Z, "node_0_0_3")];

    let scene = preview(&segments, &loads).unwrap();

    assert_eq!(scene.nodes.len(), 3);
    assert_eq!(scene.beams.len(), 2);
    assert_eq!(scene.loads.len(), 1);
    // negative z load points the arrow up
    assert_eq!(scene.loads[0].direction, [0.0, 0.0, 1.0]);
}

#[test]
fn empty_upload_renders_an_empty_scene() {
    let view = analyze(&[], &[], 1000.0, CannedSolver::new(&[])).unwrap();

    assert_eq!(view.summary.node_count, 0);
    assert_eq!(view.summary.max_displacement, 0.0);
    assert!(view.deformed.nodes.is_empty());
}
