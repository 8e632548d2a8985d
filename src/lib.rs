//! Frame Viz - 3D frame building analysis and visualization pipeline
//!
//! Converts uploaded line geometry (a generative-design JSON export) into a
//! structural frame model, applies user point loads, delegates the static
//! solve to an external finite-element engine behind the
//! [`StructuralSolver`](solver::StructuralSolver) trait, and assembles a
//! colour-mapped, deformed 3D scene for the rendering boundary.
//!
//! ## Example
//! ```rust
//! use frame_viz::prelude::*;
//!
//! let raw = r#"{"beams": [
//!     {"start": [0.0, 0.0, 0.0], "end": [0.0, 0.0, 3000.0]},
//!     {"start": [0.0, 0.0, 3000.0], "end": [3000.0, 0.0, 3000.0]}
//! ]}"#;
//!
//! // millimetre input deduplicates into metre-unit nodes
//! let file = GeometryFile::from_json(raw).unwrap();
//! let graph = FrameGraph::from_segments(&file.beams, MM_PER_M, MergePolicy::Exact);
//! assert_eq!(graph.node_count(), 3);
//!
//! // ground nodes are fixed, members classify as beam or column
//! let loads = [LoadEntry::force(100.0, LoadDirection::X, "node_3_0_3")];
//! let model = FrameModel::from_graph(&graph, &loads).unwrap();
//! assert!(model.nodes[0].fixed);
//! assert_eq!(model.elements[1].class, MemberClass::Beam);
//! ```

pub mod colormap;
pub mod error;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod results;
pub mod scene;
pub mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::colormap::{displacement_color, jet, Rgb};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::geometry::{
        FrameGraph, GeometryFile, LineSegment, MergePolicy, NodeKey, MM_PER_M,
    };
    pub use crate::model::{
        FrameModel, LoadDirection, LoadEntry, MemberClass, SectionProperties,
    };
    pub use crate::pipeline::{analyze, preview, AnalysisSummary, AnalysisView};
    pub use crate::results::{DisplacementSet, NodeDisplacement};
    pub use crate::scene::{deformed_scene, undeformed_scene, Scene};
    pub use crate::solver::{DofAxis, SolverSession, StructuralSolver, STATIC_STEPS};

    #[cfg(feature = "remote")]
    pub use crate::solver::RemoteSolver;
}
