//! Structural solver boundary
//!
//! The numerical engine is an external collaborator behind the
//! [`StructuralSolver`] trait; this crate only declares the model and reads
//! displacements back. A [`SolverSession`] owns one engine instance for
//! exactly one analysis run - sessions are created fresh per request and
//! consumed by [`SolverSession::run`], never shared.

#[cfg(feature = "remote")]
mod remote;

#[cfg(feature = "remote")]
pub use remote::RemoteSolver;

use crate::error::FrameResult;
use crate::model::{FrameModel, MemberClass, SectionProperties};
use crate::results::{DisplacementSet, NodeDisplacement};

/// Number of static analysis steps per run
pub const STATIC_STEPS: u32 = 10;

/// Translational degree-of-freedom axis, 1-based as queried from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DofAxis {
    X = 1,
    Y = 2,
    Z = 3,
}

impl DofAxis {
    /// 1-based axis index used by the engine's query API
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Capability interface of the external finite-element engine
///
/// Implementations hold whatever state the engine needs between calls; the
/// session drives them through one reset-declare-solve-query cycle.
pub trait StructuralSolver {
    /// Wipe all engine state
    fn reset(&mut self);

    /// Declare a node by id and position
    fn define_node(&mut self, id: u32, position: [f64; 3]) -> FrameResult<()>;

    /// Restrain a node's six degrees of freedom
    fn fix_node(&mut self, id: u32, restraints: [bool; 6]) -> FrameResult<()>;

    /// Declare a geometric transformation by tag and local xz vector
    fn define_transform(&mut self, tag: u32, xz_vector: [f64; 3]) -> FrameResult<()>;

    /// Declare a frame element between two nodes
    fn define_element(
        &mut self,
        id: u32,
        start: u32,
        end: u32,
        section: &SectionProperties,
        transform_tag: u32,
    ) -> FrameResult<()>;

    /// Open the load pattern loads are applied into
    fn begin_load_pattern(&mut self) -> FrameResult<()>;

    /// Apply a nodal force vector [FX, FY, FZ, MX, MY, MZ]
    fn apply_load(&mut self, node: u32, components: [f64; 6]) -> FrameResult<()>;

    /// Run a static analysis for the given number of steps
    ///
    /// This is a blocking call with no timeout; a hung engine hangs the
    /// request.
    fn solve_static(&mut self, steps: u32) -> FrameResult<()>;

    /// Query a converged displacement component by 1-based axis
    fn node_displacement(&self, node: u32, axis: DofAxis) -> FrameResult<f64>;
}

/// An owned, single-use analysis session
///
/// Creating a session resets the engine; [`run`](Self::run) consumes the
/// session, so a fresh engine state is guaranteed for every analysis.
pub struct SolverSession<S: StructuralSolver> {
    solver: S,
}

impl<S: StructuralSolver> SolverSession<S> {
    /// Take ownership of an engine and reset it
    pub fn new(mut solver: S) -> Self {
        solver.reset();
        Self { solver }
    }

    /// Declare the model, solve, and collect per-node displacements
    pub fn run(mut self, model: &FrameModel) -> FrameResult<DisplacementSet> {
        for node in &model.nodes {
            self.solver
                .define_node(node.id, [node.position.x, node.position.y, node.position.z])?;
            if node.fixed {
                self.solver.fix_node(node.id, [true; 6])?;
            }
        }

        for class in [MemberClass::Column, MemberClass::Beam] {
            self.solver
                .define_transform(class.transform_tag(), class.xz_vector())?;
        }

        for element in &model.elements {
            self.solver.define_element(
                element.id,
                element.start,
                element.end,
                &model.section,
                element.class.transform_tag(),
            )?;
        }

        self.solver.begin_load_pattern()?;
        for load in &model.loads {
            self.solver.apply_load(load.node, load.components)?;
        }

        self.solver.solve_static(STATIC_STEPS)?;

        let mut entries = Vec::with_capacity(model.nodes.len());
        for node in &model.nodes {
            entries.push(NodeDisplacement::new(
                node.id,
                self.solver.node_displacement(node.id, DofAxis::X)?,
                self.solver.node_displacement(node.id, DofAxis::Y)?,
                self.solver.node_displacement(node.id, DofAxis::Z)?,
            ));
        }

        Ok(DisplacementSet::new(entries))
    }
}
