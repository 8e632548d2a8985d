//! Renderable scene assembly
//!
//! Pure data handed to the rendering boundary: spheres for nodes, rectangular
//! prisms for beams, arrow glyphs for loads. Nothing here draws - the UI
//! collaborator owns that.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::colormap::{displacement_color, Rgb};
use crate::error::{FrameError, FrameResult};
use crate::geometry::{FrameGraph, NodeKey};
use crate::model::{FrameModel, LoadDirection, LoadEntry};
use crate::results::DisplacementSet;

/// Radius of node spheres, in analysis units
pub const NODE_RADIUS: f64 = 0.3;
/// Cross-section width and height of beam prisms
pub const BEAM_WIDTH: f64 = 0.3;

const NODE_BLUE: Rgb = Rgb::new(14, 82, 187);
const BEAM_GREY: Rgb = Rgb::new(200, 200, 200);
const LOAD_RED: Rgb = Rgb::new(255, 0, 0);

/// Colour and opacity of a scene primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneMaterial {
    pub color: Rgb,
    pub opacity: f64,
}

impl SceneMaterial {
    /// Fully opaque material
    pub fn opaque(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Material with explicit opacity
    pub fn translucent(color: Rgb, opacity: f64) -> Self {
        Self { color, opacity }
    }
}

/// A node sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sphere {
    pub center: [f64; 3],
    pub radius: f64,
    pub material: SceneMaterial,
    /// Pick identifier handed back by the 3D view
    pub identifier: String,
}

/// A rectangular prism extruded between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamPrism {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub width: f64,
    pub height: f64,
    pub material: SceneMaterial,
}

/// An arrow glyph for a point load
///
/// The tip touches the target node's sphere; the head extends `head_length`
/// behind the tip and the shaft `shaft_length` behind the head, all along
/// `direction` (a unit vector pointing the way the force acts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadArrow {
    pub tip: [f64; 3],
    pub direction: [f64; 3],
    pub head_length: f64,
    pub head_radius: f64,
    pub shaft_length: f64,
    pub shaft_width: f64,
    pub material: SceneMaterial,
}

/// A renderable scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<Sphere>,
    pub beams: Vec<BeamPrism>,
    pub loads: Vec<LoadArrow>,
}

/// Assemble the undeformed geometry view
///
/// Load rows are validated here exactly as during model building: incomplete
/// rows are skipped, a row targeting an unknown node is an error carrying the
/// row's 1-based index.
pub fn undeformed_scene(
    graph: &FrameGraph,
    loads: &[LoadEntry],
    opacity: f64,
) -> FrameResult<Scene> {
    let mut scene = Scene::default();

    for node in graph.nodes() {
        scene.nodes.push(Sphere {
            center: point_array(&node.position),
            radius: NODE_RADIUS,
            material: SceneMaterial::translucent(NODE_BLUE, opacity),
            identifier: node.key.to_string(),
        });
    }

    for edge in graph.edges() {
        let start = graph.node(&edge.start).unwrap();
        let end = graph.node(&edge.end).unwrap();
        scene.beams.push(BeamPrism {
            start: point_array(&start.position),
            end: point_array(&end.position),
            width: BEAM_WIDTH,
            height: BEAM_WIDTH,
            material: SceneMaterial::translucent(BEAM_GREY, opacity),
        });
    }

    for (i, entry) in loads.iter().enumerate() {
        let (Some(magnitude), Some(direction), Some(key)) =
            (entry.magnitude, entry.direction, entry.node.as_deref())
        else {
            continue;
        };

        let node = graph
            .node(&NodeKey::from(key))
            .ok_or_else(|| FrameError::LoadTargetNotFound {
                index: i + 1,
                key: key.to_string(),
            })?;

        scene
            .loads
            .push(load_arrow(&node.position, magnitude, direction, opacity));
    }

    Ok(scene)
}

/// Assemble the deformed result view
///
/// Node spheres move to `position + displacement * scale` and are coloured by
/// displacement magnitude; beam prisms span the displaced endpoints and take
/// the mean of the endpoint magnitudes. `scale` is a purely visual
/// exaggeration factor.
pub fn deformed_scene(
    model: &FrameModel,
    results: &DisplacementSet,
    scale: f64,
) -> FrameResult<Scene> {
    let max = results.max_magnitude();
    let mut scene = Scene::default();
    let mut displaced: Vec<(Point3<f64>, f64)> = Vec::with_capacity(model.nodes.len());

    for node in &model.nodes {
        let displacement = results
            .get(node.id)
            .ok_or(FrameError::NodeNotFound(node.id))?;
        let magnitude = displacement.magnitude();
        let position = node.position + displacement.vector() * scale;

        scene.nodes.push(Sphere {
            center: point_array(&position),
            radius: NODE_RADIUS,
            material: SceneMaterial::opaque(displacement_color(magnitude, max)),
            identifier: node.id.to_string(),
        });
        displaced.push((position, magnitude));
    }

    for element in &model.elements {
        // node ids are dense and 1-based
        let (start, start_magnitude) = displaced[element.start as usize - 1];
        let (end, end_magnitude) = displaced[element.end as usize - 1];
        let average = (start_magnitude + end_magnitude) / 2.0;

        scene.beams.push(BeamPrism {
            start: point_array(&start),
            end: point_array(&end),
            width: BEAM_WIDTH,
            height: BEAM_WIDTH,
            material: SceneMaterial::opaque(displacement_color(average, max)),
        });
    }

    Ok(scene)
}

/// Build an arrow glyph pointing the way the force acts
///
/// Head length is `|magnitude| / 20`, head radius `head / 1.5`, shaft width
/// `head / 7`, shaft as long as the head; the tip sits one sphere radius off
/// the node centre.
fn load_arrow(
    position: &Point3<f64>,
    magnitude: f64,
    direction: LoadDirection,
    opacity: f64,
) -> LoadArrow {
    let head_length = (magnitude / 20.0).abs();
    let sign = if magnitude < 0.0 { -1.0 } else { 1.0 };
    // the z convention inverts the applied force, and the glyph follows it
    let unit = match direction {
        LoadDirection::X => Vector3::new(sign, 0.0, 0.0),
        LoadDirection::Y => Vector3::new(0.0, sign, 0.0),
        LoadDirection::Z => Vector3::new(0.0, 0.0, -sign),
    };
    let tip = position - unit * NODE_RADIUS;

    LoadArrow {
        tip: point_array(&tip),
        direction: [unit.x, unit.y, unit.z],
        head_length,
        head_radius: head_length / 1.5,
        shaft_length: head_length,
        shaft_width: head_length / 7.0,
        material: SceneMaterial::translucent(LOAD_RED, opacity),
    }
}

fn point_array(point: &Point3<f64>) -> [f64; 3] {
    [point.x, point.y, point.z]
}
