//! Scene graph for the ring viewer
//!
//! A flat list of named nodes is all the viewer needs: each node carries one
//! object and its world transform.

use ringcrate_core::{
    bounds, Color, Drawable, LineSegments, Point3f, Transform3D, TriangleMesh, Vector3f,
};
use serde::{Deserialize, Serialize};

/// Which triangle faces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Surface appearance of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub flat_shading: bool,
    pub side: Side,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            flat_shading: false,
            side: Side::Front,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// Contents of a scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    Mesh {
        mesh: TriangleMesh,
        material: Material,
    },
    Lines {
        lines: LineSegments,
        /// Used for points without their own color
        color: Color,
    },
    AmbientLight {
        color: Color,
        intensity: f32,
    },
    DirectionalLight {
        color: Color,
        intensity: f32,
        position: Point3f,
    },
}

impl SceneObject {
    pub fn is_light(&self) -> bool {
        matches!(self, SceneObject::AmbientLight { .. } | SceneObject::DirectionalLight { .. })
    }

    /// Local-space points of drawable geometry
    fn geometry_points(&self) -> Option<&[Point3f]> {
        match self {
            SceneObject::Mesh { mesh, .. } => Some(&mesh.vertices),
            SceneObject::Lines { lines, .. } => Some(&lines.points),
            _ => None,
        }
    }
}

/// A named object placed in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub object: SceneObject,
    pub transform: Transform3D,
    pub visible: bool,
}

impl SceneNode {
    pub fn new<S: Into<String>>(name: S, object: SceneObject) -> Self {
        Self {
            name: name.into(),
            object,
            transform: Transform3D::identity(),
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }
}

/// Root of everything the renderer draws
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub background: Color,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
        }
    }

    /// Append a node, returning its index
    pub fn add(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// Show or hide a node by name; returns false if it does not exist
    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.find_mut(name) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    /// World-space bounds of visible geometry, `None` if there is none
    pub fn bounding_box(&self) -> Option<(Point3f, Point3f)> {
        let world: Vec<Point3f> = self
            .nodes
            .iter()
            .filter(|n| n.visible)
            .filter_map(|n| {
                n.object
                    .geometry_points()
                    .map(|points| points.iter().map(move |p| n.transform.transform_point(p)))
            })
            .flatten()
            .collect();
        bounds(&world)
    }

    /// Serialise the scene as pretty-printed JSON
    pub fn to_json(&self) -> ringcrate_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Drawable for Scene {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        Scene::bounding_box(self).unwrap_or((Point3f::origin(), Point3f::origin()))
    }
}

/// Direction a directional light shines, from its position towards the origin
pub fn light_direction(position: &Point3f) -> Vector3f {
    (-position.coords).try_normalize(f32::EPSILON).unwrap_or(-Vector3f::y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_node(name: &str, end: Point3f) -> SceneNode {
        let mut lines = LineSegments::new();
        lines.push_segment(Point3f::origin(), end, None);
        SceneNode::new(name, SceneObject::Lines { lines, color: Color::BLACK })
    }

    #[test]
    fn test_find_and_visibility() {
        let mut scene = Scene::default();
        scene.add(SceneNode::new(
            "ambient",
            SceneObject::AmbientLight { color: Color::WHITE, intensity: 0.5 },
        ));
        scene.add(line_node("a", Point3f::new(1.0, 0.0, 0.0)));

        assert_eq!(scene.node_count(), 2);
        assert!(scene.find("ambient").unwrap().object.is_light());
        assert!(scene.set_visible("a", false));
        assert!(!scene.set_visible("missing", false));
        assert!(scene.bounding_box().is_none());
    }

    #[test]
    fn test_bounding_box_uses_world_transform() {
        let mut scene = Scene::default();
        scene.add(
            line_node("a", Point3f::new(1.0, 1.0, 1.0))
                .with_transform(Transform3D::translation(Vector3f::new(10.0, 0.0, 0.0))),
        );
        let (min, max) = scene.bounding_box().unwrap();
        assert_relative_eq!(min, Point3f::new(10.0, 0.0, 0.0));
        assert_relative_eq!(max, Point3f::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_json_dump_is_tagged() {
        let mut scene = Scene::new(Color::WHITE);
        scene.add(SceneNode::new(
            "sun",
            SceneObject::DirectionalLight {
                color: Color::WHITE,
                intensity: 1.0,
                position: Point3f::new(1.0, 1.0, 1.0),
            },
        ));
        let json = scene.to_json().unwrap();
        assert!(json.contains("\"type\": \"directional_light\""));
        assert!(json.contains("\"name\": \"sun\""));
    }

    #[test]
    fn test_light_direction() {
        let d = light_direction(&Point3f::new(0.0, 5.0, 0.0));
        assert_relative_eq!(d, -Vector3f::y());
    }
}
