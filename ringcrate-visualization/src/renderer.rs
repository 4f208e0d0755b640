//! Renderer front-end
//!
//! The renderer turns a scene and a camera into a backend-neutral [`Frame`]:
//! flat vertex buffers plus the per-draw state a rasteriser needs. Backends
//! only consume frames, so the viewer runs the same way with or without a
//! graphics device.

use crate::camera::Camera;
use crate::scene::{light_direction, Scene, SceneObject};
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use ringcrate_core::{Color, Error, LineSegments, Result, Transform3D, TriangleMesh, Vector3f};
use tracing::{debug, trace};

/// Interleaved vertex as uploaded to a backend
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Primitive topology of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Triangles,
    Lines,
}

/// One draw call
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub name: String,
    pub kind: DrawKind,
    pub vertex_count: usize,
    pub world: Matrix4<f32>,
    pub color: Color,
    /// `Vertex` records packed as raw bytes
    pub vertices: Vec<u8>,
}

impl DrawItem {
    /// View the packed bytes as vertices again
    pub fn vertex_slice(&self) -> &[Vertex] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// A directional light as seen by a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLight {
    pub direction: Vector3f,
    pub color: Color,
    pub intensity: f32,
}

/// Everything needed to draw one image
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    /// Drawing-buffer size in device pixels
    pub viewport: (u32, u32),
    pub clear_color: Color,
    pub view_projection: Matrix4<f32>,
    /// Ambient term, already scaled by intensity
    pub ambient: Color,
    pub lights: Vec<FrameLight>,
    pub draws: Vec<DrawItem>,
}

/// Per-frame counters returned by [`Renderer::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub draw_calls: usize,
    pub triangles: usize,
    pub lines: usize,
}

/// Something that can present frames
pub trait RenderBackend {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// The drawing surface changed size
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    fn draw(&mut self, frame: &Frame) -> Result<()>;

    /// Most recent frame, for backends that keep it
    fn last_frame(&self) -> Option<&Frame> {
        None
    }
}

/// Backend that keeps frames in memory instead of presenting them
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    size: (u32, u32),
    pixel_ratio: f32,
    frames_drawn: u64,
    last: Option<Frame>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Surface size in CSS pixels and the pixel ratio it was set with
    pub fn surface(&self) -> ((u32, u32), f32) {
        (self.size, self.pixel_ratio)
    }
}

impl RenderBackend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.size = (width, height);
        self.pixel_ratio = pixel_ratio;
    }

    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.frames_drawn += 1;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

/// Owns the drawing surface and feeds frames to a backend
pub struct Renderer {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
    pub antialias: bool,
    dom_id: String,
    frame_index: u64,
    backend: Box<dyn RenderBackend>,
}

impl Renderer {
    /// Create a renderer whose canvas carries `dom_id`
    pub fn new<S: Into<String>>(dom_id: S, backend: Box<dyn RenderBackend>) -> Self {
        let mut renderer = Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
            antialias: true,
            dom_id: dom_id.into(),
            frame_index: 0,
            backend,
        };
        renderer.backend.resize(1, 1, 1.0);
        renderer
    }

    /// Renderer over a [`HeadlessBackend`]
    pub fn headless<S: Into<String>>(dom_id: S) -> Self {
        Self::new(dom_id, Box::new(HeadlessBackend::new()))
    }

    /// Id of the canvas element this renderer draws into
    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// Resize the surface in CSS pixels; zero sizes are ignored
    pub fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring empty renderer size");
            return;
        }
        self.width = width;
        self.height = height;
        self.backend.resize(width, height, self.pixel_ratio);
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return;
        }
        self.pixel_ratio = pixel_ratio;
        self.backend.resize(self.width, self.height, pixel_ratio);
    }

    /// Size of the drawing buffer in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        (
            ((self.width as f32) * self.pixel_ratio).round().max(1.0) as u32,
            ((self.height as f32) * self.pixel_ratio).round().max(1.0) as u32,
        )
    }

    /// Canvas element markup for the host page
    pub fn canvas_markup(&self) -> String {
        let (w, h) = self.drawing_buffer_size();
        format!(
            "<canvas id=\"{}\" width=\"{}\" height=\"{}\" style=\"width:{}px;height:{}px\"></canvas>",
            self.dom_id, w, h, self.width, self.height
        )
    }

    /// Draw `scene` as seen by `camera`
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<FrameStats> {
        if !camera.aspect_ratio.is_finite() || camera.aspect_ratio <= 0.0 {
            return Err(Error::Visualization(format!(
                "Camera aspect ratio {} cannot be rendered",
                camera.aspect_ratio
            )));
        }

        let mut frame = Frame {
            index: self.frame_index,
            viewport: self.drawing_buffer_size(),
            clear_color: scene.background,
            view_projection: camera.view_projection(),
            ambient: Color::BLACK,
            lights: Vec::new(),
            draws: Vec::new(),
        };
        let mut stats = FrameStats {
            frame: self.frame_index,
            ..FrameStats::default()
        };

        for node in scene.nodes.iter().filter(|n| n.visible) {
            match &node.object {
                SceneObject::AmbientLight { color, intensity } => {
                    frame.ambient = Color::new(
                        frame.ambient.r + color.r * intensity,
                        frame.ambient.g + color.g * intensity,
                        frame.ambient.b + color.b * intensity,
                    );
                }
                SceneObject::DirectionalLight { color, intensity, position } => {
                    frame.lights.push(FrameLight {
                        direction: light_direction(&node.transform.transform_point(position)),
                        color: *color,
                        intensity: *intensity,
                    });
                }
                SceneObject::Mesh { mesh, material } => {
                    if !mesh.indices_valid() {
                        return Err(Error::Visualization(format!(
                            "Mesh node {} has out-of-range face indices",
                            node.name
                        )));
                    }
                    let vertices = mesh_vertices(mesh, material.color);
                    stats.triangles += mesh.face_count();
                    frame.draws.push(draw_item(
                        &node.name,
                        DrawKind::Triangles,
                        &node.transform,
                        material.color,
                        &vertices,
                    ));
                }
                SceneObject::Lines { lines, color } => {
                    let vertices = line_vertices(lines, *color);
                    stats.lines += lines.segment_count();
                    frame.draws.push(draw_item(
                        &node.name,
                        DrawKind::Lines,
                        &node.transform,
                        *color,
                        &vertices,
                    ));
                }
            }
        }
        stats.draw_calls = frame.draws.len();

        self.backend.draw(&frame)?;
        trace!(
            backend = self.backend.name(),
            frame = stats.frame,
            draws = stats.draw_calls,
            "rendered frame"
        );
        self.frame_index += 1;
        Ok(stats)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("antialias", &self.antialias)
            .field("dom_id", &self.dom_id)
            .field("backend", &self.backend.name())
            .finish()
    }
}

fn draw_item(name: &str, kind: DrawKind, transform: &Transform3D, color: Color, vertices: &[Vertex]) -> DrawItem {
    DrawItem {
        name: name.to_string(),
        kind,
        vertex_count: vertices.len(),
        world: transform.matrix,
        color,
        vertices: bytemuck::cast_slice(vertices).to_vec(),
    }
}

/// Unindexed triangle list with flat face normals
fn mesh_vertices(mesh: &TriangleMesh, color: Color) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(mesh.face_count() * 3);
    for (index, face) in mesh.faces.iter().enumerate() {
        let normal = mesh.face_normal(index);
        for &vi in face {
            let p = mesh.vertices[vi];
            let c = mesh
                .colors
                .as_ref()
                .and_then(|cs| cs.get(vi))
                .map_or(color, |&[r, g, b]| {
                    Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
                });
            out.push(Vertex {
                position: [p.x, p.y, p.z],
                normal: [normal.x, normal.y, normal.z],
                color: c.to_array(),
            });
        }
    }
    out
}

fn line_vertices(lines: &LineSegments, color: Color) -> Vec<Vertex> {
    lines
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let c = lines.colors.as_ref().and_then(|cs| cs.get(i)).copied().unwrap_or(color);
            Vertex {
                position: [p.x, p.y, p.z],
                normal: [0.0; 3],
                color: c.to_array(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, SceneNode};
    use ringcrate_core::Point3f;

    fn triangle_scene() -> Scene {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let mut lines = LineSegments::new();
        lines.push_segment(Point3f::origin(), Point3f::new(0.0, 0.0, 1.0), None);

        let mut scene = Scene::new(Color::from_hex(0x202020));
        scene.add(SceneNode::new(
            "ambient",
            SceneObject::AmbientLight { color: Color::WHITE, intensity: 0.5 },
        ));
        scene.add(SceneNode::new(
            "tri",
            SceneObject::Mesh { mesh, material: Material::new(Color::RED) },
        ));
        scene.add(SceneNode::new("line", SceneObject::Lines { lines, color: Color::BLUE }));
        scene
    }

    #[test]
    fn test_render_collects_draws() {
        let scene = triangle_scene();
        let mut renderer = Renderer::headless("canvas");
        renderer.set_size(640, 480);

        let stats = renderer.render(&scene, &Camera::default()).unwrap();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.lines, 1);

        let frame = renderer.backend().last_frame().unwrap();
        assert_eq!(frame.viewport, (640, 480));
        assert_eq!(frame.clear_color, scene.background);
        assert_eq!(frame.ambient, Color::new(0.5, 0.5, 0.5));
        assert_eq!(frame.draws[0].kind, DrawKind::Triangles);
        assert_eq!(frame.draws[0].vertex_count, 3);
        assert_eq!(frame.draws[0].vertices.len(), 3 * std::mem::size_of::<Vertex>());
        assert_eq!(frame.draws[0].vertex_slice()[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(frame.draws[0].vertex_slice()[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(frame.draws[1].vertex_slice()[1].color, Color::BLUE.to_array());
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut scene = triangle_scene();
        scene.set_visible("tri", false);
        let mut renderer = Renderer::headless("canvas");
        let stats = renderer.render(&scene, &Camera::default()).unwrap();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangles, 0);
    }

    #[test]
    fn test_frame_index_advances() {
        let scene = triangle_scene();
        let mut renderer = Renderer::headless("canvas");
        assert_eq!(renderer.render(&scene, &Camera::default()).unwrap().frame, 0);
        assert_eq!(renderer.render(&scene, &Camera::default()).unwrap().frame, 1);
    }

    #[test]
    fn test_pixel_ratio_scales_buffer() {
        let mut renderer = Renderer::headless("c");
        renderer.set_size(300, 200);
        renderer.set_pixel_ratio(2.0);
        assert_eq!(renderer.drawing_buffer_size(), (600, 400));
        assert!(renderer.canvas_markup().contains("width=\"600\""));

        renderer.set_size(0, 10);
        renderer.set_pixel_ratio(-1.0);
        assert_eq!((renderer.width, renderer.height, renderer.pixel_ratio), (300, 200, 2.0));
    }

    #[test]
    fn test_invalid_mesh_is_an_error() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::origin(), Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [0, 1, 9]],
        );
        let mut scene = Scene::default();
        scene.add(SceneNode::new(
            "broken",
            SceneObject::Mesh { mesh, material: Material::new(Color::RED) },
        ));
        let mut renderer = Renderer::headless("c");
        assert!(renderer.render(&scene, &Camera::default()).is_err());
        assert!(renderer.backend().last_frame().is_none());
    }

    #[test]
    fn test_bad_aspect_is_an_error() {
        let mut camera = Camera::default();
        camera.aspect_ratio = 0.0;
        let mut renderer = Renderer::headless("c");
        assert!(renderer.render(&Scene::default(), &camera).is_err());
    }
}
