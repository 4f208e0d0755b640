//! Ring viewer: scene assembly and the handles returned to the page

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::host::Host;
use crate::renderer::{FrameStats, HeadlessBackend, RenderBackend, Renderer};
use crate::scene::{Material, Scene, SceneNode, SceneObject, Side};
use ringcrate_core::{Color, Point3f, Result, RingParams};
use ringcrate_geometry::{axes_helper, grid_helper, RingOptions, ToleranceRing};
use ringcrate_io::write_stl_ascii;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const AMBIENT_LIGHT_NODE: &str = "ambient-light";
pub const DIRECTIONAL_LIGHT_NODE: &str = "directional-light";
pub const RING_NODE: &str = "ring";
pub const EDGES_NODE: &str = "ring-edges";
pub const GRID_NODE: &str = "grid";
pub const AXES_NODE: &str = "axes";

const GRID_CENTER_COLOR: u32 = 0x444444;
const GRID_LINE_COLOR: u32 = 0x888888;

/// Everything a running viewer owns
#[derive(Debug)]
pub struct ViewerHandles {
    pub scene: Scene,
    pub camera: Camera,
    pub renderer: Renderer,
    pub controls: OrbitControls,
    pub params: RingParams,
    pub ring: ToleranceRing,
    container_id: String,
}

/// Build a viewer for `params` inside element `container_id`
///
/// Returns `Ok(None)` without touching the page when the container does not
/// exist. Frames are kept in memory by a [`HeadlessBackend`].
pub fn init_viewer<H: Host + ?Sized>(
    host: &mut H,
    container_id: &str,
    params: &RingParams,
    config: &ViewerConfig,
) -> Result<Option<ViewerHandles>> {
    init_viewer_with_backend(host, container_id, params, config, Box::new(HeadlessBackend::new()))
}

/// [`init_viewer`] drawing through `backend`
pub fn init_viewer_with_backend<H: Host + ?Sized>(
    host: &mut H,
    container_id: &str,
    params: &RingParams,
    config: &ViewerConfig,
    backend: Box<dyn RenderBackend>,
) -> Result<Option<ViewerHandles>> {
    let Some(container_size) = host.container_size(container_id) else {
        debug!(container = container_id, "viewer container not found");
        return Ok(None);
    };

    let options = RingOptions {
        edge_threshold_degrees: config.edge_threshold_degrees,
        ..RingOptions::default()
    };
    let ring = ToleranceRing::build(params, &options)?;
    let (width, height) = match container_size {
        (w, h) if w > 0 && h > 0 => (w, h),
        _ => (config.default_width, config.default_height),
    };

    let scene = build_scene(&ring, config);

    let mut camera = Camera::perspective(
        config.fov_degrees,
        width as f32 / height.max(1) as f32,
        config.near,
        config.far,
    );
    let half_width = params.width * 0.5;
    let radius = (ring.max_radius().powi(2) + half_width.powi(2)).sqrt();
    camera.frame(Point3f::new(0.0, half_width, 0.0), radius);

    let mut renderer = Renderer::new(format!("{}-canvas", container_id), backend);
    renderer.set_pixel_ratio(host.device_pixel_ratio());
    renderer.set_size(width, height);
    host.set_inner_html(container_id, &renderer.canvas_markup());

    let mut controls = OrbitControls::new(&camera);
    controls.enable_damping = config.enable_damping;
    controls.damping_factor = config.damping_factor;
    controls.auto_rotate = config.auto_rotate;
    controls.auto_rotate_speed = config.auto_rotate_speed;

    info!(
        part = %params.part_id,
        container = container_id,
        width,
        height,
        nodes = scene.node_count(),
        "viewer initialised"
    );

    Ok(Some(ViewerHandles {
        scene,
        camera,
        renderer,
        controls,
        params: params.clone(),
        ring,
        container_id: container_id.to_string(),
    }))
}

/// Grid edge length: four base radii rounded up to an even whole number
pub fn grid_size(outer_radius: f32) -> f32 {
    let size = (4.0 * outer_radius).ceil().max(2.0) as u32;
    (size + size % 2) as f32
}

/// Lights, ring, overlay and helpers in draw order
fn build_scene(ring: &ToleranceRing, config: &ViewerConfig) -> Scene {
    let radius = ring.params.outer_radius();
    let mut scene = Scene::new(config.background_color());

    scene.add(SceneNode::new(
        AMBIENT_LIGHT_NODE,
        SceneObject::AmbientLight {
            color: Color::WHITE,
            intensity: config.ambient_intensity,
        },
    ));
    scene.add(SceneNode::new(
        DIRECTIONAL_LIGHT_NODE,
        SceneObject::DirectionalLight {
            color: Color::WHITE,
            intensity: config.directional_intensity,
            position: Point3f::new(1.0, 1.0, 1.0) * (3.0 * radius),
        },
    ));

    let material = Material {
        color: config.material_color(),
        flat_shading: false,
        side: Side::Double,
    };
    scene.add(
        SceneNode::new(RING_NODE, SceneObject::Mesh { mesh: ring.mesh.clone(), material })
            .with_transform(ring.transform),
    );
    scene.add(
        SceneNode::new(
            EDGES_NODE,
            SceneObject::Lines {
                lines: ring.edges.clone(),
                color: config.edge_color(),
            },
        )
        .with_transform(ring.transform),
    );

    let mut grid = SceneNode::new(
        GRID_NODE,
        SceneObject::Lines {
            lines: grid_helper(
                grid_size(radius),
                config.grid_divisions,
                Color::from_hex(GRID_CENTER_COLOR),
                Color::from_hex(GRID_LINE_COLOR),
            ),
            color: Color::from_hex(GRID_LINE_COLOR),
        },
    );
    grid.visible = config.show_grid;
    scene.add(grid);

    let mut axes = SceneNode::new(
        AXES_NODE,
        SceneObject::Lines {
            lines: axes_helper(1.5 * radius),
            color: Color::WHITE,
        },
    );
    axes.visible = config.show_axes;
    scene.add(axes);

    scene
}

impl ViewerHandles {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// One animation tick: advance the controls, then draw
    pub fn animate(&mut self) -> Result<FrameStats> {
        self.controls.update(&mut self.camera);
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Follow the container's current size; false if it is gone or empty
    pub fn on_resize<H: Host + ?Sized>(&mut self, host: &H) -> bool {
        match host.container_size(&self.container_id) {
            Some((width, height)) if width > 0 && height > 0 => {
                self.camera.set_aspect(width, height);
                self.renderer.set_size(width, height);
                debug!(width, height, "viewer resized");
                true
            }
            _ => false,
        }
    }

    /// The placed ring as an ASCII STL document named after the part
    pub fn export_stl(&self) -> Result<String> {
        ringcrate_io::stl_ascii_string(&self.ring.world_mesh(), &self.params.part_id)
    }

    /// Write the ASCII STL to `{part_id}.stl` inside `dir`
    pub fn export_stl_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(format!("{}.stl", file_stem(&self.params.part_id)));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_stl_ascii(&self.ring.world_mesh(), &self.params.part_id, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "exported STL");
        Ok(path)
    }

    /// Caption shown next to the viewer
    pub fn label(&self) -> String {
        self.params.label()
    }
}

/// Part ids may contain characters that are not valid in file names
fn file_stem(part_id: &str) -> String {
    let stem: String = part_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "part".to_string()
    } else {
        stem
    }
}
