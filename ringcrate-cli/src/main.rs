use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ringcrate_core::RingParams;
use ringcrate_geometry::{perturbed_boundary, RingOptions, ToleranceRing};
use ringcrate_io::{export_mesh, ExportFormat};
use ringcrate_visualization::{container_id, mount, placeholder_markup, MemoryHost, ViewerConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ringcrate")]
#[command(about = "Tolerance ring modelling, viewing and export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a ring and write it as STL or OBJ
    Export {
        #[command(flatten)]
        part: PartArgs,
        /// Output layout
        #[arg(short, long, value_enum, default_value = "stl")]
        format: Format,
        /// Output file (defaults to `<part id>.<ext>` in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Segments used for the bore circle
        #[arg(long, default_value = "64")]
        bore_segments: u32,
    },

    /// Print the loading placeholder markup for a part
    Placeholder {
        #[command(flatten)]
        part: PartArgs,
    },

    /// Start a headless viewer, render one frame and dump the scene as JSON
    Scene {
        #[command(flatten)]
        part: PartArgs,
        /// Viewer settings (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Container width in pixels
        #[arg(long, default_value = "800")]
        viewport_width: u32,
        /// Container height in pixels
        #[arg(long, default_value = "600")]
        viewport_height: u32,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the sampled outer boundary
    Profile {
        /// Base radius
        #[arg(short, long, default_value = "14")]
        radius: f32,
        /// Number of waves
        #[arg(short, long, default_value = "18")]
        waves: u32,
        /// Print a JSON array instead of `x y` lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// ASCII STL
    Stl,
    /// Binary STL
    Stlb,
    /// Wavefront OBJ
    Obj,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Stl => ExportFormat::StlAscii,
            Format::Stlb => ExportFormat::StlBinary,
            Format::Obj => ExportFormat::Obj,
        }
    }
}

/// Part parameters: an optional JSON file, then individual overrides
#[derive(Args, Debug, Default)]
struct PartArgs {
    /// Part parameters (JSON); flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,
    #[arg(long)]
    part_id: Option<String>,
    /// Bore diameter in mm
    #[arg(long)]
    bore: Option<f32>,
    /// Ring width in mm
    #[arg(long)]
    width: Option<f32>,
    /// Wall thickness in mm
    #[arg(long)]
    thickness: Option<f32>,
    #[arg(long)]
    waves: Option<u32>,
}

impl PartArgs {
    fn resolve(&self) -> Result<RingParams> {
        let mut params = match &self.params {
            Some(path) => RingParams::load(path)
                .with_context(|| format!("reading part parameters from {}", path.display()))?,
            None => RingParams::default(),
        };
        if let Some(id) = &self.part_id {
            params.part_id = id.clone();
        }
        if let Some(bore) = self.bore {
            params.bore_diameter = bore;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(thickness) = self.thickness {
            params.wall_thickness = thickness;
        }
        if let Some(waves) = self.waves {
            params.wave_count = waves;
        }
        params.validate()?;
        Ok(params)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export { part, format, output, bore_segments } => {
            let params = part.resolve()?;
            let options = RingOptions {
                bore_segments,
                ..RingOptions::default()
            };
            let ring = ToleranceRing::build(&params, &options)?;
            let format = ExportFormat::from(format);
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("{}.{}", params.part_id, format.extension())));
            export_mesh(&ring.world_mesh(), &path, format)?;
            info!(path = %path.display(), faces = ring.mesh.face_count(), "export complete");
            println!("{}", path.display());
        }
        Commands::Placeholder { part } => {
            let params = part.resolve()?;
            println!(
                "<div id=\"{}\" class=\"ring-viewer\">{}</div>",
                container_id(&params.part_id),
                placeholder_markup(&params)
            );
        }
        Commands::Scene { part, config, viewport_width, viewport_height, output } => {
            let params = part.resolve()?;
            let config = match config {
                Some(path) => ViewerConfig::load(&path)
                    .with_context(|| format!("reading viewer config from {}", path.display()))?,
                None => ViewerConfig::default(),
            };

            let mut host = MemoryHost::new();
            host.add_container("page", viewport_width, viewport_height);
            let Some(pending) = mount(&mut host, "page", &params) else {
                bail!("page container is missing");
            };
            let Some(mut viewer) = pending.initialize(&mut host, &config)? else {
                bail!("viewer container disappeared before start-up");
            };
            let stats = viewer.animate()?;
            info!(draws = stats.draw_calls, triangles = stats.triangles, "rendered frame");

            let json = viewer.scene.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "scene written");
                }
                None => println!("{}", json),
            }
        }
        Commands::Profile { radius, waves, json } => {
            let points = perturbed_boundary(radius, waves);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json {
                let pairs: Vec<[f32; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&pairs)?)?;
            } else {
                for p in &points {
                    writeln!(out, "{:.6} {:.6}", p.x, p.y)?;
                }
            }
        }
    }

    Ok(())
}
