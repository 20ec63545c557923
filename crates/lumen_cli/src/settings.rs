//! Render settings: JSON file defaults overlaid with command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lumen_renderer::{Background, Color, RenderConfig, Schedule, DEFAULT_BUCKET_SIZE};
use serde::Deserialize;

use crate::scenes::SceneName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleArg {
    #[default]
    Dynamic,
    Batched,
    Tiled,
}

#[derive(Debug, Parser)]
#[command(name = "lumen", author, version, about = "CPU path tracer", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "JSON settings file; flags override its values")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Built-in scene to render")]
    pub scene: Option<SceneName>,

    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,
    #[arg(long, help = "Image height in pixels")]
    pub height: Option<u32>,
    #[arg(short, long, help = "Samples per pixel")]
    pub samples: Option<u32>,
    #[arg(short, long, help = "Maximum bounces per path")]
    pub depth: Option<u32>,

    #[arg(short, long, help = "Worker threads")]
    pub threads: Option<u32>,
    #[arg(long, value_enum, help = "How work is split between threads")]
    pub schedule: Option<ScheduleArg>,
    #[arg(long, help = "Bucket edge in pixels for the tiled schedule")]
    pub bucket_size: Option<u32>,
    #[arg(long, help = "Base seed for reproducible renders")]
    pub seed: Option<u64>,

    #[arg(short, long, help = "Output image (.ppm or .png)")]
    pub output: Option<PathBuf>,
}

/// Everything needed to run one render.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scene: SceneName,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub depth: u32,
    /// Defaults to the available parallelism
    pub threads: Option<u32>,
    pub schedule: ScheduleArg,
    pub bucket_size: u32,
    pub seed: Option<u64>,
    /// Solid background color; the sky gradient when absent
    pub background: Option<[f64; 3]>,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneName::default(),
            width: 480,
            height: 270,
            samples: 10,
            depth: 5,
            threads: None,
            schedule: ScheduleArg::default(),
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: None,
            background: None,
            output: PathBuf::from("output.ppm"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings)
    }

    /// File settings (or defaults) with any flags given on the command line applied.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply(cli);
        Ok(settings)
    }

    pub fn apply(&mut self, cli: &Cli) {
        if let Some(scene) = cli.scene {
            self.scene = scene;
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(samples) = cli.samples {
            self.samples = samples;
        }
        if let Some(depth) = cli.depth {
            self.depth = depth;
        }
        if cli.threads.is_some() {
            self.threads = cli.threads;
        }
        if let Some(schedule) = cli.schedule {
            self.schedule = schedule;
        }
        if let Some(bucket_size) = cli.bucket_size {
            self.bucket_size = bucket_size;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        let schedule = match self.schedule {
            ScheduleArg::Dynamic => Schedule::Dynamic,
            ScheduleArg::Batched => Schedule::Batched,
            ScheduleArg::Tiled => Schedule::Tiled {
                bucket_size: self.bucket_size,
            },
        };
        let background = match self.background {
            Some([r, g, b]) => Background::Solid(Color::new(r, g, b)),
            None => Background::Sky,
        };

        RenderConfig {
            threads: self.threads.unwrap_or(defaults.threads),
            schedule,
            background,
            seed: self.seed,
        }
    }
}
