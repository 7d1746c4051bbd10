mod input;
mod report;

use clap::Parser;
use pillarnms::{ClassMode, ClassNames, NmsConfig, PostProcessor, RawBoxes};
use report::ReportFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "PointPillars box post-processing (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
    /// IoU threshold for suppression.
    #[arg(short = 't', long, value_name = "IOU")]
    nms_iou_thresh: Option<f32>,
    /// Number of top-scored candidates considered.
    #[arg(short = 'n', long, value_name = "N")]
    pre_nms_top_n: Option<usize>,
    /// Comma-separated class names, e.g. "Car,Pedestrian,Cyclist".
    #[arg(short = 'c', long, value_name = "NAMES")]
    class_names: Option<String>,
    /// Raw candidate dump (little-endian f32, nine values per box).
    #[arg(short = 'l', long, value_name = "FILE")]
    candidates: Option<PathBuf>,
    /// Directory for the saved prediction file.
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum ClassModeConfig {
    #[default]
    Agnostic,
    PerClass,
}

impl From<ClassModeConfig> for ClassMode {
    fn from(value: ClassModeConfig) -> Self {
        match value {
            ClassModeConfig::Agnostic => ClassMode::Agnostic,
            ClassModeConfig::PerClass => ClassMode::PerClass,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    candidates_path: String,
    candidate_count: Option<usize>,
    output_dir: Option<String>,
    class_names: Vec<String>,
    nms_iou_thresh: f32,
    pre_nms_top_n: usize,
    class_mode: ClassModeConfig,
    parallel: bool,
    report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = NmsConfig::default();
        Self {
            candidates_path: String::new(),
            candidate_count: None,
            output_dir: None,
            class_names: Vec::new(),
            nms_iou_thresh: cfg.iou_threshold,
            pre_nms_top_n: cfg.max_output,
            class_mode: ClassModeConfig::Agnostic,
            parallel: cfg.parallel,
            report_format: ReportFormat::Text,
        }
    }
}

impl Config {
    fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let config = serde_json::from_str(&text)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) -> pillarnms::Result<()> {
        if let Some(thresh) = cli.nms_iou_thresh {
            self.nms_iou_thresh = thresh;
        }
        if let Some(top_n) = cli.pre_nms_top_n {
            self.pre_nms_top_n = top_n;
        }
        if let Some(list) = &cli.class_names {
            self.class_names = ClassNames::parse_list(list)?.iter().map(str::to_owned).collect();
        }
        if let Some(path) = &cli.candidates {
            self.candidates_path = path.to_string_lossy().into_owned();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = Some(dir.to_string_lossy().into_owned());
        }
        Ok(())
    }

    fn nms_config(&self) -> NmsConfig {
        NmsConfig::new(self.nms_iou_thresh, self.pre_nms_top_n)
            .with_class_mode(self.class_mode.into())
            .with_parallel(self.parallel)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("pillarnms=info".parse()?)
                    .add_directive("pillarnms_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_overrides(&cli)?;

    if config.candidates_path.is_empty() {
        return Err("candidates_path must be set in the config or with --candidates".into());
    }
    if config.class_names.is_empty() {
        return Err("class_names must be set in the config or with --class-names".into());
    }

    let class_names = ClassNames::new(config.class_names.iter().map(String::as_str))?;
    let processor = PostProcessor::new(config.nms_config(), class_names)?;

    let candidates_path = PathBuf::from(&config.candidates_path);
    tracing::info!(path = %candidates_path.display(), "loading candidates");
    let values = input::load_candidates(&candidates_path)?;
    let raw = match config.candidate_count {
        Some(count) => RawBoxes::new(&values, count)?,
        None => RawBoxes::from_slice(&values)?,
    };

    let start = Instant::now();
    let detections = processor.process(raw)?;
    let elapsed = start.elapsed();
    tracing::info!(
        candidates = raw.len(),
        kept = detections.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "post-processing done"
    );

    for det in &detections {
        println!("{}", report::console_line(det));
    }

    if let Some(dir) = &config.output_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir).map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
        let path = report::report_path(dir, &candidates_path, config.report_format);
        let body = report::render(&detections, config.report_format)?;
        fs::write(&path, body).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), "saved predictions");
    }

    Ok(())
}
