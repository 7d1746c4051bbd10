//! Console lines and saved prediction files.

use pillarnms::Detection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetectionRecord<'a> {
    label: &'a str,
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    l: f32,
    h: f32,
    rt: f32,
    id: u32,
    score: f32,
}

impl<'a> From<&'a Detection> for DetectionRecord<'a> {
    fn from(value: &'a Detection) -> Self {
        let b = &value.bbox;
        Self {
            label: &value.label,
            x: b.x(),
            y: b.y(),
            z: b.z(),
            w: b.width(),
            l: b.length(),
            h: b.height(),
            rt: b.heading(),
            id: b.class_id(),
            score: b.score(),
        }
    }
}

/// `label, x, y, z, w, l, h, rt, score` with six decimals.
pub fn console_line(det: &Detection) -> String {
    let b = &det.bbox;
    format!(
        "{}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}",
        det.label,
        b.x(),
        b.y(),
        b.z(),
        b.width(),
        b.length(),
        b.height(),
        b.heading(),
        b.score()
    )
}

/// `x y z w l h rt id score`, one box per line.
pub fn text_report(detections: &[Detection]) -> String {
    let mut out = String::new();
    for det in detections {
        let r = det.bbox.to_raw();
        let fields: Vec<String> = r[..7].iter().map(f32::to_string).collect();
        out.push_str(&fields.join(" "));
        out.push_str(&format!(" {} {}\n", det.bbox.class_id(), r[8]));
    }
    out
}

pub fn json_report(detections: &[Detection]) -> serde_json::Result<String> {
    let records: Vec<DetectionRecord<'_>> = detections.iter().map(DetectionRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

pub fn render(detections: &[Detection], format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(text_report(detections)),
        ReportFormat::Json => json_report(detections),
    }
}

/// `<output_dir>/<input stem>.<ext>`.
pub fn report_path(output_dir: &Path, input: &Path, format: ReportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "candidates".to_owned());
    output_dir.join(format!("{stem}.{}", format.extension()))
}
