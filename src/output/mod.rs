use serde::Serialize;

use crate::runner::PatchOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PatchRecord {
    pub target: String,
    pub status: String,
    pub marker: String,
    pub marker_index: Option<usize>,
    pub payload_source: String,
    pub payload_bytes: usize,
    pub bytes_before: usize,
    pub bytes_after: usize,
    pub written: bool,
    pub elapsed_ms: u128,
}

pub fn build_record(outcome: &PatchOutcome) -> PatchRecord {
    PatchRecord {
        target: outcome.target.clone(),
        status: outcome.status.as_str().to_string(),
        marker: outcome.marker.clone(),
        marker_index: outcome.marker_index,
        payload_source: outcome.payload_source.clone(),
        payload_bytes: outcome.payload_bytes,
        bytes_before: outcome.bytes_before,
        bytes_after: outcome.bytes_after,
        written: outcome.status.wrote_file(),
        elapsed_ms: outcome.elapsed.as_millis(),
    }
}

fn kv_line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(":: {:<10}: {}\n", label, value));
}

pub fn render_text(record: &PatchRecord) -> Vec<u8> {
    let mut out = String::new();
    kv_line(&mut out, "Target", &record.target);
    kv_line(&mut out, "Status", &record.status);
    kv_line(&mut out, "Marker", &record.marker);
    let index = record
        .marker_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string());
    kv_line(&mut out, "Offset", &index);
    kv_line(&mut out, "Payload", &record.payload_source);
    kv_line(
        &mut out,
        "Size",
        &format!(
            "{} -> {} bytes (+{})",
            record.bytes_before,
            record.bytes_after,
            record.bytes_after - record.bytes_before
        ),
    );
    out.into_bytes()
}

pub fn render_json(record: &PatchRecord) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(record).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn render(format: OutputFormat, record: &PatchRecord) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(record),
        OutputFormat::Json => render_json(record),
    }
}
