use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::patcher::{self, PatchError};
use crate::payload::{self, PayloadSource};

#[derive(Clone, Debug)]
pub struct Options {
    pub target: String,
    pub marker: String,
    pub payload: PayloadSource,
    pub dry_run: bool,
    pub skip_if_present: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target: String::new(),
            marker: patcher::DEFAULT_MARKER.to_string(),
            payload: PayloadSource::Embedded,
            dry_run: false,
            skip_if_present: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no target document provided")]
    NoTarget,

    #[error("marker is empty")]
    EmptyMarker,

    #[error("payload is empty")]
    EmptyPayload,

    #[error("failed to read {kind}: {path}: {source}")]
    FileRead {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write target: {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{source} in {path}")]
    Patch {
        path: String,
        #[source]
        source: PatchError,
    },
}

impl RunnerError {
    pub fn is_marker_not_found(&self) -> bool {
        matches!(
            self,
            RunnerError::Patch {
                source: PatchError::MarkerNotFound { .. },
                ..
            }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchStatus {
    Patched,
    DryRun,
    AlreadyPresent,
}

impl PatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchStatus::Patched => "patched",
            PatchStatus::DryRun => "dry-run",
            PatchStatus::AlreadyPresent => "already-present",
        }
    }

    pub fn wrote_file(&self) -> bool {
        matches!(self, PatchStatus::Patched)
    }
}

#[derive(Clone, Debug)]
pub struct PatchOutcome {
    pub target: String,
    pub marker: String,
    pub payload_source: String,
    pub status: PatchStatus,
    /// `None` when nothing was spliced.
    pub marker_index: Option<usize>,
    pub payload_bytes: usize,
    pub bytes_before: usize,
    pub bytes_after: usize,
    pub elapsed: Duration,
    pub document: String,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.target.trim().is_empty() {
            return Err(RunnerError::NoTarget);
        }
        if options.marker.is_empty() {
            return Err(RunnerError::EmptyMarker);
        }
        if let PayloadSource::Inline(text) = &options.payload {
            if text.is_empty() {
                return Err(RunnerError::EmptyPayload);
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Reads the target, splices the payload before the last marker and
    /// overwrites the target in place.
    ///
    /// The file is left untouched when the marker is missing. There is no
    /// backup and no atomic replace: a failure during the write can leave a
    /// truncated document behind.
    pub fn run(&self) -> Result<PatchOutcome, RunnerError> {
        let started_at = Instant::now();
        let opts = &self.options;

        let payload = payload::load_payload(&opts.payload)?;
        if payload.is_empty() {
            return Err(RunnerError::EmptyPayload);
        }

        let original =
            std::fs::read_to_string(&opts.target).map_err(|e| RunnerError::FileRead {
                kind: "target",
                path: opts.target.clone(),
                source: e,
            })?;
        debug!(path = %opts.target, bytes = original.len(), "read target document");

        if opts.skip_if_present && patcher::contains_payload(&original, &payload) {
            warn!(path = %opts.target, "payload already present, leaving document unchanged");
            return Ok(PatchOutcome {
                target: opts.target.clone(),
                marker: opts.marker.clone(),
                payload_source: opts.payload.label(),
                status: PatchStatus::AlreadyPresent,
                marker_index: None,
                payload_bytes: payload.len(),
                bytes_before: original.len(),
                bytes_after: original.len(),
                elapsed: started_at.elapsed(),
                document: original,
            });
        }

        let splice = patcher::splice_before_last(&original, &opts.marker, &payload).map_err(
            |source| RunnerError::Patch {
                path: opts.target.clone(),
                source,
            },
        )?;
        debug!(
            index = splice.index,
            inserted = splice.inserted,
            "spliced payload before last marker"
        );

        let status = if opts.dry_run {
            PatchStatus::DryRun
        } else {
            std::fs::write(&opts.target, splice.document.as_bytes()).map_err(|e| {
                RunnerError::FileWrite {
                    path: opts.target.clone(),
                    source: e,
                }
            })?;
            PatchStatus::Patched
        };
        info!(path = %opts.target, status = status.as_str(), "patch complete");

        Ok(PatchOutcome {
            target: opts.target.clone(),
            marker: opts.marker.clone(),
            payload_source: opts.payload.label(),
            status,
            marker_index: Some(splice.index),
            payload_bytes: splice.inserted,
            bytes_before: original.len(),
            bytes_after: splice.document.len(),
            elapsed: started_at.elapsed(),
            document: splice.document,
        })
    }
}
