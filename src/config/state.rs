// src/config/state.rs
use std::{fs, path::Path};

use super::options::{accepts_upload, ReportOptions};
use crate::{error::ReportError, pipeline::RunOutcome};

/// An uploaded document: original file name plus raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Accepts only `.html`/`.htm` names; bytes are not inspected here.
    pub fn new<N: Into<String>>(name: N, bytes: Vec<u8>) -> Result<Self, ReportError> {
        let name = name.into();
        if !accepts_upload(&name) {
            return Err(ReportError::Upload(format!("{name} is not an .html file")));
        }
        Ok(Self { name, bytes })
    }

    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| ReportError::Upload(format!("{} has no file name", path.display())))?;
        if !accepts_upload(&name) {
            return Err(ReportError::Upload(format!("{name} is not an .html file")));
        }
        let bytes = fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Strict UTF-8 decode of the upload.
    pub fn html(&self) -> Result<String, ReportError> {
        Ok(String::from_utf8(self.bytes.clone())?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Processing,
}

/// Upload/convert state machine, independent of any UI toolkit.
///
/// Idle → Processing only through [`Session::begin`], never on upload.
/// Processing → Idle through [`Session::complete`], whatever the outcome.
#[derive(Debug)]
pub struct Session {
    upload: Option<Upload>,
    phase: Phase,
    outcome: Option<Result<RunOutcome, ReportError>>,
}

impl Default for Session {
    fn default() -> Self {
        Self { upload: None, phase: Phase::Idle, outcome: None }
    }
}

impl Session {
    pub fn phase(&self) -> Phase { self.phase }

    pub fn upload(&self) -> Option<&Upload> { self.upload.as_ref() }

    pub fn outcome(&self) -> Option<&Result<RunOutcome, ReportError>> { self.outcome.as_ref() }

    pub fn is_processing(&self) -> bool { self.phase == Phase::Processing }

    pub fn can_convert(&self) -> bool {
        self.phase == Phase::Idle && self.upload.is_some()
    }

    /// Replace the current upload. The previous run's outcome is dropped.
    pub fn accept_upload(&mut self, upload: Upload) -> Result<(), ReportError> {
        if self.is_processing() {
            return Err(ReportError::Busy);
        }
        logf!("Session: Upload accepted ({}, {} bytes)", upload.name, upload.bytes.len());
        self.upload = Some(upload);
        self.outcome = None;
        Ok(())
    }

    /// Explicit user confirmation. Returns the upload to process.
    pub fn begin(&mut self) -> Result<Upload, ReportError> {
        if self.is_processing() {
            return Err(ReportError::Busy);
        }
        let upload = self.upload.clone().ok_or(ReportError::NoUpload)?;
        self.phase = Phase::Processing;
        self.outcome = None;
        logd!("Session: Idle → Processing ({})", upload.name);
        Ok(upload)
    }

    pub fn complete(&mut self, outcome: Result<RunOutcome, ReportError>) {
        match &outcome {
            Ok(RunOutcome::Completed(report)) => {
                logf!("Session: Run finished → {}", report.pdf.display())
            }
            Ok(RunOutcome::NoTable) => logf!("Session: Run stopped, no table"),
            Err(e) => loge!("Session: Run failed: {}", e),
        }
        self.outcome = Some(outcome);
        self.phase = Phase::Idle;
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Path typed into the upload field
    pub upload_path_text: String,
    /// Destination for "Save report as…"
    pub save_path_text: String,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            upload_path_text: s!(),
            save_path_text: s!(),
            window_w: 1100,
            window_h: 800,
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub options: ReportOptions,
    pub session: Session,
    pub gui: GuiState,
}
