// src/progress.rs
/// Step-by-step progress reporting for a report run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of pipeline steps.
    fn begin(&mut self, _steps: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one pipeline step completes.
    fn step_done(&mut self, _step: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every status line; handy for headless callers and tests.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub steps: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn step_done(&mut self, step: &str) { self.steps.push(s!(step)); }
    fn finish(&mut self) { self.finished = true; }
}
