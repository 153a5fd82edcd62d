// src/log.rs
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

use crate::config::consts::{DEFAULT_LOG_FILTER, LOG_FILE_NAME};

static INIT: OnceLock<()> = OnceLock::new();

// Current log file; `None` until a directory could be opened.
static SINK: Mutex<Option<(PathBuf, File)>> = Mutex::new(None);

/// `<out_dir>/debug.log`
pub fn log_path(out_dir: &Path) -> PathBuf {
    out_dir.join(LOG_FILE_NAME)
}

/// Install the file logger writing into `out_dir`. Safe to call more than
/// once; only the first call installs a subscriber, later calls just move
/// the log (see [`set_dir`]). Failing to open the log file is not fatal:
/// the frontends keep running without a log.
pub fn init(out_dir: &Path) {
    set_dir(out_dir);
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Sink)
            .try_init();
    });
}

/// Append further log lines to `<out_dir>/debug.log`. A no-op when that is
/// already the current file.
pub fn set_dir(out_dir: &Path) {
    let path = log_path(out_dir);
    let Ok(mut sink) = SINK.lock() else { return };
    if sink.as_ref().is_some_and(|(current, _)| *current == path) {
        return;
    }
    if !out_dir.as_os_str().is_empty() {
        let _ = fs::create_dir_all(out_dir);
    }
    // Keep the previous file if the new one can't be opened
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        *sink = Some((path, file));
    }
}

struct Sink;

struct SinkWriter;

impl<'a> MakeWriter<'a> for Sink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> SinkWriter {
        SinkWriter
    }
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SINK.lock() {
            Ok(mut sink) => match sink.as_mut() {
                Some((_, file)) => file.write(buf),
                None => Ok(buf.len()),
            },
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match SINK.lock() {
            Ok(mut sink) => sink.as_mut().map_or(Ok(()), |(_, file)| file.flush()),
            Err(_) => Ok(()),
        }
    }
}
