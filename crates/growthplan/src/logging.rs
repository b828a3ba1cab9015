use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size-based trimming of an append-only log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogRotation {
    /// Size past which the file is trimmed
    max_bytes: u64,
    /// Tail of the file that survives a trim
    keep_bytes: u64,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

impl LogRotation {
    /// Trim `path` to its most recent whole lines when it has outgrown
    /// `max_bytes`. Returns whether the file was rewritten.
    fn apply(&self, path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let mut tail = Vec::new();
        {
            let mut file = File::open(path)?;
            file.seek(SeekFrom::Start(len.saturating_sub(self.keep_bytes)))?;
            file.read_to_end(&mut tail)?;
        }

        let mut file = File::create(path)?;
        file.write_all(ROTATION_MARKER)?;
        file.write_all(whole_lines(&tail))?;
        Ok(true)
    }
}

/// `tail` without the partial line a byte offset may have cut into
fn whole_lines(tail: &[u8]) -> &[u8] {
    match tail.iter().position(|&b| b == b'\n') {
        Some(newline) => &tail[newline + 1..],
        None => tail,
    }
}

/// Where formatted events end up
#[derive(Clone)]
enum LogTarget {
    Stderr,
    File(Arc<Mutex<File>>),
}

impl LogTarget {
    fn open(path: &Path, rotation: LogRotation) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if let Err(err) = rotation.apply(path) {
            eprintln!("Warning: could not rotate log file {}: {err}", path.display());
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File(Arc::new(Mutex::new(file))))
    }
}

/// Per-event writer handed out by `LogTarget`
enum LogSink {
    Stderr(io::Stderr),
    File(Arc<Mutex<File>>),
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(stderr) => stderr.write(buf),
            // A panic mid-write leaves the file usable, so a poisoned lock is recovered
            Self::File(file) => file.lock().unwrap_or_else(PoisonError::into_inner).write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(stderr) => stderr.flush(),
            Self::File(file) => file.lock().unwrap_or_else(PoisonError::into_inner).flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogTarget {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            Self::Stderr => LogSink::Stderr(io::stderr()),
            Self::File(file) => LogSink::File(Arc::clone(file)),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("growthplan={level},growthplan_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize logging.
///
/// Without a log file, events go to stderr so they never mix with projection
/// output on stdout. With one, they are appended to that file, which is
/// trimmed back to its last 1MB whenever it exceeds 5MB. `RUST_LOG` overrides
/// `level` when set.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let target = match log_file {
        Some(path) => LogTarget::open(path, LogRotation::default())?,
        None => LogTarget::Stderr,
    };
    let to_file = matches!(target, LogTarget::File(_));

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(target)
                .with_ansi(!to_file)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    match log_file {
        Some(path) => tracing::info!(log_path = %path.display(), "growthplan logging initialized"),
        None => tracing::debug!("growthplan logging initialized"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation(max_bytes: u64, keep_bytes: u64) -> LogRotation {
        LogRotation {
            max_bytes,
            keep_bytes,
        }
    }

    #[test]
    fn test_small_log_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growthplan.log");
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!rotation(1024, 512).apply(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!rotation(10, 5).apply(&dir.path().join("absent.log")).unwrap());
    }

    #[test]
    fn test_large_log_keeps_recent_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growthplan.log");
        let content: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &content).unwrap();

        // Each line is 9 bytes; keeping 40 bytes cuts into a line
        assert!(rotation(100, 40).apply(&path).unwrap());

        let rotated = fs::read_to_string(&path).unwrap();
        let mut lines = rotated.lines();
        assert_eq!(
            lines.next(),
            Some("--- Log rotated (older entries removed) ---")
        );
        let kept: Vec<&str> = lines.collect();
        assert_eq!(kept, ["line 096", "line 097", "line 098", "line 099"]);
    }

    #[test]
    fn test_whole_lines_without_newline_keeps_everything() {
        assert_eq!(whole_lines(b"partial"), b"partial");
        assert_eq!(whole_lines(b"cut\nkept\n"), b"kept\n");
    }

    #[test]
    fn test_file_target_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("growthplan.log");

        let target = LogTarget::open(&path, LogRotation::default()).unwrap();
        let mut sink = target.make_writer();
        sink.write_all(b"hello\n").unwrap();
        sink.flush().unwrap();

        assert!(matches!(target, LogTarget::File(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
