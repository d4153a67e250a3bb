//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use hostel::http::connection::Transport;
use hostel::logger::Logger;

static NEXT_ROOT: AtomicUsize = AtomicUsize::new(0);

/// A throwaway document root under the system temp dir, removed on drop.
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!(
            "hostel-test-{}-{}",
            std::process::id(),
            NEXT_ROOT.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `<root>/<host>/<rel>`, creating parent directories.
    pub fn write(&self, host: &str, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let file = self.path.join(host).join(rel);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, contents).unwrap();
        file
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Collects every logged line.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count(&self, message: &str) -> usize {
        self.lines().iter().filter(|line| *line == message).count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

/// In-memory stream: reads come from `input`, writes land in a shared buffer
/// that outlives the connection.
pub struct MockStream {
    input: Cursor<Vec<u8>>,
    pub output: Arc<Mutex<Vec<u8>>>,
    pub reads: Arc<AtomicUsize>,
    pub fail_reads: bool,
}

impl MockStream {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Cursor::new(input.into()),
            output: Arc::new(Mutex::new(Vec::new())),
            reads: Arc::new(AtomicUsize::new(0)),
            fail_reads: false,
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        }
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for MockStream {}
