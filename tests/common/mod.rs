#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use shiftsync_test_utils::init_tracing;

/// Write `contents` to a fresh temp file that lives as long as the handle.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
