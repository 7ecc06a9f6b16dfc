//! Test helpers for writing request files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use pathfinder_core::{SequenceRequest, Stop, TimeOfDay, TimeWindow};
use std::fs;
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// A temporary directory and the request path inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

/// A small request around Alappuzha with one morning window.
pub(super) fn sample_request() -> SequenceRequest {
    let window = TimeWindow::closing_at(TimeOfDay::from_hm(11, 0).expect("valid time"));
    SequenceRequest::new(
        Stop::from_lat_lng(9.4981, 76.3388).with_address("Warehouse"),
        vec![
            Stop::from_lat_lng(9.5120, 76.3410).with_address("Boat Jetty"),
            Stop::from_lat_lng(9.4900, 76.3290)
                .with_address("Beach Road")
                .with_window(window),
            Stop::from_lat_lng(9.5030, 76.3500).with_address("Mullakkal"),
        ],
    )
}

/// Serialise `request` to `path`.
pub(super) fn write_request(path: &Utf8Path, request: &SequenceRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
