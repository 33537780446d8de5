// Copyright 2026 Cornell University
// released under MIT License

use crate::errors::Result;
use crate::request::RenderRequest;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the payload of every request to `<out_dir>/<file_name>`,
/// creating `out_dir` if needed. Returns the paths that were written.
pub fn write_outputs(out_dir: impl AsRef<Path>, requests: &[RenderRequest]) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(requests.len());
    for request in requests {
        let path = out_dir.join(request.file_name());
        fs::write(&path, request.payload()?)?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
