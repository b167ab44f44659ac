use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::DesignAsset;
use crate::error::{ImprintError, ImprintResult};

/// File extensions the store recognizes as loadable design graphics.
const PRESET_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];

/// Reference to one preset graphic inside a store directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PresetRef {
    /// Display name, the file stem.
    pub name: String,
    /// Path relative to the store root, `/`-separated.
    pub rel_path: String,
}

/// Directory-backed store of preset design graphics.
///
/// The listing is captured at open time and sorted by file name, so it is
/// stable across platforms regardless of directory iteration order.
#[derive(Clone, Debug)]
pub struct PresetStore {
    root: PathBuf,
    presets: Vec<PresetRef>,
}

impl PresetStore {
    /// Scan `root` for preset graphics.
    ///
    /// Files with unrecognized extensions and subdirectories are skipped; a
    /// missing or unreadable directory fails with
    /// [`ImprintError::NotFound`].
    pub fn open(root: impl Into<PathBuf>) -> ImprintResult<Self> {
        let root = root.into();
        let entries = std::fs::read_dir(&root).map_err(|e| {
            ImprintError::not_found(format!("preset directory '{}': {e}", root.display()))
        })?;

        let mut presets = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("read preset directory '{}'", root.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !PRESET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name)
                .to_string();
            presets.push(PresetRef {
                name,
                rel_path: file_name.to_string(),
            });
        }
        presets.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

        Ok(Self { root, presets })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Presets in stable name order.
    pub fn list(&self) -> &[PresetRef] {
        &self.presets
    }

    /// Load and decode one preset.
    ///
    /// The file is re-read on every call; a preset deleted since the scan
    /// fails with [`ImprintError::NotFound`].
    pub fn load(&self, preset: &PresetRef) -> ImprintResult<DesignAsset> {
        load_source(&self.root, &preset.rel_path, None)
    }
}

/// Read and decode an asset source (raster or SVG) relative to `root`.
pub fn load_source(
    root: &Path,
    source: &str,
    raster_width: Option<u32>,
) -> ImprintResult<DesignAsset> {
    let rel = normalize_rel_path(source)?;
    let path = root.join(Path::new(&rel));
    let bytes = std::fs::read(&path)
        .map_err(|e| ImprintError::not_found(format!("asset '{}': {e}", path.display())))?;
    DesignAsset::from_payload(&bytes, raster_width)
}

/// Normalize and validate a store-relative path.
///
/// The result uses `/` separators and drops `.` segments; absolute paths,
/// empty paths and parent traversal (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> ImprintResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(ImprintError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(ImprintError::validation("asset paths must be relative"));
    }

    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(ImprintError::validation("asset paths must not contain '..'"));
            }
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return Err(ImprintError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(parts.join("/"))
}
