//! Asset loading
//!
//! The registry only needs "give me a model tree for this path, eventually".
//! [`FileAssetLoader`] answers that from OBJ and STL files on disk; tests
//! plug in their own loaders.

use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use orbit_core::{MeshError, MeshFormat, MeshUnit, load_mesh};
use orbit_scene::Prefab;
use tracing::debug;

use crate::error::AssetError;

/// Progress callback: `(loaded, total)` in bytes; `total` is 0 when unknown
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Asynchronous source of model trees
pub trait AssetLoader: Send + Sync {
    /// Fetch and parse the asset at `path`.
    ///
    /// The returned future owns everything it needs, so it can outlive the
    /// call and be polled from an event loop tick.
    fn load(
        &self,
        path: &str,
        progress: ProgressFn,
    ) -> BoxFuture<'static, Result<Prefab, AssetError>>;
}

/// Extensions tried, in order, when a path names a format that cannot be
/// parsed (for example `.glb` entries of the module catalog)
const FALLBACK_EXTENSIONS: &[&str] = &["obj", "stl"];

/// Loads OBJ and STL files below a root directory
#[derive(Debug, Clone)]
pub struct FileAssetLoader {
    root: PathBuf,
    unit: MeshUnit,
}

impl FileAssetLoader {
    pub fn new(root: impl Into<PathBuf>, unit: MeshUnit) -> Self {
        Self {
            root: root.into(),
            unit,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a catalog path such as `/models/SS_BUM_Roof.glb` to a readable
    /// file below the root
    pub fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        let candidate = self.root.join(path.trim_start_matches('/'));
        if MeshFormat::from_path(&candidate).is_supported() {
            if candidate.is_file() {
                return Ok(candidate);
            }
            return Err(AssetError::NotFound(path.to_string()));
        }

        FALLBACK_EXTENSIONS
            .iter()
            .map(|ext| candidate.with_extension(ext))
            .find(|p| p.is_file())
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

impl AssetLoader for FileAssetLoader {
    fn load(
        &self,
        path: &str,
        progress: ProgressFn,
    ) -> BoxFuture<'static, Result<Prefab, AssetError>> {
        let resolved = self.resolve(path);
        let unit = self.unit;
        let path = path.to_string();

        async move {
            let file = resolved?;
            let total = std::fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
            progress(0, total);

            let loaded = load_mesh(&file, unit).map_err(|e| asset_error(&path, e))?;
            debug!(
                "Parsed {} ({} parts, {} vertices)",
                file.display(),
                loaded.parts.len(),
                loaded.vertex_count()
            );
            progress(total, total);

            Ok(Prefab::from_loaded_mesh(&loaded))
        }
        .boxed()
    }
}

fn asset_error(path: &str, err: MeshError) -> AssetError {
    match err {
        MeshError::Io(message) => AssetError::Io {
            path: path.to_string(),
            message,
        },
        other => AssetError::Parse {
            path: path.to_string(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CUBE_OBJ: &str = "o cube
v 0 0 0
v 2 0 0
v 2 2 0
v 0 2 0
v 0 0 2
v 2 0 2
v 2 2 2
v 0 2 2
f 1 2 3
f 1 3 4
f 5 6 7
f 5 7 8
";

    fn write_models(dir: &Path) {
        std::fs::create_dir_all(dir.join("models")).unwrap();
        std::fs::write(dir.join("models/SS_Test.obj"), CUBE_OBJ).unwrap();
    }

    #[test]
    fn test_resolve_falls_back_to_obj() {
        let dir = tempfile::tempdir().unwrap();
        write_models(dir.path());
        let loader = FileAssetLoader::new(dir.path(), MeshUnit::Meters);

        let resolved = loader.resolve("/models/SS_Test.glb").unwrap();
        assert_eq!(resolved, dir.path().join("models/SS_Test.obj"));
    }

    #[test]
    fn test_resolve_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileAssetLoader::new(dir.path(), MeshUnit::Meters);

        assert!(matches!(
            loader.resolve("/models/Nope.glb"),
            Err(AssetError::NotFound(p)) if p == "/models/Nope.glb"
        ));
        assert!(matches!(
            loader.resolve("/models/Nope.obj"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_obj_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        write_models(dir.path());
        let loader = FileAssetLoader::new(dir.path(), MeshUnit::Meters);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let prefab = pollster::block_on(loader.load(
            "/models/SS_Test.glb",
            Box::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ))
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(prefab.root.children.len(), 1);
        let bounds = prefab.bounds().unwrap();
        assert_eq!(bounds.size(), glam::Vec3::splat(2.0));
    }

    #[test]
    fn test_load_missing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileAssetLoader::new(dir.path(), MeshUnit::Meters);

        let result = pollster::block_on(loader.load("/models/Nope.glb", Box::new(|_, _| {})));
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_load_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.obj"), "this is not a mesh\n").unwrap();
        let loader = FileAssetLoader::new(dir.path(), MeshUnit::Meters);

        let result = pollster::block_on(loader.load("broken.obj", Box::new(|_, _| {})));
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }
}
