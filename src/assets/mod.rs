//! Asset access for mesh video recordings.
//!
//! - [`AssetReader`] / [`FileAssetReader`]: raw bytes of a recording folder
//! - [`MeshSource`]: turns a path into a [`MeshFragment`] of frame meshes
//! - [`GltfMeshSource`]: the glTF-backed mesh source
//! - [`MemoryMeshSource`]: prepared fragments, for tests and headless runs
//!
//! Loads run on a lazily created background runtime so the frame loop never
//! blocks on IO.

pub mod io;
pub mod loaders;
pub mod source;

pub use io::{AssetReader, FileAssetReader};
pub use loaders::GltfMeshSource;
pub use source::{FragmentItem, MemoryMeshSource, MeshFragment, MeshSource};

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::Runtime;

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}

/// Runs `future` to completion on the asset runtime, detached.
pub(crate) fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(get_asset_runtime().spawn(future));
}

/// Blocks the calling thread on `future` using the asset runtime.
///
/// Must not be called from inside the asset runtime itself.
pub fn block_on<F: Future>(future: F) -> F::Output {
    get_asset_runtime().block_on(future)
}
