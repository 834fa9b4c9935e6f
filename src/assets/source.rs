//! Mesh sources: where a track's frames come from.

use std::future::Future;

use rustc_hash::FxHashMap;

use crate::errors::{MeshVideoError, Result};
use crate::resources::mesh::Mesh;

/// One child of the loaded scene fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentItem {
    /// A drawable frame; its name encodes the frame index.
    Mesh(Mesh),
    /// A node that carries no geometry (e.g. a frame where nothing was
    /// captured). Ignored by tracks.
    Empty { name: String },
}

impl FragmentItem {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Mesh(mesh) => &mesh.name,
            Self::Empty { name } => name,
        }
    }
}

/// The children of the first root node of a loaded asset, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshFragment {
    pub items: Vec<FragmentItem>,
}

impl MeshFragment {
    #[must_use]
    pub fn new(items: Vec<FragmentItem>) -> Self {
        Self { items }
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.items.iter().filter_map(|item| match item {
            FragmentItem::Mesh(mesh) => Some(mesh),
            FragmentItem::Empty { .. } => None,
        })
    }
}

/// Loads a scene fragment for a path.
pub trait MeshSource: Send + Sync + 'static {
    fn load(&self, path: &str) -> impl Future<Output = Result<MeshFragment>> + Send;
}

// ============================================================================
// In-memory source
// ============================================================================

/// Serves prepared fragments keyed by path. Unknown paths fail with
/// [`MeshVideoError::AssetNotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryMeshSource {
    fragments: FxHashMap<String, MeshFragment>,
}

impl MemoryMeshSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fragment(mut self, path: impl Into<String>, fragment: MeshFragment) -> Self {
        self.insert(path, fragment);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, fragment: MeshFragment) {
        self.fragments.insert(path.into(), fragment);
    }
}

impl MeshSource for MemoryMeshSource {
    fn load(&self, path: &str) -> impl Future<Output = Result<MeshFragment>> + Send {
        let result = self
            .fragments
            .get(path)
            .cloned()
            .ok_or_else(|| MeshVideoError::AssetNotFound(path.to_string()));
        futures::future::ready(result)
    }
}
