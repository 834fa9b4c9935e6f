use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::transform::Transform;
use glam::Affine3A;

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: Optional handle to the parent node (None for roots and for
///   detached nodes)
/// - `children`: Child node handles
///
/// A node may live in the scene arena without being part of the rendered
/// hierarchy. Mesh video frames sit in that detached state until a track
/// attaches them to its container.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    /// Drawable attached to this node, if any.
    pub mesh: Option<Mesh>,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_mesh(mesh: Mesh) -> Self {
        let mut node = Self::new(&mesh.name);
        node.mesh = Some(mesh);
        node
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// World transformation matrix as of the last
    /// [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
