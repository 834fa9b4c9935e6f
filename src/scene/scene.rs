use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

/// Scene graph.
///
/// Pure data: a node arena plus the list of root nodes. Only nodes reachable
/// from `root_nodes` are part of the rendered hierarchy; everything else in
/// the arena is detached and kept around for later attachment.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
        }
    }

    // ========================================================================
    // Node creation / removal
    // ========================================================================

    /// Adds a node as a scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Creates a named, empty root node.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Inserts a node into the arena without placing it in the hierarchy.
    pub fn insert_detached(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Inserts a mesh node into the arena without placing it in the hierarchy.
    pub fn insert_mesh_detached(&mut self, mesh: Mesh) -> NodeHandle {
        self.insert_detached(Node::with_mesh(mesh))
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Removes a node and, recursively, all of its children.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        self.unlink(handle);
        self.nodes.remove(handle);
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Makes `child` a child of `parent`, unlinking it from wherever it was.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }
        if !self.nodes.contains_key(child) {
            log::error!("Child node not found during attach!");
            return;
        }

        self.unlink(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Takes a node out of the hierarchy while keeping it in the arena.
    ///
    /// Detaching a node that is not attached anywhere is a no-op.
    pub fn detach(&mut self, child: NodeHandle) {
        self.unlink(child);
    }

    /// Moves a node to the root list, unlinking it from its parent.
    pub fn attach_to_root(&mut self, child: NodeHandle) {
        if !self.nodes.contains_key(child) {
            return;
        }
        self.unlink(child);
        self.root_nodes.push(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.transform.mark_dirty();
        }
    }

    fn unlink(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    pub fn transform_mut(&mut self, handle: NodeHandle) -> Option<&mut Transform> {
        self.nodes.get_mut(handle).map(|n| &mut n.transform)
    }

    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.nodes.get(handle).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn is_child_of(&self, child: NodeHandle, parent: NodeHandle) -> bool {
        self.nodes.get(child).and_then(|n| n.parent) == Some(parent)
    }

    /// Whether the node is reachable from one of the scene roots.
    #[must_use]
    pub fn is_in_hierarchy(&self, handle: NodeHandle) -> bool {
        let mut current = handle;
        while let Some(node) = self.nodes.get(current) {
            match node.parent {
                Some(p) => current = p,
                None => return self.root_nodes.contains(&current),
            }
        }
        false
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates the world matrices of every node in the hierarchy.
    ///
    /// Iterative to avoid stack overflow on deep hierarchies.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = self
            .root_nodes
            .iter()
            .rev()
            .map(|&h| (h, Affine3A::IDENTITY, false))
            .collect();

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let changed = local_changed || parent_changed;
            if changed {
                let world = parent_world * node.transform.local_matrix;
                node.transform.set_world_matrix(world);
            }

            let world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, world, changed));
            }
        }
    }

    /// Computes the world matrix of a single node from its ancestors' current
    /// TRS values, without touching any cache.
    #[must_use]
    pub fn compute_world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        let node = self.nodes.get(handle)?;
        let t = &node.transform;
        let mut world = Affine3A::from_scale_rotation_translation(t.scale, t.rotation, t.position);

        let mut parent = node.parent;
        while let Some(p) = parent {
            let pn = self.nodes.get(p)?;
            let pt = &pn.transform;
            world = Affine3A::from_scale_rotation_translation(pt.scale, pt.rotation, pt.position)
                * world;
            parent = pn.parent;
        }

        Some(world)
    }
}
