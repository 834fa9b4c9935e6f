//! Scene graph module
//!
//! Manages the scene hierarchy the player attaches frames into:
//! - Node: scene node (parent/child links, transform, optional mesh)
//! - Transform: position, rotation, scale
//! - Scene: node arena and root list
//! - Pose: recorded position/orientation and its composition onto transforms

pub mod node;
pub mod pose;
pub mod scene;
pub mod transform;

pub use node::Node;
pub use pose::Pose;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
