//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, detached nodes
//! - attach/detach hierarchy bookkeeping
//! - World matrix propagation and on-demand world matrices

use glam::{Quat, Vec3};
use mesh_video::resources::{GeometryRef, Material, Mesh};
use mesh_video::scene::{Node, Scene};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn frame_mesh(name: &str) -> Mesh {
    Mesh::new(name, GeometryRef(0), Material::default())
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node_with_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name("TestNode");
    assert_eq!(scene.get_node(handle).unwrap().name, "TestNode");
    assert!(scene.root_nodes.contains(&handle));
}

#[test]
fn scene_detached_node_is_outside_hierarchy() {
    let mut scene = Scene::new();
    let handle = scene.insert_mesh_detached(frame_mesh("0"));

    assert!(scene.get_node(handle).unwrap().mesh.is_some());
    assert!(!scene.root_nodes.contains(&handle));
    assert!(!scene.is_in_hierarchy(handle));
}

#[test]
fn scene_remove_node_removes_subtree() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_to_parent(Node::new("child"), parent);
    let grandchild = scene.add_to_parent(Node::new("grandchild"), child);

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(scene.root_nodes.is_empty());
}

#[test]
fn scene_remove_child_unlinks_from_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("parent");
    let child = scene.add_to_parent(Node::new("child"), parent);

    scene.remove_node(child);

    assert!(scene.children(parent).is_empty());
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn attach_detached_node() {
    let mut scene = Scene::new();
    let container = scene.create_node_with_name("container");
    let frame = scene.insert_mesh_detached(frame_mesh("3"));

    scene.attach(frame, container);

    assert!(scene.is_child_of(frame, container));
    assert_eq!(scene.children(container), &[frame]);
    assert!(scene.is_in_hierarchy(frame));
}

#[test]
fn detach_keeps_node_in_arena() {
    let mut scene = Scene::new();
    let container = scene.create_node_with_name("container");
    let frame = scene.add_to_parent(Node::with_mesh(frame_mesh("1")), container);

    scene.detach(frame);

    assert!(scene.get_node(frame).is_some());
    assert!(scene.get_node(frame).unwrap().parent().is_none());
    assert!(scene.children(container).is_empty());
    assert!(!scene.is_in_hierarchy(frame));

    // Detaching again is harmless.
    scene.detach(frame);
    assert!(scene.get_node(frame).is_some());
}

#[test]
fn attach_moves_between_parents() {
    let mut scene = Scene::new();
    let a = scene.create_node_with_name("a");
    let b = scene.create_node_with_name("b");
    let child = scene.add_to_parent(Node::new("child"), a);

    scene.attach(child, b);

    assert!(scene.children(a).is_empty());
    assert!(scene.is_child_of(child, b));
}

#[test]
fn attach_root_node_leaves_root_list() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("parent");
    let camera = scene.create_node_with_name("camera");

    scene.attach(camera, parent);
    assert!(!scene.root_nodes.contains(&camera));

    scene.attach_to_root(camera);
    assert!(scene.root_nodes.contains(&camera));
    assert!(scene.children(parent).is_empty());
}

#[test]
fn attach_to_self_is_rejected() {
    let mut scene = Scene::new();
    let node = scene.create_node_with_name("node");

    scene.attach(node, node);

    assert!(scene.get_node(node).unwrap().parent().is_none());
    assert!(scene.root_nodes.contains(&node));
}

// ============================================================================
// World Matrices
// ============================================================================

#[test]
fn update_matrix_world_composes_parents() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("parent");
    let child = scene.add_to_parent(Node::new("child"), parent);

    scene.transform_mut(parent).unwrap().position = Vec3::new(0.0, -1.5, 0.0);
    scene.transform_mut(child).unwrap().position = Vec3::new(1.0, 0.0, 0.0);
    scene.update_matrix_world();

    let world = scene.get_node(child).unwrap().world_matrix();
    assert!(vec3_approx(world.translation.into(), Vec3::new(1.0, -1.5, 0.0)));
}

#[test]
fn compute_world_matrix_matches_propagated() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("parent");
    let child = scene.add_to_parent(Node::new("child"), parent);
    {
        let t = scene.transform_mut(parent).unwrap();
        t.position = Vec3::new(0.0, 1.5, -1.5);
        t.rotation = Quat::from_rotation_y(std::f32::consts::PI);
    }
    scene.transform_mut(child).unwrap().position = Vec3::new(0.0, 0.0, 2.0);

    let computed = scene.compute_world_matrix(child).unwrap();
    scene.update_matrix_world();
    let propagated = *scene.get_node(child).unwrap().world_matrix();

    assert!(computed.abs_diff_eq(propagated, EPSILON));
    assert!(vec3_approx(computed.translation.into(), Vec3::new(0.0, 1.5, -3.5)));
}
