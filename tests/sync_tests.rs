//! Track synchronizer tests
//!
//! Tests for:
//! - Loop length resolution (override vs. longest track)
//! - Reset of both tracks
//! - Idempotence

use glam::Vec4;
use mesh_video::assets::{FragmentItem, MeshFragment};
use mesh_video::resources::{GeometryRef, Mesh, MeshStandardMaterial};
use mesh_video::scene::Scene;
use mesh_video::video::{MeshTrack, TrackSynchronizer};

// ============================================================================
// Helper
// ============================================================================

fn track_with_frames(name: &str, indices: &[usize], scene: &mut Scene) -> MeshTrack {
    let items = indices
        .iter()
        .map(|&i| {
            FragmentItem::Mesh(Mesh::new(
                i.to_string(),
                GeometryRef(i),
                MeshStandardMaterial::new(Vec4::ONE).into(),
            ))
        })
        .collect();

    let mut track = MeshTrack::new(name, 0.1).with_persist_frame(name == "bg");
    track.complete_load(Ok(MeshFragment::new(items)), scene);
    track
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn longest_track_wins_without_override() {
    let mut scene = Scene::new();
    let mut fg = track_with_frames("fg", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &mut scene);
    let mut bg = track_with_frames("bg", &[0], &mut scene);

    let mut sync = TrackSynchronizer::new(None);
    assert!(!sync.is_synced());

    let num_frames = sync.synchronize(&mut fg, &mut bg);

    assert_eq!(num_frames, 9);
    assert_eq!(fg.num_frames(), 9);
    assert_eq!(bg.num_frames(), 9);
    assert!(sync.is_synced());
    assert_eq!(sync.synced_num_frames(), Some(9));
}

#[test]
fn override_wins_over_tracks() {
    let mut scene = Scene::new();
    let mut fg = track_with_frames("fg", &[0, 1, 2, 3], &mut scene);
    let mut bg = track_with_frames("bg", &[0, 1], &mut scene);

    let mut sync = TrackSynchronizer::new(Some(120));
    let num_frames = sync.synchronize(&mut fg, &mut bg);

    assert_eq!(num_frames, 120);
    assert_eq!(fg.num_frames(), 120);
    assert_eq!(bg.num_frames(), 120);
}

#[test]
fn synchronize_resets_both_tracks() {
    let mut scene = Scene::new();
    let container = scene.create_node_with_name("container");
    let mut fg = track_with_frames("fg", &[0, 1, 2, 3], &mut scene);
    let mut bg = track_with_frames("bg", &[0, 1, 2], &mut scene);

    fg.update(0.25, &mut scene, container);
    bg.update(0.15, &mut scene, container);
    assert_ne!(fg.current_frame_index(), 0);

    TrackSynchronizer::new(None).synchronize(&mut fg, &mut bg);

    for track in [&fg, &bg] {
        assert_eq!(track.current_frame_index(), 0);
        assert_eq!(track.displayed_frame_index(), None);
        assert_eq!(track.time_since_last_swap(), 0.0);
    }
}

#[test]
fn synchronize_is_idempotent() {
    let mut scene = Scene::new();
    let mut fg = track_with_frames("fg", &[0, 2, 5], &mut scene);
    let mut bg = track_with_frames("bg", &[0, 1, 2, 3], &mut scene);

    let mut sync = TrackSynchronizer::new(None);
    let first = sync.synchronize(&mut fg, &mut bg);
    let state = (fg.num_frames(), bg.num_frames(), fg.current_frame_index(), bg.current_frame_index());

    let second = sync.synchronize(&mut fg, &mut bg);

    assert_eq!(first, second);
    assert_eq!(
        state,
        (fg.num_frames(), bg.num_frames(), fg.current_frame_index(), bg.current_frame_index())
    );
}
