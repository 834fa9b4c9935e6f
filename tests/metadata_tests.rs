//! Metadata tests
//!
//! Tests for:
//! - Parsing with defaults for optional keys
//! - fps and pose validation
//! - Unknown keys preserved through a save
//! - Async write
//! - Pose recording

use glam::{Quat, Vec3};
use mesh_video::errors::MeshVideoError;
use mesh_video::metadata::{METADATA_FILE_NAME, Metadata};
use mesh_video::scene::Pose;
use serde_json::Value;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("mesh_video_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn minimal_metadata_uses_defaults() {
    let metadata = Metadata::from_slice(br#"{ "fps": 30 }"#).unwrap();

    assert!(approx_eq(metadata.fps, 30.0));
    assert!(approx_eq(metadata.swap_interval(), 1.0 / 30.0));
    assert!(!metadata.use_vertex_colour_for_bg);
    assert!(!metadata.add_ground_plane);
    assert!(!metadata.add_sky_box);
    assert_eq!(metadata.num_frames, None);
    assert_eq!(metadata.pose, None);
    assert_eq!(metadata.headset_pose, None);
    assert!(metadata.extra.is_empty());
}

#[test]
fn full_metadata_parses_every_key() {
    let json = br#"{
        "fps": 60,
        "use_vertex_colour_for_bg": true,
        "add_ground_plane": true,
        "add_sky_box": false,
        "num_frames": 240,
        "headsetPose": {
            "position": { "x": 0.0, "y": 1.6, "z": 0.0 },
            "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
        }
    }"#;

    let metadata = Metadata::from_slice(json).unwrap();

    assert!(metadata.use_vertex_colour_for_bg);
    assert!(metadata.add_ground_plane);
    assert_eq!(metadata.num_frames, Some(240));
    let headset = metadata.headset_pose.unwrap();
    assert!(approx_eq(headset.position.y, 1.6));
}

#[test]
fn null_num_frames_means_no_override() {
    let metadata = Metadata::from_slice(br#"{ "fps": 24, "num_frames": null }"#).unwrap();
    assert_eq!(metadata.num_frames, None);
}

#[test]
fn missing_fps_is_rejected() {
    let err = Metadata::from_slice(br#"{ "num_frames": 10 }"#).unwrap_err();
    assert!(matches!(err, MeshVideoError::JsonError(_)));
}

#[test]
fn non_positive_fps_is_rejected() {
    for json in [&br#"{ "fps": 0 }"#[..], &br#"{ "fps": -12.5 }"#[..]] {
        let err = Metadata::from_slice(json).unwrap_err();
        assert!(matches!(
            err,
            MeshVideoError::InvalidMetadata { field: "fps", .. }
        ));
    }
}

#[test]
fn malformed_json_is_rejected() {
    assert!(Metadata::from_slice(b"{ fps: 30 ").is_err());
}

#[test]
fn zero_rotation_pose_is_rejected() {
    let json = br#"{
        "fps": 30,
        "headsetPose": {
            "position": { "x": 0.0, "y": 1.6, "z": 0.0 },
            "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 0.0 }
        }
    }"#;

    let err = Metadata::from_slice(json).unwrap_err();
    assert!(matches!(
        err,
        MeshVideoError::InvalidMetadata { field: "headsetPose", .. }
    ));
}

#[test]
fn non_unit_pose_rotation_is_accepted_normalized() {
    let json = br#"{
        "fps": 30,
        "pose": {
            "position": { "x": 0.0, "y": 0.0, "z": -1.5 },
            "rotation": { "x": 0.0, "y": 2.0, "z": 0.0, "w": 2.0 }
        }
    }"#;

    let metadata = Metadata::from_slice(json).unwrap();
    assert!(metadata.pose.unwrap().rotation.is_normalized());
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn unknown_keys_survive_save() -> anyhow::Result<()> {
    let json = br#"{ "fps": 30, "capture_rig": "studio-b", "notes": { "take": 4 } }"#;
    let metadata = Metadata::from_slice(json)?;
    assert_eq!(metadata.extra.len(), 2);

    let dir = temp_dir("metadata_save");
    let path = metadata.save(&dir)?;
    assert_eq!(path, dir.join(METADATA_FILE_NAME));

    let saved: Value = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(saved["capture_rig"], "studio-b");
    assert_eq!(saved["notes"]["take"], 4);
    assert_eq!(saved["fps"], 30.0);

    let reloaded = Metadata::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(reloaded, metadata);
    Ok(())
}

#[tokio::test]
async fn write_runs_inside_a_runtime() -> anyhow::Result<()> {
    let dir = temp_dir("metadata_write");
    let metadata = Metadata::new(24.0);

    let path = metadata.write(&dir).await?;

    let reloaded = Metadata::from_slice(&tokio::fs::read(&path).await?)?;
    assert_eq!(reloaded, metadata);
    Ok(())
}

#[test]
fn with_poses_records_camera_and_headset() {
    let metadata = Metadata::new(30.0);
    let camera = Pose::new(Vec3::new(0.0, 0.0, -1.5), Quat::from_rotation_y(1.0));
    let headset = Pose::new(Vec3::new(0.1, 1.6, 0.2), Quat::IDENTITY);

    let updated = metadata.with_poses(camera, Some(headset));
    assert_eq!(updated.pose, Some(camera));
    assert_eq!(updated.headset_pose, Some(headset));

    let value: Value = serde_json::from_str(&updated.to_json().unwrap()).unwrap();
    assert!(value.get("headsetPose").is_some());
    assert!(value.get("headset_pose").is_none());
}

#[test]
fn with_poses_keeps_existing_headset_pose() {
    let mut metadata = Metadata::new(30.0);
    let recorded = Pose::new(Vec3::new(0.0, 1.7, 0.0), Quat::IDENTITY);
    metadata.headset_pose = Some(recorded);

    let updated = metadata.with_poses(Pose::IDENTITY, None);

    assert_eq!(updated.pose, Some(Pose::IDENTITY));
    assert_eq!(updated.headset_pose, Some(recorded));
    // The source is left untouched.
    assert_eq!(metadata.pose, None);
}
