//! Recording metadata (`metadata.json`).
//!
//! ```json
//! {
//!     "fps": 30,
//!     "use_vertex_colour_for_bg": false,
//!     "add_ground_plane": false,
//!     "add_sky_box": false,
//!     "num_frames": 300,
//!     "pose": { "position": { "x": 0, "y": 0, "z": -1.5 }, "rotation": { "x": 0, "y": 0, "z": 0, "w": 1 } },
//!     "headsetPose": { "position": { ... }, "rotation": { ... } }
//! }
//! ```
//!
//! Only `fps` is required. Keys the player does not know are kept and written
//! back unchanged when the metadata is saved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::assets::{self, AssetReader};
use crate::errors::{MeshVideoError, Result};
use crate::scene::Pose;

pub const METADATA_FILE_NAME: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source frame rate; frames are swapped every `1 / fps` seconds.
    pub fps: f32,

    #[serde(default)]
    pub use_vertex_colour_for_bg: bool,
    #[serde(default)]
    pub add_ground_plane: bool,
    #[serde(default)]
    pub add_sky_box: bool,

    /// Loop length shared by both tracks; overrides what the tracks discover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_frames: Option<usize>,

    /// Camera pose saved from the viewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,

    /// Headset pose saved during an immersive session.
    #[serde(
        rename = "headsetPose",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub headset_pose: Option<Pose>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    #[must_use]
    pub fn new(fps: f32) -> Self {
        Self {
            fps,
            use_vertex_colour_for_bg: false,
            add_ground_plane: false,
            add_sky_box: false,
            num_frames: None,
            pose: None,
            headset_pose: None,
            extra: Map::new(),
        }
    }

    /// Parses and validates a metadata document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let metadata: Self = serde_json::from_slice(bytes)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Reads `<video_folder>/metadata.json` through `reader`.
    pub async fn load(reader: &impl AssetReader, video_folder: &str) -> Result<Self> {
        let uri = if video_folder.is_empty() {
            METADATA_FILE_NAME.to_string()
        } else {
            format!("{}/{METADATA_FILE_NAME}", video_folder.trim_end_matches('/'))
        };
        let bytes = reader.read_bytes(&uri).await?;
        Self::from_slice(&bytes)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(MeshVideoError::InvalidMetadata {
                field: "fps",
                reason: format!("expected a positive frame rate, got {}", self.fps),
            });
        }
        Self::validate_pose("pose", self.pose.as_ref())?;
        Self::validate_pose("headsetPose", self.headset_pose.as_ref())?;
        Ok(())
    }

    /// Rotations are normalized on parse; one that is still not a unit
    /// quaternion was zero or non-finite in the file.
    fn validate_pose(field: &'static str, pose: Option<&Pose>) -> Result<()> {
        let Some(pose) = pose else {
            return Ok(());
        };
        if !pose.position.is_finite() {
            return Err(MeshVideoError::InvalidMetadata {
                field,
                reason: format!("position is not finite: {}", pose.position),
            });
        }
        if !pose.rotation.is_normalized() {
            return Err(MeshVideoError::InvalidMetadata {
                field,
                reason: format!("rotation is not a unit quaternion: {}", pose.rotation),
            });
        }
        Ok(())
    }

    /// Seconds between frame swaps.
    #[inline]
    #[must_use]
    pub fn swap_interval(&self) -> f32 {
        1.0 / self.fps
    }

    /// Copy of this metadata with the viewer's current poses recorded.
    ///
    /// `headset` is only written when given; an existing `headsetPose` is
    /// kept otherwise.
    #[must_use]
    pub fn with_poses(&self, camera: Pose, headset: Option<Pose>) -> Self {
        let mut updated = self.clone();

        log::debug!("Camera Pose: {camera:?}");
        updated.pose = Some(camera);

        if let Some(headset) = headset {
            log::debug!("Headset Pose: {headset:?}");
            updated.headset_pose = Some(headset);
        }

        updated
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes `metadata.json` into `dir`, returning the written path.
    pub async fn write(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(METADATA_FILE_NAME);
        tokio::fs::write(&path, self.to_json()?).await?;
        log::info!("Saved metadata to {}", path.display());
        Ok(path)
    }

    /// Blocking form of [`write`](Self::write) on the asset runtime.
    ///
    /// Panics when called from inside a tokio runtime; await `write` there.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        assets::block_on(self.write(dir))
    }
}
