//! Viewer
//!
//! Owns the scene and the playback driver for one recording folder and
//! exposes the handful of interactions the player supports: ticking, the two
//! keyboard shortcuts and immersive session boundaries.
//!
//! Scene layout:
//!
//! ```text
//! world            (moved down by the rig height on camera reset)
//! └── user_space   (frame container, recentred during sessions)
//! camera           (scene root; parented to user_space during sessions)
//! ```

pub mod config;
pub mod input;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;

use crate::app::config::ViewerConfig;
use crate::app::input::KeyAction;
use crate::assets::{self, FileAssetReader, GltfMeshSource, MeshSource};
use crate::errors::Result;
use crate::metadata::Metadata;
use crate::scene::{Node, NodeHandle, Pose, Scene};
use crate::utils::time::Timer;
use crate::video::{PlaybackDriver, SessionEvent, TickStatus};

/// Distance of the camera from the origin after a reset, and how far the
/// world is lowered so the origin sits at eye height.
const CAMERA_RESET_OFFSET: f32 = 1.5;

pub struct Viewer {
    pub scene: Scene,
    world: NodeHandle,
    user_space: NodeHandle,
    camera: NodeHandle,

    driver: PlaybackDriver,
    metadata: Metadata,
    config: ViewerConfig,

    /// Latest pose reported by the headset, if any.
    device_pose: Option<Pose>,
    timer: Timer,
}

impl Viewer {
    /// Reads `metadata.json` from the configured folder and builds the
    /// viewer. Nothing is loaded until [`start_loading`](Self::start_loading).
    pub async fn open_async(config: ViewerConfig) -> Result<Self> {
        let reader = FileAssetReader::new(".");
        let folder = config.video_folder.to_string_lossy().into_owned();
        let metadata = Metadata::load(&reader, &folder).await?;

        log::info!("3D Video | {folder}");
        Ok(Self::with_metadata(config, metadata))
    }

    /// Blocking form of [`open_async`](Self::open_async) on the asset runtime.
    ///
    /// Panics when called from inside a tokio runtime; await `open_async`
    /// there.
    pub fn open(config: ViewerConfig) -> Result<Self> {
        assets::block_on(Self::open_async(config))
    }

    #[must_use]
    pub fn with_metadata(config: ViewerConfig, metadata: Metadata) -> Self {
        let mut scene = Scene::new();
        let world = scene.create_node_with_name("world");
        let user_space = scene.add_to_parent(Node::new("user_space"), world);
        let camera = scene.create_node_with_name("camera");

        let folder = config.video_folder.to_string_lossy();
        let driver = PlaybackDriver::from_metadata(&metadata, &folder);

        let mut viewer = Self {
            scene,
            world,
            user_space,
            camera,
            driver,
            metadata,
            config,
            device_pose: None,
            timer: Timer::new(),
        };
        viewer.reset_camera();
        viewer
    }

    /// Starts loading `fg.glb` and `bg.glb` from disk.
    pub fn start_loading(&mut self) {
        let source = Arc::new(GltfMeshSource::new(FileAssetReader::new(".")));
        self.load_from(&source);
    }

    /// Starts loading both tracks from `source`.
    pub fn load_from<S: MeshSource>(&mut self, source: &Arc<S>) {
        self.driver.load(source);
    }

    /// Waits for both tracks, then synchronizes them with a zero-length tick.
    pub async fn wait_loaded(&mut self) -> TickStatus {
        self.driver.wait_loaded(&mut self.scene).await;
        self.frame(0.0)
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Runs one frame using wall-clock time since the previous tick.
    pub fn tick(&mut self) -> TickStatus {
        self.timer.tick();
        self.frame(self.timer.dt_seconds())
    }

    /// Runs one frame of exactly `step`.
    pub fn advance(&mut self, step: Duration) -> TickStatus {
        self.timer.advance(step);
        self.frame(self.timer.dt_seconds())
    }

    /// Runs one frame of `delta` seconds.
    pub fn frame(&mut self, delta: f32) -> TickStatus {
        let status = self.driver.tick(delta, &mut self.scene, self.user_space);
        if status == TickStatus::Synchronized {
            self.reset_camera();
        }
        self.scene.update_matrix_world();
        status
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Camera back to `(0, 0, -1.5)` looking at the origin; world lowered by
    /// the same amount.
    pub fn reset_camera(&mut self) {
        if let Some(transform) = self.scene.transform_mut(self.camera) {
            transform.reset();
            transform.position.z = -CAMERA_RESET_OFFSET;
            transform.look_at(Vec3::ZERO, Vec3::Y);
        }
        if let Some(transform) = self.scene.transform_mut(self.world) {
            transform.position.y = -CAMERA_RESET_OFFSET;
        }
    }

    /// Handles a typed character. Only saving can fail.
    pub fn handle_key(&mut self, key: char) -> Result<()> {
        match KeyAction::from_key(key) {
            Some(KeyAction::ResetCamera) => self.reset_camera(),
            Some(KeyAction::SaveMetadata) => {
                self.save_metadata()?;
            }
            None => log::debug!("Key {key:?} pressed."),
        }
        Ok(())
    }

    /// Writes the metadata with the current camera pose (and, during a
    /// session, the headset pose) to the output directory.
    ///
    /// Blocks on the asset runtime like [`open`](Self::open).
    pub fn save_metadata(&self) -> Result<PathBuf> {
        let camera_pose = self
            .scene
            .compute_world_matrix(self.camera)
            .map(|matrix| Pose::from_matrix(&matrix))
            .unwrap_or_default();

        let headset_pose = if self.driver.is_session_active() {
            self.device_pose
        } else {
            None
        };

        self.metadata
            .with_poses(camera_pose, headset_pose)
            .save(&self.config.output_dir)
    }

    pub fn session_start(&mut self) {
        self.driver.handle_session_event(
            SessionEvent::Start,
            &mut self.scene,
            self.user_space,
            self.camera,
        );
    }

    pub fn session_end(&mut self) {
        self.driver.handle_session_event(
            SessionEvent::End,
            &mut self.scene,
            self.user_space,
            self.camera,
        );
        self.reset_camera();
    }

    /// Records the headset's current world pose.
    pub fn set_device_pose(&mut self, pose: Option<Pose>) {
        self.device_pose = pose;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn world(&self) -> NodeHandle {
        self.world
    }

    #[must_use]
    pub fn user_space(&self) -> NodeHandle {
        self.user_space
    }

    #[must_use]
    pub fn camera(&self) -> NodeHandle {
        self.camera
    }

    #[must_use]
    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}
