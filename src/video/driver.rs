//! Playback Driver
//!
//! The per-frame tick of the player. Each tick polls the two tracks' loads,
//! synchronizes them once both are in, and from then on advances both by the
//! elapsed time. Session boundary events are routed to calibration.

use std::sync::Arc;

use crate::assets::MeshSource;
use crate::metadata::Metadata;
use crate::scene::{NodeHandle, Scene};
use crate::video::calibration::SessionCalibration;
use crate::video::sync::TrackSynchronizer;
use crate::video::track::MeshTrack;

/// Scene name of the foreground (dynamic) track.
pub const DYNAMIC_SCENE_NAME: &str = "fg";
/// Scene name of the background (static) track.
pub const BACKGROUND_SCENE_NAME: &str = "bg";

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// At least one track is still loading; nothing advanced.
    Loading,
    /// Both tracks just finished loading and were synchronized this tick.
    Synchronized,
    /// Both tracks advanced.
    Playing,
}

/// Immersive session boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    End,
}

pub struct PlaybackDriver {
    dynamic: MeshTrack,
    background: MeshTrack,
    synchronizer: TrackSynchronizer,
    calibration: SessionCalibration,
}

impl PlaybackDriver {
    #[must_use]
    pub fn new(
        dynamic: MeshTrack,
        background: MeshTrack,
        synchronizer: TrackSynchronizer,
        calibration: SessionCalibration,
    ) -> Self {
        Self {
            dynamic,
            background,
            synchronizer,
            calibration,
        }
    }

    /// Builds the foreground/background pair for a recording folder.
    ///
    /// The foreground never persists frames; the background persists them
    /// and optionally uses vertex colours.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata, video_folder: &str) -> Self {
        let swap_interval = metadata.swap_interval();

        let dynamic = MeshTrack::new(DYNAMIC_SCENE_NAME, swap_interval)
            .with_base_folder(video_folder)
            .with_vertex_colour(false)
            .with_persist_frame(false);

        let background = MeshTrack::new(BACKGROUND_SCENE_NAME, swap_interval)
            .with_base_folder(video_folder)
            .with_vertex_colour(metadata.use_vertex_colour_for_bg)
            .with_persist_frame(true);

        Self::new(
            dynamic,
            background,
            TrackSynchronizer::new(metadata.num_frames),
            SessionCalibration::new(metadata.headset_pose),
        )
    }

    /// Requests both tracks from `source`.
    pub fn load<S: MeshSource>(&mut self, source: &Arc<S>) {
        self.dynamic.load(Arc::clone(source));
        self.background.load(Arc::clone(source));
    }

    /// Waits until both tracks have loaded.
    pub async fn wait_loaded(&mut self, scene: &mut Scene) {
        self.dynamic.wait_loaded(scene).await;
        self.background.wait_loaded(scene).await;
    }

    /// One frame of playback.
    ///
    /// Tracks only advance once they have been synchronized, so both start
    /// from frame 0 together.
    pub fn tick(&mut self, delta: f32, scene: &mut Scene, container: NodeHandle) -> TickStatus {
        let dynamic_loaded = self.dynamic.poll_load(scene);
        let background_loaded = self.background.poll_load(scene);

        if !self.synchronizer.is_synced() {
            if dynamic_loaded && background_loaded {
                self.synchronizer
                    .synchronize(&mut self.dynamic, &mut self.background);
                return TickStatus::Synchronized;
            }
            return TickStatus::Loading;
        }

        self.dynamic.update(delta, scene, container);
        self.background.update(delta, scene, container);

        TickStatus::Playing
    }

    pub fn handle_session_event(
        &mut self,
        event: SessionEvent,
        scene: &mut Scene,
        user_space: NodeHandle,
        camera: NodeHandle,
    ) {
        match event {
            SessionEvent::Start => self.calibration.begin(scene, user_space, camera),
            SessionEvent::End => self.calibration.end(scene, user_space, camera),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn dynamic_track(&self) -> &MeshTrack {
        &self.dynamic
    }

    #[must_use]
    pub fn background_track(&self) -> &MeshTrack {
        &self.background
    }

    #[must_use]
    pub fn synchronizer(&self) -> &TrackSynchronizer {
        &self.synchronizer
    }

    #[must_use]
    pub fn calibration(&self) -> &SessionCalibration {
        &self.calibration
    }

    /// Whether both tracks are loaded and synchronized.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.synchronizer.is_synced()
    }

    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.calibration.is_active()
    }
}
