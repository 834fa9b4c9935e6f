//! Mesh Track
//!
//! A mesh track plays one sequence of pre-baked meshes like video frames.
//!
//! # Frames
//!
//! Frames are keyed by the integer parsed from each mesh's name. Keys need
//! not be contiguous: an index without a mesh is simply absent and the
//! playhead passes over it like any other index.
//!
//! # Lifecycle
//!
//! ```text
//! Unloaded --load()--> Loading --poll_load()/wait_loaded()--> Loaded
//! ```
//!
//! Once loaded, [`MeshTrack::update`] advances the playhead by elapsed time
//! and swaps which frame node is attached to the container. A failed load
//! still ends in `Loaded`, with zero frames.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::assets::{self, FragmentItem, MeshFragment, MeshSource};
use crate::errors::{MeshVideoError, Result};
use crate::scene::{NodeHandle, Scene};

/// Load lifecycle of a track.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    /// Waiting for the mesh source; the result arrives on this channel.
    Loading(flume::Receiver<Result<MeshFragment>>),
    Loaded,
}

#[derive(Debug)]
pub struct MeshTrack {
    video_base_folder: String,
    scene_name: String,
    use_vertex_colour: bool,
    persist_frame: bool,
    swap_interval: f32,

    frames: FxHashMap<usize, NodeHandle>,
    num_frames: usize,

    /// Logical playhead.
    current_frame_index: usize,
    /// Index of the frame attached to the container, if any.
    displayed_frame_index: Option<usize>,
    time_since_last_swap: f32,

    /// Exactly one frame and `persist_frame`: attached once, never swapped.
    is_static_mesh: bool,

    state: LoadState,
}

impl MeshTrack {
    /// Creates an empty track that advances one frame every `swap_interval`
    /// seconds.
    #[must_use]
    pub fn new(scene_name: impl Into<String>, swap_interval: f32) -> Self {
        Self {
            video_base_folder: String::new(),
            scene_name: scene_name.into(),
            use_vertex_colour: false,
            persist_frame: false,
            swap_interval,

            frames: FxHashMap::default(),
            num_frames: 0,

            current_frame_index: 0,
            displayed_frame_index: None,
            time_since_last_swap: 0.0,

            is_static_mesh: false,

            state: LoadState::Unloaded,
        }
    }

    #[must_use]
    pub fn with_base_folder(mut self, folder: impl Into<String>) -> Self {
        self.video_base_folder = folder.into();
        self
    }

    #[must_use]
    pub fn with_vertex_colour(mut self, use_vertex_colour: bool) -> Self {
        self.use_vertex_colour = use_vertex_colour;
        self
    }

    #[must_use]
    pub fn with_persist_frame(mut self, persist_frame: bool) -> Self {
        self.persist_frame = persist_frame;
        self
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Path requested from the mesh source: `<folder>/<scene_name>.glb`.
    #[must_use]
    pub fn asset_path(&self) -> String {
        if self.video_base_folder.is_empty() {
            format!("{}.glb", self.scene_name)
        } else {
            format!(
                "{}/{}.glb",
                self.video_base_folder.trim_end_matches('/'),
                self.scene_name
            )
        }
    }

    /// Starts loading frames from `source` in the background.
    ///
    /// Completion is picked up by [`poll_load`](Self::poll_load) or
    /// [`wait_loaded`](Self::wait_loaded). Only the first call has an effect.
    pub fn load<S: MeshSource>(&mut self, source: Arc<S>) -> &mut Self {
        if !matches!(self.state, LoadState::Unloaded) {
            log::warn!("Video \"{}\" has already been requested.", self.scene_name);
            return self;
        }

        let (tx, rx) = flume::bounded(1);
        let path = self.asset_path();

        assets::spawn_detached(async move {
            let result = source.load(&path).await;
            // The track may have been dropped while loading.
            let _ = tx.send(result);
        });

        self.state = LoadState::Loading(rx);
        self
    }

    /// Non-blocking check for load completion. Returns whether the track is
    /// loaded.
    pub fn poll_load(&mut self, scene: &mut Scene) -> bool {
        let result = match &self.state {
            LoadState::Loaded => return true,
            LoadState::Unloaded => return false,
            LoadState::Loading(rx) => match rx.try_recv() {
                Ok(result) => result,
                Err(flume::TryRecvError::Empty) => return false,
                Err(flume::TryRecvError::Disconnected) => Err(MeshVideoError::LoadChannelClosed),
            },
        };

        self.complete_load(result, scene);
        true
    }

    /// Waits for a pending load to finish. Returns immediately when no load
    /// is pending.
    pub async fn wait_loaded(&mut self, scene: &mut Scene) {
        let result = match &self.state {
            LoadState::Loading(rx) => rx
                .recv_async()
                .await
                .map_err(MeshVideoError::from)
                .and_then(|result| result),
            LoadState::Unloaded | LoadState::Loaded => return,
        };

        self.complete_load(result, scene);
    }

    /// Applies the outcome of a load.
    ///
    /// Frames are inserted into `scene` as detached nodes. Errors are logged
    /// and leave the track empty; the track is `Loaded` afterwards either way.
    pub fn complete_load(&mut self, result: Result<MeshFragment>, scene: &mut Scene) {
        match result {
            Ok(fragment) => self.insert_frames(fragment, scene),
            Err(e) => log::error!(
                "Failed to load video \"{}\" in {}: {e}",
                self.scene_name,
                self.video_base_folder
            ),
        }

        self.state = LoadState::Loaded;

        let num_frames_loaded = self.frames.len();
        if num_frames_loaded == 1 && self.persist_frame {
            self.is_static_mesh = true;
        }

        log::info!(
            "Loaded {num_frames_loaded} frames for video \"{}\" in {}.",
            self.scene_name,
            self.video_base_folder
        );
    }

    fn insert_frames(&mut self, fragment: MeshFragment, scene: &mut Scene) {
        log::debug!(
            "Video \"{}\" returned {} items.",
            self.scene_name,
            fragment.items.len()
        );

        for item in fragment.items {
            let FragmentItem::Mesh(mut mesh) = item else {
                continue;
            };

            let Some(frame_number) = parse_frame_index(&mesh.name) else {
                log::warn!(
                    "Skipping mesh \"{}\" in video \"{}\": name is not a frame index.",
                    mesh.name,
                    self.scene_name
                );
                continue;
            };

            mesh.material = mesh.material.to_basic(self.use_vertex_colour);

            let handle = scene.insert_mesh_detached(mesh);
            if let Some(previous) = self.frames.insert(frame_number, handle) {
                log::warn!(
                    "Video \"{}\" has more than one mesh for frame {frame_number}; keeping the last.",
                    self.scene_name
                );
                scene.remove_node(previous);
            }

            // Highest index, not the frame count: sparse sequences keep their
            // full length.
            self.num_frames = self.num_frames.max(frame_number);
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Goes to the start of the sequence.
    ///
    /// Does not touch the loaded frames, `num_frames` or what is attached to
    /// the container. A frame that was displayed stays attached but is no
    /// longer tracked, so the next step will not detach it. Reset before the
    /// first step (as [`PlaybackDriver`](crate::video::PlaybackDriver) does)
    /// or detach [`displayed_frame`](Self::displayed_frame) first.
    pub fn reset(&mut self) {
        self.current_frame_index = 0;
        self.time_since_last_swap = 0.0;
        self.displayed_frame_index = None;
    }

    /// Performs a frame update if enough time has elapsed.
    ///
    /// `delta` is the time in seconds since the previous call; `container` is
    /// the node frames are attached to.
    pub fn update(&mut self, delta: f32, scene: &mut Scene, container: NodeHandle) {
        if !self.has_loaded() || self.swap_interval <= 0.0 {
            return;
        }

        self.time_since_last_swap += delta;

        if self.time_since_last_swap >= self.swap_interval && self.num_frames > 0 {
            // Can be many intervals after the window lost focus for a while.
            let frames_since_last_update =
                (self.time_since_last_swap / self.swap_interval).floor() as usize;
            self.time_since_last_swap = (self.time_since_last_swap
                - frames_since_last_update as f32 * self.swap_interval)
                .max(0.0);

            if frames_since_last_update > 1 {
                log::debug!(
                    "Catching up by skipping {} frames...",
                    frames_since_last_update - 1
                );
            }

            self.step(scene, container, frames_since_last_update);
        }
    }

    /// Advances the playhead by `times` frames.
    ///
    /// The playhead always moves; which frame is attached only changes when
    /// the target index has a frame, or, for non-persisting tracks, to show
    /// nothing at an empty index.
    pub fn step(&mut self, scene: &mut Scene, container: NodeHandle, times: usize) {
        if self.is_static_mesh {
            // Attached once and kept; the playhead still moves so the track
            // stays in phase with the other one.
            if self.displayed_frame_index.is_none()
                && let Some((&index, &frame)) = self.frames.iter().next()
            {
                scene.attach(frame, container);
                self.displayed_frame_index = Some(index);
            }

            if let Some(next_frame_index) = self.next_frame_index(times) {
                self.current_frame_index = next_frame_index;
            }
            return;
        }

        let Some(next_frame_index) = self.next_frame_index(times) else {
            return;
        };

        let previous_frame = self
            .displayed_frame_index
            .and_then(|index| self.frames.get(&index).copied());
        let next_frame = self.frames.get(&next_frame_index).copied();

        let should_update_frame = !self.persist_frame || next_frame.is_some();

        if should_update_frame {
            if let Some(frame) = previous_frame {
                scene.detach(frame);
                self.displayed_frame_index = None;
            }

            if let Some(frame) = next_frame {
                scene.attach(frame, container);
                self.displayed_frame_index = Some(next_frame_index);
            }
        }

        self.current_frame_index = next_frame_index;
    }

    fn next_frame_index(&self, times: usize) -> Option<usize> {
        if self.num_frames == 0 {
            return None;
        }
        Some((self.current_frame_index + times % self.num_frames) % self.num_frames)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn has_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded)
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    #[inline]
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Overrides the sequence length, keeping the playhead in range.
    pub fn set_num_frames(&mut self, num_frames: usize) {
        self.num_frames = num_frames;
        if num_frames > 0 {
            self.current_frame_index %= num_frames;
        } else {
            self.current_frame_index = 0;
        }
    }

    #[inline]
    #[must_use]
    pub fn swap_interval(&self) -> f32 {
        self.swap_interval
    }

    #[inline]
    #[must_use]
    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    #[inline]
    #[must_use]
    pub fn displayed_frame_index(&self) -> Option<usize> {
        self.displayed_frame_index
    }

    #[inline]
    #[must_use]
    pub fn time_since_last_swap(&self) -> f32 {
        self.time_since_last_swap
    }

    #[inline]
    #[must_use]
    pub fn is_static_mesh(&self) -> bool {
        self.is_static_mesh
    }

    #[inline]
    #[must_use]
    pub fn persist_frame(&self) -> bool {
        self.persist_frame
    }

    #[inline]
    #[must_use]
    pub fn use_vertex_colour(&self) -> bool {
        self.use_vertex_colour
    }

    /// Number of frames actually loaded (may be less than `num_frames`).
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frame(&self, index: usize) -> Option<NodeHandle> {
        self.frames.get(&index).copied()
    }

    /// Node of the frame currently attached, if any.
    #[must_use]
    pub fn displayed_frame(&self) -> Option<NodeHandle> {
        self.displayed_frame_index.and_then(|index| self.frame(index))
    }
}

/// Frame index encoded in a mesh name. Surrounding whitespace is ignored;
/// anything else that is not a non-negative integer is rejected.
#[must_use]
pub fn parse_frame_index(name: &str) -> Option<usize> {
    name.trim().parse().ok()
}
