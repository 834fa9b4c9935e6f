use crate::video::track::MeshTrack;

/// Puts the foreground and background tracks on one loop length so they
/// stay in phase.
#[derive(Debug, Clone, Default)]
pub struct TrackSynchronizer {
    /// Length from metadata; wins over whatever the tracks discovered.
    num_frames_override: Option<usize>,
    synced_num_frames: Option<usize>,
}

impl TrackSynchronizer {
    #[must_use]
    pub fn new(num_frames_override: Option<usize>) -> Self {
        Self {
            num_frames_override,
            synced_num_frames: None,
        }
    }

    /// Whether [`synchronize`](Self::synchronize) has run.
    #[inline]
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced_num_frames.is_some()
    }

    /// The loop length both tracks were given, once synced.
    #[inline]
    #[must_use]
    pub fn synced_num_frames(&self) -> Option<usize> {
        self.synced_num_frames
    }

    /// Resolves the shared `num_frames`, assigns it to both tracks and
    /// restarts both from frame 0.
    ///
    /// Running it again with the same tracks yields the same state. Meant to
    /// run before the first step: see [`MeshTrack::reset`] for frames that are
    /// already attached.
    pub fn synchronize(&mut self, dynamic: &mut MeshTrack, background: &mut MeshTrack) -> usize {
        let num_frames = self
            .num_frames_override
            .unwrap_or_else(|| dynamic.num_frames().max(background.num_frames()));

        dynamic.set_num_frames(num_frames);
        background.set_num_frames(num_frames);

        dynamic.reset();
        background.reset();

        log::info!(
            "Synchronized videos \"{}\" and \"{}\" to {num_frames} frames.",
            dynamic.scene_name(),
            background.scene_name()
        );

        self.synced_num_frames = Some(num_frames);
        num_frames
    }
}
