//! Mesh video playback
//!
//! - [`MeshTrack`]: one frame sequence and its playhead
//! - [`TrackSynchronizer`]: puts two tracks on one loop length
//! - [`SessionCalibration`]: recentres the user space for immersive sessions
//! - [`PlaybackDriver`]: the per-frame tick tying them together

pub mod calibration;
pub mod driver;
pub mod sync;
pub mod track;

pub use calibration::{RigOffsets, SessionCalibration};
pub use driver::{PlaybackDriver, SessionEvent, TickStatus};
pub use sync::TrackSynchronizer;
pub use track::{LoadState, MeshTrack};
