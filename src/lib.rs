#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod assets;
pub mod errors;
pub mod metadata;
pub mod resources;
pub mod scene;
pub mod utils;
pub mod video;

pub use app::Viewer;
pub use app::config::ViewerConfig;
pub use assets::{FileAssetReader, GltfMeshSource, MemoryMeshSource, MeshFragment, MeshSource};
pub use errors::{MeshVideoError, Result};
pub use metadata::Metadata;
pub use resources::{Material, Mesh};
pub use scene::{Node, NodeHandle, Pose, Scene};
pub use video::{MeshTrack, PlaybackDriver, SessionCalibration, TickStatus, TrackSynchronizer};
