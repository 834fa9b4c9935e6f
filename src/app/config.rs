use std::path::PathBuf;

/// Recording folder used when none is given.
pub const DEFAULT_VIDEO_FOLDER: &str = "demo";
/// Environment variable naming the recording folder.
pub const VIDEO_FOLDER_ENV: &str = "MESH_VIDEO_FOLDER";

/// Where the viewer reads a recording from and writes saved metadata to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Folder holding `metadata.json`, `fg.glb` and `bg.glb`.
    pub video_folder: PathBuf,
    /// Folder `metadata.json` is saved into.
    pub output_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_FOLDER)
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn new(video_folder: impl Into<PathBuf>) -> Self {
        Self {
            video_folder: video_folder.into(),
            output_dir: PathBuf::from("."),
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// First positional argument, then `MESH_VIDEO_FOLDER`, then `demo`.
    #[must_use]
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let folder = args
            .next()
            .filter(|arg| !arg.is_empty())
            .or_else(|| std::env::var(VIDEO_FOLDER_ENV).ok())
            .unwrap_or_else(|| DEFAULT_VIDEO_FOLDER.to_string());
        Self::new(folder)
    }

    /// Reads the process arguments (skipping the program name).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }
}
