/// Keyboard shortcuts understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// `r`: camera and world back to their start transforms.
    ResetCamera,
    /// `p`: write the current poses to `metadata.json`.
    SaveMetadata,
}

impl KeyAction {
    /// Maps a typed character to its action. Case sensitive.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'r' => Some(Self::ResetCamera),
            'p' => Some(Self::SaveMetadata),
            _ => None,
        }
    }
}
