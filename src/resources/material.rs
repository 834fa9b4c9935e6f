use glam::Vec4;

/// Opaque reference to a texture owned by the mesh source.
///
/// For glTF sources this is the document's texture index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureRef(pub usize);

// ============================================================================
// Specific Materials
// ============================================================================

// MeshStandardMaterial
// ----------------------------------------------------------------------------
/// Lit material as authored in the source asset.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStandardMaterial {
    pub color: Vec4,
    pub map: Option<TextureRef>,
}

impl MeshStandardMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self { color, map: None }
    }

    #[must_use]
    pub fn with_map(mut self, map: TextureRef) -> Self {
        self.map = Some(map);
        self
    }
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

// MeshBasicMaterial
// ----------------------------------------------------------------------------
/// Unlit material. Frames are displayed with this so baked lighting in the
/// colour map is shown as captured.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBasicMaterial {
    pub color: Vec4,
    pub map: Option<TextureRef>,
    /// Multiply by per-vertex colours instead of relying on the map alone.
    pub vertex_colors: bool,
}

impl MeshBasicMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            map: None,
            vertex_colors: false,
        }
    }
}

impl Default for MeshBasicMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

// ============================================================================
// Material enum
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Standard(MeshStandardMaterial),
    Basic(MeshBasicMaterial),
}

impl Material {
    #[must_use]
    pub fn map(&self) -> Option<TextureRef> {
        match self {
            Self::Standard(m) => m.map,
            Self::Basic(m) => m.map,
        }
    }

    #[must_use]
    pub fn vertex_colors(&self) -> bool {
        match self {
            Self::Standard(_) => false,
            Self::Basic(m) => m.vertex_colors,
        }
    }

    /// Unlit replacement keeping only the colour map.
    #[must_use]
    pub fn to_basic(&self, vertex_colors: bool) -> Self {
        Self::Basic(MeshBasicMaterial {
            color: Vec4::ONE,
            map: self.map(),
            vertex_colors,
        })
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Standard(MeshStandardMaterial::default())
    }
}

impl From<MeshStandardMaterial> for Material {
    fn from(m: MeshStandardMaterial) -> Self {
        Self::Standard(m)
    }
}

impl From<MeshBasicMaterial> for Material {
    fn from(m: MeshBasicMaterial) -> Self {
        Self::Basic(m)
    }
}
