use crate::resources::material::Material;

/// Opaque reference to geometry owned by the mesh source.
///
/// For glTF sources this is the document's mesh index. Geometry is never
/// decoded by the player; the reference is handed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryRef(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,

    // === Resource references ===
    pub geometry: GeometryRef,
    pub material: Material,

    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: GeometryRef, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            visible: true,
        }
    }
}
