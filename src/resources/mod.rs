//! Drawable resources handed from mesh sources to the scene.

pub mod material;
pub mod mesh;

pub use material::{Material, MeshBasicMaterial, MeshStandardMaterial, TextureRef};
pub use mesh::{GeometryRef, Mesh};
