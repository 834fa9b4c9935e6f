use glam::Vec4;

use crate::assets::io::AssetReader;
use crate::assets::source::{FragmentItem, MeshFragment, MeshSource};
use crate::errors::{MeshVideoError, Result};
use crate::resources::material::{Material, MeshStandardMaterial, TextureRef};
use crate::resources::mesh::{GeometryRef, Mesh};

/// Mesh source reading `.glb` / `.gltf` documents.
///
/// Only the node structure is read: each child of the first root node of the
/// default scene becomes one fragment item. Nodes carrying a mesh become
/// [`FragmentItem::Mesh`] with the mesh index as geometry reference and the
/// first primitive's base colour texture as material map. Vertex data is
/// never decoded.
pub struct GltfMeshSource<R: AssetReader> {
    reader: R,
}

impl<R: AssetReader> GltfMeshSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }
}

impl<R: AssetReader + 'static> MeshSource for GltfMeshSource<R> {
    async fn load(&self, path: &str) -> Result<MeshFragment> {
        let bytes = self.reader.read_bytes(path).await?;
        parse_fragment(&bytes, path)
    }
}

/// Parses a glTF (JSON or binary) document into a fragment.
pub fn parse_fragment(bytes: &[u8], path: &str) -> Result<MeshFragment> {
    let gltf = gltf::Gltf::from_slice_without_validation(bytes)?;

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| MeshVideoError::MissingRootNode {
            path: path.to_string(),
        })?;

    let root = scene
        .nodes()
        .next()
        .ok_or_else(|| MeshVideoError::MissingRootNode {
            path: path.to_string(),
        })?;

    let items = root.children().map(|node| fragment_item(&node)).collect();

    Ok(MeshFragment::new(items))
}

fn fragment_item(node: &gltf::Node) -> FragmentItem {
    let name = node.name().unwrap_or_default().to_string();

    let Some(mesh) = node.mesh() else {
        return FragmentItem::Empty { name };
    };

    let material = mesh
        .primitives()
        .next()
        .map(|primitive| standard_material(&primitive.material()))
        .unwrap_or_default();

    FragmentItem::Mesh(Mesh::new(
        name,
        GeometryRef(mesh.index()),
        Material::Standard(material),
    ))
}

fn standard_material(material: &gltf::Material) -> MeshStandardMaterial {
    let pbr = material.pbr_metallic_roughness();
    MeshStandardMaterial {
        color: Vec4::from_array(pbr.base_color_factor()),
        map: pbr
            .base_color_texture()
            .map(|info| TextureRef(info.texture().index())),
    }
}
