pub mod gltf;

pub use self::gltf::GltfMeshSource;
