pub mod camera;
pub mod material;
pub mod mesh;

pub use camera::{ FrameTransforms, OrbitCamera };
pub use material::Material;
pub use mesh::{ Mesh, TorusParams };
