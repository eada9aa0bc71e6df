pub mod assets_manager;
pub mod texture_manager;

pub use assets_manager::{ create_shader_program, MeshBuffers };
pub use texture_manager::{ DecodedImage, PendingImage, TextureError, TextureSlot, TextureState };
