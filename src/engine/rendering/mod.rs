pub mod backend;
pub mod glow_backend;
pub mod shader_interface;

pub use backend::{ GraphicsBackend, TextureSampling };
pub use glow_backend::GlowBackend;
