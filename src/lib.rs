//! A textured, lit torus spinning about its vertical axis, drawn with OpenGL
//! 3.3 through `glow`.
//!
//! [`Program`] owns the GPU side: shaders, mesh buffers, the texture and the
//! orbit camera. The `torus-gl` binary hosts it in a `winit` window.

pub mod engine;
pub mod index;

pub use index::{ Program, TEXTURE_UNIT };
