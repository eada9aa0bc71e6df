//! The slice of a GL-style graphics API the torus renderer needs.
//!
//! Render setup and the frame loop are written against [`GraphicsBackend`]
//! rather than `glow` directly. The production implementation lives in
//! [`super::glow_backend`]; tests drive the same code with a recording
//! backend.

use crate::engine::error::ShaderStage;
use crate::engine::utils::math::{ Mat3x3, Mat4x4 };

/// Wrap and filter state for the bound texture image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSampling {
    /// REPEAT wrap, trilinear minification, mipmaps generated.
    MipmappedRepeat,
    /// CLAMP_TO_EDGE wrap, LINEAR filters, no mipmaps.
    ClampLinear,
}

impl TextureSampling {
    /// Mipmaps and repeat wrapping are only requested for power-of-two images.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        if width.is_power_of_two() && height.is_power_of_two() {
            TextureSampling::MipmappedRepeat
        } else {
            TextureSampling::ClampLinear
        }
    }
}

pub trait GraphicsBackend {
    type Shader: Copy;
    type Program: Copy;
    type Buffer: Copy;
    type VertexArray: Copy;
    type Texture: Copy;
    type UniformLocation: Clone;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vao: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    /// Fills `buffer` with static float data and, when `location` is known,
    /// points that attribute at it as tightly packed `components`-wide vectors.
    fn upload_vertex_attribute(
        &self,
        buffer: Self::Buffer,
        location: Option<u32>,
        components: i32,
        data: &[f32]
    );
    /// Fills `buffer` with static element indices for the bound vertex array.
    fn upload_indices(&self, buffer: Self::Buffer, indices: &[u32]);

    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn delete_texture(&self, texture: Self::Texture);
    /// (Re)specifies mip level 0 of `texture` as tightly packed RGBA8.
    fn upload_texture_rgba8(&self, texture: Self::Texture, width: u32, height: u32, pixels: &[u8]);
    fn set_texture_sampling(&self, texture: Self::Texture, sampling: TextureSampling);
    fn bind_texture_unit(&self, unit: u32, texture: Self::Texture);

    fn uniform_mat4(&self, location: &Self::UniformLocation, value: &Mat4x4);
    fn uniform_mat3(&self, location: &Self::UniformLocation, value: &Mat3x3);
    fn uniform_vec4(&self, location: &Self::UniformLocation, value: [f32; 4]);
    fn uniform_vec3(&self, location: &Self::UniformLocation, value: [f32; 3]);
    fn uniform_f32(&self, location: &Self::UniformLocation, value: f32);
    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32);

    fn enable_depth_test(&self);
    fn viewport(&self, width: u32, height: u32);
    fn clear(&self, color: [f32; 4]);
    fn draw_indexed_triangles(&self, index_count: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_images_get_mipmaps() {
        assert_eq!(TextureSampling::for_dimensions(256, 512), TextureSampling::MipmappedRepeat);
        assert_eq!(TextureSampling::for_dimensions(1, 1), TextureSampling::MipmappedRepeat);
    }

    #[test]
    fn any_odd_dimension_clamps() {
        assert_eq!(TextureSampling::for_dimensions(256, 300), TextureSampling::ClampLinear);
        assert_eq!(TextureSampling::for_dimensions(640, 512), TextureSampling::ClampLinear);
    }
}
