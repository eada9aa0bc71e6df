//! Names and locations of the torus shader's inputs.

use super::backend::GraphicsBackend;
use crate::engine::components::camera::FrameTransforms;
use crate::engine::components::material::Material;

pub const VERTEX_SHADER_SOURCE: &str = include_str!("../../assets/shaders/vertex_torus.glsl");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../../assets/shaders/fragment_torus.glsl");

pub const ATTRIB_COORDS: &str = "a_coords";
pub const ATTRIB_NORMAL: &str = "a_normal";
pub const ATTRIB_TEXCOORD: &str = "a_texcoord";

pub const UNIFORM_MODELVIEW: &str = "modelview";
pub const UNIFORM_PROJECTION: &str = "projection";
pub const UNIFORM_NORMAL_MATRIX: &str = "normalMatrix";
pub const UNIFORM_LIGHT_POSITION: &str = "lightPosition";
pub const UNIFORM_DIFFUSE_COLOR: &str = "diffuseColor";
pub const UNIFORM_SPECULAR_COLOR: &str = "specularColor";
pub const UNIFORM_SPECULAR_EXPONENT: &str = "specularExponent";
pub const UNIFORM_TEXTURE: &str = "u_texture";

/// Vertex attribute slots. `None` means the linker dropped the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLocations {
    pub coords: Option<u32>,
    pub normal: Option<u32>,
    pub texcoord: Option<u32>,
}

impl AttributeLocations {
    pub fn resolve<G: GraphicsBackend>(gl: &G, program: G::Program) -> Self {
        Self {
            coords: lookup(ATTRIB_COORDS, gl.attrib_location(program, ATTRIB_COORDS)),
            normal: lookup(ATTRIB_NORMAL, gl.attrib_location(program, ATTRIB_NORMAL)),
            texcoord: lookup(ATTRIB_TEXCOORD, gl.attrib_location(program, ATTRIB_TEXCOORD)),
        }
    }
}

pub struct UniformLocations<G: GraphicsBackend> {
    modelview: Option<G::UniformLocation>,
    projection: Option<G::UniformLocation>,
    normal_matrix: Option<G::UniformLocation>,
    light_position: Option<G::UniformLocation>,
    diffuse_color: Option<G::UniformLocation>,
    specular_color: Option<G::UniformLocation>,
    specular_exponent: Option<G::UniformLocation>,
    texture: Option<G::UniformLocation>,
}

impl<G: GraphicsBackend> UniformLocations<G> {
    pub fn resolve(gl: &G, program: G::Program) -> Self {
        let get = |name| lookup(name, gl.uniform_location(program, name));
        Self {
            modelview: get(UNIFORM_MODELVIEW),
            projection: get(UNIFORM_PROJECTION),
            normal_matrix: get(UNIFORM_NORMAL_MATRIX),
            light_position: get(UNIFORM_LIGHT_POSITION),
            diffuse_color: get(UNIFORM_DIFFUSE_COLOR),
            specular_color: get(UNIFORM_SPECULAR_COLOR),
            specular_exponent: get(UNIFORM_SPECULAR_EXPONENT),
            texture: get(UNIFORM_TEXTURE),
        }
    }

    /// Light and material constants; set once after the program is in use.
    pub fn apply_material(&self, gl: &G, material: &Material) {
        if let Some(loc) = &self.specular_color {
            gl.uniform_vec3(loc, material.specular_color);
        }
        if let Some(loc) = &self.diffuse_color {
            gl.uniform_vec4(loc, material.diffuse_color);
        }
        if let Some(loc) = &self.specular_exponent {
            gl.uniform_f32(loc, material.specular_exponent);
        }
        if let Some(loc) = &self.light_position {
            gl.uniform_vec4(loc, material.light_position);
        }
    }

    pub fn apply_transforms(&self, gl: &G, transforms: &FrameTransforms) {
        if let Some(loc) = &self.normal_matrix {
            gl.uniform_mat3(loc, &transforms.normal_matrix);
        }
        if let Some(loc) = &self.modelview {
            gl.uniform_mat4(loc, &transforms.modelview);
        }
        if let Some(loc) = &self.projection {
            gl.uniform_mat4(loc, &transforms.projection);
        }
    }

    pub fn apply_texture_unit(&self, gl: &G, unit: u32) {
        if let Some(loc) = &self.texture {
            gl.uniform_i32(loc, unit as i32);
        }
    }
}

fn lookup<T>(name: &str, location: Option<T>) -> Option<T> {
    if location.is_none() {
        log::warn!("shader input `{}` is inactive; skipping it", name);
    }
    location
}
