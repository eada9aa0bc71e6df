use crate::engine::components::mesh::Mesh;
use crate::engine::error::{ RenderError, ShaderStage };
use crate::engine::rendering::backend::GraphicsBackend;
use crate::engine::rendering::shader_interface::AttributeLocations;

fn compile_shader<G: GraphicsBackend>(
    gl: &G,
    stage: ShaderStage,
    source: &str
) -> Result<G::Shader, RenderError> {
    let shader = gl.create_shader(stage).map_err(RenderError::resource("shader"))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

/// Compiles and links a vertex + fragment pair.
///
/// Nothing is leaked on failure: every object created along the way is
/// deleted before the error is returned.
pub fn create_shader_program<G: GraphicsBackend>(
    gl: &G,
    vertex_shader_source: &str,
    fragment_shader_source: &str
) -> Result<G::Program, RenderError> {
    let vs = compile_shader(gl, ShaderStage::Vertex, vertex_shader_source)?;
    let fs = match compile_shader(gl, ShaderStage::Fragment, fragment_shader_source) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(message) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(RenderError::Resource { what: "shader program", message });
        }
    };
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    gl.link_program(program);

    // Attached shaders are only flagged here; the program keeps them alive.
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !gl.program_link_status(program) {
        let log = gl.program_info_log(program);
        gl.delete_program(program);
        return Err(RenderError::ProgramLink { log });
    }

    log::debug!("shader program linked");
    Ok(program)
}

/// GPU copies of a [`Mesh`], uploaded once and never respecified.
pub struct MeshBuffers<G: GraphicsBackend> {
    pub vao: G::VertexArray,
    positions: G::Buffer,
    normals: G::Buffer,
    tex_coords: G::Buffer,
    indices: G::Buffer,
    pub index_count: usize,
}

const BUFFER_NAMES: [&str; 4] = ["position buffer", "normal buffer", "texcoord buffer", "index buffer"];

impl<G: GraphicsBackend> MeshBuffers<G> {
    /// Creates the vertex array and its four buffers, then fills them. If any
    /// object cannot be created, the ones already made are deleted again.
    pub fn upload(gl: &G, mesh: &Mesh, attributes: &AttributeLocations) -> Result<Self, RenderError> {
        let vao = gl.create_vertex_array().map_err(RenderError::resource("vertex array"))?;

        let mut buffers = Vec::with_capacity(BUFFER_NAMES.len());
        for what in BUFFER_NAMES {
            match gl.create_buffer() {
                Ok(buffer) => buffers.push(buffer),
                Err(message) => {
                    for buffer in buffers {
                        gl.delete_buffer(buffer);
                    }
                    gl.delete_vertex_array(vao);
                    return Err(RenderError::Resource { what, message });
                }
            }
        }
        let (positions, normals, tex_coords, indices) = (buffers[0], buffers[1], buffers[2], buffers[3]);

        gl.bind_vertex_array(Some(vao));
        gl.upload_vertex_attribute(
            positions,
            attributes.coords,
            3,
            bytemuck::cast_slice(&mesh.positions)
        );
        gl.upload_vertex_attribute(normals, attributes.normal, 3, bytemuck::cast_slice(&mesh.normals));
        gl.upload_vertex_attribute(
            tex_coords,
            attributes.texcoord,
            2,
            bytemuck::cast_slice(&mesh.tex_coords)
        );
        gl.upload_indices(indices, mesh.indices());

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );

        Ok(Self {
            vao,
            positions,
            normals,
            tex_coords,
            indices,
            index_count: mesh.index_count(),
        })
    }

    pub fn cleanup(&self, gl: &G) {
        gl.delete_buffer(self.positions);
        gl.delete_buffer(self.normals);
        gl.delete_buffer(self.tex_coords);
        gl.delete_buffer(self.indices);
        gl.delete_vertex_array(self.vao);
    }
}
