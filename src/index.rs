use crate::engine::components::camera::OrbitCamera;
use crate::engine::components::mesh::Mesh;
use crate::engine::config::ViewerConfig;
use crate::engine::error::RenderError;
use crate::engine::managers::assets_manager::{ create_shader_program, MeshBuffers };
use crate::engine::managers::texture_manager::{
    DecodedImage,
    PendingImage,
    TextureError,
    TextureSlot,
    TextureState,
};
use crate::engine::rendering::backend::GraphicsBackend;
use crate::engine::rendering::shader_interface::{
    AttributeLocations,
    UniformLocations,
    FRAGMENT_SHADER_SOURCE,
    VERTEX_SHADER_SOURCE,
};

/// Texture unit the torus samples from.
pub const TEXTURE_UNIT: u32 = 0;

/// Owns every GPU resource for the spinning torus and draws one frame per
/// [`Program::render`] call.
pub struct Program<G: GraphicsBackend> {
    gl: G,
    shader_program: G::Program,
    uniforms: UniformLocations<G>,
    mesh: MeshBuffers<G>,
    texture: TextureSlot<G>,
    pending_texture: Option<PendingImage>,
    camera: OrbitCamera,
    clear_color: [f32; 4],
}

impl<G: GraphicsBackend> Program<G> {
    /// Builds the whole pipeline and starts loading the configured texture on
    /// `runtime`. Fails if the shaders do not compile or link, or a GPU object
    /// cannot be created; nothing is drawn in that case.
    pub fn new(
        gl: G,
        config: &ViewerConfig,
        runtime: &tokio::runtime::Handle
    ) -> Result<Self, RenderError> {
        let mut program = Self::without_texture_load(gl, config)?;
        program.pending_texture = Some(PendingImage::spawn(runtime, &config.texture_path));
        Ok(program)
    }

    /// Same as [`Program::new`] but keeps the placeholder texture until
    /// [`Program::finish_texture_load`] is called. Initialization is
    /// all-or-nothing: on error every GPU object created so far is deleted.
    pub fn without_texture_load(gl: G, config: &ViewerConfig) -> Result<Self, RenderError> {
        let shader_program = create_shader_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)?;
        gl.use_program(Some(shader_program));

        let attributes = AttributeLocations::resolve(&gl, shader_program);
        let uniforms = UniformLocations::resolve(&gl, shader_program);

        gl.enable_depth_test();
        uniforms.apply_material(&gl, &config.material);

        let texture = match TextureSlot::placeholder(&gl) {
            Ok(texture) => texture,
            Err(e) => {
                release_program(&gl, shader_program);
                return Err(e);
            }
        };

        let params = config.torus.params();
        let mesh = match MeshBuffers::upload(&gl, &Mesh::torus(&params), &attributes) {
            Ok(mesh) => mesh,
            Err(e) => {
                texture.cleanup(&gl);
                release_program(&gl, shader_program);
                return Err(e);
            }
        };

        log::info!(
            "program initialized: torus {}/{} with {}x{} subdivisions",
            params.outer_radius,
            params.inner_radius,
            params.slices,
            params.stacks
        );

        Ok(Self {
            gl,
            shader_program,
            uniforms,
            mesh,
            texture,
            pending_texture: None,
            camera: OrbitCamera::new(config.camera.clone()),
            clear_color: config.clear_color,
        })
    }

    pub fn render(&mut self, width: u32, height: u32) {
        self.poll_texture();

        let gl = &self.gl;
        gl.viewport(width, height);
        gl.clear(self.clear_color);

        let transforms = self.camera.transforms(width, height);

        gl.use_program(Some(self.shader_program));
        gl.bind_vertex_array(Some(self.mesh.vao));
        self.uniforms.apply_transforms(gl, &transforms);

        self.texture.bind(gl, TEXTURE_UNIT);
        self.uniforms.apply_texture_unit(gl, TEXTURE_UNIT);

        gl.draw_indexed_triangles(self.mesh.index_count);

        self.camera.advance();
    }

    fn poll_texture(&mut self) {
        let Some(pending) = self.pending_texture.as_mut() else {
            return;
        };
        if let Some(result) = pending.try_take() {
            self.pending_texture = None;
            self.finish_texture_load(result);
        }
    }

    /// Completion handler for the texture load.
    pub fn finish_texture_load(&mut self, result: Result<DecodedImage, TextureError>) {
        self.texture.finish_load(&self.gl, result);
    }

    pub fn is_texture_pending(&self) -> bool {
        self.pending_texture.is_some()
    }

    pub fn texture_state(&self) -> TextureState {
        self.texture.state()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn index_count(&self) -> usize {
        self.mesh.index_count
    }

    pub fn cleanup(&self) {
        self.texture.cleanup(&self.gl);
        self.mesh.cleanup(&self.gl);
        release_program(&self.gl, self.shader_program);
    }
}

fn release_program<G: GraphicsBackend>(gl: &G, program: G::Program) {
    gl.use_program(None);
    gl.delete_program(program);
}
