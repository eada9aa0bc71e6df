//! The torus texture: a white placeholder that is swapped for the real image
//! once it has been read and decoded in the background.

use std::io::Cursor;
use std::path::{ Path, PathBuf };

use image::io::Reader as ImageReader;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::engine::error::RenderError;
use crate::engine::rendering::backend::{ GraphicsBackend, TextureSampling };

/// Opaque white, so the lit color shows through unchanged until the image lands.
pub const PLACEHOLDER_PIXEL: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("unable to load image from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decode image from {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image load for {path:?} ended without a result")]
    Dropped { path: PathBuf },
}

/// Tightly packed RGBA8 pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_image(path: &Path) -> Result<DecodedImage, TextureError> {
    let io_err = |source| TextureError::Io { path: path.to_path_buf(), source };

    let bytes = std::fs::read(path).map_err(io_err)?;
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| TextureError::Decode { path: path.to_path_buf(), source })?;

    log::debug!("decoded {:?} ({:?})", path, img.color());

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok(DecodedImage { width, height, pixels: rgba_img.into_raw() })
}

/// An image being read and decoded on the blocking pool.
///
/// Nothing here touches the graphics context; the owner polls
/// [`PendingImage::try_take`] from the render thread and uploads the result.
pub struct PendingImage {
    path: PathBuf,
    receiver: oneshot::Receiver<Result<DecodedImage, TextureError>>,
}

impl PendingImage {
    pub fn spawn(runtime: &tokio::runtime::Handle, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = oneshot::channel();
        let task_path = path.clone();
        runtime.spawn_blocking(move || {
            // The receiver is gone only if the program shut down first.
            let _ = sender.send(decode_image(&task_path));
        });
        log::info!("loading texture from {:?}", path);
        Self { path, receiver }
    }

    /// `None` while the load is still running.
    pub fn try_take(&mut self) -> Option<Result<DecodedImage, TextureError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(TextureError::Dropped { path: self.path.clone() })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Placeholder,
    Loaded { width: u32, height: u32 },
}

/// The single texture object the torus samples from.
pub struct TextureSlot<G: GraphicsBackend> {
    texture: G::Texture,
    state: TextureState,
}

impl<G: GraphicsBackend> TextureSlot<G> {
    pub fn placeholder(gl: &G) -> Result<Self, RenderError> {
        let texture = gl.create_texture().map_err(RenderError::resource("texture"))?;
        gl.upload_texture_rgba8(texture, 1, 1, &PLACEHOLDER_PIXEL);
        gl.set_texture_sampling(texture, TextureSampling::ClampLinear);
        Ok(Self { texture, state: TextureState::Placeholder })
    }

    pub fn state(&self) -> TextureState {
        self.state
    }

    /// Replaces the texture's image in place; the object itself is kept.
    pub fn respecify(&mut self, gl: &G, image: &DecodedImage) {
        gl.upload_texture_rgba8(self.texture, image.width, image.height, &image.pixels);
        gl.set_texture_sampling(self.texture, TextureSampling::for_dimensions(image.width, image.height));
        self.state = TextureState::Loaded { width: image.width, height: image.height };
    }

    /// Applies a finished load. Failures are only logged; the placeholder stays.
    pub fn finish_load(&mut self, gl: &G, result: Result<DecodedImage, TextureError>) {
        match result {
            Ok(image) => {
                self.respecify(gl, &image);
                log::info!("texture loaded: {}x{} pixels", image.width, image.height);
            }
            Err(e) => {
                log::error!("{}", e);
            }
        }
    }

    pub fn bind(&self, gl: &G, unit: u32) {
        gl.bind_texture_unit(unit, self.texture);
    }

    pub fn cleanup(&self, gl: &G) {
        gl.delete_texture(self.texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("torus-gl-{}-{}", std::process::id(), name))
    }

    #[test]
    fn decodes_png_to_rgba() {
        let path = temp_path("decode.png");
        image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30])).save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = decode_image(Path::new("/no/such/texture.png")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = decode_image(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn pending_image_reports_result_once_done() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let path = temp_path("pending.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4])).save(&path).unwrap();

        let mut pending = PendingImage::spawn(runtime.handle(), &path);
        let mut result = None;
        for _ in 0..500 {
            if let Some(r) = pending.try_take() {
                result = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        std::fs::remove_file(&path).ok();

        let image = result.expect("load finished").unwrap();
        assert_eq!((image.width, image.height), (4, 4));
    }
}
