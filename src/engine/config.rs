//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock scene: a 3/1 torus with 64x32 subdivisions, lit from the
//! eye and spinning 0.01 rad per frame.

use std::f32::consts::PI;
use std::path::{ Path, PathBuf };

use serde::{ Deserialize, Serialize };

use crate::engine::components::material::Material;
use crate::engine::components::mesh::TorusParams;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "TORUS_GL_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Textured torus".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    pub outer_radius: f32,
    /// Defaults to a third of the outer radius when omitted.
    pub inner_radius: Option<f32>,
    pub slices: u32,
    pub stacks: u32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            outer_radius: 3.0,
            inner_radius: None,
            slices: 64,
            stacks: 32,
        }
    }
}

/// Fewest subdivisions that still enclose a volume.
pub const MIN_SUBDIVISIONS: u32 = 3;

impl TorusConfig {
    pub fn params(&self) -> TorusParams {
        let inner_radius = self.inner_radius.unwrap_or(self.outer_radius / 3.0);
        TorusParams::new(self.outer_radius, inner_radius, self.slices, self.stacks)
    }

    /// The mesh generator trusts its input; this is where user values are
    /// checked before they reach it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.params();
        if !(p.outer_radius.is_finite() && p.outer_radius > 0.0) {
            return Err(invalid(format!("outer_radius must be positive, got {}", p.outer_radius)));
        }
        if !(p.inner_radius.is_finite() && p.inner_radius > 0.0 && p.inner_radius < p.outer_radius) {
            return Err(
                invalid(
                    format!(
                        "inner_radius must lie in (0, outer_radius = {}), got {}",
                        p.outer_radius,
                        p.inner_radius
                    )
                )
            );
        }
        if p.slices < MIN_SUBDIVISIONS || p.stacks < MIN_SUBDIVISIONS {
            return Err(
                invalid(
                    format!(
                        "slices and stacks must be at least {}, got {}x{}",
                        MIN_SUBDIVISIONS,
                        p.slices,
                        p.stacks
                    )
                )
            );
        }
        // Every vertex must be addressable by a u32 index.
        let fits = p.slices
            .checked_add(1)
            .zip(p.stacks.checked_add(1))
            .and_then(|(columns, rows)| columns.checked_mul(rows))
            .is_some();
        if !fits {
            return Err(
                invalid(format!("{}x{} subdivisions exceed 32-bit vertex indices", p.slices, p.stacks))
            );
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the eye from the origin along +Z.
    pub eye_distance: f32,
    /// Rotation added every frame, in radians.
    pub angle_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_radians: PI / 5.0,
            near: 0.1,
            far: 20.0,
            eye_distance: 10.0,
            angle_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub torus: TorusConfig,
    pub texture_path: PathBuf,
    pub camera: CameraConfig,
    pub clear_color: [f32; 4],
    pub material: Material,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            torus: TorusConfig::default(),
            texture_path: PathBuf::from("assets/textures/blue.png"),
            camera: CameraConfig::default(),
            clear_color: [0.15, 0.15, 0.3, 1.0],
            material: Material::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.torus.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text).map_err(|e| match e {
            ConfigError::Json(source) => ConfigError::Parse { path: path.to_path_buf(), source },
            other => other,
        })?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => {
                log::debug!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }
}
