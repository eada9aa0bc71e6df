pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod managers;
pub mod rendering;
pub mod utils;

pub use components::*;
pub use config::ViewerConfig;
pub use error::{ RenderError, ShaderStage };
