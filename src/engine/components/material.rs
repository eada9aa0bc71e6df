use serde::{ Deserialize, Serialize };

/// Light and surface constants pushed to the shader once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Homogeneous eye-space position. `w == 0` makes it a directional light.
    pub light_position: [f32; 4],
    pub diffuse_color: [f32; 4],
    pub specular_color: [f32; 3],
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            light_position: [0.0, 0.0, 0.0, 1.0],
            diffuse_color: [1.0, 1.0, 1.0, 1.0],
            specular_color: [0.5, 0.5, 0.5],
            specular_exponent: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_sits_at_the_eye() {
        let material = Material::default();
        assert_eq!(material.light_position, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(material.specular_exponent, 10.0);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let material: Material = serde_json::from_str(r#"{ "light_position": [1.0, 1.0, 1.0, 0.0] }"#).unwrap();
        assert_eq!(material.light_position, [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(material.diffuse_color, Material::default().diffuse_color);
        assert_eq!(material.specular_color, [0.5, 0.5, 0.5]);
    }
}
