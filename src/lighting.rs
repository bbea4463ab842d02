//! Fixed lighting constants for the scene, uploaded once at load time.

/// Uniform block consumed by the fragment shader.
///
/// Every field is a vec4 because uniform blocks require 16 byte spacing; only
/// the x component of `specular_falloff` is meaningful.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub main_color: [f32; 4],
    pub light_pos: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub specular_falloff: [f32; 4],
}

impl LightingUniform {
    /// The scene's one light: a neutral grey base, a light up and to the
    /// side, a cool diffuse tint and a tight specular highlight.
    pub const fn scene() -> Self {
        Self {
            main_color: [0.5, 0.5, 0.5, 1.0],
            light_pos: [0.717, 0.717, 0.0, 0.0],
            diffuse: [0.25, 0.25, 0.5, 1.0],
            specular: [0.7, 0.7, 0.7, 1.0],
            specular_falloff: [20.0, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LightingUniform;

    #[test]
    fn uniform_is_five_packed_vec4s() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 5 * 16);
        assert_eq!(bytemuck::bytes_of(&LightingUniform::scene()).len(), 80);
    }
}
