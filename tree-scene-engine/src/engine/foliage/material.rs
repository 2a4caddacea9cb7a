use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};

/// Foliage point-sprite material. The whole cloud shares one uniform set;
/// per-point variation comes from the mesh attributes.
///
/// params[0] = (progress, elapsed_time, point_scale, turbulence_amplitude)
/// params[1] = base colour rgb + unused
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FoliageMaterial {
    #[uniform(0)]
    pub params: [Vec4; 2],
}

impl FoliageMaterial {
    pub fn new(base_colour: Color) -> Self {
        let rgb = base_colour.to_linear();
        Self {
            params: [
                Vec4::new(0.0, 0.0, 0.35, 0.35),
                Vec4::new(rgb.red, rgb.green, rgb.blue, 0.0),
            ],
        }
    }
}

impl Material for FoliageMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/foliage.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/foliage.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}
