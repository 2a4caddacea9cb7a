use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use crate::engine::scene::placement::FoliageSeed;

/// Build the static foliage sprite mesh. Each point becomes six vertices
/// (two triangles) that the vertex shader expands to a screen-aligned quad
/// from the vertex index. Per-point data rides in the standard attribute
/// slots: dispersed position in POSITION, formed position in NORMAL, and
/// the turbulence seed plus sprite size factor in COLOR.
pub fn create_foliage_point_mesh(seed: &FoliageSeed) -> Mesh {
    let point_count = seed.dispersed.len();
    let vertex_count = point_count * 6;

    let mut dispersed: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut formed: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut jitter: Vec<[f32; 4]> = Vec::with_capacity(vertex_count);

    for i in 0..point_count {
        let d = seed.dispersed[i].to_array();
        let f = seed.formed[i].to_array();
        let j = seed.jitter[i].to_array();
        for _ in 0..6 {
            dispersed.push(d);
            formed.push(f);
            jitter.push(j);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, dispersed);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, formed);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, jitter);
    mesh
}
