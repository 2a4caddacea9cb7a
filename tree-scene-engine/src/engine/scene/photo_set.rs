use bevy::prelude::*;
use constants::palette::ORNAMENT_BORDER_COLOUR;

use super::entities::Ornament;

/// Ordered photo handles supplied by the host. Shorter lists than the
/// ornament count are cycled by modulo; an empty list leaves ornaments on
/// their border colour.
#[derive(Resource, Default)]
pub struct PhotoSet {
    pub handles: Vec<Handle<Image>>,
}

/// Stable texture slot for an ornament: modulo cycling over the photo list.
pub fn texture_slot(ornament_index: usize, photo_count: usize) -> Option<usize> {
    if photo_count == 0 {
        return None;
    }
    Some(ornament_index % photo_count)
}

/// Re-derives ornament textures when the photo set changes. Only the
/// cosmetic texture assignment is touched; endpoints and in-flight
/// animation state are never disturbed by photo swaps.
pub fn assign_ornament_textures(
    photo_set: Res<PhotoSet>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    ornaments: Query<(&Ornament, &MeshMaterial3d<StandardMaterial>)>,
) {
    if !photo_set.is_changed() {
        return;
    }

    for (ornament, material_handle) in &ornaments {
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        match texture_slot(ornament.index, photo_set.handles.len()) {
            Some(slot) => {
                material.base_color_texture = Some(photo_set.handles[slot].clone());
                material.base_color = Color::WHITE;
            }
            None => {
                material.base_color_texture = None;
                material.base_color = ORNAMENT_BORDER_COLOUR;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::texture_slot;

    #[test]
    fn short_photo_lists_cycle_without_out_of_range_indices() {
        let photos = 5;
        for ornament in 0..300 {
            let slot = texture_slot(ornament, photos).unwrap();
            assert!(slot < photos);
            assert_eq!(slot, ornament % photos);
        }
    }

    #[test]
    fn empty_photo_list_assigns_no_texture() {
        assert_eq!(texture_slot(42, 0), None);
    }

    #[test]
    fn photo_count_change_only_moves_the_slot() {
        // The ornament index is stable; only the modulo result changes.
        assert_eq!(texture_slot(7, 5), Some(2));
        assert_eq!(texture_slot(7, 3), Some(1));
    }
}
