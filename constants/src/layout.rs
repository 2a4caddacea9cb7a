/// Tree silhouette height, base to apex.
pub const TREE_HEIGHT: f32 = 32.0;

/// Cone radius at the base of the tree (`t = 0`); shrinks linearly to 0 at the apex.
pub const TREE_BASE_RADIUS: f32 = 12.0;

/// Half-extent of the chaos cube ornaments scatter into.
pub const ORNAMENT_CHAOS_EXTENT: f32 = 70.0;

/// Half-extent of the chaos cube for decorative props and lights.
pub const PROP_CHAOS_EXTENT: f32 = 60.0;

/// Radius of the chaos sphere the foliage cloud disperses into.
pub const FOLIAGE_CHAOS_RADIUS: f32 = 25.0;

/// Radial offset keeping ornaments just proud of the foliage surface.
pub const ORNAMENT_SURFACE_OFFSET: f32 = 0.6;

/// Radial offset for decorative props; larger than ornaments so boxes never clip.
pub const PROP_SURFACE_OFFSET: f32 = 1.2;

/// Radial offset for string lights, sitting almost on the foliage.
pub const LIGHT_SURFACE_OFFSET: f32 = 0.3;

/// Height of the emblem above the cone apex.
pub const EMBLEM_APEX_OFFSET: f32 = 1.5;

/// Default entity counts, fixed at scene construction.
pub const FOLIAGE_POINT_COUNT: usize = 15_000;
pub const ORNAMENT_COUNT: usize = 300;
pub const PROP_COUNT: usize = 48;
pub const LIGHT_COUNT: usize = 120;
