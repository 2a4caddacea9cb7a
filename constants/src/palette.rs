use bevy::prelude::*;

/// Base colour of the foliage cloud; the shader blends from a dim to a
/// bright multiple of this as the tree assembles.
pub const FOLIAGE_BASE_COLOUR: Color = Color::srgb(0.16, 0.55, 0.25);

/// Fixed 4-colour palette the string lights draw from.
pub const LIGHT_PALETTE: [Color; 4] = [
    Color::srgb(1.0, 0.84, 0.35),
    Color::srgb(0.95, 0.25, 0.25),
    Color::srgb(0.30, 0.65, 1.0),
    Color::srgb(0.55, 1.0, 0.55),
];

/// Gift box wrap colours.
pub const BOX_PALETTE: [Color; 3] = [
    Color::srgb(0.78, 0.15, 0.20),
    Color::srgb(0.15, 0.45, 0.72),
    Color::srgb(0.85, 0.70, 0.25),
];

/// Bauble sphere colours.
pub const BAUBLE_PALETTE: [Color; 3] = [
    Color::srgb(0.90, 0.20, 0.25),
    Color::srgb(0.95, 0.80, 0.30),
    Color::srgb(0.75, 0.78, 0.82),
];

/// Candy cane cylinder colours.
pub const CANE_PALETTE: [Color; 2] = [
    Color::srgb(0.95, 0.95, 0.95),
    Color::srgb(0.88, 0.20, 0.22),
];

/// Photo ornament border colour.
pub const ORNAMENT_BORDER_COLOUR: Color = Color::srgb(0.85, 0.68, 0.30);

/// Emblem (apex star) colour.
pub const EMBLEM_COLOUR: Color = Color::srgb(1.0, 0.88, 0.45);
