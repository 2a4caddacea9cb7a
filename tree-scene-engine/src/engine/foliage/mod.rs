//! GPU foliage cloud: one static point-sprite buffer driven by a single
//! scalar progress uniform. The CPU side only damps the scalar and writes a
//! small uniform set per frame; all per-point work happens in the shader.

/// Point-sprite material with the progress/time uniform set.
pub mod material;

/// Static sprite mesh builder: six vertices per point, expanded to a
/// camera-facing quad in the vertex shader.
pub mod point_mesh;

/// Critically damped scalar progress and the per-frame uniform write.
pub mod progress;
