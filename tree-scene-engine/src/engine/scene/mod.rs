//! Scene construction: entity placement and spawning.
//!
//! The placement generator is pure and RNG-injected so layouts can be
//! reproduced in tests; the spawn systems turn generated seeds into ECS
//! entities once at scene construction.

/// Entity components and startup spawn systems for every animated class.
pub mod entities;

/// Pure placement generator: dispersed and formed endpoints plus per-entity
/// static attributes, derived from an explicitly owned RNG.
pub mod placement;

/// Photo texture list resource and ornament texture cycling.
pub mod photo_set;
