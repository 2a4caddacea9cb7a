pub mod camera;
pub mod choreography;
pub mod core;
pub mod foliage;
pub mod scene;
pub mod systems;
