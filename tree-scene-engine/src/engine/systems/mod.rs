/// Frame-rate reporting: on-screen overlay plus host notifications.
pub mod fps_tracking;
