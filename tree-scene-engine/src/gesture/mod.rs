//! Hand-gesture input: an asynchronous capture/infer loop publishing
//! landmark samples into a single-slot mailbox, and the pure mapping from
//! the latest sample to orbit-camera controls and scene commands.
//!
//! The render schedule only ever reads the most recently published sample
//! and never blocks; losing intermediate samples is correct behaviour.

/// Pure per-frame mapping from a sample to camera controls and pose commands.
pub mod mapper;

/// Capture/infer loop, boundary traits and the status channel.
pub mod pipeline;

/// Landmark sample structure and validation.
pub mod sample;

/// Single-slot most-recent-wins mailbox shared across timelines.
pub mod slot;
