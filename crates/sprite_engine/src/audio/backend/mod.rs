//! Audio output backends

pub mod rodio_backend;

pub use rodio_backend::RodioAudio;
