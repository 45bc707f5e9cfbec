//! Pairing and compositing pipeline components.
//!
//! - **discovery**: Find eligible images in a directory
//! - **pairing**: Randomly pair images across two pools
//! - **decode**: Load and decode images with size limits
//! - **exposure**: Greyscale, resize, brightness, and the additive blend
//! - **compositor**: Runs the per-pair loop, on a worker thread if asked
//! - **channel**: One-way progress channel from worker to foreground

pub mod channel;
pub mod compositor;
pub mod decode;
pub mod discovery;
pub mod exposure;
pub mod pairing;

// Re-exports for convenient access
pub use channel::{progress_channel, ProgressReceiver, ProgressSender};
pub use compositor::{ComposeOptions, Compositor, CompositorState, RunHandle};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use exposure::Exposure;
pub use pairing::{PairGenerator, Pairing};
