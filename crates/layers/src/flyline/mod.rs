//! Animated highlights sweeping along fixed paths.

pub mod error;
pub mod layer;
pub mod resample;
pub mod sampler;
pub mod sink;

pub use error::FlylineError;
pub use layer::{FlylineEntry, FlylineLayer};
pub use resample::{path_length, resample};
pub use sampler::{FlylineSampler, Sweep, Window};
pub use sink::{LineGeometry, LineSink, SharedLine, shared_line};
