pub mod channels;
pub mod clock;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod render_loop;

pub use channels::*;
pub use clock::*;
pub use error::*;
pub use frame::*;
pub use render_loop::*;
