pub mod error;
pub mod flywire;
pub mod geojson;

pub use error::*;
pub use flywire::*;
pub use geojson::*;
