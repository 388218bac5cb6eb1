pub mod choropleth;
pub mod flyline;
pub mod globe;
pub mod layer;
pub mod mesh;

pub use choropleth::{Framing, MapConfig, MapLayer, MapSnapshot, RegionMesh};
pub use flyline::{FlylineError, FlylineLayer, FlylineSampler, LineGeometry, LineSink, SharedLine};
pub use globe::{CountryLayer, CountryMesh, GlobeConfig, GlobeSnapshot, HoleMode, SkippedFeature};
pub use layer::*;
