#[derive(Debug, Clone, PartialEq)]
pub enum FlylineError {
    /// A path needs at least two waypoints to be resampled.
    TooFewWaypoints { got: usize },
    /// All waypoints coincide.
    ZeroLengthPath,
    InvalidParameter { name: &'static str, value: f64 },
}

impl std::fmt::Display for FlylineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlylineError::TooFewWaypoints { got } => {
                write!(f, "flyline path needs at least 2 waypoints, got {got}")
            }
            FlylineError::ZeroLengthPath => write!(f, "flyline path has zero length"),
            FlylineError::InvalidParameter { name, value } => {
                write!(f, "invalid flyline parameter {name} = {value}")
            }
        }
    }
}

impl std::error::Error for FlylineError {}
