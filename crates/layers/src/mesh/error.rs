#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Fewer than three distinct points after dropping duplicates.
    TooFewPoints { got: usize },
    /// The ring encloses no area (all points collinear).
    ZeroArea,
    NonFiniteCoordinate { index: usize },
    /// Polygon with no rings at all.
    EmptyPolygon,
    Earcut(String),
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::TooFewPoints { got } => {
                write!(f, "need at least 3 distinct points, got {got}")
            }
            MeshError::ZeroArea => write!(f, "ring has zero area"),
            MeshError::NonFiniteCoordinate { index } => {
                write!(f, "non-finite coordinate at point {index}")
            }
            MeshError::EmptyPolygon => write!(f, "polygon has no rings"),
            MeshError::Earcut(reason) => write!(f, "earcut failed: {reason}"),
        }
    }
}

impl std::error::Error for MeshError {}
