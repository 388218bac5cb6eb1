#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Globe,
    Choropleth,
    Flyline,
}

pub trait Layer {
    fn id(&self) -> LayerId;
    fn kind(&self) -> LayerKind;
}
