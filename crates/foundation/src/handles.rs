/// Generational handle: `(index, generation)`.
///
/// A handle stays valid until the slot it points at is freed; reusing the slot
/// bumps the generation so stale handles never alias a new value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn generation(self) -> u32 {
        self.1
    }
}
