use std::cell::RefCell;
use std::rc::Rc;

use foundation::math::Vec2;
use runtime::CallbackError;

/// Receives the lit slice of a flyline every frame.
pub trait LineSink {
    fn set_points(&mut self, points: &[Vec2]) -> Result<(), CallbackError>;
}

/// Line geometry owned by the renderer side; `revision` bumps on every update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineGeometry {
    points: Vec<Vec2>,
    revision: u64,
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positions_f32(&self, z: f32) -> Vec<[f32; 3]> {
        self.points
            .iter()
            .map(|p| [p.x as f32, p.y as f32, z])
            .collect()
    }
}

impl LineSink for LineGeometry {
    fn set_points(&mut self, points: &[Vec2]) -> Result<(), CallbackError> {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.revision += 1;
        Ok(())
    }
}

pub type SharedLine = Rc<RefCell<LineGeometry>>;

pub fn shared_line() -> SharedLine {
    Rc::new(RefCell::new(LineGeometry::new()))
}

impl LineSink for SharedLine {
    fn set_points(&mut self, points: &[Vec2]) -> Result<(), CallbackError> {
        let mut line = self
            .try_borrow_mut()
            .map_err(|_| CallbackError::new("line geometry is borrowed during update"))?;
        line.set_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_line_updates_in_place() {
        let line = shared_line();
        let mut sink = line.clone();
        sink.set_points(&[Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)])
            .unwrap();
        assert_eq!(line.borrow().len(), 2);
        assert_eq!(line.borrow().revision(), 1);
        assert_eq!(
            line.borrow().positions_f32(0.5),
            vec![[1.0, 2.0, 0.5], [3.0, 4.0, 0.5]]
        );
    }

    #[test]
    fn borrowed_line_reports_instead_of_panicking() {
        let line = shared_line();
        let mut sink = line.clone();
        let _guard = line.borrow();
        assert!(sink.set_points(&[]).is_err());
    }
}
