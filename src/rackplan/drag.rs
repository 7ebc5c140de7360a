use crate::model::Point;

/// An in-progress drag of one shelf.
///
/// The grab offset keeps the shelf under the same spot of the pointer for the
/// whole gesture, so the drop position is the shelf's top-left, not the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub shelf_id: String,
    grab_offset: Point,
    preview: Point,
}

impl DragSession {
    /// `origin` is the shelf's last committed top-left.
    pub fn begin(shelf_id: String, origin: Point, pointer: Point) -> Self {
        Self {
            shelf_id,
            grab_offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
            preview: origin,
        }
    }

    /// Where the shelf is drawn while the pointer is at `pointer`.
    pub fn update(&mut self, pointer: Point) -> Point {
        self.preview = self.top_left_for(pointer);
        self.preview
    }

    pub fn preview(&self) -> Point {
        self.preview
    }

    /// Proposed top-left for a release at `pointer`.
    pub fn release(self, pointer: Point) -> Point {
        self.top_left_for(pointer)
    }

    fn top_left_for(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.grab_offset.x, pointer.y - self.grab_offset.y)
    }
}
