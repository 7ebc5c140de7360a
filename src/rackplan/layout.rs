//! # Placement Rules
//!
//! [`Layout`] is the pure half of the editor: the grid plus the ordered shelf
//! collection, and the rules that decide where shelves may go. Nothing here
//! touches storage; the command layer persists whatever these functions decide.
//!
//! Occupancy is tracked by *origin cell only*. A horizontal shelf at `(0, 0)`
//! also covers `(0, 1)` on screen, but another shelf may still be anchored at
//! `(0, 1)`.

use crate::model::{Cell, GridConfig, Point, Shelf};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub grid: Option<GridConfig>,
    pub shelves: Vec<Shelf>,
}

/// Where a dragged shelf would land if released at a given top-left position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Cell(Cell),
    OutOfBounds,
    Occupied { by: String },
    NoGrid,
    UnknownShelf,
}

impl Layout {
    pub fn new(grid: Option<GridConfig>, shelves: Vec<Shelf>) -> Self {
        Self { grid, shelves }
    }

    pub fn find(&self, id: &str) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.shelves.iter().position(|s| s.id == id)
    }

    /// The shelf anchored at `cell`, skipping the shelf with id `ignoring`.
    pub fn occupant(&self, cell: Cell, ignoring: Option<&str>) -> Option<&Shelf> {
        self.shelves
            .iter()
            .filter(|s| Some(s.id.as_str()) != ignoring)
            .find(|s| s.origin() == cell)
    }

    /// First cell in row-major order that is not a shelf origin.
    pub fn first_free_cell(&self) -> Option<Cell> {
        let grid = self.grid.as_ref()?;
        let taken: HashSet<Cell> = self.shelves.iter().map(Shelf::origin).collect();
        grid.cells().find(|cell| !taken.contains(cell))
    }

    /// Topmost shelf whose rectangle contains `p`. Later shelves draw above earlier ones.
    pub fn shelf_at(&self, p: Point) -> Option<&Shelf> {
        let grid = self.grid.as_ref()?;
        self.shelves.iter().rev().find(|s| s.rect(grid).contains(p))
    }

    pub fn drop_target(&self, id: &str, top_left: Point) -> DropTarget {
        let Some(grid) = self.grid.as_ref() else {
            return DropTarget::NoGrid;
        };
        if self.find(id).is_none() {
            return DropTarget::UnknownShelf;
        }
        let Some(cell) = grid.cell_at(top_left) else {
            return DropTarget::OutOfBounds;
        };
        match self.occupant(cell, Some(id)) {
            Some(other) => DropTarget::Occupied {
                by: other.id.clone(),
            },
            None => DropTarget::Cell(cell),
        }
    }

    /// True when no two shelves share an origin.
    pub fn origins_are_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.shelves.iter().all(|s| seen.insert(s.origin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;

    fn shelf(id: &str, row: u32, col: u32) -> Shelf {
        Shelf::new(id.into(), Orientation::Horizontal, Cell::new(row, col))
    }

    fn layout(n: u32, shelves: Vec<Shelf>) -> Layout {
        Layout::new(Some(GridConfig::new(n, 300.0)), shelves)
    }

    #[test]
    fn first_free_cell_is_row_major() {
        let l = layout(3, vec![shelf("a", 0, 0), shelf("b", 0, 1)]);
        assert_eq!(l.first_free_cell(), Some(Cell::new(0, 2)));
    }

    #[test]
    fn first_free_cell_fills_gaps() {
        let l = layout(2, vec![shelf("a", 0, 1), shelf("b", 1, 0)]);
        assert_eq!(l.first_free_cell(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn first_free_cell_ignores_spans() {
        // horizontal shelf at (0,0) visually covers (0,1) but only its origin counts
        let l = layout(3, vec![shelf("a", 0, 0)]);
        assert_eq!(l.first_free_cell(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn full_grid_has_no_free_cell() {
        let l = layout(
            2,
            vec![
                shelf("a", 0, 0),
                shelf("b", 0, 1),
                shelf("c", 1, 0),
                shelf("d", 1, 1),
            ],
        );
        assert_eq!(l.first_free_cell(), None);
    }

    #[test]
    fn no_grid_has_no_free_cell() {
        let l = Layout::default();
        assert_eq!(l.first_free_cell(), None);
    }

    #[test]
    fn drop_target_cases() {
        // cell size 100
        let l = layout(3, vec![shelf("a", 0, 0), shelf("b", 1, 1)]);
        assert_eq!(
            l.drop_target("a", Point::new(250.0, 20.0)),
            DropTarget::Cell(Cell::new(0, 2))
        );
        assert_eq!(
            l.drop_target("a", Point::new(150.0, 199.0)),
            DropTarget::Occupied { by: "b".into() }
        );
        assert_eq!(
            l.drop_target("a", Point::new(-1.0, 0.0)),
            DropTarget::OutOfBounds
        );
        assert_eq!(
            l.drop_target("a", Point::new(0.0, 300.0)),
            DropTarget::OutOfBounds
        );
        assert_eq!(
            l.drop_target("zzz", Point::new(0.0, 0.0)),
            DropTarget::UnknownShelf
        );
        assert_eq!(
            Layout::default().drop_target("a", Point::new(0.0, 0.0)),
            DropTarget::NoGrid
        );
    }

    #[test]
    fn dropping_on_own_origin_is_allowed() {
        let l = layout(3, vec![shelf("a", 1, 1)]);
        assert_eq!(
            l.drop_target("a", Point::new(110.0, 110.0)),
            DropTarget::Cell(Cell::new(1, 1))
        );
    }

    #[test]
    fn shelf_at_prefers_latest() {
        // "a" spans (0,0)-(0,1); "b" anchored at (0,1)
        let l = layout(3, vec![shelf("a", 0, 0), shelf("b", 0, 1)]);
        assert_eq!(l.shelf_at(Point::new(50.0, 50.0)).unwrap().id, "a");
        assert_eq!(l.shelf_at(Point::new(150.0, 50.0)).unwrap().id, "b");
        assert!(l.shelf_at(Point::new(50.0, 250.0)).is_none());
    }

    #[test]
    fn origin_uniqueness_check() {
        assert!(layout(3, vec![shelf("a", 0, 0), shelf("b", 0, 1)]).origins_are_unique());
        assert!(!layout(3, vec![shelf("a", 0, 0), shelf("b", 0, 0)]).origins_are_unique());
    }
}
