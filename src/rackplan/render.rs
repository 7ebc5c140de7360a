//! # Scene Description
//!
//! The editor does not draw. [`scene`] describes what a surface should show
//! for the current state, and [`text_map`] is the one concrete surface we ship:
//! a character grid used by the CLI.
//!
//! Geometry in a [`Scene`] is always in layout space. `rotation` tells the
//! surface how far to turn the whole drawing about its centre.

use crate::commands::EditorState;
use crate::error::{RackError, Result};
use crate::model::{Orientation, Point, Rect, Rotation, Shelf};

/// Largest grid side [`text_map`] will draw.
pub const MAX_TEXT_MAP_SIDE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfSprite {
    pub id: String,
    pub label: String,
    pub orientation: Orientation,
    pub rect: Rect,
    pub door: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Clockwise view rotation in degrees.
    pub rotation: u16,
    pub grid_lines: Vec<Line>,
    pub shelves: Vec<ShelfSprite>,
}

pub fn scene(state: &EditorState) -> Scene {
    let Some(grid) = state.layout.grid.as_ref() else {
        return Scene::default();
    };

    let mut grid_lines = Vec::new();
    if state.show_grid {
        let size = grid.cell_size();
        for i in 0..=grid.cell_count {
            let offset = i as f64 * size;
            grid_lines.push(Line {
                from: Point::new(offset, 0.0),
                to: Point::new(offset, grid.height),
            });
            grid_lines.push(Line {
                from: Point::new(0.0, offset),
                to: Point::new(grid.width, offset),
            });
        }
    }

    let dragging = state.drag.as_ref();
    let shelves = state
        .layout
        .shelves
        .iter()
        .map(|shelf| {
            let mut rect = shelf.rect(grid);
            let is_dragged = dragging.is_some_and(|d| d.shelf_id == shelf.id);
            if let Some(drag) = dragging.filter(|_| is_dragged) {
                let p = drag.preview();
                rect.x = p.x;
                rect.y = p.y;
            }
            ShelfSprite {
                id: shelf.id.clone(),
                label: shelf.label(),
                orientation: shelf.orientation,
                rect,
                door: shelf.door,
                dragging: is_dragged,
            }
        })
        .collect();

    Scene {
        width: grid.width,
        height: grid.height,
        rotation: state.rotation.degrees(),
        grid_lines,
        shelves,
    }
}

const EMPTY: char = '.';
const BLANK: char = ' ';

fn marks(shelf: &Shelf) -> (char, char) {
    match (shelf.door, shelf.orientation) {
        (true, _) => ('D', 'd'),
        (false, Orientation::Horizontal) => ('H', 'h'),
        (false, Orientation::Vertical) => ('V', 'v'),
    }
}

/// One character per cell. Origins are `H`/`V` (`D` for doors), the second
/// cell a unit covers is the lowercase mark. With the overlay off, empty cells
/// are blank. The view rotation turns the whole map; marks keep their letters.
///
/// Returns `Ok(None)` without a grid, and an error for grids wider than
/// [`MAX_TEXT_MAP_SIDE`].
pub fn text_map(state: &EditorState) -> Result<Option<String>> {
    let Some(grid) = state.layout.grid.as_ref() else {
        return Ok(None);
    };
    if grid.cell_count > MAX_TEXT_MAP_SIDE {
        return Err(RackError::TooLargeToDraw(grid.cell_count));
    }
    let n = grid.cell_count as usize;
    let fill = if state.show_grid { EMPTY } else { BLANK };
    let mut cells = vec![vec![fill; n]; n];

    for shelf in &state.layout.shelves {
        let (row, col) = (shelf.row as usize, shelf.col as usize);
        let (span_row, span_col) = match shelf.orientation {
            Orientation::Horizontal => (row, col + 1),
            Orientation::Vertical => (row + 1, col),
        };
        if span_row < n && span_col < n {
            cells[span_row][span_col] = marks(shelf).1;
        }
    }
    for shelf in &state.layout.shelves {
        let (row, col) = (shelf.row as usize, shelf.col as usize);
        if row < n && col < n {
            cells[row][col] = marks(shelf).0;
        }
    }

    let cells = rotate(cells, state.rotation);
    let lines: Vec<String> = cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect();
    Ok(Some(lines.join("\n")))
}

/// Turns a square character grid clockwise.
fn rotate(cells: Vec<Vec<char>>, rotation: Rotation) -> Vec<Vec<char>> {
    let n = cells.len();
    let at = |r: usize, c: usize| -> char {
        match rotation {
            Rotation::None => cells[r][c],
            Rotation::Quarter => cells[n - 1 - c][r],
            Rotation::Half => cells[n - 1 - r][n - 1 - c],
            Rotation::ThreeQuarter => cells[c][n - 1 - r],
        }
    };
    (0..n).map(|r| (0..n).map(|c| at(r, c)).collect()).collect()
}
