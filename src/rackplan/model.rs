use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            other => Err(format!(
                "Unknown orientation '{}' (expected horizontal or vertical)",
                other
            )),
        }
    }
}

/// A grid cell, addressed by row then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A position in layout (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Square warehouse grid, persisted under the grid key.
///
/// `width` is the surface width the grid was laid out for; `height` is always
/// `cell_count * cell_size()`, so the grid stays square in pixels too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub cell_count: u32,
    pub width: f64,
    pub height: f64,
}

impl GridConfig {
    /// Callers guarantee `cell_count > 0`.
    pub fn new(cell_count: u32, available_width: f64) -> Self {
        let cell_size = available_width / cell_count as f64;
        Self {
            cell_count,
            width: available_width,
            height: cell_count as f64 * cell_size,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.width / self.cell_count as f64
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.cell_count && cell.col < self.cell_count
    }

    /// Maps a pixel position to the cell it falls in, or `None` when outside the grid.
    pub fn cell_at(&self, p: Point) -> Option<Cell> {
        let size = self.cell_size();
        let col = (p.x / size).floor();
        let row = (p.y / size).floor();
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let n = self.cell_count as f64;
        if col >= n || row >= n {
            return None;
        }
        Some(Cell::new(row as u32, col as u32))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.cell_count;
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(row, col)))
    }
}

/// A shelf unit anchored at an origin cell.
///
/// Pixel geometry is never stored here; it is derived from the grid with [`Shelf::rect`].
/// Doors are placed and moved like shelves but are always vertical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    pub id: String,
    pub orientation: Orientation,
    pub row: u32,
    pub col: u32,
    pub door: bool,
}

impl Shelf {
    pub fn new(id: String, orientation: Orientation, cell: Cell) -> Self {
        Self {
            id,
            orientation,
            row: cell.row,
            col: cell.col,
            door: false,
        }
    }

    pub fn new_door(id: String, cell: Cell) -> Self {
        Self {
            door: true,
            ..Self::new(id, Orientation::Vertical, cell)
        }
    }

    pub fn kind(&self) -> &'static str {
        if self.door {
            "door"
        } else {
            "shelf"
        }
    }

    pub fn label(&self) -> String {
        if self.door {
            format!("Door {}", self.id)
        } else {
            self.id.clone()
        }
    }

    pub fn origin(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    pub fn rect(&self, grid: &GridConfig) -> Rect {
        let size = grid.cell_size();
        let (width, height) = match self.orientation {
            Orientation::Horizontal => (2.0 * size, size),
            Orientation::Vertical => (size, 2.0 * size),
        };
        Rect {
            x: self.col as f64 * size,
            y: self.row as f64 * size,
            width,
            height,
        }
    }
}

/// On-disk shape of a shelf. Pixel fields are written for consumers that
/// expect them and ignored when loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfRecord {
    pub id: String,
    pub orientation: Orientation,
    pub row: u32,
    pub col: u32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub door: bool,
}

impl ShelfRecord {
    pub fn from_shelf(shelf: &Shelf, grid: Option<&GridConfig>) -> Self {
        let rect = grid.map(|g| shelf.rect(g)).unwrap_or_default();
        Self {
            id: shelf.id.clone(),
            orientation: shelf.orientation,
            row: shelf.row,
            col: shelf.col,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            door: shelf.door,
        }
    }
}

impl From<ShelfRecord> for Shelf {
    fn from(record: ShelfRecord) -> Self {
        Self {
            id: record.id,
            orientation: record.orientation,
            row: record.row,
            col: record.col,
            door: record.door,
        }
    }
}

/// Quarter-turn rotation of the rendered view. Pointer input and stored
/// coordinates are always in unrotated layout space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// The next clockwise quarter turn, wrapping after 270 degrees.
    pub fn next(self) -> Self {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Quarter),
            180 => Some(Rotation::Half),
            270 => Some(Rotation::ThreeQuarter),
            _ => None,
        }
    }
}
