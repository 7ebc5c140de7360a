//! # Command Layer
//!
//! One module per editor operation. Each command takes the editor state and
//! the ports it needs, decides with [`crate::layout`], persists, and only then
//! commits the change to the in-memory state. A failed write therefore leaves
//! memory and storage agreeing with each other.
//!
//! Disallowed gestures (no grid yet, full grid, occupied or out-of-bounds drop)
//! are not errors: commands return `Ok` with an info message and no change.

use crate::drag::DragSession;
use crate::layout::Layout;
use crate::model::{Cell, GridConfig, Point, Rotation, Shelf};
use std::time::Duration;

pub mod drag;
pub mod grid;
pub mod helpers;
pub mod load;
pub mod reset;
pub mod shelves;
pub mod view;

pub const DEFAULT_REVERT: Duration = Duration::from_millis(100);

/// Everything the editor keeps between user gestures.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub layout: Layout,
    pub available_width: f64,
    pub show_grid: bool,
    pub rotation: Rotation,
    /// Last raw text submitted to the grid-size form.
    pub grid_input: String,
    /// Inline validation message for the grid-size form.
    pub grid_error: Option<String>,
    pub drag: Option<DragSession>,
    pub revert_duration: Duration,
}

impl EditorState {
    pub fn new(layout: Layout, available_width: f64) -> Self {
        Self {
            layout,
            available_width,
            show_grid: true,
            rotation: Rotation::None,
            grid_input: String::new(),
            grid_error: None,
            drag: None,
            revert_duration: DEFAULT_REVERT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
}

/// What a render surface should do after a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Moved {
        id: String,
        from: Cell,
        to: Cell,
    },
    /// Animate the shelf back to its last committed position.
    Reverted {
        id: String,
        to: Point,
        reason: RejectReason,
        duration: Duration,
    },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_shelves: Vec<Shelf>,
    pub grid: Option<GridConfig>,
    pub outcome: Option<MoveOutcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_shelves(mut self, shelves: Vec<Shelf>) -> Self {
        self.affected_shelves = shelves;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_outcome(mut self, outcome: MoveOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}
