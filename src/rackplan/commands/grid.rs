use crate::commands::helpers::{persist_grid, persist_shelves};
use crate::commands::{CmdMessage, CmdResult, EditorState};
use crate::error::{RackError, Result};
use crate::model::GridConfig;
use crate::store::KvStore;
use tracing::debug;

/// Parses grid-size form input. Only positive whole numbers are accepted.
pub fn parse_grid_size(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Accepts only finite widths above zero.
pub fn check_width(width: f64) -> Result<f64> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(RackError::InvalidWidth(width.to_string()))
    }
}

pub fn parse_width(raw: &str) -> Result<f64> {
    let width: f64 = raw
        .trim()
        .parse()
        .map_err(|_| RackError::InvalidWidth(raw.trim().to_string()))?;
    check_width(width)
}

/// Defines the grid from raw form input.
///
/// Invalid input sets the inline error and returns [`RackError::InvalidGridSize`]
/// without touching the layout or the store. Once a grid exists it can only be
/// replaced through a reset.
pub fn define<S: KvStore>(state: &mut EditorState, store: &mut S, input: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    state.grid_input = input.to_string();

    if let Some(grid) = &state.layout.grid {
        result.add_message(CmdMessage::warning(format!(
            "A {n}x{n} grid is already defined. Reset the warehouse to start over.",
            n = grid.cell_count
        )));
        return Ok(result);
    }

    let Some(cell_count) = parse_grid_size(input) else {
        let err = RackError::InvalidGridSize(input.trim().to_string());
        state.grid_error = Some(err.to_string());
        return Err(err);
    };

    let grid = GridConfig::new(cell_count, state.available_width);
    persist_grid(store, &grid)?;
    debug!(cell_count, cell_size = grid.cell_size(), "grid defined");

    state.layout.grid = Some(grid.clone());
    state.grid_error = None;
    result.add_message(CmdMessage::success(format!(
        "Grid defined: {n}x{n} cells of {size:.1}px",
        n = cell_count,
        size = grid.cell_size()
    )));
    Ok(result.with_grid(grid))
}

/// Applies a new available width. Cell count and shelf cells are kept; pixel
/// extents are rederived and both keys rewritten.
pub fn resize<S: KvStore>(state: &mut EditorState, store: &mut S, width: f64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if check_width(width).is_err() {
        result.add_message(CmdMessage::info(format!("Ignoring invalid width {}", width)));
        return Ok(result);
    }

    let Some(current) = &state.layout.grid else {
        state.available_width = width;
        return Ok(result);
    };

    let grid = GridConfig::new(current.cell_count, width);
    persist_grid(store, &grid)?;
    persist_shelves(store, &state.layout.shelves, Some(&grid))?;
    debug!(width, cell_size = grid.cell_size(), "grid resized");

    state.available_width = width;
    state.layout.grid = Some(grid.clone());
    Ok(result.with_grid(grid))
}
