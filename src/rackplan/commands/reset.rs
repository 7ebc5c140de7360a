use crate::commands::{CmdMessage, CmdResult, EditorState};
use crate::error::Result;
use crate::store::{KvStore, GRID_KEY, SHELVES_KEY};
use tracing::info;

/// Wipes the warehouse: both stored keys, the grid, every shelf, and the grid form.
pub fn run<S: KvStore>(state: &mut EditorState, store: &mut S) -> Result<CmdResult> {
    store.remove(GRID_KEY)?;
    store.remove(SHELVES_KEY)?;

    let removed = state.layout.shelves.len();
    state.layout.grid = None;
    state.layout.shelves.clear();
    state.grid_input.clear();
    state.grid_error = None;
    state.drag = None;
    info!(removed, "warehouse reset");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Warehouse reset ({} shelves removed)",
        removed
    )));
    Ok(result)
}
