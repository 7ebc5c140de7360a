use crate::commands::helpers::{fresh_id, persist_shelves};
use crate::commands::{CmdMessage, CmdResult, EditorState, MoveOutcome, RejectReason};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::layout::DropTarget;
use crate::model::{Cell, Orientation, Point, Shelf};
use crate::store::KvStore;
use tracing::debug;

/// Places a new shelf at the first free origin cell, row-major.
pub fn add<S: KvStore, G: IdGenerator>(
    state: &mut EditorState,
    store: &mut S,
    ids: &mut G,
    orientation: Orientation,
) -> Result<CmdResult> {
    place(state, store, ids, |id, cell| Shelf::new(id, orientation, cell))
}

/// Places a door unit. Doors are always vertical and otherwise follow the
/// same first-fit rule as shelves.
pub fn add_door<S: KvStore, G: IdGenerator>(
    state: &mut EditorState,
    store: &mut S,
    ids: &mut G,
) -> Result<CmdResult> {
    place(state, store, ids, Shelf::new_door)
}

fn place<S: KvStore, G: IdGenerator>(
    state: &mut EditorState,
    store: &mut S,
    ids: &mut G,
    build: impl FnOnce(String, Cell) -> Shelf,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(grid) = state.layout.grid.as_ref() else {
        result.add_message(CmdMessage::info("Define the grid before adding shelves."));
        return Ok(result);
    };
    let Some(cell) = state.layout.first_free_cell() else {
        result.add_message(CmdMessage::info("No free cell left for another shelf."));
        return Ok(result);
    };

    let shelf = build(fresh_id(&state.layout, ids)?, cell);
    let mut shelves = state.layout.shelves.clone();
    shelves.push(shelf.clone());
    persist_shelves(store, &shelves, Some(grid))?;
    debug!(id = %shelf.id, kind = shelf.kind(), orientation = %shelf.orientation, row = cell.row, col = cell.col, "shelf added");

    state.layout.shelves = shelves;
    result.add_message(CmdMessage::success(if shelf.door {
        format!("Added door {} at {}", shelf.id, cell)
    } else {
        format!("Added {} shelf {} at {}", shelf.orientation, shelf.id, cell)
    }));
    Ok(result.with_affected_shelves(vec![shelf]))
}

/// Commits a drop of shelf `id` with its top-left at `top_left`.
///
/// Out-of-bounds or occupied targets produce [`MoveOutcome::Reverted`] pointing
/// at the shelf's last committed position. Unknown ids and a missing grid are ignored.
pub fn move_to<S: KvStore>(
    state: &mut EditorState,
    store: &mut S,
    id: &str,
    top_left: Point,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let target = state.layout.drop_target(id, top_left);

    let reason = match target {
        DropTarget::Cell(cell) => {
            let Some(index) = state.layout.position(id) else {
                return Ok(result.with_outcome(MoveOutcome::Ignored));
            };
            let from = state.layout.shelves[index].origin();
            let mut shelves = state.layout.shelves.clone();
            shelves[index].row = cell.row;
            shelves[index].col = cell.col;
            persist_shelves(store, &shelves, state.layout.grid.as_ref())?;
            debug!(id, from = %from, to = %cell, "shelf moved");

            let moved = shelves[index].clone();
            state.layout.shelves = shelves;
            result.add_message(CmdMessage::success(format!(
                "Moved shelf {} from {} to {}",
                id, from, cell
            )));
            return Ok(result.with_affected_shelves(vec![moved]).with_outcome(
                MoveOutcome::Moved {
                    id: id.to_string(),
                    from,
                    to: cell,
                },
            ));
        }
        DropTarget::OutOfBounds => RejectReason::OutOfBounds,
        DropTarget::Occupied { .. } => RejectReason::Occupied,
        DropTarget::NoGrid | DropTarget::UnknownShelf => {
            return Ok(result.with_outcome(MoveOutcome::Ignored));
        }
    };

    let (Some(grid), Some(shelf)) = (state.layout.grid.as_ref(), state.layout.find(id)) else {
        return Ok(result.with_outcome(MoveOutcome::Ignored));
    };
    let to = shelf.rect(grid).origin();
    debug!(id, ?reason, x = to.x, y = to.y, "drop rejected, reverting");
    result.add_message(CmdMessage::info(match reason {
        RejectReason::OutOfBounds => format!("Shelf {} stays at {}: drop is outside the grid", id, shelf.origin()),
        RejectReason::Occupied => format!("Shelf {} stays at {}: target cell is taken", id, shelf.origin()),
    }));
    Ok(result.with_outcome(MoveOutcome::Reverted {
        id: id.to_string(),
        to,
        reason,
        duration: state.revert_duration,
    }))
}
