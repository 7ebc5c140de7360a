use crate::commands::{shelves, CmdResult, EditorState, MoveOutcome};
use crate::drag::DragSession;
use crate::error::Result;
use crate::model::Point;
use crate::store::KvStore;
use tracing::debug;

/// Starts dragging the shelf under `pointer`. Returns its id, or `None` on empty space.
pub fn begin(state: &mut EditorState, pointer: Point) -> Option<String> {
    let grid = state.layout.grid.as_ref()?;
    let shelf = state.layout.shelf_at(pointer)?;
    let session = DragSession::begin(shelf.id.clone(), shelf.rect(grid).origin(), pointer);
    debug!(id = %shelf.id, x = pointer.x, y = pointer.y, "drag started");
    let id = shelf.id.clone();
    state.drag = Some(session);
    Some(id)
}

/// Moves the active drag preview. `None` when no drag is active.
pub fn update(state: &mut EditorState, pointer: Point) -> Option<Point> {
    state.drag.as_mut().map(|drag| drag.update(pointer))
}

/// Ends the active drag at `pointer` and commits or reverts the move.
pub fn end<S: KvStore>(state: &mut EditorState, store: &mut S, pointer: Point) -> Result<CmdResult> {
    let Some(session) = state.drag.take() else {
        return Ok(CmdResult::default().with_outcome(MoveOutcome::Ignored));
    };
    let id = session.shelf_id.clone();
    let top_left = session.release(pointer);
    shelves::move_to(state, store, &id, top_left)
}

/// Drops the active drag without moving anything.
pub fn cancel(state: &mut EditorState) -> bool {
    state.drag.take().is_some()
}
