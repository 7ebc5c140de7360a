use crate::commands::EditorState;
use crate::model::Rotation;

/// Flips the grid overlay and returns the new setting. View state only; nothing is persisted.
pub fn toggle_grid(state: &mut EditorState) -> bool {
    state.show_grid = !state.show_grid;
    state.show_grid
}

/// Turns the rendered view a quarter turn clockwise. Not persisted.
pub fn rotate_view(state: &mut EditorState) -> Rotation {
    state.rotation = state.rotation.next();
    state.rotation
}
