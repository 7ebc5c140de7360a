use crate::commands::grid::check_width;
use crate::commands::helpers::{persist_grid, persist_shelves};
use crate::commands::EditorState;
use crate::error::Result;
use crate::layout::Layout;
use crate::model::{GridConfig, Orientation, Shelf, ShelfRecord};
use crate::store::{load_json, KvStore, GRID_KEY, SHELVES_KEY};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Builds the editor state from whatever the store holds.
///
/// The stored grid is re-derived for `available_width`; if that changes its
/// pixel extents, the new grid is written back. Stored shelves that break the
/// layout rules are dropped and the cleaned collection is written back.
/// An invalid width fails before anything is read or written.
pub fn run<S: KvStore>(store: &mut S, available_width: f64) -> Result<EditorState> {
    let available_width = check_width(available_width)?;
    let stored: Option<GridConfig> = load_json(&*store, GRID_KEY);
    let grid = match stored {
        Some(stored) if stored.cell_count > 0 => {
            let grid = GridConfig::new(stored.cell_count, available_width);
            if grid != stored {
                debug!(
                    cell_count = grid.cell_count,
                    width = available_width,
                    "grid re-derived for current width"
                );
                persist_grid(store, &grid)?;
            }
            Some(grid)
        }
        Some(_) => {
            debug!("stored grid has zero cells, ignoring it");
            None
        }
        None => None,
    };

    let records: Vec<ShelfRecord> = load_json(&*store, SHELVES_KEY).unwrap_or_default();
    let shelves = match &grid {
        Some(grid) => {
            let (shelves, dropped) = sanitize(records, grid);
            if dropped > 0 {
                persist_shelves(store, &shelves, Some(grid))?;
            }
            shelves
        }
        None => {
            if !records.is_empty() {
                warn!(count = records.len(), "ignoring stored shelves without a grid");
            }
            Vec::new()
        }
    };
    debug!(shelves = shelves.len(), has_grid = grid.is_some(), "layout loaded");

    Ok(EditorState::new(Layout::new(grid, shelves), available_width))
}

/// Keeps records in order, dropping any outside the grid, sharing an earlier
/// origin or id, or describing a horizontal door. Returns the kept shelves and
/// how many were dropped.
fn sanitize(records: Vec<ShelfRecord>, grid: &GridConfig) -> (Vec<Shelf>, usize) {
    let mut origins = HashSet::new();
    let mut ids = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut dropped = 0;

    for shelf in records.into_iter().map(Shelf::from) {
        let problem = if !grid.contains(shelf.origin()) {
            Some("outside the grid")
        } else if shelf.door && shelf.orientation != Orientation::Vertical {
            Some("door is not vertical")
        } else if ids.contains(&shelf.id) {
            Some("duplicate id")
        } else if origins.contains(&shelf.origin()) {
            Some("origin already taken")
        } else {
            None
        };

        match problem {
            Some(problem) => {
                warn!(id = %shelf.id, origin = %shelf.origin(), problem, "dropping stored shelf");
                dropped += 1;
            }
            None => {
                origins.insert(shelf.origin());
                ids.insert(shelf.id.clone());
                kept.push(shelf);
            }
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RackError;
    use crate::model::Cell;
    use crate::store::memory::MemStore;
    use crate::store::KvStore;

    #[test]
    fn empty_store_gives_empty_state() {
        let mut store = MemStore::new();
        let state = run(&mut store, 800.0).unwrap();
        assert!(state.layout.grid.is_none());
        assert!(state.layout.shelves.is_empty());
        assert!(state.show_grid);
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let mut store = MemStore::new();
        store.set(GRID_KEY, "garbage").unwrap();
        store.set(SHELVES_KEY, "[{").unwrap();
        let state = run(&mut store, 800.0).unwrap();
        assert!(state.layout.grid.is_none());
        assert!(state.layout.shelves.is_empty());
    }

    #[test]
    fn grid_is_rederived_for_new_width() {
        let mut store = MemStore::new();
        store
            .set(GRID_KEY, r#"{"cellCount":4,"width":400.0,"height":400.0}"#)
            .unwrap();
        let state = run(&mut store, 800.0).unwrap();
        let grid = state.layout.grid.unwrap();
        assert_eq!(grid.cell_count, 4);
        assert_eq!(grid.cell_size(), 200.0);

        let stored: GridConfig = load_json(&store, GRID_KEY).unwrap();
        assert_eq!(stored.width, 800.0);
    }

    #[test]
    fn shelves_load_in_order_and_ignore_stale_pixels() {
        let mut store = MemStore::new();
        store
            .set(GRID_KEY, r#"{"cellCount":3,"width":300.0,"height":300.0}"#)
            .unwrap();
        store
            .set(
                SHELVES_KEY,
                r#"[{"id":"b","orientation":"vertical","row":2,"col":0,"x":999,"y":999,"width":1,"height":1},
                    {"id":"a","orientation":"horizontal","row":0,"col":1}]"#,
            )
            .unwrap();
        let state = run(&mut store, 300.0).unwrap();
        let ids: Vec<&str> = state.layout.shelves.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let grid = state.layout.grid.as_ref().unwrap();
        let b = &state.layout.shelves[0];
        assert_eq!(b.origin(), Cell::new(2, 0));
        assert_eq!(b.orientation, Orientation::Vertical);
        let rect = b.rect(grid);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 200.0, 100.0, 200.0));
    }

    #[test]
    fn invalid_width_fails_without_touching_store() {
        for width in [-300.0, 0.0, f64::NAN, f64::INFINITY] {
            let mut store = MemStore::new();
            store
                .set(GRID_KEY, r#"{"cellCount":3,"width":300.0,"height":300.0}"#)
                .unwrap();
            let err = run(&mut store, width).unwrap_err();
            assert!(matches!(err, RackError::InvalidWidth(_)));

            let stored: GridConfig = load_json(&store, GRID_KEY).unwrap();
            assert_eq!(stored, GridConfig::new(3, 300.0));
        }
    }

    #[test]
    fn inconsistent_shelves_are_dropped_and_rewritten() {
        let mut store = MemStore::new();
        store
            .set(GRID_KEY, r#"{"cellCount":2,"width":200.0,"height":200.0}"#)
            .unwrap();
        store
            .set(
                SHELVES_KEY,
                r#"[{"id":"far","orientation":"horizontal","row":7,"col":9},
                    {"id":"a","orientation":"horizontal","row":0,"col":0},
                    {"id":"stacked","orientation":"vertical","row":0,"col":0},
                    {"id":"a","orientation":"vertical","row":1,"col":1},
                    {"id":"flat-door","orientation":"horizontal","row":1,"col":0,"door":true},
                    {"id":"b","orientation":"vertical","row":0,"col":1}]"#,
            )
            .unwrap();

        let state = run(&mut store, 200.0).unwrap();
        let origins: Vec<Cell> = state.layout.shelves.iter().map(Shelf::origin).collect();
        assert_eq!(origins, vec![Cell::new(0, 0), Cell::new(0, 1)]);
        assert!(state.layout.origins_are_unique());

        let records: Vec<ShelfRecord> = load_json(&store, SHELVES_KEY).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn shelves_without_grid_are_not_loaded() {
        let mut store = MemStore::new();
        store
            .set(SHELVES_KEY, r#"[{"id":"a","orientation":"horizontal","row":5,"col":5}]"#)
            .unwrap();
        let state = run(&mut store, 300.0).unwrap();
        assert!(state.layout.grid.is_none());
        assert!(state.layout.shelves.is_empty());
        assert!(store.contains(SHELVES_KEY));
    }

    #[test]
    fn clean_shelves_are_not_rewritten() {
        let mut store = MemStore::new();
        store
            .set(GRID_KEY, r#"{"cellCount":3,"width":300.0,"height":300.0}"#)
            .unwrap();
        let raw = r#"[{"id":"a","orientation":"horizontal","row":0,"col":0}]"#;
        store.set(SHELVES_KEY, raw).unwrap();
        run(&mut store, 300.0).unwrap();
        assert_eq!(store.get(SHELVES_KEY).unwrap().as_deref(), Some(raw));
    }
}
