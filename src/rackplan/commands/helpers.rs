use crate::error::{RackError, Result};
use crate::ids::IdGenerator;
use crate::layout::Layout;
use crate::model::{GridConfig, Shelf, ShelfRecord};
use crate::store::{save_json, KvStore, GRID_KEY, SHELVES_KEY};

const MAX_ID_ATTEMPTS: usize = 1000;

pub fn persist_grid<S: KvStore>(store: &mut S, grid: &GridConfig) -> Result<()> {
    save_json(store, GRID_KEY, grid)
}

pub fn persist_shelves<S: KvStore>(
    store: &mut S,
    shelves: &[Shelf],
    grid: Option<&GridConfig>,
) -> Result<()> {
    let records: Vec<ShelfRecord> = shelves
        .iter()
        .map(|s| ShelfRecord::from_shelf(s, grid))
        .collect();
    save_json(store, SHELVES_KEY, &records)
}

/// Next generator id not already used by a shelf in `layout`.
pub fn fresh_id<G: IdGenerator>(layout: &Layout, ids: &mut G) -> Result<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = ids.next_id();
        if layout.find(&id).is_none() {
            return Ok(id);
        }
    }
    Err(RackError::Api(
        "Id generator keeps returning ids that are already in use".to_string(),
    ))
}

/// Resolves a full id or a unique id prefix to the shelf id.
pub fn resolve_shelf(layout: &Layout, query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(RackError::ShelfNotFound(query.to_string()));
    }
    if let Some(shelf) = layout.find(query) {
        return Ok(shelf.id.clone());
    }

    let matches: Vec<&Shelf> = layout
        .shelves
        .iter()
        .filter(|s| s.id.starts_with(query))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.id.clone()),
        [] => Err(RackError::ShelfNotFound(query.to_string())),
        _ => Err(RackError::Api(format!(
            "Shelf id prefix '{}' is ambiguous ({} matches)",
            query,
            matches.len()
        ))),
    }
}
