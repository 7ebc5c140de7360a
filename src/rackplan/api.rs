//! # API Facade
//!
//! [`WarehouseEditor`] is the single entry point for every editor operation,
//! whatever surface drives it. It owns the store port, the id generator and
//! the [`EditorState`], and dispatches each call to its command module.
//!
//! The facade holds no business logic. Placement rules live in
//! [`crate::layout`], persistence sequencing in `commands/*.rs`.
//!
//! ## Generic Over Ports
//!
//! `WarehouseEditor<S: KvStore, G: IdGenerator>`:
//! - Production: `WarehouseEditor<FileStore, UuidIds>`
//! - Testing: `WarehouseEditor<MemStore, SequentialIds>`

use crate::commands::{self, CmdResult, EditorState};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{GridConfig, Orientation, Point, Rotation, Shelf};
use crate::render::{self, Scene};
use crate::store::KvStore;
use std::time::Duration;

pub struct WarehouseEditor<S: KvStore, G: IdGenerator> {
    store: S,
    ids: G,
    state: EditorState,
}

impl<S: KvStore, G: IdGenerator> WarehouseEditor<S, G> {
    /// Loads the persisted layout for a surface `available_width` pixels wide.
    ///
    /// Fails with [`crate::error::RackError::InvalidWidth`] unless the width is
    /// finite and positive.
    pub fn open(mut store: S, ids: G, available_width: f64) -> Result<Self> {
        let state = commands::load::run(&mut store, available_width)?;
        Ok(Self { store, ids, state })
    }

    pub fn with_revert_duration(mut self, duration: Duration) -> Self {
        self.state.revert_duration = duration;
        self
    }

    pub fn grid(&self) -> Option<&GridConfig> {
        self.state.layout.grid.as_ref()
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.state.layout.shelves
    }

    pub fn shelf(&self, id: &str) -> Option<&Shelf> {
        self.state.layout.find(id)
    }

    pub fn grid_error(&self) -> Option<&str> {
        self.state.grid_error.as_deref()
    }

    pub fn grid_input(&self) -> &str {
        &self.state.grid_input
    }

    pub fn show_grid(&self) -> bool {
        self.state.show_grid
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    pub fn available_width(&self) -> f64 {
        self.state.available_width
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn define_grid(&mut self, input: &str) -> Result<CmdResult> {
        commands::grid::define(&mut self.state, &mut self.store, input)
    }

    pub fn resize(&mut self, available_width: f64) -> Result<CmdResult> {
        commands::grid::resize(&mut self.state, &mut self.store, available_width)
    }

    pub fn add_shelf(&mut self, orientation: Orientation) -> Result<CmdResult> {
        commands::shelves::add(&mut self.state, &mut self.store, &mut self.ids, orientation)
    }

    pub fn add_door(&mut self) -> Result<CmdResult> {
        commands::shelves::add_door(&mut self.state, &mut self.store, &mut self.ids)
    }

    pub fn move_shelf(&mut self, id: &str, top_left: Point) -> Result<CmdResult> {
        commands::shelves::move_to(&mut self.state, &mut self.store, id, top_left)
    }

    pub fn reset(&mut self) -> Result<CmdResult> {
        commands::reset::run(&mut self.state, &mut self.store)
    }

    pub fn toggle_grid(&mut self) -> bool {
        commands::view::toggle_grid(&mut self.state)
    }

    pub fn rotate_view(&mut self) -> Rotation {
        commands::view::rotate_view(&mut self.state)
    }

    pub fn shelf_at(&self, p: Point) -> Option<&Shelf> {
        self.state.layout.shelf_at(p)
    }

    pub fn begin_drag(&mut self, pointer: Point) -> Option<String> {
        commands::drag::begin(&mut self.state, pointer)
    }

    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        commands::drag::update(&mut self.state, pointer)
    }

    pub fn end_drag(&mut self, pointer: Point) -> Result<CmdResult> {
        commands::drag::end(&mut self.state, &mut self.store, pointer)
    }

    pub fn cancel_drag(&mut self) -> bool {
        commands::drag::cancel(&mut self.state)
    }

    /// Full id for an exact id or unique id prefix.
    pub fn resolve_shelf(&self, query: &str) -> Result<String> {
        commands::helpers::resolve_shelf(&self.state.layout, query)
    }

    pub fn scene(&self) -> Scene {
        render::scene(&self.state)
    }

    pub fn text_map(&self) -> Result<Option<String>> {
        render::text_map(&self.state)
    }
}

pub use crate::commands::{CmdMessage, MessageLevel, MoveOutcome, RejectReason};
