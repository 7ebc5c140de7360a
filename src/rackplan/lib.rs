//! # Rackplan Architecture
//!
//! Rackplan is a **UI-agnostic warehouse layout editor**. The CLI in this crate
//! is one client of it; a browser canvas or a TUI would drive the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - WarehouseEditor: owns state, store and id generator      │
//! │  - Dispatches to commands, returns Result<CmdResult>        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + rules (layout.rs)          │
//! │  - First-fit placement, drop validation, drag sessions      │
//! │  - Persist first, then commit to memory                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KvStore port: get / set / remove JSON by key             │
//! │  - FileStore (production), MemStore (testing)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Source Of Truth
//!
//! A shelf is `(id, orientation, row, col)`. Its pixel rectangle is always
//! computed from the grid, never trusted from storage, so pixel values cannot
//! drift away from grid coordinates.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`layout`]: Occupancy and placement rules
//! - [`drag`]: Pointer drag sessions
//! - [`render`]: Scene description and text rendering
//! - [`store`]: Persistence port and implementations
//! - [`model`]: Grid, shelf and geometry types
//! - [`ids`]: Shelf id generation
//! - [`config`]: User configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod ids;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
