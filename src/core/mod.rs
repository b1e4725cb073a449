//! # Core Application Logic
//!
//! This module contains Zico's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Navigator (slots)    │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Persist   │      │  Document  │
//!     │  Adapter   │      │   Queue    │      │   Viewer   │
//!     │ (ratatui)  │      │  (tokio)   │      │  (opener)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`selection`]: the `Navigator` state machine and its `Selection`
//! - [`catalog`]: level, subject and lesson domains
//! - [`resources`]: document URL derivation
//! - [`store`] / [`persist`]: key-value persistence and the write queue
//! - [`settings`]: dark mode, notifications, language
//! - [`config`]: `~/.zico/config.toml` and env overrides
//! - [`home`]: greeting and news feed
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`

pub mod action;
pub mod catalog;
pub mod config;
pub mod home;
pub mod persist;
pub mod resources;
pub mod selection;
pub mod settings;
pub mod state;
pub mod store;
