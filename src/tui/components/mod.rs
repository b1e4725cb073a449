//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as props:
//! - `TitleBar`: Top status line with breadcrumb and status message
//! - `TabBar`: Bottom tab strip
//! - `HomePage`: Greeting and news cards
//! - `AboutDialog`: Modal overlay with the app version
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The state struct lives in `TuiState` across frames; the view struct is
//! built each frame with borrowed state and the relevant core data:
//! - `BrowserState` / `BrowserView`: Subjects tab (level → subject → document)
//! - `QuizState` / `QuizView`: quiz selectors and summary
//! - `SettingsState` / `SettingsView`: settings rows
//! - `PickerState` / `Picker`: the list used by the browser screens
//!
//! Stateful components translate `TuiEvent`s into `core::Action`s. They
//! never mutate `App` themselves.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── tab_bar.rs       (Bottom tabs)
//! ├── home.rs          (Home tab)
//! ├── picker.rs        (Reusable list)
//! ├── browser.rs       (Subjects tab)
//! ├── quiz.rs          (Quiz tab)
//! ├── settings.rs      (Settings tab)
//! └── about.rs         (About overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod about;
pub mod browser;
pub mod home;
pub mod picker;
pub mod quiz;
pub mod settings;
pub mod tab_bar;

pub use about::AboutDialog;
pub use browser::{BrowserState, BrowserView};
pub use home::HomePage;
pub use quiz::{QuizState, QuizView};
pub use settings::{SettingsState, SettingsView};
pub use tab_bar::TabBar;
