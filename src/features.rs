//! Feature modules - engine logic separated from any rendering surface
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on a GUI toolkit.

pub mod lyrics;
pub mod settings;

pub use settings::Settings;
