//! Painted Galaxy Core - galaxy map editor engine
//!
//! Wraps the pure logic crate with everything that touches the outside
//! world: decoding the painted canvas image, the undo/redo history, the RNG
//! that drives generation, and saving projects to disk.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`editor`] | `Editor`: open project, undoable edits, generation, export |
//! | [`history`] | done/undone batch stacks |
//! | [`canvas`] | PNG canvas ↔ `PixelGrid` |
//! | [`persistence`] | bincode save/load and the on-disk `ProjectStore` |
//!
//! # Example
//!
//! ```rust,no_run
//! use painted_galaxy_core::prelude::*;
//!
//! let mut editor = Editor::with_seed(Project::new("Spiral", blank_canvas()?)?, 7);
//! editor.set_canvas(std::fs::read("spiral.png")?);
//! editor.generate(GenerateSteps::ALL)?;
//! let scenario = editor.export();
//! # let _ = scenario;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod editor;
pub mod history;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::canvas::{blank_canvas, decode_pixels, encode_pixels, CanvasError};
    pub use crate::editor::{Editor, EditorError, GenerateSteps};
    pub use crate::history::HistoryError;
    pub use crate::persistence::{load_project, save_project, ProjectStore, SaveError};
    pub use painted_galaxy_logic::project::{Canvas, Project};
    pub use painted_galaxy_logic::settings::GeneratorSettings;
}
