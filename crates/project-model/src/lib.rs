//! ZoomReel Project Model
//!
//! Defines the data contracts shared by the auto-director and its callers:
//! - **Events:** Categorized, timestamped input events (clicks, typing, hovers...)
//! - **Windows:** Kept segments of source time after trimming
//! - **Focus / Motions:** Regions of interest, camera keyframes and spotlights
//! - **Project:** Input and schedule documents plus policy settings
//!
//! Coordinates are pixels. Focus areas live in source-video space; camera
//! motions and spotlights live in output-canvas space.

pub mod event;
pub mod focus;
pub mod geometry;
pub mod motion;
pub mod project;
pub mod settings;
pub mod window;

pub use event::*;
pub use focus::*;
pub use geometry::*;
pub use motion::*;
pub use project::*;
pub use settings::*;
pub use window::*;
