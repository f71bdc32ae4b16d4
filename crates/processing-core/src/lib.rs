//! ZoomReel Processing Core: the Auto-Director
//!
//! Turns recorded interaction events into camera decisions:
//! - **Time mapping:** Source ↔ output time across trimmed windows
//! - **Focus detection:** Events and pointer hovers → ordered focus areas
//! - **Zoom scheduling:** Focus areas → non-overlapping camera motions
//! - **Spotlights:** Enlarged highlights for long-dwell UI cards
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod camera_preview;
pub mod director;
pub mod focus_manager;
pub mod hover;
pub mod spotlight;
pub mod time_mapper;
pub mod view_mapper;
pub mod viewport_state;
pub mod zoom_schedule;

pub use director::{Director, DirectorOutput};
pub use focus_manager::{get_all_focus_areas, FocusManager};
pub use hover::HoverDetector;
pub use spotlight::calculate_auto_spotlights;
pub use time_mapper::TimeMapper;
pub use view_mapper::ViewMapper;
pub use viewport_state::get_viewport_state_at_time;
pub use zoom_schedule::calculate_zoom_schedule;
