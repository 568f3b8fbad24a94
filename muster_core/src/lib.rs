#![forbid(unsafe_code)]

//! Core domain model and business logic for the Muster readiness calendar.
//!
//! This crate provides:
//! - Domain types (calendar events, filter selections, nutrition plans)
//! - Event source loading, normalization and merging
//! - Nutrition plan to calendar event transformation
//! - Category taxonomy (fine-grained tags to display categories)
//! - Filter engine
//! - Tooltip placement
//! - The calendar board controller

pub mod types;
pub mod error;
pub mod taxonomy;
pub mod config;
pub mod logging;
pub mod sources;
pub mod sample;
pub mod nutrition;
pub mod filter;
pub mod tooltip;
pub mod board;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use board::{AvailableOptions, CalendarBoard, ClickOutcome, TooltipState};
pub use config::Config;
pub use filter::filter_events;
pub use nutrition::{nutrition_week_to_events, NutritionEventOptions};
pub use sample::{build_sample_nutrition_plan, build_sample_sources};
pub use sources::{load_nutrition_plan, load_sources, merge_event_sources, validate_events, EventSources};
pub use taxonomy::{expand_categories, unify_categories};
pub use tooltip::compute_tooltip_position;
