//! Core domain types for the muster readiness calendar.
//!
//! This module defines the fundamental types used throughout the system:
//! - Canonical calendar events and their extended properties
//! - Coarse calendar categories
//! - Filter selections
//! - Weekly nutrition plan inputs
//! - View and screen-geometry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Calendar Categories (coarse taxonomy)
// ============================================================================

/// Coarse, user-facing calendar category.
///
/// Fine-grained event type tags (e.g. `TRAINING_SESSION`) are grouped into
/// these categories by the taxonomy module. Tags not covered by the taxonomy
/// surface as `Other` with their raw tag string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CalendarCategory {
    Physical,
    Medical,
    Nutrition,
    Psychological,
    Sleep,
    Appointments,
    Training,
    Uncategorized,
    Other(String),
}

impl CalendarCategory {
    /// Parse a category from its display name
    pub fn from_name(name: &str) -> Self {
        match name {
            "Physical" => Self::Physical,
            "Medical" => Self::Medical,
            "Nutrition" => Self::Nutrition,
            "Psychological" => Self::Psychological,
            "Sleep" => Self::Sleep,
            "Appointments" => Self::Appointments,
            "Training" => Self::Training,
            "Uncategorized" => Self::Uncategorized,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display name for this category
    pub fn as_str(&self) -> &str {
        match self {
            Self::Physical => "Physical",
            Self::Medical => "Medical",
            Self::Nutrition => "Nutrition",
            Self::Psychological => "Psychological",
            Self::Sleep => "Sleep",
            Self::Appointments => "Appointments",
            Self::Training => "Training",
            Self::Uncategorized => "Uncategorized",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for CalendarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CalendarCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CalendarCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

// ============================================================================
// Calendar Events (canonical shape)
// ============================================================================

/// Extended event properties carried alongside the rendering fields.
///
/// Every field is explicitly optional: events arrive from heterogeneous
/// sources and the filter engine treats a missing field as "passes every
/// selection" rather than "excluded".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProps {
    /// Fine-grained tag, e.g. `TRAINING_SESSION`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Coarse category, e.g. `Nutrition`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_category: Option<CalendarCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,

    /// Link target for "open in new tab" clicks; stripped from base events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Macro payload for meal events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<MealNutrition>,

    /// Free-text details for activity events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,

    /// Free-text details for note events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Daily macro summary for the event's day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<DaySummary>,

    /// Meal calories as a rounded percentage of the day's calorie target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_percent_of_daily: Option<i32>,
}

/// A calendar event in canonical form, after normalization.
///
/// `id` is caller-assigned and must stay unique across the merged set.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    #[serde(default)]
    pub all_day: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default)]
    pub extended_props: ExtendedProps,
}

impl CalendarEvent {
    /// Coarse category, defaulting to `Uncategorized` when absent
    pub fn category(&self) -> CalendarCategory {
        self.extended_props
            .calendar_category
            .clone()
            .unwrap_or(CalendarCategory::Uncategorized)
    }
}

// ============================================================================
// Filter Selection
// ============================================================================

/// The currently selected filter facets.
///
/// An empty array for any facet means "no restriction on that facet",
/// never "exclude everything". The `types` facet holds display-category
/// names, expanded to fine-grained tags by the taxonomy module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub squads: Vec<String>,
    pub types: Vec<String>,
    pub locations: Vec<String>,
    pub attendees: Vec<String>,
}

impl FilterSelection {
    /// True when no facet restricts anything
    pub fn is_unrestricted(&self) -> bool {
        self.squads.is_empty()
            && self.types.is_empty()
            && self.locations.is_empty()
            && self.attendees.is_empty()
    }
}

// ============================================================================
// Weekly Nutrition Plan (transformer input)
// ============================================================================

/// Macro totals for one nutrient over one day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MacroTotals {
    #[serde(default)]
    pub consumed: f64,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub unit: String,
}

/// Per-day macro summary
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<MacroTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<MacroTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<MacroTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<MacroTotals>,
}

/// Macro payload attached to a single meal
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MealNutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// One scheduled item on a nutrition day
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleItem {
    #[serde(rename_all = "camelCase")]
    Meal {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nutrition: Option<MealNutrition>,
    },
    #[serde(rename_all = "camelCase")]
    Activity {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Note {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ScheduleItem {
    pub fn title(&self) -> &str {
        match self {
            Self::Meal { title, .. } | Self::Activity { title, .. } | Self::Note { title, .. } => {
                title
            }
        }
    }
}

/// One day of the weekly nutrition plan
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NutritionDay {
    #[serde(default)]
    pub summary: DaySummary,
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
}

/// A soldier's weekly nutrition plan, keyed by lowercase day name
/// (`monday`..`sunday`).
///
/// `week` is optional because upstream plan data is not always published;
/// the transformer treats a missing week as "no events" rather than an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NutritionPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<BTreeMap<String, NutritionDay>>,
}

// ============================================================================
// View and Screen Geometry
// ============================================================================

/// Calendar view granularity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Month,
    Week,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            _ => None,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => f.write_str("month"),
            Self::Week => f.write_str("week"),
        }
    }
}

/// An on-screen rectangle (CSS pixel coordinates, origin top-left)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A measured box size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// The visible viewport dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A fixed-position screen coordinate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
