//! Event source loading, normalization, and merging.
//!
//! The calendar is fed by four heterogeneous collections: base events,
//! nutrition-derived events (published by the transformer at runtime),
//! category events, and the comprehensive event set. Three of them live as
//! JSON fixture files on disk; the nutrition collection is derived. This
//! module normalizes all four into the canonical shape and merges them into
//! the single event vec the board owns.

use crate::types::{CalendarCategory, CalendarEvent, NutritionPlan};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Fixture file names inside a sources directory
pub const BASE_EVENTS_FILE: &str = "events.json";
pub const CATEGORY_EVENTS_FILE: &str = "category_events.json";
pub const COMPREHENSIVE_EVENTS_FILE: &str = "comprehensive_events.json";
pub const NUTRITION_PLAN_FILE: &str = "nutrition_plan.json";

/// The four event collections feeding the calendar
#[derive(Clone, Debug, Default)]
pub struct EventSources {
    pub base: Vec<CalendarEvent>,
    pub nutrition: Vec<CalendarEvent>,
    pub category: Vec<CalendarEvent>,
    pub comprehensive: Vec<CalendarEvent>,
}

/// Load the three fixture collections from a sources directory.
///
/// A missing file is an empty collection (fixture packs do not always ship
/// every source); a file that exists but fails to parse is an error, which
/// callers degrade to an empty calendar.
pub fn load_sources(dir: &Path) -> Result<EventSources> {
    Ok(EventSources {
        base: load_event_file(&dir.join(BASE_EVENTS_FILE))?,
        nutrition: Vec::new(),
        category: load_event_file(&dir.join(CATEGORY_EVENTS_FILE))?,
        comprehensive: load_event_file(&dir.join(COMPREHENSIVE_EVENTS_FILE))?,
    })
}

fn load_event_file(path: &Path) -> Result<Vec<CalendarEvent>> {
    if !path.exists() {
        tracing::warn!("No event source at {:?}, treating as empty", path);
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&contents)
        .map_err(|e| Error::Source(format!("{}: {}", path.display(), e)))?;

    tracing::debug!("Loaded {} events from {:?}", events.len(), path);
    Ok(events)
}

/// Load the weekly nutrition plan from a sources directory.
///
/// Missing file means no plan was published yet and yields an empty plan.
pub fn load_nutrition_plan(dir: &Path) -> Result<NutritionPlan> {
    let path = dir.join(NUTRITION_PLAN_FILE);
    if !path.exists() {
        tracing::warn!("No nutrition plan at {:?}, treating as unpublished", path);
        return Ok(NutritionPlan::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let plan: NutritionPlan = serde_json::from_str(&contents)
        .map_err(|e| Error::Source(format!("{}: {}", path.display(), e)))?;

    Ok(plan)
}

/// Normalize and merge the four collections into one canonical event vec.
///
/// Normalization rules:
/// - base events lose any `url` (click navigation is replaced by the tooltip)
/// - category and comprehensive events without a coarse category default to
///   `Uncategorized`
/// - concatenation order is base, nutrition, category, comprehensive
///
/// Ids must be unique across all sources; a collision is an error rather
/// than a silently duplicated calendar entry.
pub fn merge_event_sources(sources: EventSources) -> Result<Vec<CalendarEvent>> {
    let EventSources {
        base,
        nutrition,
        category,
        comprehensive,
    } = sources;

    let mut merged =
        Vec::with_capacity(base.len() + nutrition.len() + category.len() + comprehensive.len());

    for mut event in base {
        event.extended_props.url = None;
        merged.push(event);
    }

    merged.extend(nutrition);

    for mut event in category.into_iter().chain(comprehensive) {
        if event.extended_props.calendar_category.is_none() {
            event.extended_props.calendar_category = Some(CalendarCategory::Uncategorized);
        }
        merged.push(event);
    }

    let mut seen = HashSet::new();
    for event in &merged {
        if !seen.insert(event.id.as_str()) {
            return Err(Error::Event(format!(
                "duplicate event id '{}' across sources",
                event.id
            )));
        }
    }

    tracing::info!("Merged {} events from all sources", merged.len());
    Ok(merged)
}

/// Validate a merged event set for consistency.
///
/// Returns a list of diagnostics, or empty Vec if clean. Diagnostics are
/// advisory: an event set with findings still renders.
pub fn validate_events(events: &[CalendarEvent]) -> Vec<String> {
    let mut findings = Vec::new();

    for event in events {
        if event.id.is_empty() {
            findings.push("Event has empty id".to_string());
        }
        if event.title.is_empty() {
            findings.push(format!("Event '{}' has empty title", event.id));
        }
        if event.end < event.start {
            findings.push(format!(
                "Event '{}' ends before it starts ({} < {})",
                event.id, event.end, event.start
            ));
        }
        if let Some(tag) = &event.extended_props.event_type {
            if crate::taxonomy::category_for_tag(tag).is_none() {
                findings.push(format!(
                    "Event '{}' carries uncovered tag '{}' (surfaces as its own category)",
                    event.id, tag
                ));
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtendedProps;
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn event(id: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: format!("Event {}", id),
            start: Utc.with_ymd_and_hms(2025, 9, 29, 8, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 9, 29, 9, 0, 0).unwrap(),
            all_day: false,
            background_color: None,
            border_color: None,
            text_color: None,
            extended_props: ExtendedProps::default(),
        }
    }

    #[test]
    fn test_merge_order_and_count() {
        let sources = EventSources {
            base: vec![event("base-1")],
            nutrition: vec![event("nut-1")],
            category: vec![event("cat-1")],
            comprehensive: vec![event("comp-1")],
        };

        let merged = merge_event_sources(sources).unwrap();
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["base-1", "nut-1", "cat-1", "comp-1"]);
    }

    #[test]
    fn test_base_events_lose_url() {
        let mut base = event("base-1");
        base.extended_props.url = Some("https://unit.example/briefing".into());

        let merged = merge_event_sources(EventSources {
            base: vec![base],
            ..EventSources::default()
        })
        .unwrap();

        assert!(merged[0].extended_props.url.is_none());
    }

    #[test]
    fn test_missing_category_defaults_to_uncategorized() {
        let merged = merge_event_sources(EventSources {
            category: vec![event("cat-1")],
            comprehensive: vec![event("comp-1")],
            ..EventSources::default()
        })
        .unwrap();

        for event in &merged {
            assert_eq!(
                event.extended_props.calendar_category,
                Some(CalendarCategory::Uncategorized)
            );
        }
    }

    #[test]
    fn test_base_events_keep_missing_category() {
        // The uncategorized default applies to category/comprehensive
        // sources only; base events stay as they arrived.
        let merged = merge_event_sources(EventSources {
            base: vec![event("base-1")],
            ..EventSources::default()
        })
        .unwrap();

        assert!(merged[0].extended_props.calendar_category.is_none());
    }

    #[test]
    fn test_id_collision_is_an_error() {
        let result = merge_event_sources(EventSources {
            base: vec![event("dup")],
            category: vec![event("dup")],
            ..EventSources::default()
        });

        assert!(matches!(result, Err(Error::Event(_))));
    }

    #[test]
    fn test_load_sources_with_missing_files() {
        let temp_dir = tempfile::tempdir().unwrap();

        let sources = load_sources(temp_dir.path()).unwrap();
        assert!(sources.base.is_empty());
        assert!(sources.category.is_empty());
        assert!(sources.comprehensive.is_empty());
    }

    #[test]
    fn test_load_sources_from_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let events = vec![event("file-1"), event("file-2")];
        fs::write(
            temp_dir.path().join(BASE_EVENTS_FILE),
            serde_json::to_string(&events).unwrap(),
        )
        .unwrap();

        let sources = load_sources(temp_dir.path()).unwrap();
        assert_eq!(sources.base.len(), 2);
        assert_eq!(sources.base[0].id, "file-1");
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(BASE_EVENTS_FILE), "{ not json ]").unwrap();

        let result = load_sources(temp_dir.path());
        assert!(matches!(result, Err(Error::Source(_))));
    }

    #[test]
    fn test_validate_flags_inverted_range() {
        let mut bad = event("bad");
        std::mem::swap(&mut bad.start, &mut bad.end);

        let findings = validate_events(&[event("good"), bad]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("ends before it starts"));
    }

    #[test]
    fn test_validate_notes_uncovered_tags() {
        let mut raw = event("raw");
        raw.extended_props.event_type = Some("RANGE_QUALIFICATION".into());

        let findings = validate_events(&[raw]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("RANGE_QUALIFICATION"));
    }
}
