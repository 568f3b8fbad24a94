//! Filter engine applying the current facet selection to the event set.
//!
//! Each facet check passes when the selection for that facet is empty, when
//! the event lacks the field, or when the event's value intersects the
//! selection. Final inclusion is the AND of all four facet checks. The
//! computation is pure and runs over the full event list on every selection
//! change; at this scale nothing incremental is needed.

use crate::taxonomy;
use crate::types::{CalendarEvent, FilterSelection};
use std::collections::HashSet;

/// Apply the current selection to the merged event set.
///
/// The `types` facet holds display-category names and is expanded to
/// fine-grained tags before matching.
pub fn filter_events(events: &[CalendarEvent], selection: &FilterSelection) -> Vec<CalendarEvent> {
    if selection.is_unrestricted() {
        return events.to_vec();
    }

    let selected_tags = taxonomy::expand_categories(&selection.types);

    let filtered: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event_passes(event, selection, &selected_tags))
        .cloned()
        .collect();

    tracing::debug!(
        "Filter kept {} of {} events",
        filtered.len(),
        events.len()
    );

    filtered
}

fn event_passes(
    event: &CalendarEvent,
    selection: &FilterSelection,
    selected_tags: &HashSet<String>,
) -> bool {
    let props = &event.extended_props;

    let squad_ok = selection.squads.is_empty()
        || props
            .squad
            .as_ref()
            .map_or(true, |squad| selection.squads.contains(squad));

    let type_ok = selection.types.is_empty()
        || props
            .event_type
            .as_ref()
            .map_or(true, |tag| selected_tags.contains(tag));

    let location_ok = selection.locations.is_empty()
        || props
            .location
            .as_ref()
            .map_or(true, |location| selection.locations.contains(location));

    let attendees_ok = selection.attendees.is_empty()
        || props.attendees.is_empty()
        || props
            .attendees
            .iter()
            .any(|attendee| selection.attendees.contains(attendee));

    squad_ok && type_ok && location_ok && attendees_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtendedProps;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, props: ExtendedProps) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: format!("Event {}", id),
            start: Utc.with_ymd_and_hms(2025, 9, 29, 8, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 9, 29, 9, 0, 0).unwrap(),
            all_day: false,
            background_color: None,
            border_color: None,
            text_color: None,
            extended_props: props,
        }
    }

    fn tagged(id: &str, event_type: &str, squad: Option<&str>) -> CalendarEvent {
        event(
            id,
            ExtendedProps {
                event_type: Some(event_type.into()),
                squad: squad.map(Into::into),
                ..ExtendedProps::default()
            },
        )
    }

    fn selection_of(types: &[&str], squads: &[&str]) -> FilterSelection {
        FilterSelection {
            squads: squads.iter().map(|s| s.to_string()).collect(),
            types: types.iter().map(|s| s.to_string()).collect(),
            locations: vec![],
            attendees: vec![],
        }
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let events = vec![
            tagged("a", "TRAINING_SESSION", Some("Battalion 1")),
            tagged("b", "NUTRITION", None),
        ];

        let filtered = filter_events(&events, &FilterSelection::default());

        assert_eq!(filtered.len(), events.len());
        for (original, kept) in events.iter().zip(filtered.iter()) {
            assert_eq!(original.id, kept.id);
        }
    }

    #[test]
    fn test_missing_squad_passes_any_squad_selection() {
        let events = vec![
            tagged("with-squad", "TRAINING_SESSION", Some("Battalion 1")),
            tagged("no-squad", "TRAINING_SESSION", None),
        ];

        let filtered = filter_events(&events, &selection_of(&[], &["Battalion 2"]));

        // The squadless event survives a selection that excludes Battalion 1
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "no-squad");
    }

    #[test]
    fn test_type_selection_expands_display_categories() {
        let events = vec![
            tagged("training", "TRAINING_SESSION", None),
            tagged("drill", "DRILL", None),
            tagged("meal", "NUTRITION", None),
        ];

        let filtered = filter_events(&events, &selection_of(&["Training"], &[]));

        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["training", "drill"]);
    }

    #[test]
    fn test_raw_tag_passthrough_selection() {
        let events = vec![
            tagged("known", "TRAINING_SESSION", None),
            tagged("raw", "RANGE_QUALIFICATION", None),
        ];

        let filtered = filter_events(
            &events,
            &selection_of(&["RANGE_QUALIFICATION"], &[]),
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "raw");
    }

    #[test]
    fn test_attendee_intersection() {
        let events = vec![
            event(
                "shared",
                ExtendedProps {
                    attendees: vec!["Cohen".into(), "Levi".into()],
                    ..ExtendedProps::default()
                },
            ),
            event(
                "other",
                ExtendedProps {
                    attendees: vec!["Mizrahi".into()],
                    ..ExtendedProps::default()
                },
            ),
            event("unlisted", ExtendedProps::default()),
        ];

        let selection = FilterSelection {
            attendees: vec!["Levi".into()],
            ..FilterSelection::default()
        };

        let filtered = filter_events(&events, &selection);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();

        // "other" drops; the attendee-less event passes
        assert_eq!(ids, vec!["shared", "unlisted"]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let events = vec![
            tagged("match", "TRAINING_SESSION", Some("Battalion 1")),
            tagged("wrong-squad", "TRAINING_SESSION", Some("Battalion 2")),
            tagged("wrong-type", "NUTRITION", Some("Battalion 1")),
        ];

        let filtered = filter_events(&events, &selection_of(&["Training"], &["Battalion 1"]));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "match");
    }
}
