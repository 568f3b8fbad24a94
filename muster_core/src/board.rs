//! Calendar board controller.
//!
//! Owns the merged event set for the lifetime of the page: sources are
//! merged exactly once at construction, every mutation (add, edit, remove,
//! duplicate) goes through the board, and children only ever see read-only
//! views. Also owns the view cursor, the filter selection lifecycle, and
//! the tooltip state machine with named dismissal transitions.

use crate::filter::filter_events;
use crate::sources::{self, EventSources};
use crate::taxonomy;
use crate::tooltip::compute_tooltip_position;
use crate::types::{
    CalendarCategory, CalendarEvent, FilterSelection, Position, Rect, Size, ViewMode, Viewport,
};
use crate::{Error, Result};
use chrono::{Duration, Months, NaiveDate};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// Colors applied to duplicated events that arrived without any
const NEUTRAL_COLORS: (&str, &str, &str) = ("#9e9e9e", "#757575", "#ffffff");

/// Distinct filterable values present in the merged event set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableOptions {
    pub squads: Vec<String>,
    /// Unified display categories (known categories plus raw passthroughs)
    pub types: Vec<String>,
    pub locations: Vec<String>,
    pub attendees: Vec<String>,
}

impl AvailableOptions {
    pub fn is_empty(&self) -> bool {
        self.squads.is_empty()
            && self.types.is_empty()
            && self.locations.is_empty()
            && self.attendees.is_empty()
    }
}

/// Tooltip visibility state
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipState {
    Hidden,
    Shown { event_id: String, position: Position },
}

/// What a click on an event resolves to
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Open the event's link in a new tab (modified click on a linked event)
    OpenUrl(String),
    /// Jump straight to the daily nutrition plan for the event's day
    OpenDailyPlan { date: NaiveDate },
    /// Show the tooltip at the computed position
    ShowTooltip(Position),
}

/// The calendar page's single owner of events, selection, view and tooltip
pub struct CalendarBoard {
    events: Vec<CalendarEvent>,
    selection: FilterSelection,
    selection_initialized: bool,
    available: AvailableOptions,
    view: ViewMode,
    cursor: NaiveDate,
    tooltip: TooltipState,
}

impl CalendarBoard {
    /// Merge the sources once and build the board.
    ///
    /// A merge failure (including an id collision between sources) degrades
    /// to an empty event set with an error log; the calendar renders empty
    /// rather than crashing.
    pub fn new(sources: EventSources, view: ViewMode, cursor: NaiveDate) -> Self {
        let events = match sources::merge_event_sources(sources) {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed to merge event sources: {}. Showing empty calendar.", e);
                Vec::new()
            }
        };

        let mut board = Self {
            events,
            selection: FilterSelection::default(),
            selection_initialized: false,
            available: AvailableOptions::default(),
            view,
            cursor,
            tooltip: TooltipState::Hidden,
        };
        board.refresh_options();
        board
    }

    /// Build a board from a fixture directory plus pre-derived nutrition
    /// events. A load failure degrades to an empty calendar, same as a
    /// merge failure.
    pub fn from_sources_dir(
        dir: &Path,
        nutrition: Vec<CalendarEvent>,
        view: ViewMode,
        cursor: NaiveDate,
    ) -> Self {
        let sources = match sources::load_sources(dir) {
            Ok(mut sources) => {
                sources.nutrition = nutrition;
                sources
            }
            Err(e) => {
                tracing::error!("Failed to load event sources: {}. Showing empty calendar.", e);
                EventSources::default()
            }
        };

        Self::new(sources, view, cursor)
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn available_options(&self) -> &AvailableOptions {
        &self.available
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// The filtered view of the merged set under the current selection
    pub fn visible_events(&self) -> Vec<CalendarEvent> {
        filter_events(&self.events, &self.selection)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Replace the filter selection (a manual user change)
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        // A manual change always sticks, even against an empty option set
        self.selection_initialized = true;
    }

    /// Recompute available options; on the first time they become non-empty,
    /// initialize the selection to "everything selected". Manual selections
    /// are never overwritten afterwards.
    fn refresh_options(&mut self) {
        self.available = compute_options(&self.events);

        if !self.selection_initialized && !self.available.is_empty() {
            self.selection = FilterSelection {
                squads: self.available.squads.clone(),
                types: self.available.types.clone(),
                locations: self.available.locations.clone(),
                attendees: self.available.attendees.clone(),
            };
            self.selection_initialized = true;
            tracing::debug!("Initialized selection to all available options");
        }
    }

    // ========================================================================
    // In-memory CRUD
    // ========================================================================

    /// Append a new event; its id must not collide with an existing one
    pub fn add_event(&mut self, event: CalendarEvent) -> Result<()> {
        if self.events.iter().any(|e| e.id == event.id) {
            return Err(Error::Event(format!(
                "event id '{}' already exists",
                event.id
            )));
        }
        self.events.push(event);
        self.refresh_options();
        Ok(())
    }

    /// Replace an existing event in place, matched by id
    pub fn update_event(&mut self, event: CalendarEvent) -> Result<()> {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                self.refresh_options();
                Ok(())
            }
            None => Err(Error::Event(format!("no event with id '{}'", event.id))),
        }
    }

    /// Remove an event by id and return it.
    ///
    /// Confirmation is the caller's concern; the board just removes.
    pub fn remove_event(&mut self, id: &str) -> Result<CalendarEvent> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::Event(format!("no event with id '{}'", id)))?;

        let removed = self.events.remove(idx);

        // A tooltip pointing at the removed event has nothing to show
        if matches!(&self.tooltip, TooltipState::Shown { event_id, .. } if event_id == id) {
            self.tooltip = TooltipState::Hidden;
        }

        self.refresh_options();
        Ok(removed)
    }

    /// Clone an event one week forward with a fresh id.
    ///
    /// Missing color fields on the original default to a neutral gray so
    /// the clone is visibly styled. Returns the new event's id.
    pub fn duplicate_event(&mut self, id: &str) -> Result<String> {
        let mut clone = self
            .event(id)
            .ok_or_else(|| Error::Event(format!("no event with id '{}'", id)))?
            .clone();

        clone.id = Uuid::new_v4().to_string();
        clone.start += Duration::days(7);
        clone.end += Duration::days(7);
        clone
            .background_color
            .get_or_insert_with(|| NEUTRAL_COLORS.0.into());
        clone
            .border_color
            .get_or_insert_with(|| NEUTRAL_COLORS.1.into());
        clone.text_color.get_or_insert_with(|| NEUTRAL_COLORS.2.into());

        let new_id = clone.id.clone();
        self.events.push(clone);
        self.refresh_options();

        tracing::debug!("Duplicated event '{}' as '{}'", id, new_id);
        Ok(new_id)
    }

    // ========================================================================
    // View navigation
    // ========================================================================

    /// Step the cursor back one view span
    pub fn navigate_prev(&mut self) {
        self.cursor = match self.view {
            ViewMode::Month => self
                .cursor
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.cursor),
            ViewMode::Week => self.cursor - Duration::days(7),
        };
        self.close_tooltip();
    }

    /// Step the cursor forward one view span
    pub fn navigate_next(&mut self) {
        self.cursor = match self.view {
            ViewMode::Month => self
                .cursor
                .checked_add_months(Months::new(1))
                .unwrap_or(self.cursor),
            ViewMode::Week => self.cursor + Duration::days(7),
        };
        self.close_tooltip();
    }

    /// Jump the cursor to the caller's current date
    pub fn navigate_today(&mut self, today: NaiveDate) {
        self.cursor = today;
        self.close_tooltip();
    }

    /// Switch the view granularity, keeping the cursor
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.close_tooltip();
    }

    // ========================================================================
    // Tooltip state machine
    // ========================================================================

    /// Route a click on an event.
    ///
    /// A modified ("open link") click on an event carrying a URL bypasses
    /// the tooltip and yields the URL; a click on a Nutrition-category event
    /// bypasses the tooltip and yields the daily-plan target. Everything
    /// else shows the tooltip at a viewport-clamped position.
    pub fn click_event(
        &mut self,
        id: &str,
        anchor: Rect,
        tooltip_size: Size,
        viewport: Viewport,
        open_link_modifier: bool,
    ) -> Result<ClickOutcome> {
        let event = self
            .event(id)
            .ok_or_else(|| Error::Event(format!("no event with id '{}'", id)))?;

        if open_link_modifier {
            if let Some(url) = &event.extended_props.url {
                let url = url.clone();
                self.tooltip = TooltipState::Hidden;
                return Ok(ClickOutcome::OpenUrl(url));
            }
        }

        if event.category() == CalendarCategory::Nutrition {
            let date = event.start.date_naive();
            self.tooltip = TooltipState::Hidden;
            return Ok(ClickOutcome::OpenDailyPlan { date });
        }

        let position = compute_tooltip_position(anchor, tooltip_size, viewport);
        self.tooltip = TooltipState::Shown {
            event_id: id.to_string(),
            position,
        };
        Ok(ClickOutcome::ShowTooltip(position))
    }

    /// Recompute the shown tooltip's position after a re-measure
    /// (content change or viewport resize). No-op while hidden.
    pub fn reposition_tooltip(&mut self, anchor: Rect, tooltip_size: Size, viewport: Viewport) {
        if let TooltipState::Shown { position, .. } = &mut self.tooltip {
            *position = compute_tooltip_position(anchor, tooltip_size, viewport);
        }
    }

    pub fn dismiss_on_escape(&mut self) {
        self.tooltip = TooltipState::Hidden;
    }

    pub fn dismiss_on_outside_click(&mut self) {
        self.tooltip = TooltipState::Hidden;
    }

    pub fn close_tooltip(&mut self) {
        self.tooltip = TooltipState::Hidden;
    }
}

/// Distinct squads, unified types, locations and attendees across the set
fn compute_options(events: &[CalendarEvent]) -> AvailableOptions {
    let mut squads = HashSet::new();
    let mut tags = HashSet::new();
    let mut locations = HashSet::new();
    let mut attendees = HashSet::new();

    for event in events {
        let props = &event.extended_props;
        if let Some(squad) = &props.squad {
            squads.insert(squad.clone());
        }
        if let Some(tag) = &props.event_type {
            tags.insert(tag.clone());
        }
        if let Some(location) = &props.location {
            locations.insert(location.clone());
        }
        for attendee in &props.attendees {
            attendees.insert(attendee.clone());
        }
    }

    let mut squads: Vec<String> = squads.into_iter().collect();
    let mut locations: Vec<String> = locations.into_iter().collect();
    let mut attendees: Vec<String> = attendees.into_iter().collect();
    squads.sort();
    locations.sort();
    attendees.sort();

    AvailableOptions {
        squads,
        types: taxonomy::unify_categories(&tags),
        locations,
        attendees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::build_sample_sources;
    use crate::types::ExtendedProps;
    use chrono::{TimeZone, Utc};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 29).unwrap()
    }

    fn sample_board() -> CalendarBoard {
        CalendarBoard::new(build_sample_sources(monday()), ViewMode::Month, monday())
    }

    fn bare_event(id: &str, props: ExtendedProps) -> CalendarEvent {
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

    fn screen() -> (Rect, Size, Viewport) {
        (
            Rect {
                x: 400.0,
                y: 200.0,
                width: 120.0,
                height: 24.0,
            },
            Size {
                width: 320.0,
                height: 260.0,
            },
            Viewport {
                width: 1920.0,
                height: 1080.0,
            },
        )
    }

    #[test]
    fn test_selection_initialized_to_everything() {
        let board = sample_board();

        assert!(!board.available_options().is_empty());
        assert_eq!(board.selection().squads, board.available_options().squads);
        assert_eq!(board.selection().types, board.available_options().types);

        // Everything selected means everything visible
        assert_eq!(board.visible_events().len(), board.events().len());
    }

    #[test]
    fn test_manual_selection_survives_event_changes() {
        let mut board = sample_board();

        let manual = FilterSelection {
            squads: vec!["Battalion 1".into()],
            ..FilterSelection::default()
        };
        board.set_selection(manual.clone());

        board
            .add_event(bare_event(
                "added-1",
                ExtendedProps {
                    squad: Some("Battalion 3".into()),
                    ..ExtendedProps::default()
                },
            ))
            .unwrap();

        // Options grew, but the manual selection is untouched
        assert!(board
            .available_options()
            .squads
            .contains(&"Battalion 3".to_string()));
        assert_eq!(board.selection(), &manual);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut board = sample_board();
        let result = board.add_event(bare_event("base-pt-1", ExtendedProps::default()));
        assert!(matches!(result, Err(Error::Event(_))));
    }

    #[test]
    fn test_duplicate_shifts_one_week_and_defaults_colors() {
        let mut board = sample_board();

        let original_start = board.event("base-pt-1").unwrap().start;
        let new_id = board.duplicate_event("base-pt-1").unwrap();

        let clone = board.event(&new_id).unwrap();
        assert_ne!(clone.id, "base-pt-1");
        assert_eq!(clone.start - original_start, Duration::days(7));
        assert_eq!(clone.end - clone.start, Duration::minutes(60));
        // Sample events ship without colors; the clone gets neutral gray
        assert_eq!(clone.background_color.as_deref(), Some("#9e9e9e"));
        assert_eq!(clone.border_color.as_deref(), Some("#757575"));
    }

    #[test]
    fn test_duplicate_of_dated_event_lands_exactly_plus_seven() {
        let mut board = sample_board();
        let new_id = board.duplicate_event("base-pt-1").unwrap();
        let clone = board.event(&new_id).unwrap();

        // base-pt-1 starts Monday 2025-09-29 06:00
        assert_eq!(clone.start.to_rfc3339(), "2025-10-06T06:00:00+00:00");
    }

    #[test]
    fn test_remove_event_hides_its_tooltip() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        board
            .click_event("base-med-1", anchor, size, viewport, false)
            .unwrap();
        assert!(matches!(board.tooltip(), TooltipState::Shown { .. }));

        board.remove_event("base-med-1").unwrap();
        assert_eq!(board.tooltip(), &TooltipState::Hidden);
        assert!(board.event("base-med-1").is_none());
    }

    #[test]
    fn test_click_shows_tooltip_then_escape_hides() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        let outcome = board
            .click_event("base-pt-1", anchor, size, viewport, false)
            .unwrap();
        assert!(matches!(outcome, ClickOutcome::ShowTooltip(_)));
        assert!(matches!(board.tooltip(), TooltipState::Shown { event_id, .. } if event_id == "base-pt-1"));

        board.dismiss_on_escape();
        assert_eq!(board.tooltip(), &TooltipState::Hidden);
    }

    #[test]
    fn test_modified_click_on_linked_event_opens_url() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        // comp-brief-1 carries a URL (comprehensive source keeps its links)
        let outcome = board
            .click_event("comp-brief-1", anchor, size, viewport, true)
            .unwrap();
        assert_eq!(
            outcome,
            ClickOutcome::OpenUrl("https://unit.example/briefing-pack".into())
        );
        assert_eq!(board.tooltip(), &TooltipState::Hidden);
    }

    #[test]
    fn test_click_on_nutrition_event_opens_daily_plan() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        board
            .add_event(bare_event(
                "nut-click-1",
                ExtendedProps {
                    event_type: Some("NUTRITION".into()),
                    calendar_category: Some(CalendarCategory::Nutrition),
                    ..ExtendedProps::default()
                },
            ))
            .unwrap();

        let outcome = board
            .click_event("nut-click-1", anchor, size, viewport, false)
            .unwrap();
        assert_eq!(outcome, ClickOutcome::OpenDailyPlan { date: monday() });
        assert_eq!(board.tooltip(), &TooltipState::Hidden);
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let mut board =
            CalendarBoard::new(build_sample_sources(monday()), ViewMode::Month, jan31);

        board.navigate_next();
        assert_eq!(board.cursor(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());

        board.navigate_prev();
        assert_eq!(board.cursor(), NaiveDate::from_ymd_opt(2026, 1, 28).unwrap());
    }

    #[test]
    fn test_week_navigation_steps_seven_days() {
        let mut board = sample_board();
        board.set_view(ViewMode::Week);

        board.navigate_next();
        assert_eq!(board.cursor(), monday() + Duration::days(7));

        board.navigate_today(monday());
        assert_eq!(board.cursor(), monday());
    }

    #[test]
    fn test_navigation_closes_tooltip() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        board
            .click_event("base-pt-1", anchor, size, viewport, false)
            .unwrap();
        board.navigate_next();
        assert_eq!(board.tooltip(), &TooltipState::Hidden);
    }

    #[test]
    fn test_merge_failure_degrades_to_empty_board() {
        let mut sources = build_sample_sources(monday());
        // Force an id collision across sources
        sources.category.push(sources.base[0].clone());

        let board = CalendarBoard::new(sources, ViewMode::Month, monday());
        assert!(board.events().is_empty());
        assert!(board.available_options().is_empty());
        assert!(board.visible_events().is_empty());
    }

    #[test]
    fn test_reposition_updates_shown_tooltip() {
        let mut board = sample_board();
        let (anchor, size, viewport) = screen();

        board
            .click_event("base-pt-1", anchor, size, viewport, false)
            .unwrap();

        // The viewport shrank; the tooltip must stay inside it
        let small = Viewport {
            width: 500.0,
            height: 400.0,
        };
        board.reposition_tooltip(anchor, size, small);

        match board.tooltip() {
            TooltipState::Shown { position, .. } => {
                assert!(position.x + size.width <= small.width - 8.0 + f64::EPSILON);
            }
            other => panic!("Expected shown tooltip, got {:?}", other),
        }
    }
}
