//! Weekly nutrition plan to calendar events transformer.
//!
//! Expands a soldier's weekly nutrition plan (meals, activities, notes)
//! into concrete calendar events: one event per schedule item per day per
//! published week copy. Event ids are derived deterministically from the
//! soldier, week index, day and item index, so regenerating the same plan
//! yields the same ids and a caller that replaces rather than appends
//! cannot create duplicates.

use crate::types::{
    CalendarCategory, CalendarEvent, DaySummary, ExtendedProps, MealNutrition, NutritionPlan,
    ScheduleItem,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Day keys recognized in plan data, with their offsets from the base Monday
const DAY_OFFSETS: [(&str, i64); 7] = [
    ("monday", 0),
    ("tuesday", 1),
    ("wednesday", 2),
    ("thursday", 3),
    ("friday", 4),
    ("saturday", 5),
    ("sunday", 6),
];

/// Short display codes for the standard meal titles
const MEAL_CODES: [(&str, &str); 6] = [
    ("Breakfast", "BRK"),
    ("Lunch", "LCH"),
    ("Dinner", "DNR"),
    ("Morning Snack", "AM-SNK"),
    ("Afternoon Snack", "PM-SNK"),
    ("Evening Snack", "EV-SNK"),
];

// Color triples: (background, border, text)
const MEAL_COLORS: (&str, &str, &str) = ("#1bbc9c", "#15a086", "#ffffff");
const ACTIVITY_COLORS: (&str, &str, &str) = ("#3a8dee", "#0e478a", "#ffffff");
const NOTE_COLORS: (&str, &str, &str) = ("#9b58b5", "#8f44ad", "#ffffff");

const MEAL_DURATION_MIN: i64 = 15;
const ACTIVITY_DURATION_MIN: i64 = 60;
const NOTE_DURATION_MIN: i64 = 5;

/// Options controlling how a nutrition plan is published onto the calendar
#[derive(Clone, Debug)]
pub struct NutritionEventOptions {
    /// Soldier the plan belongs to; part of every derived event id
    pub soldier_id: i64,
    /// The Monday the first published week starts on
    pub base_monday: NaiveDate,
    /// Number of sequential week copies to publish
    pub weeks: u32,
}

/// Expand a weekly nutrition plan into calendar events.
///
/// A plan without week data yields no events; upstream publishes plans
/// incrementally and an unpublished week is an expected state, not an error.
pub fn nutrition_week_to_events(
    plan: &NutritionPlan,
    opts: &NutritionEventOptions,
) -> Vec<CalendarEvent> {
    let Some(week) = plan.week.as_ref() else {
        tracing::warn!(
            "Nutrition plan for soldier {} has no week data, deriving no events",
            opts.soldier_id
        );
        return Vec::new();
    };

    let mut events = Vec::new();

    for week_idx in 0..opts.weeks {
        for (day_key, day_offset) in DAY_OFFSETS {
            let Some(day) = week.get(day_key) else {
                continue;
            };

            let date = opts.base_monday + Duration::days(week_idx as i64 * 7 + day_offset);

            for (item_idx, item) in day.schedule.iter().enumerate() {
                let id = format!(
                    "nutrition-{}-w{}-{}-{}",
                    opts.soldier_id, week_idx, day_key, item_idx
                );
                events.push(item_to_event(item, &day.summary, date, id));
            }
        }
    }

    tracing::debug!(
        "Derived {} nutrition events for soldier {} over {} week(s)",
        events.len(),
        opts.soldier_id,
        opts.weeks
    );

    events
}

fn item_to_event(
    item: &ScheduleItem,
    summary: &DaySummary,
    date: NaiveDate,
    id: String,
) -> CalendarEvent {
    match item {
        ScheduleItem::Meal {
            title,
            time,
            nutrition,
        } => {
            let start = at_time(date, time.as_deref());
            let end = start + Duration::minutes(MEAL_DURATION_MIN);

            build_event(
                id,
                meal_title(title, nutrition.as_ref()),
                start,
                end,
                MEAL_COLORS,
                ExtendedProps {
                    event_type: Some("NUTRITION".into()),
                    calendar_category: Some(CalendarCategory::Nutrition),
                    nutrition: nutrition.clone(),
                    summary: Some(summary.clone()),
                    meal_percent_of_daily: meal_percent_of_daily(nutrition.as_ref(), summary),
                    ..ExtendedProps::default()
                },
            )
        }

        ScheduleItem::Activity {
            title,
            start_time,
            end_time,
            details,
        } => {
            let start = at_time(date, start_time.as_deref());
            let end = end_time
                .as_deref()
                .and_then(parse_clock)
                .map(|t| date.and_time(t).and_utc())
                .unwrap_or(start + Duration::minutes(ACTIVITY_DURATION_MIN));

            build_event(
                id,
                title.clone(),
                start,
                end,
                ACTIVITY_COLORS,
                ExtendedProps {
                    event_type: Some("TRAINING_SESSION".into()),
                    calendar_category: Some(CalendarCategory::Nutrition),
                    activity: details.clone(),
                    summary: Some(summary.clone()),
                    ..ExtendedProps::default()
                },
            )
        }

        ScheduleItem::Note {
            title,
            time,
            details,
        } => {
            let start = at_time(date, time.as_deref());
            let end = start + Duration::minutes(NOTE_DURATION_MIN);

            build_event(
                id,
                title.clone(),
                start,
                end,
                NOTE_COLORS,
                ExtendedProps {
                    event_type: Some("NUTRITION".into()),
                    calendar_category: Some(CalendarCategory::Nutrition),
                    note: details.clone(),
                    summary: Some(summary.clone()),
                    ..ExtendedProps::default()
                },
            )
        }
    }
}

fn build_event(
    id: String,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    colors: (&str, &str, &str),
    props: ExtendedProps,
) -> CalendarEvent {
    CalendarEvent {
        id,
        title,
        start,
        end,
        all_day: false,
        background_color: Some(colors.0.into()),
        border_color: Some(colors.1.into()),
        text_color: Some(colors.2.into()),
        extended_props: props,
    }
}

fn parse_clock(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// Timestamp for the given clock string on the given date; items without a
/// parseable time land at 08:00.
fn at_time(date: NaiveDate, time: Option<&str>) -> DateTime<Utc> {
    let time = time
        .and_then(parse_clock)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default());
    date.and_time(time).and_utc()
}

/// Meal display title: short code, plus calories when nutrition is attached
fn meal_title(title: &str, nutrition: Option<&MealNutrition>) -> String {
    let code = meal_code(title);
    match nutrition {
        Some(n) => format!("{} {}kcal", code, n.calories),
        None => code,
    }
}

/// Short code for a meal title: fixed table first, uppercased initials
/// of each word as the fallback.
fn meal_code(title: &str) -> String {
    for (name, code) in MEAL_CODES {
        if name.eq_ignore_ascii_case(title) {
            return code.to_string();
        }
    }

    title
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Meal calories as a rounded percentage of the day's calorie target.
/// Requires both the meal calories and a positive daily target.
fn meal_percent_of_daily(nutrition: Option<&MealNutrition>, summary: &DaySummary) -> Option<i32> {
    let calories = nutrition?.calories;
    let target = summary.calories.as_ref()?.target;
    if target <= 0.0 {
        return None;
    }
    Some((calories / target * 100.0).round() as i32)
}
