//! Built-in sample event sources and nutrition plan.
//!
//! Lets the binary run with no fixture files on disk. Dates are anchored to
//! a caller-supplied Monday so the sample week can track the current week.

use crate::sources::EventSources;
use crate::types::{
    CalendarCategory, CalendarEvent, DaySummary, ExtendedProps, MacroTotals, MealNutrition,
    NutritionDay, NutritionPlan, ScheduleItem,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;

fn at(date: NaiveDate, hour: i64, minute: i64) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc() + Duration::minutes(hour * 60 + minute)
}

fn event(
    id: &str,
    title: &str,
    start: DateTime<Utc>,
    minutes: i64,
    props: ExtendedProps,
) -> CalendarEvent {
    CalendarEvent {
        id: id.into(),
        title: title.into(),
        start,
        end: start + Duration::minutes(minutes),
        all_day: false,
        background_color: None,
        border_color: None,
        text_color: None,
        extended_props: props,
    }
}

/// Build the sample event sources anchored to the given Monday
pub fn build_sample_sources(base_monday: NaiveDate) -> EventSources {
    let monday = base_monday;
    let tuesday = base_monday + Duration::days(1);
    let wednesday = base_monday + Duration::days(2);
    let thursday = base_monday + Duration::days(3);

    let base = vec![
        event(
            "base-pt-1",
            "Battalion Morning PT",
            at(monday, 6, 0),
            60,
            ExtendedProps {
                event_type: Some("PHYSICAL_TRAINING".into()),
                calendar_category: Some(CalendarCategory::Physical),
                squad: Some("Battalion 1".into()),
                location: Some("Parade Ground".into()),
                attendees: vec!["Cohen".into(), "Levi".into()],
                // Stripped at merge time; kept here to mirror upstream data
                url: Some("https://unit.example/pt-roster".into()),
                ..ExtendedProps::default()
            },
        ),
        event(
            "base-med-1",
            "Sick Call",
            at(tuesday, 9, 0),
            30,
            ExtendedProps {
                event_type: Some("MEDICAL_CHECKUP".into()),
                calendar_category: Some(CalendarCategory::Medical),
                squad: Some("Battalion 2".into()),
                location: Some("Medical Bay".into()),
                attendees: vec!["Mizrahi".into()],
                ..ExtendedProps::default()
            },
        ),
        event(
            "base-range-1",
            "Range Day",
            at(wednesday, 8, 0),
            240,
            ExtendedProps {
                event_type: Some("RANGE_DAY".into()),
                calendar_category: Some(CalendarCategory::Training),
                squad: Some("Battalion 1".into()),
                location: Some("Range C".into()),
                attendees: vec!["Cohen".into(), "Peretz".into()],
                ..ExtendedProps::default()
            },
        ),
    ];

    let category = vec![
        event(
            "cat-psych-1",
            "Counseling Session",
            at(tuesday, 14, 0),
            45,
            ExtendedProps {
                event_type: Some("COUNSELING".into()),
                calendar_category: Some(CalendarCategory::Psychological),
                location: Some("Welfare Office".into()),
                attendees: vec!["Levi".into()],
                ..ExtendedProps::default()
            },
        ),
        // No coarse category: exercises the Uncategorized default
        event(
            "cat-sleep-1",
            "Sleep Log Review",
            at(thursday, 10, 0),
            30,
            ExtendedProps {
                event_type: Some("SLEEP_LOG_REVIEW".into()),
                squad: Some("Battalion 2".into()),
                ..ExtendedProps::default()
            },
        ),
    ];

    let comprehensive = vec![
        event(
            "comp-fitness-1",
            "Quarterly Fitness Assessment",
            at(thursday, 7, 0),
            120,
            ExtendedProps {
                event_type: Some("STRENGTH_TEST".into()),
                calendar_category: Some(CalendarCategory::Physical),
                squad: Some("Battalion 1".into()),
                location: Some("Gymnasium".into()),
                attendees: vec!["Cohen".into(), "Levi".into(), "Peretz".into()],
                ..ExtendedProps::default()
            },
        ),
        event(
            "comp-brief-1",
            "Brigade Readiness Briefing",
            at(wednesday, 15, 0),
            60,
            ExtendedProps {
                event_type: Some("BRIEFING".into()),
                calendar_category: Some(CalendarCategory::Appointments),
                location: Some("HQ Briefing Room".into()),
                url: Some("https://unit.example/briefing-pack".into()),
                ..ExtendedProps::default()
            },
        ),
        // Uncovered tag: surfaces as its own pseudo-category
        event(
            "comp-rangequal-1",
            "Range Qualification Board",
            at(thursday, 13, 0),
            90,
            ExtendedProps {
                event_type: Some("RANGE_QUALIFICATION".into()),
                squad: Some("Battalion 2".into()),
                location: Some("Range C".into()),
                ..ExtendedProps::default()
            },
        ),
    ];

    EventSources {
        base,
        nutrition: Vec::new(),
        category,
        comprehensive,
    }
}

fn macros(consumed: f64, target: f64, unit: &str) -> MacroTotals {
    MacroTotals {
        consumed,
        target,
        unit: unit.into(),
    }
}

/// Build a one-week sample nutrition plan
pub fn build_sample_nutrition_plan() -> NutritionPlan {
    let summary = DaySummary {
        calories: Some(macros(0.0, 2800.0, "kcal")),
        protein: Some(macros(0.0, 160.0, "g")),
        carbs: Some(macros(0.0, 330.0, "g")),
        fat: Some(macros(0.0, 90.0, "g")),
    };

    let mut week = BTreeMap::new();

    week.insert(
        "monday".to_string(),
        NutritionDay {
            summary: summary.clone(),
            schedule: vec![
                ScheduleItem::Activity {
                    title: "Ruck March".into(),
                    start_time: Some("06:30".into()),
                    end_time: Some("08:00".into()),
                    details: Some("12kg load, hydrate before start".into()),
                },
                ScheduleItem::Meal {
                    title: "Breakfast".into(),
                    time: Some("08:15".into()),
                    nutrition: Some(MealNutrition {
                        calories: 450.0,
                        protein: 30.0,
                        carbs: 55.0,
                        fat: 12.0,
                    }),
                },
                ScheduleItem::Meal {
                    title: "Lunch".into(),
                    time: Some("12:30".into()),
                    nutrition: Some(MealNutrition {
                        calories: 700.0,
                        protein: 45.0,
                        carbs: 80.0,
                        fat: 20.0,
                    }),
                },
                ScheduleItem::Note {
                    title: "Electrolytes after the march".into(),
                    time: Some("08:05".into()),
                    details: Some("One sachet in 500ml".into()),
                },
            ],
        },
    );

    week.insert(
        "tuesday".to_string(),
        NutritionDay {
            summary,
            schedule: vec![
                ScheduleItem::Meal {
                    title: "Breakfast".into(),
                    time: Some("07:30".into()),
                    nutrition: Some(MealNutrition {
                        calories: 400.0,
                        protein: 28.0,
                        carbs: 50.0,
                        fat: 10.0,
                    }),
                },
                ScheduleItem::Meal {
                    title: "Post Workout Shake".into(),
                    time: Some("10:00".into()),
                    nutrition: Some(MealNutrition {
                        calories: 250.0,
                        protein: 35.0,
                        carbs: 20.0,
                        fat: 4.0,
                    }),
                },
            ],
        },
    );

    NutritionPlan { week: Some(week) }
}
