//! Category taxonomy mapping fine-grained event tags to display categories.
//!
//! The filter sidebar works in terms of the seven coarse categories, while
//! events carry fine-grained tags like `TRAINING_SESSION`. This module owns
//! the single mapping between the two and exposes both directions:
//! `unify_categories` (tags -> display names, for the available-options list)
//! and `expand_categories` (display names -> tags, for filtering). Tags not
//! covered by the map pass through verbatim as their own pseudo-category.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Display categories in presentation order, each with its member tags
const CATEGORY_TAGS: [(&str, &[&str]); 7] = [
    (
        "Physical",
        &[
            "PHYSICAL_TRAINING",
            "STRENGTH_TEST",
            "ENDURANCE_TEST",
            "MOBILITY_SCREEN",
        ],
    ),
    (
        "Medical",
        &[
            "MEDICAL_CHECKUP",
            "MEDICAL_REHAB",
            "VACCINATION",
            "INJURY_FOLLOWUP",
        ],
    ),
    (
        "Nutrition",
        &["NUTRITION", "MEAL_PLAN_REVIEW", "HYDRATION_CHECK"],
    ),
    (
        "Psychological",
        &["PSYCH_EVAL", "COUNSELING", "STRESS_DEBRIEF"],
    ),
    ("Sleep", &["SLEEP_STUDY", "SLEEP_LOG_REVIEW"]),
    (
        "Appointments",
        &["APPOINTMENT", "BRIEFING", "ADMIN_REVIEW"],
    ),
    (
        "Training",
        &["TRAINING_SESSION", "FIELD_EXERCISE", "DRILL", "RANGE_DAY"],
    ),
];

/// Reverse lookup from fine-grained tag to its display category
static TAG_TO_CATEGORY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (category, tags) in CATEGORY_TAGS {
        for tag in tags {
            map.insert(*tag, category);
        }
    }
    map
});

/// Display category covering the given fine-grained tag, if any
pub fn category_for_tag(tag: &str) -> Option<&'static str> {
    TAG_TO_CATEGORY.get(tag).copied()
}

/// True if the name is one of the seven known display categories
pub fn is_known_category(name: &str) -> bool {
    CATEGORY_TAGS.iter().any(|(category, _)| *category == name)
}

/// Collapse available fine-grained tags into display categories.
///
/// A known category is included only when at least one of its member tags
/// is available. Tags covered by no category are appended verbatim (sorted)
/// so they still surface as selectable pseudo-categories.
pub fn unify_categories(available: &HashSet<String>) -> Vec<String> {
    let mut unified = Vec::new();

    for (category, tags) in CATEGORY_TAGS {
        if tags.iter().any(|tag| available.contains(*tag)) {
            unified.push(category.to_string());
        }
    }

    let mut passthrough: Vec<&String> = available
        .iter()
        .filter(|tag| !TAG_TO_CATEGORY.contains_key(tag.as_str()))
        .collect();
    passthrough.sort();
    unified.extend(passthrough.into_iter().cloned());

    unified
}

/// Expand selected display names back to the fine-grained tag set.
///
/// Known categories expand to all their member tags; anything else is a
/// passthrough raw tag and is added literally.
pub fn expand_categories(selected: &[String]) -> HashSet<String> {
    let mut tags = HashSet::new();

    for name in selected {
        match CATEGORY_TAGS
            .iter()
            .find(|(category, _)| category == name)
        {
            Some((_, members)) => {
                tags.extend(members.iter().map(|tag| tag.to_string()));
            }
            None => {
                tags.insert(name.clone());
            }
        }
    }

    tags
}
