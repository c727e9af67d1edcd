use crate::models::{CommunicationStyle, ExperienceLevel};

/// Points awarded when neither level is known or the pair is not in the table
pub const DEFAULT_EXPERIENCE_POINTS: u8 = 10;

/// Skill categories that earn partial credit for one another.
///
/// A category missing from this table is related only to itself.
pub const RELATED_CATEGORIES: &[(&str, &[&str])] = &[
    ("Backend Development", &["Backend Development", "Full Stack Development"]),
    ("Frontend Development", &["Frontend Development", "Full Stack Development"]),
    ("Leadership", &["Leadership", "Team Management", "Project Management"]),
];

/// Style pairs that work together without being identical. Symmetric.
pub const COMPATIBLE_STYLES: &[(CommunicationStyle, CommunicationStyle)] = &[
    (CommunicationStyle::Direct, CommunicationStyle::Structured),
    (CommunicationStyle::Supportive, CommunicationStyle::Flexible),
];

/// Experience points (out of 20) for a mentee being mentored by a mentor.
///
/// Asymmetric: mentoring from one level up scores highest.
pub fn experience_points(mentee: ExperienceLevel, mentor: ExperienceLevel) -> u8 {
    use ExperienceLevel::*;

    match (mentee, mentor) {
        (Junior, Mid) => 20,
        (Junior, Senior) => 15,
        (Junior, Executive) => 10,
        (Junior, Junior) => 10,

        (Mid, Senior) => 20,
        (Mid, Executive) => 15,
        (Mid, Junior) => 15,
        (Mid, Mid) => 10,

        (Senior, Executive) => 20,
        (Senior, Mid) => 20,
        (Senior, Junior) => 15,
        (Senior, Senior) => 10,

        (Executive, Senior) => 20,
        (Executive, Mid) => 15,
        (Executive, Junior) => 10,
        (Executive, Executive) => 10,
    }
}

/// Whether a mentor skill in `category` earns partial credit for a goal in
/// `goal_category`
pub fn is_related_category(goal_category: &str, category: &str) -> bool {
    match RELATED_CATEGORIES.iter().find(|(key, _)| *key == goal_category) {
        Some((_, related)) => related.iter().any(|c| *c == category),
        None => goal_category == category,
    }
}

#[inline]
pub fn styles_compatible(a: CommunicationStyle, b: CommunicationStyle) -> bool {
    COMPATIBLE_STYLES
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}
