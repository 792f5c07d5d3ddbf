//! Lookup helpers for rendering repositories: language colors, relative age
//! labels and client-side page windows.

use chrono::{DateTime, Utc};
use std::fmt;

pub const DEFAULT_LANGUAGE_COLOR: &str = "#8b949e";
pub const DEFAULT_PAGE_SIZE: usize = 30;

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#F18E33"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Shell", "#89e051"),
    ("Vue", "#41b883"),
];

/// Hex color for a language, keyed by GitHub's exact spelling.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|name| {
            LANGUAGE_COLORS
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Coarse age bucket of an instant, counted in whole elapsed days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    Today,
    Yesterday,
    Days(i64),
    Weeks(i64),
    Months(i64),
    Years(i64),
}

impl RelativeAge {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => RelativeAge::Today,
            1 => RelativeAge::Yesterday,
            d if d < 7 => RelativeAge::Days(d),
            d if d < 30 => RelativeAge::Weeks(d / 7),
            d if d < 365 => RelativeAge::Months(d / 30),
            d => RelativeAge::Years(d / 365),
        }
    }
}

impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match *self {
            RelativeAge::Today => return f.write_str("today"),
            RelativeAge::Yesterday => return f.write_str("yesterday"),
            RelativeAge::Days(n) => (n, "day"),
            RelativeAge::Weeks(n) => (n, "week"),
            RelativeAge::Months(n) => (n, "month"),
            RelativeAge::Years(n) => (n, "year"),
        };
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "{} {}{} ago", n, unit, plural)
    }
}

/// Instants in the future count as today.
pub fn relative_age(instant: DateTime<Utc>, now: DateTime<Utc>) -> RelativeAge {
    RelativeAge::from_days((now - instant).num_days())
}

pub fn relative_age_now(instant: DateTime<Utc>) -> RelativeAge {
    relative_age(instant, Utc::now())
}

/// One client-side page of an already queried result.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> PageWindow<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Window `page` (1-based) out of `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> PageWindow<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.max(1);

    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());

    PageWindow {
        items: &items[start..end],
        page,
        per_page,
        total_items: items.len(),
        total_pages,
    }
}
