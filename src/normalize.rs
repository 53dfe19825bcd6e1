use chrono::{Datelike, Local};

/// Turns a recipe title into its public URL slug, e.g. "Steak Dinner" -> "steak-dinner".
///
/// Each space becomes a hyphen; runs of spaces are kept as-is, so "A  B"
/// yields "a--b". Other characters pass through untouched.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Splits a comma-separated tag field into trimmed tokens.
///
/// Order is preserved and so are empty tokens between consecutive commas.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Renders the current local date as a display string, e.g. "September 12, 2020".
pub fn format_date_now() -> String {
    let today = Local::now();
    format_display_date(today.month(), today.day(), today.year())
}

fn format_display_date(month: u32, day: u32, year: i32) -> String {
    let month_name = MONTHS[(month as usize - 1) % 12];
    format!("{} {}, {}", month_name, day, year)
}
