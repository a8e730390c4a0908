//! Publication date display and ordering.
//!
//! Publication dates are stored as free text and only interpreted when read.
//! Three shapes are recognised: a bare year (`2024`), a year and month
//! (`2024-03`) and a full ISO date with optional time
//! (`2024-03-15`, `2024-03-15T10:00:00Z`). Anything else is passed through
//! for display and sorts last.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ResearchItem;
use crate::utils::text::matches_search;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").unwrap());
static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T ].*)?$").unwrap());

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Number of publications shown in the "recent" views
pub const RECENT_PUBLICATIONS: usize = 5;

/// Recognised shape of a raw publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShape {
    Year(i32),
    YearMonth(i32, u32),
    Iso(i32, u32),
    Unknown,
}

fn shape(raw: &str) -> DateShape {
    let raw = raw.trim();
    if let Some(caps) = YEAR.captures(raw) {
        return DateShape::Year(caps[1].parse().unwrap_or_default());
    }
    if let Some(caps) = YEAR_MONTH.captures(raw) {
        return DateShape::YearMonth(
            caps[1].parse().unwrap_or_default(),
            caps[2].parse().unwrap_or_default(),
        );
    }
    if let Some(caps) = ISO_DATE.captures(raw) {
        return DateShape::Iso(
            caps[1].parse().unwrap_or_default(),
            caps[2].parse().unwrap_or_default(),
        );
    }
    DateShape::Unknown
}

fn month_year(raw: &str, year: i32, month: u32) -> String {
    match month.checked_sub(1).and_then(|i| MONTHS.get(i as usize)) {
        Some(name) => format!("{} {}", name, year),
        None => raw.to_string(),
    }
}

/// Format a raw publication date for display.
///
/// # Examples
///
/// ```
/// use spaceweather_portal::utils::format_publication_date;
///
/// assert_eq!(format_publication_date("2024"), "2024");
/// assert_eq!(format_publication_date("2024-03"), "March 2024");
/// assert_eq!(format_publication_date("2024-03-15T00:00:00Z"), "March 2024");
/// assert_eq!(format_publication_date("garbage"), "garbage");
/// ```
pub fn format_publication_date(raw: &str) -> String {
    match shape(raw) {
        DateShape::Year(_) | DateShape::Unknown => raw.to_string(),
        DateShape::YearMonth(year, month) | DateShape::Iso(year, month) => {
            month_year(raw, year, month)
        }
    }
}

/// Sortable timestamp (Unix milliseconds, UTC) for a raw publication date.
///
/// Unparseable values map to 0. Dates before 1970 are negative, so ordering
/// helpers in this module rank by [`publication_instant_key`] instead.
pub fn publication_sort_key(raw: &str) -> i64 {
    publication_instant_key(raw).unwrap_or(0)
}

/// Unix milliseconds of a raw publication date, `None` when unparseable.
///
/// `None` orders below every real date, including ones before 1970.
pub fn publication_instant_key(raw: &str) -> Option<i64> {
    parse_instant(raw).map(|instant| instant.timestamp_millis())
}

/// Calendar year of a raw publication date, if it can be determined
pub fn publication_year(raw: &str) -> Option<i32> {
    match shape(raw) {
        DateShape::Year(year) | DateShape::YearMonth(year, _) | DateShape::Iso(year, _) => {
            Some(year)
        }
        DateShape::Unknown => parse_generic(raw.trim()).map(|instant| instant.year()),
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    match shape(trimmed) {
        DateShape::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1).map(midnight),
        DateShape::YearMonth(year, month) => NaiveDate::from_ymd_opt(year, month, 1)
            .map(midnight)
            .or_else(|| parse_generic(trimmed)),
        DateShape::Iso(..) => parse_iso(trimmed).or_else(|| parse_generic(trimmed)),
        DateShape::Unknown => parse_generic(trimmed),
    }
}

fn parse_iso(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(midnight)
}

fn parse_generic(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(midnight(date));
        }
    }
    // "March 2024"
    NaiveDate::parse_from_str(&format!("1 {}", raw), "%d %B %Y")
        .ok()
        .map(midnight)
}

fn item_sort_key(item: &ResearchItem) -> Option<i64> {
    item.date.as_deref().and_then(publication_instant_key)
}

fn item_matches(item: &ResearchItem, search: &str) -> bool {
    matches_search(
        [
            Some(item.title.as_str()),
            item.authors.as_deref(),
            item.description.as_deref(),
        ],
        search,
    )
}

/// Order publications newest first. Ties keep their original order.
pub fn sort_by_recency(items: &mut [ResearchItem]) {
    items.sort_by_key(|item| std::cmp::Reverse(item_sort_key(item)));
}

/// The `limit` most recent publications, with a text search applied on top
/// of the recency cut.
pub fn recent_publications(
    mut items: Vec<ResearchItem>,
    search: Option<&str>,
    limit: usize,
) -> Vec<ResearchItem> {
    sort_by_recency(&mut items);
    items
        .into_iter()
        .take(limit)
        .filter(|item| search.map_or(true, |s| item_matches(item, s)))
        .collect()
}

/// All publications newest first, filtered by text search and year
pub fn filter_publications(
    mut items: Vec<ResearchItem>,
    search: Option<&str>,
    year: Option<i32>,
) -> Vec<ResearchItem> {
    sort_by_recency(&mut items);
    items
        .into_iter()
        .filter(|item| search.map_or(true, |s| item_matches(item, s)))
        .filter(|item| match year {
            Some(year) => item.date.as_deref().and_then(publication_year) == Some(year),
            None => true,
        })
        .collect()
}

/// Distinct publication years, newest first
pub fn available_years(items: &[ResearchItem]) -> Vec<i32> {
    let mut years: Vec<i32> = items
        .iter()
        .filter_map(|item| item.date.as_deref())
        .filter_map(publication_year)
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResearchKind;
    use uuid::Uuid;

    fn publication(title: &str, date: &str) -> ResearchItem {
        ResearchItem {
            id: Uuid::new_v4(),
            kind: ResearchKind::Publication,
            title: title.to_string(),
            description: None,
            category: None,
            image: None,
            authors: None,
            date: Some(date.to_string()),
            link: None,
        }
    }

    #[test]
    fn test_format_shapes() {
        assert_eq!(format_publication_date("2024"), "2024");
        assert_eq!(format_publication_date("2024-03"), "March 2024");
        assert_eq!(format_publication_date("2024-01"), "January 2024");
        assert_eq!(format_publication_date("2023-12-31"), "December 2023");
        assert_eq!(format_publication_date("2024-03-15T00:00:00Z"), "March 2024");
        assert_eq!(format_publication_date("garbage"), "garbage");
        assert_eq!(format_publication_date(""), "");
    }

    #[test]
    fn test_format_out_of_range_month_passes_through() {
        assert_eq!(format_publication_date("2024-13"), "2024-13");
        assert_eq!(format_publication_date("2024-00-10"), "2024-00-10");
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(
            publication_sort_key("2024"),
            midnight(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).timestamp_millis()
        );
        assert_eq!(
            publication_sort_key("2023-11"),
            midnight(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()).timestamp_millis()
        );
        assert_eq!(
            publication_sort_key("2024-06-01"),
            midnight(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).timestamp_millis()
        );
        assert_eq!(publication_sort_key("not-a-date"), 0);
    }

    #[test]
    fn test_sort_key_keeps_time_of_day() {
        let morning = publication_sort_key("2024-06-01T08:00:00Z");
        let evening = publication_sort_key("2024-06-01T20:00:00Z");
        assert!(evening > morning);
        assert_eq!(publication_sort_key("2024-06-01T08:00:00"), morning);
    }

    #[test]
    fn test_generic_fallback() {
        let expected = midnight(NaiveDate::from_ymd_opt(2021, 3, 20).unwrap()).timestamp_millis();
        assert_eq!(publication_sort_key("2021/03/20"), expected);
        assert_eq!(publication_sort_key("March 20, 2021"), expected);
        assert_eq!(
            publication_sort_key("March 2021"),
            midnight(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()).timestamp_millis()
        );
    }

    #[test]
    fn test_descending_order() {
        let mut items = vec![
            publication("a", "2024"),
            publication("b", "2023-11"),
            publication("c", "2024-06-01"),
            publication("d", "not-a-date"),
            publication("e", "2022"),
        ];
        sort_by_recency(&mut items);
        let dates: Vec<&str> = items.iter().map(|i| i.date.as_deref().unwrap()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024", "2023-11", "2022", "not-a-date"]);
    }

    #[test]
    fn test_recent_applies_search_after_cut() {
        let items = vec![
            publication("Solar flares", "2024"),
            publication("Ionosphere", "2023"),
            publication("Geomagnetic storms", "2022"),
            publication("Lunar craters", "2021"),
            publication("Solar wind", "2020"),
            publication("Solar cycle", "2019"),
        ];

        let recent = recent_publications(items.clone(), None, RECENT_PUBLICATIONS);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].title, "Solar flares");

        // "Solar cycle" is sixth most recent, so the search cannot reach it
        let searched = recent_publications(items, Some("solar"), RECENT_PUBLICATIONS);
        let titles: Vec<&str> = searched.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Solar flares", "Solar wind"]);
    }

    #[test]
    fn test_filter_by_year() {
        let items = vec![
            publication("a", "2024-03"),
            publication("b", "2023-11-14"),
            publication("c", "2024"),
            publication("d", "unknown"),
        ];
        let in_2024 = filter_publications(items.clone(), None, Some(2024));
        let titles: Vec<&str> = in_2024.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);

        assert_eq!(available_years(&items), vec![2024, 2023]);
    }

    #[test]
    fn test_unparseable_sorts_after_pre_epoch_dates() {
        let mut items = vec![
            publication("garbage", "not-a-date"),
            publication("sixty-five", "1965"),
            publication("moon", "1969-07"),
        ];
        sort_by_recency(&mut items);
        let titles: Vec<&str> = items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["moon", "sixty-five", "garbage"]);

        assert!(publication_sort_key("1965") < 0);
        assert_eq!(publication_instant_key("not-a-date"), None);
        assert!(publication_instant_key("1965") > publication_instant_key("not-a-date"));

        let recent = recent_publications(items.clone(), None, 2);
        assert_eq!(recent[1].title, "sixty-five");
    }

    #[test]
    fn test_missing_date_sorts_last() {
        let mut undated = publication("undated", "");
        undated.date = None;
        let mut items = vec![undated, publication("dated", "1999")];
        sort_by_recency(&mut items);
        assert_eq!(items[0].title, "dated");
    }
}
