//! Conference temporal classification.
//!
//! Whether a conference is listed as upcoming or past is always derived from
//! its dates and the current instant. The declared type stored on the record
//! is never consulted here.

use chrono::{DateTime, Utc};

use crate::models::Conference;

/// Computed classification of a conference relative to a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Upcoming,
    Past,
}

/// Which public listing to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    All,
    Upcoming,
    Past,
}

/// Classify a conference against `now`.
///
/// A conference is past when its end date is before `now`, or, when it has
/// no end date, when its start date is before `now`. Both comparisons are
/// strict, so a conference starting exactly at `now` is still upcoming.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use spaceweather_portal::utils::{classify, Classification};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let start = Utc.with_ymd_and_hms(2024, 5, 30, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
///
/// assert_eq!(classify(now, start, Some(end)), Classification::Upcoming);
/// assert_eq!(classify(now, start, None), Classification::Past);
/// ```
pub fn classify(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Classification {
    let finished = match end {
        Some(end) => end < now,
        None => start < now,
    };

    if finished {
        Classification::Past
    } else {
        Classification::Upcoming
    }
}

impl Conference {
    pub fn classification(&self, now: DateTime<Utc>) -> Classification {
        classify(now, self.start_date, self.end_date)
    }
}

/// Build a public listing from a set of conference records.
///
/// Inactive records are always dropped. Upcoming listings are ordered by
/// start date ascending; past and full listings by start date descending.
pub fn select_listing(
    conferences: Vec<Conference>,
    listing: Listing,
    now: DateTime<Utc>,
) -> Vec<Conference> {
    let mut selected: Vec<Conference> = conferences
        .into_iter()
        .filter(|c| c.is_active)
        .filter(|c| match listing {
            Listing::All => true,
            Listing::Upcoming => c.classification(now) == Classification::Upcoming,
            Listing::Past => c.classification(now) == Classification::Past,
        })
        .collect();

    match listing {
        Listing::Upcoming => selected.sort_by(|a, b| a.start_date.cmp(&b.start_date)),
        Listing::Past | Listing::All => selected.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConferenceStatus, DeclaredType};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn conference(title: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Conference {
        Conference {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            start_date: start,
            end_date: end,
            location: None,
            declared_type: DeclaredType::Upcoming,
            status: ConferenceStatus::Upcoming,
            image: String::new(),
            registration_link: String::new(),
            website: String::new(),
            organizers: Vec::new(),
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn titles(conferences: &[Conference]) -> Vec<&str> {
        conferences.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_no_end_date_uses_start() {
        let n = now();
        assert_eq!(classify(n, n - Duration::seconds(1), None), Classification::Past);
        assert_eq!(classify(n, n + Duration::days(3), None), Classification::Upcoming);
    }

    #[test]
    fn test_start_equal_to_now_is_upcoming() {
        let n = now();
        assert_eq!(classify(n, n, None), Classification::Upcoming);
    }

    #[test]
    fn test_end_date_is_authoritative() {
        let n = now();
        // Ongoing multi-day conference
        assert_eq!(
            classify(n, n - Duration::days(2), Some(n + Duration::days(1))),
            Classification::Upcoming
        );
        assert_eq!(
            classify(n, n - Duration::days(5), Some(n - Duration::days(1))),
            Classification::Past
        );
        assert_eq!(classify(n, n - Duration::days(1), Some(n)), Classification::Upcoming);
    }

    #[test]
    fn test_end_date_overrides_future_start() {
        // Inconsistent data: end before start. The end date still decides.
        let n = now();
        assert_eq!(
            classify(n, n + Duration::days(10), Some(n - Duration::days(1))),
            Classification::Past
        );
    }

    #[test]
    fn test_declared_upcoming_but_dates_passed_lists_as_past() {
        let n = now();
        let stale = conference("Stale", n - Duration::days(30), Some(n - Duration::days(28)));
        assert_eq!(stale.declared_type, DeclaredType::Upcoming);

        let past = select_listing(vec![stale.clone()], Listing::Past, n);
        let upcoming = select_listing(vec![stale], Listing::Upcoming, n);
        assert_eq!(titles(&past), vec!["Stale"]);
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_inactive_excluded_from_every_listing() {
        let n = now();
        let mut hidden = conference("Hidden", n + Duration::days(3), None);
        hidden.is_active = false;
        let mut hidden_past = conference("HiddenPast", n - Duration::days(3), None);
        hidden_past.is_active = false;

        let all = vec![hidden, hidden_past];
        assert!(select_listing(all.clone(), Listing::Upcoming, n).is_empty());
        assert!(select_listing(all.clone(), Listing::Past, n).is_empty());
        assert!(select_listing(all, Listing::All, n).is_empty());
    }

    #[test]
    fn test_listing_order() {
        let n = now();
        let records = vec![
            conference("Later", n + Duration::days(40), None),
            conference("Sooner", n + Duration::days(4), None),
            conference("LongAgo", n - Duration::days(400), None),
            conference("Recent", n - Duration::days(4), Some(n - Duration::days(2))),
            conference("Ongoing", n - Duration::days(1), Some(n + Duration::days(1))),
        ];

        let upcoming = select_listing(records.clone(), Listing::Upcoming, n);
        assert_eq!(titles(&upcoming), vec!["Ongoing", "Sooner", "Later"]);

        let past = select_listing(records.clone(), Listing::Past, n);
        assert_eq!(titles(&past), vec!["Recent", "LongAgo"]);

        let all = select_listing(records, Listing::All, n);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].title, "Later");
        assert_eq!(all[4].title, "LongAgo");
    }
}
