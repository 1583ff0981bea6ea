//! Resolution of partial council date labels and grouping of scraped entries.

use chrono::{DateTime, Datelike, Month, NaiveDate, Utc};
use chrono_tz::{Pacific, Tz};

use crate::model::{CollectionDay, CollectionEntry};
use crate::ports::ScheduleError;

/// Zone the council's date labels are relative to. The reference instant is
/// always evaluated here, not in the host's local zone, to avoid off-by-one
/// days around midnight.
const COLLECTION_ZONE: Tz = Pacific::Auckland;

/// Full weekday names as the labels print them.
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Resolve a council date label such as `"Tuesday, 12 January"` into a
/// concrete calendar date.
///
/// The label carries no year. A January label seen while the reference month
/// (in Pacific/Auckland) is December resolves into the following year; every
/// other label resolves into the reference year. No other rollover is
/// attempted, so a label for an already-passed month resolves into the past.
///
/// Labels that do not match the `"<Weekday>, <day> <Month>"` shape, or that
/// name an impossible calendar date, resolve to `None`. The weekday token is
/// validated as a weekday name but not cross-checked against the resolved
/// date; the council page is trusted for that.
#[must_use]
pub fn resolve_date_label(label: &str, reference: DateTime<Utc>) -> Option<NaiveDate> {
    let resolved = split_label(label).and_then(|(day, month)| {
        let reference = reference.with_timezone(&COLLECTION_ZONE);
        let year = if month == 1 && reference.month() == 12 {
            reference.year() + 1
        } else {
            reference.year()
        };
        NaiveDate::from_ymd_opt(year, month, day)
    });

    if resolved.is_none() {
        tracing::debug!(label, "date label did not resolve to a calendar date");
    }
    resolved
}

/// Pull day-of-month and month number out of a `"<Weekday>, <day> <Month>"`
/// label.
///
/// The name tokens must be the full English names and the day bare digits;
/// chrono's own parsers would also accept abbreviations and signed numbers,
/// which the labels never contain.
fn split_label(label: &str) -> Option<(u32, u32)> {
    let (weekday, remainder) = label.split_once(", ")?;
    if !WEEKDAY_NAMES.contains(&weekday) {
        return None;
    }

    let (day, month) = remainder.split_once(' ')?;
    if !day.chars().all(|character| character.is_ascii_digit()) {
        return None;
    }
    let day = day.parse::<u32>().ok()?;

    Some((day, month_number(month)?))
}

/// Month number for a full month name; abbreviated names are rejected.
fn month_number(name: &str) -> Option<u32> {
    let month = name.parse::<Month>().ok()?;
    if month.name() != name {
        return None;
    }
    Some(month.number_from_month())
}

/// Group scraped entries by their exact date label and order the groups
/// ascending by resolved date.
///
/// Grouping is by string equality: two differently worded labels that resolve
/// to the same calendar day stay separate, exactly as they appear on the
/// council page. The sort is stable, so groups with equal resolved dates keep
/// their first-appearance order.
///
/// # Errors
///
/// Returns [`ScheduleError::NoEntries`] for an empty entry list, and
/// [`ScheduleError::DateLabel`] when any label fails to resolve; an
/// unorderable schedule fails the whole update instead of being exposed.
pub fn group_collection_days(
    entries: Vec<CollectionEntry>,
    reference: DateTime<Utc>,
) -> Result<Vec<CollectionDay>, ScheduleError> {
    if entries.is_empty() {
        return Err(ScheduleError::NoEntries);
    }

    let mut days: Vec<CollectionDay> = Vec::new();
    for entry in entries {
        match days
            .iter_mut()
            .find(|day| day.date_label == entry.date_label)
        {
            Some(day) => day.collection_types.push(entry.collection_type),
            None => days.push(CollectionDay {
                date_label: entry.date_label,
                collection_types: vec![entry.collection_type],
            }),
        }
    }

    let mut keyed = Vec::with_capacity(days.len());
    for day in days {
        let resolved = resolve_date_label(&day.date_label, reference)
            .ok_or_else(|| ScheduleError::DateLabel(day.date_label.clone()))?;
        keyed.push((resolved, day));
    }
    keyed.sort_by_key(|(resolved, _day)| *resolved);

    Ok(keyed.into_iter().map(|(_resolved, day)| day).collect())
}
