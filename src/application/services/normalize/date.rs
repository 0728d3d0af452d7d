use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Textual date encodings found in project sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// `31/12/2024`
    DmySlash,
    /// `2024-12-31`
    YmdDash,
}

impl DateFormat {
    fn separator(&self) -> char {
        match self {
            DateFormat::DmySlash => '/',
            DateFormat::YmdDash => '-',
        }
    }
}

/// Parses a calendar date. Out-of-range day or month values roll over the
/// way a lenient calendar does (`30/02/2024` is 2024-03-01); anything that
/// is not three non-zero integers yields `None`.
///
/// Years are taken as written: `31/12/24` is year 24, not 1924 or 2024.
/// Browser `Date` parsing would map years 0..=99 onto 19xx; sheets are
/// expected to carry four-digit years.
pub fn parse_local_date(raw: Option<&str>, format: DateFormat) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parts: Vec<&str> = raw.split(format.separator()).collect();
    if parts.len() != 3 {
        return None;
    }
    let mut nums = [0i32; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        let n: i32 = part.trim().parse().ok()?;
        if n == 0 {
            return None;
        }
        *slot = n;
    }
    let (year, month, day) = match format {
        DateFormat::DmySlash => (nums[2], nums[1], nums[0]),
        DateFormat::YmdDash => (nums[0], nums[1], nums[2]),
    };
    compose_lenient(year, month, day)
}

/// Tries `DmySlash` first, then `YmdDash`.
pub fn parse_any_date(raw: &str) -> Option<NaiveDate> {
    parse_local_date(Some(raw), DateFormat::DmySlash)
        .or_else(|| parse_local_date(Some(raw), DateFormat::YmdDash))
}

fn compose_lenient(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let month_offset = i64::from(month) - 1;
    let month_start = if month_offset >= 0 {
        jan_first.checked_add_months(Months::new(u32::try_from(month_offset).ok()?))?
    } else {
        jan_first.checked_sub_months(Months::new(u32::try_from(-month_offset).ok()?))?
    };
    month_start.checked_add_signed(Duration::days(i64::from(day) - 1))
}
