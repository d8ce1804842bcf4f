//! Portuguese (pt-PT) date formatting for rendered pages.
//!
//! Stored timestamps are UTC; pages show them in Lisbon time.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Europe::Lisbon;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long date used on blog cards and articles: `3 de novembro, 2025`.
pub fn long_date(at: &DateTime<Utc>) -> String {
    let at = at.with_timezone(&Lisbon);
    let month = MONTHS[at.month0() as usize];
    format!("{} de {}, {}", at.day(), month, at.year())
}

/// Timestamp used in the admin panel: `03/11/2025, 14:05:09`.
pub fn short_timestamp(at: &DateTime<Utc>) -> String {
    let at = at.with_timezone(&Lisbon);
    format!(
        "{:02}/{:02}/{}, {:02}:{:02}:{:02}",
        at.day(),
        at.month(),
        at.year(),
        at.hour(),
        at.minute(),
        at.second()
    )
}
