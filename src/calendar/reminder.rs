use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Identifier assigned by the remote store. Backends hand it out either as a
/// JSON string or a number; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReminderId(pub String);

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReminderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ReminderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
            Raw::Float(n) => Self(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireReminder")]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub time: String,
    #[serde(skip)]
    pub notified: bool,
}

/// Reminder as the API sends it. Document stores may send `_id`, `id`, or
/// both; `id` wins when both are present.
#[derive(Deserialize)]
struct WireReminder {
    id: Option<ReminderId>,
    _id: Option<ReminderId>,
    title: String,
    day: u32,
    month: u32,
    year: i32,
    time: String,
}

impl TryFrom<WireReminder> for Reminder {
    type Error = String;

    fn try_from(wire: WireReminder) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire._id)
            .ok_or_else(|| format!("reminder '{}' has no id", wire.title))?;

        Ok(Self {
            id,
            title: wire.title,
            day: wire.day,
            month: wire.month,
            year: wire.year,
            time: wire.time,
            notified: false,
        })
    }
}

impl Reminder {
    /// Text shown inside a calendar cell.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.time)
    }

    pub fn is_on(&self, day: u32, month: u32, year: i32) -> bool {
        self.day == day && self.month == month && self.year == year
    }

    pub fn date_display(&self) -> String {
        format!("{}/{}/{}", self.day, self.month, self.year)
    }

    /// Form fields prefilled from this reminder, used when editing.
    pub fn to_input(&self) -> ReminderInput {
        ReminderInput {
            title: self.title.clone(),
            day: self.day.to_string(),
            month: self.month.to_string(),
            year: self.year.to_string(),
            time: self.time.clone(),
        }
    }
}

/// Raw, unvalidated form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderInput {
    pub title: String,
    pub day: String,
    pub month: String,
    pub year: String,
    pub time: String,
}

impl ReminderInput {
    pub fn for_date(date: NaiveDate) -> Self {
        use chrono::Datelike;

        Self {
            title: String::new(),
            day: date.day().to_string(),
            month: date.month().to_string(),
            year: date.year().to_string(),
            time: String::new(),
        }
    }

    /// Check the fields and turn them into a request body.
    ///
    /// Empty fields are reported together before anything else is checked.
    /// A zero day, month or year counts as empty.
    pub fn validate(&self) -> Result<ReminderDraft, ValidationError> {
        let title = self.title.trim();
        let time = self.time.trim();
        let day = parse_number::<u32>(&self.day);
        let month = parse_number::<u32>(&self.month);
        let year = parse_number::<i32>(&self.year);

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if day == Some(0) || self.day.trim().is_empty() {
            missing.push("day");
        }
        if month == Some(0) || self.month.trim().is_empty() {
            missing.push("month");
        }
        if year == Some(0) || self.year.trim().is_empty() {
            missing.push("year");
        }
        if time.is_empty() {
            missing.push("time");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let (Some(day), Some(month), Some(year)) = (day, month, year) else {
            return Err(ValidationError::InvalidDate(format!(
                "{}/{}/{}",
                self.day.trim(),
                self.month.trim(),
                self.year.trim()
            )));
        };
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(ValidationError::InvalidDate(format!("{day}/{month}/{year}")));
        }

        let time = normalize_time(time).ok_or_else(|| ValidationError::InvalidTime(time.to_string()))?;

        Ok(ReminderDraft {
            title: title.to_string(),
            day,
            month,
            year,
            time,
        })
    }
}

/// A validated reminder as sent to the store on create and replace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderDraft {
    pub title: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub time: String,
}

impl ReminderDraft {
    pub fn summary(&self) -> String {
        format!("{} on {}-{}-{} at {}", self.title, self.day, self.month, self.year, self.time)
    }
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

/// Accepts `H:MM` or `HH:MM` and returns the zero padded `HH:MM` form.
fn normalize_time(s: &str) -> Option<String> {
    let (h, m) = s.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    let time = NaiveTime::parse_from_str(s, "%H:%M").ok()?;
    Some(time.format("%H:%M").to_string())
}
