//! Creation-form validation. The presentation layer collects raw strings
//! (modal text inputs); this turns them into a validated gathering or a
//! `Validation` error it can show the user.

use chrono::{DateTime, NaiveDateTime, Utc};

use muster_common::{ChannelId, MusterError, Result};

const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Raw creation inputs, exactly as the user typed them.
#[derive(Debug, Clone)]
pub struct GatheringDraft {
    pub title: String,
    /// `DD.MM.YYYY`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub game: String,
    pub capacity: String,
    /// Duration in minutes, optional.
    pub duration_minutes: Option<String>,
    pub description: String,
    pub link: Option<String>,
    pub channel: ChannelId,
}

/// A validated draft, ready to insert.
#[derive(Debug, Clone)]
pub struct NewGathering {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub game: String,
    pub capacity: u32,
    pub description: String,
    pub link: Option<String>,
    pub channel: ChannelId,
}

impl GatheringDraft {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewGathering> {
        let raw = format!("{} {}", self.date.trim(), self.time.trim());
        let start = NaiveDateTime::parse_from_str(&raw, DATE_TIME_FORMAT)
            .map_err(|_| {
                MusterError::Validation(
                    "invalid date or time, use DD.MM.YYYY and HH:MM".to_string(),
                )
            })?
            .and_utc();

        if start <= now {
            return Err(MusterError::Validation(
                "start is in the past, pick a future time".to_string(),
            ));
        }

        let capacity: u32 = self
            .capacity
            .trim()
            .parse()
            .map_err(|_| MusterError::Validation("capacity must be a number".to_string()))?;
        if capacity == 0 {
            return Err(MusterError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }

        let end = match self.duration_minutes.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let minutes: i64 = raw.parse().map_err(|_| {
                    MusterError::Validation("duration must be a number of minutes".to_string())
                })?;
                if minutes <= 0 {
                    return Err(MusterError::Validation(
                        "duration must be positive".to_string(),
                    ));
                }
                Some(start + chrono::Duration::minutes(minutes))
            }
        };

        Ok(NewGathering {
            title: self.title.trim().to_string(),
            start,
            end,
            game: self.game.trim().to_string(),
            capacity,
            description: self.description.clone(),
            link: self.link.clone().filter(|l| !l.trim().is_empty()),
            channel: self.channel.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> GatheringDraft {
        GatheringDraft {
            title: "Friday Catan".into(),
            date: "24.12.2030".into(),
            time: "19:30".into(),
            game: "Catan".into(),
            capacity: "4".into(),
            duration_minutes: Some("120".into()),
            description: "Bring snacks".into(),
            link: None,
            channel: ChannelId::from("tabletop"),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn valid_draft_parses() {
        let new = draft().validate(now()).unwrap();
        assert_eq!(new.start, Utc.with_ymd_and_hms(2030, 12, 24, 19, 30, 0).unwrap());
        assert_eq!(new.end, Some(new.start + chrono::Duration::minutes(120)));
        assert_eq!(new.capacity, 4);
    }

    #[test]
    fn missing_duration_means_no_end() {
        let mut d = draft();
        d.duration_minutes = None;
        assert!(d.validate(now()).unwrap().end.is_none());

        d.duration_minutes = Some("  ".into());
        assert!(d.validate(now()).unwrap().end.is_none());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut d = draft();
        d.date = "2030-12-24".into();
        assert!(matches!(
            d.validate(now()),
            Err(MusterError::Validation(_))
        ));
    }

    #[test]
    fn past_start_is_rejected() {
        let mut d = draft();
        d.date = "24.12.2020".into();
        assert!(matches!(
            d.validate(now()),
            Err(MusterError::Validation(_))
        ));
    }

    #[test]
    fn non_numeric_capacity_is_rejected() {
        let mut d = draft();
        d.capacity = "four".into();
        assert!(matches!(
            d.validate(now()),
            Err(MusterError::Validation(_))
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut d = draft();
        d.capacity = "0".into();
        assert!(matches!(
            d.validate(now()),
            Err(MusterError::Validation(_))
        ));
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let mut d = draft();
        d.duration_minutes = Some("two hours".into());
        assert!(matches!(
            d.validate(now()),
            Err(MusterError::Validation(_))
        ));
    }
}
