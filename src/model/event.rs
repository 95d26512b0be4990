use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{dates, url};

/// Identity of an attendee or user.
///
/// Numeric when derived from a profile URL; payloads without a URL fall back
/// to the raw display name as identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Id(u64),
    Name(String),
}

/// Raw event payload as served by the REST API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "attendeeIds", default)]
    pub attendee_ids: Vec<UserId>,
}

/// Canonical event record. `id` is unique within a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub city: String,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub attendee_ids: Vec<UserId>,
}

impl Event {
    /// Normalizes a raw payload. The city and numeric id are derived from the
    /// URL field when present, falling back to payload-provided values. The
    /// localized date string is converted to a calendar date. Returns `None`
    /// when city, id, or date cannot be derived.
    #[must_use]
    pub fn parse(raw: RawEvent) -> Option<Self> {
        let (city, id) = match raw.url.as_deref() {
            Some(u) => (
                url::city_from_event_url(u).or(raw.city),
                url::event_id_from_url(u).or(raw.id),
            ),
            None => (raw.city, raw.id),
        };
        let date = raw.date.as_deref().and_then(dates::parse_event_date)?;
        Some(Self {
            id: id?,
            city: city?,
            date,
            title: raw.title,
            attendee_ids: raw.attendee_ids,
        })
    }

    /// Attendance count derived from the attendee id list.
    #[must_use]
    pub fn attendees(&self) -> usize {
        self.attendee_ids.len()
    }

    /// Canonical event page URL on the main site.
    #[must_use]
    pub fn site_url(&self) -> String {
        format!("{}{}/events/{}", url::CITIES_URL_PREFIX, self.city, self.id)
    }

    /// Mirror URL of the event on meetup.com.
    #[must_use]
    pub fn meetup_url(&self) -> String {
        format!("http://www.meetup.com/{}/events/{}/", self.city, self.id)
    }
}

/// Owned event list with merge-on-insert semantics, kept sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from raw payloads, skipping records that do not normalize
    /// to a complete event.
    #[must_use]
    pub fn from_raw(raws: Vec<RawEvent>) -> Self {
        let mut log = Self::new();
        for raw in raws {
            if let Some(event) = Event::parse(raw) {
                log.upsert(event);
            }
        }
        log
    }

    /// Inserts an event, replacing an existing record with the same city and
    /// id.
    pub fn upsert(&mut self, event: Event) {
        match self
            .events
            .iter_mut()
            .find(|e| e.city == event.city && e.id == event.id)
        {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
        self.events.sort_by_key(|e| e.id);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events belonging to one city, in log order.
    #[must_use]
    pub fn for_city(&self, city: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.city == city).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventLog, RawEvent, UserId};
    use chrono::NaiveDate;

    fn raw_event(url: &str, date: &str, attendees: &[u64]) -> RawEvent {
        RawEvent {
            url: Some(url.to_owned()),
            date: Some(date.to_owned()),
            attendee_ids: attendees.iter().map(|id| UserId::Id(*id)).collect(),
            ..RawEvent::default()
        }
    }

    #[test]
    fn parse_derives_city_id_and_date_from_url() {
        let event = Event::parse(raw_event(
            "http://humantalks.com/cities/paris/events/12",
            "2020-03-05",
            &[1, 2, 3],
        ))
        .expect("event should parse");

        assert_eq!(event.city, "paris");
        assert_eq!(event.id, 12);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2020, 3, 5).unwrap());
        assert_eq!(event.attendees(), 3);
        assert_eq!(
            event.site_url(),
            "http://humantalks.com/cities/paris/events/12"
        );
        assert_eq!(event.meetup_url(), "http://www.meetup.com/paris/events/12/");
    }

    #[test]
    fn parse_without_date_yields_none() {
        let mut raw = raw_event("http://humantalks.com/cities/paris/events/12", "", &[]);
        raw.date = None;
        assert!(Event::parse(raw).is_none());
    }

    #[test]
    fn upsert_replaces_same_city_and_id() {
        let mut log = EventLog::new();
        log.upsert(
            Event::parse(raw_event(
                "http://humantalks.com/cities/paris/events/12",
                "2020-03-05",
                &[1],
            ))
            .unwrap(),
        );
        log.upsert(
            Event::parse(raw_event(
                "http://humantalks.com/cities/paris/events/12",
                "2020-03-05",
                &[1, 2],
            ))
            .unwrap(),
        );

        assert_eq!(log.len(), 1);
        assert_eq!(log.as_slice()[0].attendees(), 2);
    }

    #[test]
    fn same_id_in_two_cities_stays_distinct() {
        let mut log = EventLog::new();
        log.upsert(
            Event::parse(raw_event(
                "http://humantalks.com/cities/paris/events/1",
                "2020-03-05",
                &[1],
            ))
            .unwrap(),
        );
        log.upsert(
            Event::parse(raw_event(
                "http://humantalks.com/cities/lyon/events/1",
                "2020-04-02",
                &[2],
            ))
            .unwrap(),
        );

        assert_eq!(log.len(), 2);
        assert_eq!(log.for_city("lyon").len(), 1);
    }
}
