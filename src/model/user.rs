use serde::{Deserialize, Serialize};

use crate::model::event::{Event, UserId};
use crate::model::talk::Talk;
use crate::model::url;

/// Nested event reference inside a raw user payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserEvent {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Raw user payload as served by the REST API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub event: Option<RawUserEvent>,
}

/// Canonical user record.
///
/// `attended_event_ids` and `talk_ids` are derived sets recomputed from the
/// event log and talk list, not parsed from payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub event_id: Option<u64>,
    pub attended_event_ids: Vec<u64>,
    pub talk_ids: Vec<u64>,
}

impl User {
    /// Normalizes a raw payload. A URL yields a numeric id plus slug; a
    /// payload with only a name uses the name itself as identity.
    #[must_use]
    pub fn parse(raw: RawUser) -> Self {
        let event_id = raw.event.and_then(|event| event.id);
        let (id, slug) = match raw.url.as_deref() {
            Some(u) => (url::id_from_url(u).map(UserId::Id), url::slug_from_url(u)),
            None => (raw.name.clone().map(UserId::Name), None),
        };
        Self {
            id,
            slug,
            name: raw.name,
            event_id,
            attended_event_ids: Vec::new(),
            talk_ids: Vec::new(),
        }
    }

    /// Recomputes the events this user attended by scanning every event's
    /// attendee list. Quadratic over the data set, which stays tiny.
    pub fn set_attendance(&mut self, events: &[Event]) {
        self.attended_event_ids.clear();
        let Some(id) = &self.id else {
            return;
        };
        for event in events {
            if event.attendee_ids.contains(id) {
                self.attended_event_ids.push(event.id);
            }
        }
    }

    /// Recomputes the talks this user authored by matching the numeric author
    /// id. Users identified only by name never match.
    pub fn set_talks(&mut self, talks: &[Talk]) {
        self.talk_ids.clear();
        let Some(UserId::Id(id)) = self.id else {
            return;
        };
        for talk in talks {
            if talk.author_id == Some(id) {
                if let Some(talk_id) = talk.id {
                    self.talk_ids.push(talk_id);
                }
            }
        }
    }

    /// Canonical profile URL, available when both numeric id and slug are
    /// known.
    #[must_use]
    pub fn site_url(&self) -> Option<String> {
        let UserId::Id(id) = self.id.as_ref()? else {
            return None;
        };
        let slug = self.slug.as_deref()?;
        Some(format!("{}{}-{}", url::USERS_URL_PREFIX, id, slug))
    }
}

/// Owned user list with batch recomputation helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRoster {
    users: Vec<User>,
}

impl UserRoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_raw(raws: Vec<RawUser>) -> Self {
        let mut users: Vec<User> = raws.into_iter().map(User::parse).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Self { users }
    }

    pub fn set_attendance(&mut self, events: &[Event]) {
        for user in &mut self.users {
            user.set_attendance(events);
        }
    }

    pub fn set_talks(&mut self, talks: &[Talk]) {
        for user in &mut self.users {
            user.set_talks(talks);
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
