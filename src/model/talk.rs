use serde::{Deserialize, Serialize};

use crate::model::url;

/// Nested event reference inside a raw talk payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTalkEvent {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Nested author reference inside a raw talk payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Raw talk payload as served by the REST API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTalk {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub event: Option<RawTalkEvent>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
}

/// Canonical talk record with nested payload objects flattened away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub id: Option<u64>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub event_id: Option<u64>,
    pub city: Option<String>,
    pub author_id: Option<u64>,
    pub author_name: Option<String>,
}

impl Talk {
    /// Normalizes a raw payload. Talks keep every derived field optional; a
    /// payload with no usable URL still produces a record.
    #[must_use]
    pub fn parse(raw: RawTalk) -> Self {
        let (id, slug) = match raw.url.as_deref() {
            Some(u) => (url::id_from_url(u), url::slug_from_url(u)),
            None => (None, None),
        };
        let (event_id, city) = match raw.event {
            Some(event) => (event.id, event.city),
            None => (None, None),
        };
        let (author_id, author_name) = match raw.author {
            Some(author) => match author.url.as_deref() {
                Some(u) => (url::id_from_url(u), None),
                None => (None, author.name),
            },
            None => (None, None),
        };
        Self {
            id,
            slug,
            title: raw.title,
            event_id,
            city,
            author_id,
            author_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawAuthor, RawTalk, RawTalkEvent, Talk};

    #[test]
    fn parse_flattens_event_and_author() {
        let talk = Talk::parse(RawTalk {
            url: Some("http://humantalks.com/talks/88-rust-in-anger".to_owned()),
            title: Some("Rust in anger".to_owned()),
            event: Some(RawTalkEvent {
                id: Some(12),
                city: Some("paris".to_owned()),
            }),
            author: Some(RawAuthor {
                url: Some("http://news.humancoders.com/users/17-jane-doe".to_owned()),
                name: None,
            }),
        });

        assert_eq!(talk.id, Some(88));
        assert_eq!(talk.slug.as_deref(), Some("rust-in-anger"));
        assert_eq!(talk.event_id, Some(12));
        assert_eq!(talk.city.as_deref(), Some("paris"));
        assert_eq!(talk.author_id, Some(17));
        assert_eq!(talk.author_name, None);
    }

    #[test]
    fn author_without_url_keeps_name_only() {
        let talk = Talk::parse(RawTalk {
            author: Some(RawAuthor {
                url: None,
                name: Some("Jane".to_owned()),
            }),
            ..RawTalk::default()
        });

        assert_eq!(talk.author_id, None);
        assert_eq!(talk.author_name.as_deref(), Some("Jane"));
    }
}
