//! URL derivation helpers shared by the record parsers.
//!
//! All helpers return `None` when the expected delimiter or segment is
//! missing. Callers treat that as an absent derived field, never an error.

/// Path prefix of every city page on the main site.
pub const CITIES_URL_PREFIX: &str = "http://humantalks.com/cities/";

/// Base URL of the user profile site.
pub const USERS_URL_PREFIX: &str = "http://news.humancoders.com/users/";

/// Derives a city id by stripping the known city path prefix.
#[must_use]
pub fn city_id_from_url(url: &str) -> Option<String> {
    let id = url.strip_prefix(CITIES_URL_PREFIX)?;
    let id = id.trim_end_matches('/');
    if id.is_empty() {
        return None;
    }
    Some(id.to_owned())
}

/// Extracts the city segment between `/cities/` and `/events` in an event URL.
#[must_use]
pub fn city_from_event_url(url: &str) -> Option<String> {
    let rest = url.split_once("/cities/")?.1;
    let city = rest.split_once("/events")?.0;
    if city.is_empty() {
        return None;
    }
    Some(city.to_owned())
}

/// Extracts the trailing numeric event id after `/events/`.
#[must_use]
pub fn event_id_from_url(url: &str) -> Option<u64> {
    let rest = url.rsplit_once("/events/")?.1;
    rest.trim_end_matches('/').parse().ok()
}

fn trailing_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => trimmed,
    }
}

/// Derives a numeric id from the portion of the trailing `id-slug` path
/// segment before the first hyphen.
#[must_use]
pub fn id_from_url(url: &str) -> Option<u64> {
    let segment = trailing_segment(url);
    let id = segment.split_once('-')?.0;
    id.parse().ok()
}

/// Derives a slug from the portion of the trailing path segment after the
/// first hyphen. A segment without a hyphen is returned whole.
#[must_use]
pub fn slug_from_url(url: &str) -> Option<String> {
    let segment = trailing_segment(url);
    if segment.is_empty() {
        return None;
    }
    match segment.split_once('-') {
        Some((_, slug)) => Some(slug.to_owned()),
        None => Some(segment.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        city_from_event_url, city_id_from_url, event_id_from_url, id_from_url, slug_from_url,
    };

    #[test]
    fn city_id_strips_known_prefix_only() {
        assert_eq!(
            city_id_from_url("http://humantalks.com/cities/paris").as_deref(),
            Some("paris")
        );
        assert_eq!(city_id_from_url("http://elsewhere.org/cities/paris"), None);
        assert_eq!(city_id_from_url("http://humantalks.com/cities/"), None);
    }

    #[test]
    fn event_url_yields_city_and_numeric_id() {
        let url = "http://humantalks.com/cities/lyon/events/42";
        assert_eq!(city_from_event_url(url).as_deref(), Some("lyon"));
        assert_eq!(event_id_from_url(url), Some(42));
    }

    #[test]
    fn event_url_without_events_segment_yields_none() {
        let url = "http://humantalks.com/cities/lyon";
        assert_eq!(city_from_event_url(url), None);
        assert_eq!(event_id_from_url(url), None);
    }

    #[test]
    fn id_and_slug_split_on_first_hyphen() {
        let url = "http://news.humancoders.com/users/17-jane-doe";
        assert_eq!(id_from_url(url), Some(17));
        assert_eq!(slug_from_url(url).as_deref(), Some("jane-doe"));
    }

    #[test]
    fn segment_without_hyphen_keeps_slug_but_no_id() {
        let url = "http://news.humancoders.com/users/jane";
        assert_eq!(id_from_url(url), None);
        assert_eq!(slug_from_url(url).as_deref(), Some("jane"));
    }
}
