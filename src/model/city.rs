use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::model::url;

/// Raw city payload as served by the REST API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Canonical city record. `color` is a CSS-style display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl City {
    /// Normalizes a raw payload. The id is derived from the URL field when
    /// present, falling back to a payload-provided id. Returns `None` when no
    /// id can be derived at all.
    #[must_use]
    pub fn parse(raw: RawCity) -> Option<Self> {
        let id = match raw.url.as_deref() {
            Some(url) => url::city_id_from_url(url).or(raw.id),
            None => raw.id,
        }?;
        Some(Self {
            id,
            name: raw.name,
            color: raw.color,
        })
    }

    /// Canonical city page URL on the main site.
    #[must_use]
    pub fn site_url(&self) -> String {
        format!("{}{}", url::CITIES_URL_PREFIX, self.id)
    }

    fn sort_key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Insertion-ordered city directory keyed by city id.
///
/// The directory is the renderer's color/lookup provider. A failed lookup is
/// an explicit `UnknownCity` error rather than a silent absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityDirectory {
    entries: IndexMap<String, City>,
    active: Option<String>,
}

impl CityDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from raw payloads, skipping records with no
    /// derivable id.
    #[must_use]
    pub fn from_raw(raws: Vec<RawCity>) -> Self {
        let mut directory = Self::new();
        for raw in raws {
            if let Some(city) = City::parse(raw) {
                directory.upsert(city);
            }
        }
        directory
    }

    /// Inserts a city, merging populated fields over an existing entry with
    /// the same id. Entries stay sorted by display name.
    pub fn upsert(&mut self, city: City) {
        match self.entries.get_mut(&city.id) {
            Some(existing) => {
                if city.name.is_some() {
                    existing.name = city.name;
                }
                if city.color.is_some() {
                    existing.color = city.color;
                }
            }
            None => {
                self.entries.insert(city.id.clone(), city);
            }
        }
        self.entries
            .sort_by(|_, a, _, b| a.sort_key().cmp(b.sort_key()));
    }

    pub fn lookup(&self, id: &str) -> ChartResult<&City> {
        self.entries
            .get(id)
            .ok_or_else(|| ChartError::UnknownCity(id.to_owned()))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&City> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.entries.values()
    }

    /// Marks a city as active. Returns `false` when the id is unknown, in
    /// which case the previous active city is kept.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.entries.contains_key(id) {
            return false;
        }
        self.active = Some(id.to_owned());
        true
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn active(&self) -> Option<&City> {
        self.active.as_deref().and_then(|id| self.entries.get(id))
    }
}
