//! Canonical records normalized from raw REST payloads.
//!
//! Each record type owns its normalization rules (URL-derived ids, localized
//! dates, flattened nested objects). Parsing is best effort: a malformed field
//! degrades to `None` instead of failing the whole payload.

pub mod city;
pub mod dates;
pub mod event;
pub mod talk;
pub mod user;
pub mod url;

pub use city::{City, CityDirectory, RawCity};
pub use event::{Event, EventLog, RawEvent, UserId};
pub use talk::{RawTalk, Talk};
pub use user::{RawUser, User, UserRoster};
