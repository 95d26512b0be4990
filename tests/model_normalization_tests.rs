use attendance_chart::model::{
    City, CityDirectory, Event, EventLog, RawCity, RawEvent, RawTalk, RawUser, Talk, User, UserId,
    UserRoster,
};
use chrono::NaiveDate;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn city_payload_normalizes_url_into_id() {
    let raw: RawCity = serde_json::from_value(json!({
        "url": "http://humantalks.com/cities/paris",
        "name": "Paris",
        "color": "#ff0000",
    }))
    .expect("raw city deserializes");

    let city = City::parse(raw).expect("city parses");
    assert_eq!(city.id, "paris");
    assert_eq!(city.name.as_deref(), Some("Paris"));
    assert_eq!(city.color.as_deref(), Some("#ff0000"));
}

#[test]
fn event_payload_normalizes_url_date_and_attendees() {
    let raw: RawEvent = serde_json::from_value(json!({
        "url": "http://humantalks.com/cities/paris/events/42",
        "date": "2020-03-05",
        "attendeeIds": [1, 2, "Jane"],
    }))
    .expect("raw event deserializes");

    let event = Event::parse(raw).expect("event parses");
    assert_eq!(event.city, "paris");
    assert_eq!(event.id, 42);
    assert_eq!(event.date, date(2020, 3, 5));
    assert_eq!(event.attendees(), 3);
    assert_eq!(event.attendee_ids[2], UserId::Name("Jane".to_owned()));
}

#[test]
fn event_payload_accepts_localized_french_dates() {
    let raw: RawEvent = serde_json::from_value(json!({
        "url": "http://humantalks.com/cities/lyon/events/7",
        "date": "mardi 10 septembre 2013",
    }))
    .expect("raw event deserializes");

    let event = Event::parse(raw).expect("event parses");
    assert_eq!(event.date, date(2013, 9, 10));
    assert_eq!(event.attendees(), 0);
}

#[test]
fn malformed_event_url_degrades_to_no_record() {
    let raw: RawEvent = serde_json::from_value(json!({
        "url": "http://humantalks.com/about",
        "date": "2020-03-05",
    }))
    .expect("raw event deserializes");

    assert!(Event::parse(raw).is_none());
}

#[test]
fn talk_payload_flattens_nested_event_and_author() {
    let raw: RawTalk = serde_json::from_value(json!({
        "url": "http://humantalks.com/talks/88-ownership-in-practice",
        "title": "Ownership in practice",
        "event": { "id": 42, "city": "paris" },
        "author": { "url": "http://news.humancoders.com/users/17-jane-doe" },
    }))
    .expect("raw talk deserializes");

    let talk = Talk::parse(raw);
    assert_eq!(talk.id, Some(88));
    assert_eq!(talk.slug.as_deref(), Some("ownership-in-practice"));
    assert_eq!(talk.event_id, Some(42));
    assert_eq!(talk.city.as_deref(), Some("paris"));
    assert_eq!(talk.author_id, Some(17));
}

#[test]
fn user_attendance_is_recomputed_from_the_event_log() {
    let log = EventLog::from_raw(vec![
        serde_json::from_value(json!({
            "url": "http://humantalks.com/cities/paris/events/1",
            "date": "2020-03-05",
            "attendeeIds": [17, 21],
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "url": "http://humantalks.com/cities/paris/events/2",
            "date": "2020-04-02",
            "attendeeIds": [21],
        }))
        .unwrap(),
    ]);

    let mut user = User::parse(
        serde_json::from_value(json!({
            "url": "http://news.humancoders.com/users/17-jane-doe",
            "name": "Jane Doe",
        }))
        .unwrap(),
    );
    user.set_attendance(log.as_slice());
    assert_eq!(user.attended_event_ids, vec![1]);

    // Recomputation replaces, never accumulates.
    user.set_attendance(log.as_slice());
    assert_eq!(user.attended_event_ids, vec![1]);
}

#[test]
fn name_identified_users_match_attendance_by_name() {
    let log = EventLog::from_raw(vec![
        serde_json::from_value(json!({
            "url": "http://humantalks.com/cities/paris/events/1",
            "date": "2020-03-05",
            "attendeeIds": ["Jane"],
        }))
        .unwrap(),
    ]);

    let mut roster = UserRoster::from_raw(vec![
        serde_json::from_value::<RawUser>(json!({ "name": "Jane" })).unwrap(),
    ]);
    roster.set_attendance(log.as_slice());
    assert_eq!(roster.as_slice()[0].attended_event_ids, vec![1]);
}

#[test]
fn user_talks_match_on_numeric_author_id_only() {
    let talks = vec![
        Talk::parse(
            serde_json::from_value(json!({
                "url": "http://humantalks.com/talks/88-ownership-in-practice",
                "author": { "url": "http://news.humancoders.com/users/17-jane-doe" },
            }))
            .unwrap(),
        ),
        Talk::parse(
            serde_json::from_value(json!({
                "url": "http://humantalks.com/talks/89-lifetimes",
                "author": { "name": "Jane" },
            }))
            .unwrap(),
        ),
    ];

    let mut by_url = User::parse(
        serde_json::from_value(json!({
            "url": "http://news.humancoders.com/users/17-jane-doe",
        }))
        .unwrap(),
    );
    by_url.set_talks(&talks);
    assert_eq!(by_url.talk_ids, vec![88]);

    let mut by_name =
        User::parse(serde_json::from_value::<RawUser>(json!({ "name": "Jane" })).unwrap());
    by_name.set_talks(&talks);
    assert!(by_name.talk_ids.is_empty());
}

#[test]
fn directory_lookup_reports_unknown_cities() {
    let directory = CityDirectory::from_raw(vec![
        serde_json::from_value(json!({
            "url": "http://humantalks.com/cities/paris",
            "color": "#ff0000",
        }))
        .unwrap(),
    ]);

    assert!(directory.lookup("paris").is_ok());
    let err = directory.lookup("lyon").expect_err("lyon is unknown");
    assert!(format!("{err}").contains("lyon"));
}
