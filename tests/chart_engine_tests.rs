use attendance_chart::api::{ChartConfig, LinesChart, RenderOutcome};
use attendance_chart::error::ChartError;
use attendance_chart::model::{City, CityDirectory, Event, UserId};
use attendance_chart::render::NullRenderer;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn event(city: &str, id: u64, on: NaiveDate, attendees: usize) -> Event {
    Event {
        id,
        city: city.to_owned(),
        date: on,
        title: None,
        attendee_ids: (0..attendees as u64).map(UserId::Id).collect(),
    }
}

fn directory(entries: &[(&str, &str)]) -> CityDirectory {
    let mut cities = CityDirectory::new();
    for (id, color) in entries {
        cities.upsert(City {
            id: (*id).to_owned(),
            name: None,
            color: Some((*color).to_owned()),
        });
    }
    cities
}

#[test]
fn render_without_data_is_a_no_op() {
    let mut chart =
        LinesChart::new(NullRenderer::default(), ChartConfig::new(2020)).expect("chart init");
    let outcome = chart.render().expect("render");
    assert_eq!(outcome, RenderOutcome::Skipped);
    assert!(chart.scene().is_empty());
    assert_eq!(chart.renderer().last_circle_count, 0);
}

#[test]
fn engine_smoke_flow() {
    let mut chart =
        LinesChart::new(NullRenderer::default(), ChartConfig::new(2020)).expect("chart init");
    chart.set_data(
        vec![
            event("paris", 1, date(2020, 3, 5), 3),
            event("paris", 2, date(2020, 4, 2), 2),
            event("lyon", 1, date(2020, 3, 12), 4),
        ],
        directory(&[("paris", "#ff0000"), ("lyon", "#00aa55")]),
    );

    let outcome = chart.render().expect("render");
    assert!(matches!(outcome, RenderOutcome::Rendered(_)));
    assert_eq!(chart.renderer().last_path_count, 2);
    assert_eq!(chart.renderer().last_circle_count, 3);
    assert!(chart.renderer().last_line_count > 2);
    assert!(chart.renderer().last_text_count > 2);

    // A dot resolves under its own center, empty space does not.
    let (_, circle, point, _) = chart.scene().dots().next().expect("a dot exists");
    let (cx, cy) = (circle.cx, circle.cy);
    let city = point.city.clone();
    let hit = chart.hit_test(cx + 1.0, cy - 1.0).expect("near-center hit");
    assert_eq!(hit.city, city);
    assert!(chart.hit_test(cx + 50.0, cy).is_none());
}

#[test]
fn unknown_city_reference_fails_the_render() {
    let mut chart =
        LinesChart::new(NullRenderer::default(), ChartConfig::new(2020)).expect("chart init");
    chart.set_data(
        vec![event("nantes", 1, date(2020, 3, 5), 3)],
        directory(&[("paris", "#ff0000")]),
    );

    let err = chart.render().expect_err("nantes is unknown");
    assert!(matches!(err, ChartError::UnknownCity(city) if city == "nantes"));
}

#[test]
fn clearing_data_returns_the_engine_to_skipping() {
    let mut chart =
        LinesChart::new(NullRenderer::default(), ChartConfig::new(2020)).expect("chart init");
    chart.set_data(
        vec![event("paris", 1, date(2020, 3, 5), 3)],
        directory(&[("paris", "#ff0000")]),
    );
    chart.render().expect("render");

    chart.clear_data();
    let outcome = chart.render().expect("render after clear");
    assert_eq!(outcome, RenderOutcome::Skipped);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = ChartConfig::new(2020).with_tooltip_hide_delay_ms(500).with_dot_radius_bounds(2.0, 5.0);
    let err = LinesChart::new(NullRenderer::default(), config).expect_err("bounds are inverted");
    assert!(format!("{err}").contains("dot radius"));
}
