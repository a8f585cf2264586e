// tests/usgs_source.rs
use quake_alert_monitor::source::usgs::UsgsQuakeSource;
use quake_alert_monitor::{AlertLevel, FeedConfig, RemoteFeatureSource};

const FIXTURE: &str = include_str!("fixtures/usgs_quakes.json");

#[tokio::test]
async fn fixture_query_filters_level_and_min_magnitude() {
    let src = UsgsQuakeSource::from_fixture(FIXTURE);
    let q = FeedConfig::default().query_for(AlertLevel::Red);

    let out = src.query(&q).await.unwrap();

    // Six fixture events: three red above the 1.0 magnitude floor, one red
    // below it, one orange, one green.
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|f| f.magnitude >= 1.0));

    // Pre-sorted by descending magnitude, as the remote orderby would be.
    assert_eq!(out[0].id.as_str(), "official19600522191120_30");
    assert_eq!(out[0].magnitude, 9.5);
    assert_eq!(out[1].id.as_str(), "us6000hxyz");
    assert_eq!(out[2].id.as_str(), "us7000abcd");
}

#[tokio::test]
async fn fixture_parses_attributes_and_geometry() {
    let src = UsgsQuakeSource::from_fixture(FIXTURE);
    let q = FeedConfig::default().query_for(AlertLevel::Orange);

    let out = src.query(&q).await.unwrap();
    assert_eq!(out.len(), 1);

    let f = &out[0];
    assert_eq!(f.title, "M 6.6 - central Turkey");
    assert_eq!(f.time_ms, 1699800000000);
    assert_eq!(f.geometry.longitude, 37.0);
    assert_eq!(f.geometry.latitude, 38.4);
    assert_eq!(f.geometry.depth_km, 7.0);
}

#[tokio::test]
async fn malformed_body_is_an_error_not_a_panic() {
    let src = UsgsQuakeSource::from_fixture("<html>rate limited</html>");
    let q = FeedConfig::default().query_for(AlertLevel::Green);

    let err = src.query(&q).await.unwrap_err();
    assert!(err.to_string().contains("usgs geojson"));
}
