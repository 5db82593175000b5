use std::time::Duration;

use growth_engine::{ClientSettings, PollSettings, API_URL_ENV, DEFAULT_API_URL};

#[test]
fn defaults_match_backend_conventions() {
    let settings = ClientSettings::default();
    assert_eq!(settings.base_url, "http://localhost:8000/api/v1");
    assert_eq!(settings.request_timeout, None);
    assert_eq!(PollSettings::default().period, Duration::from_secs(3));
}

#[test]
fn environment_overrides_base_url() {
    let settings = ClientSettings::from_lookup(|key| {
        (key == API_URL_ENV).then(|| " https://growth.example.com/api/v1 ".to_string())
    });
    assert_eq!(settings.base_url, "https://growth.example.com/api/v1");
}

#[test]
fn blank_environment_value_keeps_default() {
    let settings = ClientSettings::from_lookup(|_| Some("   ".to_string()));
    assert_eq!(settings.base_url, DEFAULT_API_URL);

    let settings = ClientSettings::from_lookup(|_| None);
    assert_eq!(settings.base_url, DEFAULT_API_URL);
}
