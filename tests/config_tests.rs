//! Tests for configuration loading from the environment and TOML.

mod support;

use campaign_engine::config::ScheduleConfig;

#[test]
fn test_from_env_defaults() {
    support::with_scoped_env(
        &[
            ("CAMPAIGN_TIMEZONE", None),
            ("CAMPAIGN_OPEN_HOUR", None),
            ("CAMPAIGN_CLOSE_HOUR", None),
        ],
        || {
            let config = ScheduleConfig::from_env().unwrap();
            assert_eq!(config, ScheduleConfig::default());
            assert_eq!(config.timezone, chrono_tz::Australia::Sydney);
            assert_eq!(config.open_hour, 6.0);
            assert_eq!(config.close_hour, 20.0);
        },
    );
}

#[test]
fn test_from_env_overrides() {
    support::with_scoped_env(
        &[
            ("CAMPAIGN_TIMEZONE", Some("Australia/Brisbane")),
            ("CAMPAIGN_OPEN_HOUR", Some("7.5")),
            ("CAMPAIGN_CLOSE_HOUR", Some("18")),
        ],
        || {
            let config = ScheduleConfig::from_env().unwrap();
            assert_eq!(config.timezone, chrono_tz::Australia::Brisbane);
            assert_eq!(config.open_hour, 7.5);
            assert_eq!(config.close_hour, 18.0);
        },
    );
}

#[test]
fn test_from_env_rejects_unknown_timezone() {
    support::with_scoped_env(
        &[
            ("CAMPAIGN_TIMEZONE", Some("Australia/Atlantis")),
            ("CAMPAIGN_OPEN_HOUR", None),
            ("CAMPAIGN_CLOSE_HOUR", None),
        ],
        || {
            let result = ScheduleConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("Australia/Atlantis"));
        },
    );
}

#[test]
fn test_from_env_rejects_unparseable_hour() {
    support::with_scoped_env(
        &[
            ("CAMPAIGN_TIMEZONE", None),
            ("CAMPAIGN_OPEN_HOUR", Some("early")),
            ("CAMPAIGN_CLOSE_HOUR", None),
        ],
        || {
            let result = ScheduleConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("CAMPAIGN_OPEN_HOUR"));
        },
    );
}

#[test]
fn test_from_env_rejects_inverted_hours() {
    support::with_scoped_env(
        &[
            ("CAMPAIGN_TIMEZONE", None),
            ("CAMPAIGN_OPEN_HOUR", Some("20")),
            ("CAMPAIGN_CLOSE_HOUR", Some("6")),
        ],
        || {
            assert!(ScheduleConfig::from_env().is_err());
        },
    );
}

#[test]
fn test_from_toml_full_and_partial() {
    let config = ScheduleConfig::from_toml_str(
        r#"
            timezone = "Australia/Perth"
            open_hour = 8.0
            close_hour = 17.0
        "#,
    )
    .unwrap();
    assert_eq!(config.timezone, chrono_tz::Australia::Perth);
    assert_eq!(config.open_hour, 8.0);
    assert_eq!(config.close_hour, 17.0);

    // Missing keys fall back to the defaults.
    let partial = ScheduleConfig::from_toml_str("open_hour = 7.0").unwrap();
    assert_eq!(partial.timezone, chrono_tz::Australia::Sydney);
    assert_eq!(partial.open_hour, 7.0);
    assert_eq!(partial.close_hour, 20.0);
}

#[test]
fn test_from_toml_rejects_bad_documents() {
    assert!(ScheduleConfig::from_toml_str("open_hour = \"seven\"").is_err());
    assert!(ScheduleConfig::from_toml_str("timezone = \"Mars/Olympus\"").is_err());
    assert!(ScheduleConfig::from_toml_str("open_hour = 19\nclose_hour = 7").is_err());
}
