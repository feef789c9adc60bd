use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use orderwatch::application::SupervisorState;
use orderwatch::error::{ConfigError, Error};
use orderwatch::infrastructure::bootstrap::build_supervisor_with;
use orderwatch::infrastructure::config::settings::Config;
use orderwatch::testkit::sink::RecordingSink;
use orderwatch::testkit::source::ScriptedSource;

fn env() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("BINANCE_API_KEY", "api-key"),
        ("BINANCE_SECRET_KEY", "api-secret"),
        ("TELEGRAM_BOT_TOKEN", "123456:token"),
        ("TELEGRAM_CHAT_ID", "-1001234567890"),
    ])
}

fn load(dir: &TempDir, contents: Option<&str>, env: &HashMap<&str, &str>) -> Result<Config, Error> {
    let path = dir.path().join("config.toml");
    if let Some(contents) = contents {
        fs::write(&path, contents).expect("write temp config");
    }
    Config::load_with_env(&path, |key| env.get(key).map(|v| v.to_string()))
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = load(&dir, None, &env()).unwrap();

    assert_eq!(config.poll.lookback(), Duration::from_secs(45 * 60));
    assert_eq!(config.poll.interval(), Duration::from_secs(1));
    assert_eq!(config.poll.max_consecutive_errors, 3);
    assert_eq!(config.binance.recv_window_ms, 5000);
    assert_eq!(config.binance.api_key.as_deref(), Some("api-key"));
    assert_eq!(config.telegram.chat_id.as_deref(), Some("-1001234567890"));
}

#[test]
fn file_values_are_applied() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let toml = r#"
[binance]
api_url = "https://testnet.example.com"
max_pages = 3

[telegram]
detail_url = "https://example.com/order"

[poll]
lookback_minutes = 90
interval_secs = 10
max_consecutive_errors = 5

[logging]
level = "orderwatch=debug"
format = "json"
"#;
    let config = load(&dir, Some(toml), &env()).unwrap();

    assert_eq!(config.binance.api_url, "https://testnet.example.com");
    assert_eq!(config.binance.max_pages, 3);
    assert_eq!(config.telegram.detail_url, "https://example.com/order");
    assert_eq!(config.poll.lookback_minutes, 90);
    assert_eq!(config.poll.max_consecutive_errors, 5);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn secrets_in_file_are_ignored() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let toml = r#"
[binance]
api_key = "from-file"
"#;
    let mut env = env();
    env.remove("BINANCE_API_KEY");

    let result = load(&dir, Some(toml), &env);
    match result {
        Err(Error::Config(ConfigError::MissingField {
            field: "BINANCE_API_KEY",
        })) => {}
        Err(err) => panic!("Expected missing API key, got {err}"),
        Ok(_) => panic!("Expected missing API key, got Ok"),
    }
}

#[test]
fn invalid_toml_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let result = load(&dir, Some("[poll]\nlookback_minutes = \"soon\"\n"), &env());

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn invalid_log_format_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let result = load(&dir, Some("[logging]\nformat = \"xml\"\n"), &env());

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "logging.format",
            ..
        }))
    ));
}

#[test]
fn invalid_detail_url_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let result = load(&dir, Some("[telegram]\ndetail_url = \"not a url\"\n"), &env());

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "telegram.detail_url",
            ..
        }))
    ));
}

#[tokio::test]
async fn supervisor_wired_from_config_uses_chat_id() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = load(&dir, Some("[poll]\nlookback_minutes = 30\n"), &env()).unwrap();
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();

    let mut supervisor =
        build_supervisor_with(&config, std::sync::Arc::new(source), std::sync::Arc::new(sink.clone()))
            .unwrap();
    supervisor.start().await.unwrap();

    assert_eq!(supervisor.state(), &SupervisorState::Running);
    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].destination, "-1001234567890");
    assert!(messages[0].text.contains("last 30 minutes"));
}
