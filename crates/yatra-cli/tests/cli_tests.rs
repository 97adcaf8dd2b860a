use assert_cmd::Command;
use predicates::prelude::*;

/// Helper function to create a Command with --no-color and a clean
/// environment, so no test ever reaches a live backend
fn yatra_cmd() -> Command {
    let mut cmd = Command::cargo_bin("yatra").expect("Failed to find yatra binary");
    for var in [
        "OPENAI_API_KEY",
        "OPENAI_MODEL",
        "OPENAI_BASE_URL",
        "OPENWEATHER_API_KEY",
        "OPENWEATHER_BASE_URL",
        "YATRA_WEATHER_POLICY",
        "YATRA_ITINERARY_SCHEMA",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_emergency_sheet() {
    yatra_cmd()
        .arg("emergency")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Emergency information"))
        .stdout(predicate::str::contains("Ghat Road Security Post"))
        .stdout(predicate::str::contains("9440796344"))
        .stdout(predicate::str::contains("6:00 AM to 9:00 PM"));
}

#[test]
fn test_cli_darshan_lists_everything() {
    yatra_cmd()
        .arg("darshan")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Is there a mandatory dress code"))
        .stdout(predicate::str::contains("## What are the general temple opening"))
        .stdout(predicate::str::contains("Book darshan tickets online"));
}

#[test]
fn test_cli_darshan_query() {
    yatra_cmd()
        .args(["darshan", "id-proof"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What form of ID is required"))
        .stdout(predicate::str::contains("dress code").not());
}

#[test]
fn test_cli_darshan_no_match() {
    yatra_cmd()
        .args(["darshan", "helicopter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching questions found."));
}

#[test]
fn test_cli_weather_placeholder_without_key() {
    yatra_cmd()
        .args(["weather", "Srisailam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Weather in Srisailam"))
        .stdout(predicate::str::contains("- Conditions: Clear"))
        .stdout(predicate::str::contains("- Temperature: 25.0 °C"));
}

#[test]
fn test_cli_weather_strict_policy_fails_without_key() {
    yatra_cmd()
        .args(["--weather-policy", "strict", "weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_weather_policy_from_environment() {
    yatra_cmd()
        .env("YATRA_WEATHER_POLICY", "strict")
        .arg("weather")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENWEATHER_API_KEY"));
}

#[test]
fn test_cli_invalid_weather_policy_in_environment() {
    yatra_cmd()
        .env("YATRA_WEATHER_POLICY", "sometimes")
        .arg("emergency")
        .assert()
        .failure()
        .stderr(predicate::str::contains("YATRA_WEATHER_POLICY"));
}

#[test]
fn test_cli_alerts_fall_back_without_backend() {
    yatra_cmd()
        .arg("alerts")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Safety alert: ⚠ Warning"))
        .stdout(predicate::str::contains(
            "Could not retrieve live data. Please proceed with caution.",
        ))
        .stdout(predicate::str::contains("Ghat road: likely open"));
}

#[test]
fn test_cli_itinerary_requires_backend() {
    yatra_cmd()
        .args([
            "itinerary",
            "--from",
            "Hyderabad",
            "--arrive",
            "2024-11-15T06:30",
            "--group-size",
            "4",
            "--skip-alerts",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate itinerary"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_cli_itinerary_rejects_bad_arrival() {
    yatra_cmd()
        .args(["itinerary", "--from", "Pune", "--arrive", "next tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("arrive_datetime"));
}

#[test]
fn test_cli_itinerary_rejects_unknown_language() {
    yatra_cmd()
        .args([
            "itinerary",
            "--from",
            "Pune",
            "--arrive",
            "2024-05-01T21:30",
            "--language",
            "Telugu",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Telugu"));
}

#[test]
fn test_cli_generate_rejects_bad_json() {
    yatra_cmd()
        .args(["generate", "translate_phrase", "{phrase"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_cli_schema_follows_itinerary_flag() {
    yatra_cmd()
        .args(["--itinerary-schema", "v1", "schema", "itinerary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calendar_events"));

    yatra_cmd()
        .args(["schema", "itinerary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"events\""));
}

#[test]
fn test_cli_schema_unknown_operation() {
    yatra_cmd()
        .args(["schema", "book_hotel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("book_hotel"));
}
