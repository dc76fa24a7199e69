use chrono::NaiveDate;
use league_results_backend::league::validation::{escape_html, sanitize_input, GameValidator, Side, ValidationError};
use league_results_backend::models::game::GameSubmission;

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn submission(game_date: &str, home_score: &str, away_score: &str) -> GameSubmission {
    GameSubmission {
        date: game_date.to_string(),
        home_team_name: "Valur".to_string(),
        away_team_name: "Fram".to_string(),
        home_score: home_score.to_string(),
        away_score: away_score.to_string(),
    }
}

#[test]
fn test_valid_submission_is_normalized() {
    let validator = GameValidator::new();
    let game = validator
        .validate(&submission("2024-05-20", " 3 ", "0"), date("2024-06-01"))
        .expect("submission should be accepted");

    assert_eq!(game.date, date("2024-05-20"));
    assert_eq!(game.iso_date(), "2024-05-20");
    assert_eq!(game.home_team_name, "Valur");
    assert_eq!(game.away_team_name, "Fram");
    assert_eq!(game.home_score, 3);
    assert_eq!(game.away_score, 0);
}

#[test]
fn test_future_date_is_rejected() {
    let validator = GameValidator::new();
    let result = validator.validate(&submission("2099-01-01", "1", "0"), date("2024-06-01"));

    assert!(matches!(result, Err(ValidationError::FutureDate { .. })));
}

#[test]
fn test_date_older_than_two_months_is_rejected() {
    let validator = GameValidator::new();
    let result = validator.validate(&submission("2024-01-01", "1", "0"), date("2024-06-01"));

    assert_eq!(
        result,
        Err(ValidationError::TooOld { date: date("2024-01-01"), earliest: date("2024-04-01") })
    );
}

#[test]
fn test_date_window_boundaries_are_inclusive() {
    let validator = GameValidator::new();
    let today = date("2024-06-01");

    assert!(validator.validate(&submission("2024-06-01", "0", "0"), today).is_ok());
    assert!(validator.validate(&submission("2024-04-01", "0", "0"), today).is_ok());
    assert!(matches!(
        validator.validate(&submission("2024-03-31", "0", "0"), today),
        Err(ValidationError::TooOld { .. })
    ));
    assert!(matches!(
        validator.validate(&submission("2024-06-02", "0", "0"), today),
        Err(ValidationError::FutureDate { .. })
    ));
}

#[test]
fn test_two_months_back_clamps_to_end_of_month() {
    let validator = GameValidator::new();
    let today = date("2024-04-30");

    // 2024-02-30 does not exist, so the window starts on the 29th
    assert!(validator.validate_date_window(date("2024-02-29"), today).is_ok());
    assert!(validator.validate_date_window(date("2024-02-28"), today).is_err());
}

#[test]
fn test_rfc3339_timestamp_uses_calendar_date() {
    let validator = GameValidator::new();
    assert_eq!(validator.parse_date("2024-05-20T18:30:00Z").unwrap(), date("2024-05-20"));
    assert_eq!(validator.parse_date("2024-05-20T18:30:00+00:00").unwrap(), date("2024-05-20"));
}

#[test]
fn test_unparsable_dates_are_rejected() {
    let validator = GameValidator::new();
    let today = date("2024-06-01");

    for raw in ["", "yesterday", "2024-13-01", "2024-02-30", "20/05/2024"] {
        assert!(
            matches!(
                validator.validate(&submission(raw, "1", "1"), today),
                Err(ValidationError::InvalidDate(_))
            ),
            "expected '{}' to be rejected",
            raw
        );
    }
}

#[test]
fn test_invalid_scores_are_rejected() {
    let validator = GameValidator::new();
    let today = date("2024-06-01");

    assert_eq!(
        validator.validate(&submission("2024-05-20", "-1", "0"), today),
        Err(ValidationError::InvalidScore { side: Side::Home, value: "-1".to_string() })
    );
    assert_eq!(
        validator.validate(&submission("2024-05-20", "2", "two"), today),
        Err(ValidationError::InvalidScore { side: Side::Away, value: "two".to_string() })
    );
    assert!(validator.validate(&submission("2024-05-20", "1.5", "0"), today).is_err());
    assert!(validator.validate(&submission("2024-05-20", "", "0"), today).is_err());
}

#[test]
fn test_team_names_are_sanitized() {
    let validator = GameValidator::new();
    let mut game = submission("2024-05-20", "1", "0");
    game.home_team_name = "  <script>alert('x')</script>  ".to_string();

    let validated = validator.validate(&game, date("2024-06-01")).unwrap();
    assert_eq!(
        validated.home_team_name,
        "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
    );
}

#[test]
fn test_empty_team_name_is_rejected() {
    let validator = GameValidator::new();
    let mut game = submission("2024-05-20", "1", "0");
    game.away_team_name = " \0 ".to_string();

    assert_eq!(
        validator.validate(&game, date("2024-06-01")),
        Err(ValidationError::InvalidTeamName(Side::Away))
    );
}

#[test]
fn test_team_cannot_play_itself() {
    let validator = GameValidator::new();
    let mut game = submission("2024-05-20", "1", "0");
    game.away_team_name = "  Valur ".to_string();

    let err = validator.validate(&game, date("2024-06-01")).unwrap_err();
    assert_eq!(err, ValidationError::SameTeam("Valur".to_string()));
    assert!(err.to_string().contains("cannot play against itself"));
}

#[test]
fn test_names_differing_only_in_case_are_different_teams() {
    let validator = GameValidator::new();
    let mut game = submission("2024-05-20", "1", "0");
    game.away_team_name = "valur".to_string();

    assert!(validator.validate(&game, date("2024-06-01")).is_ok());
}

#[test]
fn test_sanitize_helpers() {
    assert_eq!(sanitize_input("  test  "), "test");
    assert_eq!(sanitize_input("test\0name"), "testname");
    assert_eq!(escape_html("Fram & Valur"), "Fram &amp; Valur");
    assert_eq!(escape_html("KR"), "KR");
}

#[test]
fn test_error_messages_explain_rejection() {
    let validator = GameValidator::new();
    let err = validator
        .validate(&submission("2099-01-01", "1", "0"), date("2024-06-01"))
        .unwrap_err();

    assert!(err.to_string().contains("cannot be in the future"));
}
