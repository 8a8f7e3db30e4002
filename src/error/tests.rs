//! Unit tests for error handling

use super::*;
use crate::lineup::LineupField;
use crate::Slot;
use std::io;

#[cfg(test)]
mod ffl_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let ffl_error = FflError::from(json_error);

        match ffl_error {
            FflError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ffl_error = FflError::from(io_error);

        match ffl_error {
            FflError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let db_error = rusqlite::Error::InvalidColumnType(
            0,
            "test_column".to_string(),
            rusqlite::types::Type::Null,
        );
        let ffl_error = FflError::from(db_error);

        match ffl_error {
            FflError::Database(_) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_timestamp_error_conversion() {
        let parse_error = "not a date"
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_err();
        let ffl_error = FflError::from(parse_error);

        match ffl_error {
            FflError::InvalidTimestamp(_) => (),
            _ => panic!("Expected InvalidTimestamp error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<u32>().unwrap_err();
        let ffl_error = FflError::from(parse_error);

        match ffl_error {
            FflError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_not_found_error() {
        let error = FflError::not_found("Week", 7);
        assert_eq!(error.to_string(), "Week not found: 7");
    }

    #[test]
    fn test_week_locked_error() {
        let error = FflError::WeekLocked { week: 2 };
        let error_string = error.to_string();
        assert!(error_string.contains("Week 2 is locked"));
    }

    #[test]
    fn test_invalid_lineup_error_joins_messages() {
        let error = FflError::InvalidLineup(vec![
            ValidationError::new(LineupField::Slot(Slot::Qb), "QB slot must have a QB."),
            ValidationError::new(LineupField::Lineup, "Invalid week number."),
        ]);

        assert_eq!(
            error.to_string(),
            "Lineup rejected: QB slot must have a QB.; Invalid week number."
        );
    }

    #[test]
    fn test_upstream_error() {
        let error = FflError::Upstream {
            source_name: "Sleeper",
            message: "503 Service Unavailable".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Sleeper stats unavailable"));
        assert!(error_string.contains("503"));
    }

    #[test]
    fn test_invalid_position_error() {
        let error = FflError::InvalidPosition {
            position: "LB".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Invalid position"));
        assert!(error_string.contains("LB"));
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ffl_error = FflError::from(io_error);

        let error_trait: &dyn std::error::Error = &ffl_error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(FflError::Timeout { seconds: 10 })
        }

        match test_function().unwrap_err() {
            FflError::Timeout { seconds } => assert_eq!(seconds, 10),
            _ => panic!("Expected Timeout error"),
        }
    }
}
