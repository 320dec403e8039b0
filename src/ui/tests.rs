//! Tests for the terminal user interface

#[cfg(test)]
mod tests {
    use super::super::cli::{parse_action, MenuAction};
    use super::super::*;
    use crate::episodes::Episode;

    #[test]
    fn test_args_parsing() {
        use clap::CommandFactory;
        let app = Args::command();
        app.debug_assert();
    }

    #[test]
    fn test_format_timestamp_decomposition() {
        assert_eq!(format_timestamp(0), "00:00:00");
        assert_eq!(format_timestamp(65), "00:01:05");
        assert_eq!(format_timestamp(3661), "01:01:01");
    }

    #[test]
    fn test_format_timestamp_keeps_hour_field_below_one_hour() {
        assert_eq!(format_timestamp(207), "00:03:27");
        assert_eq!(format_timestamp(3599), "00:59:59");
    }

    #[test]
    fn test_format_timestamp_does_not_truncate_long_durations() {
        assert_eq!(format_timestamp(360000), "100:00:00");
    }

    #[test]
    fn test_parse_action_single_episode() {
        assert_eq!(parse_action("2\n", 3).unwrap(), MenuAction::PlaySingle(1));
    }

    #[test]
    fn test_parse_action_play_all_from_index() {
        assert_eq!(parse_action("a 3\n", 3).unwrap(), MenuAction::PlayAllFrom(2));
    }

    #[test]
    fn test_parse_action_clear_and_quit() {
        assert_eq!(parse_action("c\n", 3).unwrap(), MenuAction::ClearQueue);
        assert_eq!(parse_action("q\n", 3).unwrap(), MenuAction::Quit);
        assert_eq!(parse_action("quit\n", 3).unwrap(), MenuAction::Quit);
    }

    #[test]
    fn test_parse_action_rejects_out_of_range_selection() {
        assert!(parse_action("0\n", 3).is_err());
        assert!(parse_action("4\n", 3).is_err());
        assert!(parse_action("a 4\n", 3).is_err());
    }

    #[test]
    fn test_parse_action_rejects_garbage() {
        assert!(parse_action("play the second one\n", 3).is_err());
        assert!(parse_action("\n", 3).is_err());
    }

    #[test]
    fn test_display_episodes() {
        let cli = Cli {
            args: Args {
                library: None,
                seek_step: None,
                config: None,
            },
        };

        let episodes = vec![
            Episode {
                id: "ep-001".to_string(),
                title: "A Conversation That Goes On For Quite A While Indeed".to_string(),
                members: "Ana Souza, Diego Lima".to_string(),
                thumbnail: "https://example.com/ep-001.jpg".to_string(),
                description: Some("Long one.".to_string()),
                duration: 3127,
                url: "https://example.com/ep-001.mp3".to_string(),
            },
            Episode {
                id: "ep-002".to_string(),
                title: "Short One".to_string(),
                members: "Ana Souza".to_string(),
                thumbnail: "https://example.com/ep-002.jpg".to_string(),
                description: None,
                duration: 95,
                url: "https://example.com/ep-002.mp3".to_string(),
            },
        ];

        cli.display_episodes(&episodes);
    }
}
