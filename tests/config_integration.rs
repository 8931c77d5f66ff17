use std::path::PathBuf;
use std::time::Duration;

use tex::config::{
    ConfigFlags, SaveMode, Settings, clear_config_flags, load_config_flags, parse_flag_tokens,
    save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".texrc");
    let content = r#"
# comment
--tab-stop 4

--save-mode atomic

--log-file=tex.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.tab_stop, Some(4));
    assert_eq!(flags.save_mode, Some(SaveMode::Atomic));
    assert_eq!(flags.log_file, Some(PathBuf::from("tex.log")));
    assert_eq!(flags.quit_times, None);
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".texrc");
    std::fs::write(&path, "--tab-stop 4\n--quit-times 1\n--log-file file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "tex".to_string(),
        "--tab-stop".to_string(),
        "2".to_string(),
        "notes.txt".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.tab_stop, Some(2), "cli should override tab stop");
    assert_eq!(effective.quit_times, Some(1), "file flags should remain");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_skips_bad_values() {
    let args = vec![
        "--tab-stop=wide".to_string(),
        "--save-mode=sideways".to_string(),
        "--message-timeout=9".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.tab_stop, None);
    assert_eq!(flags.save_mode, None);
    assert_eq!(flags.message_timeout, Some(9));
}

#[test]
fn test_save_then_load_round_trip_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        tab_stop: Some(3),
        quit_times: Some(0),
        message_timeout: Some(2),
        save_mode: Some(SaveMode::Atomic),
        log_file: None,
    };

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
    assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    // clearing twice is fine
    clear_config_flags(&path).unwrap();
}

#[test]
fn test_settings_from_merged_flags() {
    let global = ConfigFlags {
        tab_stop: Some(100),
        message_timeout: Some(1),
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        quit_times: Some(5),
        ..ConfigFlags::default()
    };
    let settings = Settings::from_flags(&global.union(&local));
    assert_eq!(settings.tab_stop, tex::config::MAX_TAB_STOP);
    assert_eq!(settings.quit_times, 5);
    assert_eq!(settings.message_timeout, Duration::from_secs(1));
    assert_eq!(settings.save_mode, SaveMode::InPlace);
}
