//! FILENAME: tests/test_logging.rs
//! Integration tests for host logging: file sink, categories and config.

mod common;

use common::SalesFixture;
use field_manager::config::{LOG_ECHO_ENV, LOG_PATH_ENV};
use field_manager::{commands, logging, FieldManagerHost, HostConfig, ManagerProps};
use pivot_fields::FieldConfigInput;

#[test]
fn test_host_writes_categorized_lines_to_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field-manager.log");

    std::env::set_var(LOG_PATH_ENV, &path);
    std::env::set_var(LOG_ECHO_ENV, "0");
    let config = HostConfig::from_env();
    assert_eq!(config.log_path.as_deref(), Some(path.as_path()));
    assert!(!config.echo_stdout);
    config.apply().unwrap();

    let mut host = FieldManagerHost::mount(SalesFixture::props());
    commands::remove_field(&mut host, "country").unwrap();
    commands::drag_start(&mut host, "city").unwrap();
    commands::drag_end(&mut host, Some("columns")).unwrap();

    let invalid = ManagerProps::new(["sales"])
        .with_initial_config(vec![FieldConfigInput::new("sales", "values")]);
    FieldManagerHost::mount(invalid);
    logging::close_log_file();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines.iter().all(|l| l.splitn(4, '|').count() == 4));

    assert!(lines.iter().any(|l| l.contains("|D|HOST|ENTER mount")));
    assert!(lines.iter().any(|l| l.ends_with("|I|PIVOT|remove_field field=country")));
    assert!(lines
        .iter()
        .any(|l| l.ends_with("|I|DRAG|drop field=city from=available to=columns")));
    assert!(lines.iter().any(|l| l.contains("|E|HOST|Invalid Pivot Config: Field \"sales\" in \"values\"")));

    let seqs: Vec<u64> = lines
        .iter()
        .map(|l| l.split('|').next().unwrap().parse().unwrap())
        .collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));

    std::env::remove_var(LOG_PATH_ENV);
    std::env::remove_var(LOG_ECHO_ENV);
}

#[test]
fn test_failed_command_is_logged_as_error() {
    let mut host = FieldManagerHost::mount(SalesFixture::props());
    let err = commands::move_field(
        &mut host,
        field_manager::MoveFieldRequest {
            field_id: "ghost".to_string(),
            zone: "rows".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, "Field \"ghost\" not found");
}
