//! Data written through one environment is visible after reopening the
//! same data directory.

use nextra_store::{LogStore, UserStore};
use nextra_store_json::{JsonEnvironment, LOGS_FILE};
use nextra_types::{LogEntry, VerifiedUser};

#[test]
fn logs_and_users_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let logs = vec![
        LogEntry::new("Known User", "10/16/2026, 9:00:00 AM")
            .with_gait("95.51%")
            .with_auth("80.02%")
            .with_status("Access Granted"),
        LogEntry::new("Unknown Visitor", "10/16/2026, 9:00:05 AM").with_status("Alert"),
    ];
    let users = vec![
        VerifiedUser::new("Alice", "admin", "/uploads/1760600000000-alice.png").unwrap(),
        VerifiedUser::new("Bob", "guest", "/uploads/1760600000001-bob.png").unwrap(),
    ];

    {
        let env = JsonEnvironment::open(dir.path()).unwrap();
        for log in &logs {
            env.log_store().append_log(log.clone()).unwrap();
        }
        for user in &users {
            env.user_store().add_user(user.clone()).unwrap();
        }
    }

    let reopened = JsonEnvironment::open(dir.path()).unwrap();
    assert_eq!(reopened.log_store().list_logs().unwrap(), logs);
    assert_eq!(reopened.user_store().list_users().unwrap(), users);
}

#[test]
fn reopen_does_not_reset_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(LOGS_FILE),
        r#"[
  {
    "name": "Known User",
    "gait": "81.00%",
    "auth": "99.99%",
    "status": "Access Granted",
    "time": "1/1/2026, 12:00:00 AM"
  }
]"#,
    )
    .unwrap();

    let env = JsonEnvironment::open(dir.path()).unwrap();
    let logs = env.log_store().list_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].auth.as_deref(), Some("99.99%"));
}
