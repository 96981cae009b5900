//! Cron install service against mock sessions.

#![allow(clippy::expect_used)]

use dazops_cli::application::services::cron_install::{CronOutcome, install_daily_report};
use dazops_cli::domain::cron::{DAILY_REPORT_LINE, DAILY_REPORT_MARKER};

use crate::mocks::{QuietReporter, ScriptedSession, err_output, ok_output};

#[tokio::test]
async fn test_fresh_host_installs_entry() {
    let session = ScriptedSession::new(vec![
        ("crontab -l", err_output(b"no crontab for root")),
        ("crontab -", ok_output(b"")),
    ]);

    let outcome = install_daily_report(&session, &QuietReporter)
        .await
        .expect("install");
    assert_eq!(outcome, CronOutcome::Installed);

    let log = session.log();
    let write = log
        .iter()
        .find(|l| l.starts_with("stdin: crontab -"))
        .expect("crontab written");
    assert!(write.contains(DAILY_REPORT_LINE), "got: {write}");
}

#[tokio::test]
async fn test_second_run_leaves_crontab_untouched() {
    let existing = format!("{DAILY_REPORT_LINE}\n");
    let session = ScriptedSession::new(vec![(
        "crontab -l",
        ok_output(existing.as_bytes()),
    )]);

    let outcome = install_daily_report(&session, &QuietReporter)
        .await
        .expect("install");
    assert_eq!(outcome, CronOutcome::AlreadyInstalled);
    assert!(
        !session.log().iter().any(|l| l.starts_with("stdin:")),
        "no write when nothing changed"
    );
}

#[tokio::test]
async fn test_stale_schedule_is_replaced() {
    let stale = "15 4 * * * /usr/bin/python3 /opt/mcp-api/scripts/daily_daznode_report.py\n";
    let session = ScriptedSession::new(vec![
        ("crontab -l", ok_output(stale.as_bytes())),
        ("crontab -", ok_output(b"")),
    ]);

    let outcome = install_daily_report(&session, &QuietReporter)
        .await
        .expect("install");
    assert_eq!(outcome, CronOutcome::Updated);

    let log = session.log();
    let write = log
        .iter()
        .find(|l| l.starts_with("stdin: crontab -"))
        .expect("crontab written");
    assert_eq!(
        write.matches(DAILY_REPORT_MARKER).count(),
        1,
        "exactly one entry after replace: {write}"
    );
}

#[tokio::test]
async fn test_unrelated_entries_survive() {
    let existing = "0 3 * * * /usr/bin/certbot renew\n";
    let session = ScriptedSession::new(vec![
        ("crontab -l", ok_output(existing.as_bytes())),
        ("crontab -", ok_output(b"")),
    ]);

    install_daily_report(&session, &QuietReporter)
        .await
        .expect("install");

    let log = session.log();
    let write = log.iter().find(|l| l.starts_with("stdin:")).expect("write");
    assert!(write.contains("certbot renew"), "got: {write}");
}

#[tokio::test]
async fn test_crontab_read_failure_is_an_error() {
    let session = ScriptedSession::new(vec![(
        "crontab -l",
        err_output(b"crontab: permission denied"),
    )]);

    let err = install_daily_report(&session, &QuietReporter)
        .await
        .expect_err("must fail")
        .to_string();
    assert!(err.contains("crontab -l"), "got: {err}");
}
