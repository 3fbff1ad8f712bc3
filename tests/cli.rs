//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_reorg-entitlements");
    Command::new(bin)
        .current_dir(dir)
        .args(args)
        .env_remove("REORG_REPLAY")
        .env_remove("REORG_RECORD")
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("CERT_PATH")
        .env_remove("BASE_URL")
        .output()
        .expect("failed to run reorg-entitlements binary")
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("sync"));
    assert!(stdout.contains("export"));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["reshuffle"]);
    assert!(!output.status.success());
}

#[test]
fn sync_without_configuration_names_every_missing_setting() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("reorg.csv"), "a,b,c,d,e,f,g\n").unwrap();

    let output = run_cli(dir.path(), &["sync"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("missing required configuration"));
    for name in ["CLIENT_ID", "CLIENT_SECRET", "CERT_PATH", "BASE_URL"] {
        assert!(stderr.contains(name), "{name} not reported: {stderr}");
    }
    assert!(!dir.path().join("all_identities.json").exists());
    assert!(dir.path().join("logs").join("reorg.log").exists());
}

#[test]
fn malformed_dotenv_is_reported_as_invalid_configuration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("reorg.csv"), "a,b,c,d,e,f,g\n").unwrap();
    std::fs::write(dir.path().join(".env"), "CLIENT_ID=abc\nthis line is not an assignment\n")
        .unwrap();

    let output = run_cli(dir.path(), &["sync"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid configuration"), "stderr: {stderr}");
    assert!(!stderr.contains("missing required configuration"), "stderr: {stderr}");
}

#[test]
fn export_rebuilds_reports_from_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("all_identities.json"),
        r#"[{
            "id": "id-1",
            "name": "Jane Doe",
            "attributes": {"departmentId": "10"},
            "roles": [{"id": "r1", "name": "Finance", "owner": "Pat",
                       "details": {"name": "Finance", "owner": "Pat",
                                   "entitlements": [{"id": "e1", "name": "Portal"}]}}],
            "accounts": [{"sourceName": "Azure Active Directory", "entitlements": [
                {"attribute": "AppRoleAssignment", "displayName": "Portal",
                 "appRole_description": "Portal users"}
            ]}]
        }]"#,
    )
    .unwrap();

    let output = run_cli(dir.path(), &["export"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Exported 1 entitlement rows and 1 role rows"));

    let reports = dir.path().join("reports");
    let identities =
        std::fs::read_to_string(reports.join("all_identities_entitlements.csv")).unwrap();
    assert!(identities.ends_with("Jane_Doe,Azure Active Directory,Portal,Portal users,Finance\n"));
    assert!(reports.join("reorg_entitlements_roles.xlsx").exists());
}

#[test]
fn export_without_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["export"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("snapshot error"));
}
