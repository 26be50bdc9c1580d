//! Integration tests for the `check` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_check_reports_corrections() {
    let env = TestEnv::new();
    env.init();
    env.write_section("training", "num_epochs: abc\naccumulate: '2'\n");

    env.command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stderr(predicate::str::contains(
            "training/num_epochs: could not convert 'abc' to int",
        ))
        .stderr(predicate::str::contains("training/shuffle not found"));
}

#[test]
fn test_check_quiet_suppresses_warnings() {
    let env = TestEnv::new();
    env.init();
    env.write_section("training", "num_epochs: abc\n");

    env.command()
        .args(["--quiet", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_check_verbose_shows_coercions() {
    let env = TestEnv::new();
    env.init();
    env.write_section("training", "num_epochs: '12'\n");

    env.command()
        .args(["--verbose", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO: training/num_epochs: converted"));
}

#[test]
fn test_check_does_not_write_by_default() {
    let env = TestEnv::new();
    env.init();
    env.write_section("training", "num_epochs: '12'\n");

    env.command().arg("check").assert().success();

    assert_eq!(env.read_section("training"), "num_epochs: '12'\n");
}

#[test]
fn test_check_write_persists_corrections() {
    let env = TestEnv::new();
    env.init();
    env.write_section("training", "num_epochs: '12'\n");

    env.command().args(["check", "--write"]).assert().success();

    let training: serde_yaml::Value = serde_yaml::from_str(&env.read_section("training")).unwrap();
    assert_eq!(training["num_epochs"], serde_yaml::Value::from(12));
    assert_eq!(training["shuffle"], serde_yaml::Value::from("default"));

    // A second check has nothing left to correct
    env.command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 correction(s)"));
}

#[test]
fn test_check_config_dir_from_environment() {
    let env = TestEnv::new();
    env.init();

    env.command_bare()
        .env("DEEPCFG_CONFIG_DIR", &env.config_dir)
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_check_default_config_dir_is_relative() {
    let env = TestEnv::new();
    env.init();

    // command_bare runs inside the temp dir, where ./config exists
    env.command_bare().arg("check").assert().success();
}

#[test]
fn test_check_placeholders_flag() {
    let env = TestEnv::new();
    env.init();
    env.write_section("losses", "{}\n");

    env.command()
        .args(["--placeholders", "check", "--write"])
        .assert()
        .success();

    assert!(env.read_section("losses").contains("loss:"));
}
