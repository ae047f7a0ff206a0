use assert_cmd::Command;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf-cli").unwrap();
    cmd.env_remove("BOOKSHELF_ENV")
        .env("BOOKSHELF_CONFIG_DIR", std::env::temp_dir().join("bookshelf-cli-none"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = cli().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for subcommand in ["serve", "migrate", "config"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
}

#[test]
fn config_prints_effective_settings() {
    let output = cli()
        .arg("config")
        .env("BOOKSHELF__SERVER__PORT", "9191")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"port\": 9191"));
    assert!(stdout.contains("\"backend\": \"sqlite\""));
}

#[test]
fn unknown_environment_fails() {
    cli()
        .arg("config")
        .env("BOOKSHELF_ENV", "qa")
        .assert()
        .failure();
}

#[test]
fn migrate_on_memory_backend_is_a_no_op() {
    cli()
        .arg("migrate")
        .env("BOOKSHELF__DATABASE__BACKEND", "memory")
        .assert()
        .success();
}
