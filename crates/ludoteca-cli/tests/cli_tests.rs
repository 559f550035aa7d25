//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ludoteca() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("ludoteca").unwrap()
}

const VALID_GAME: &str = r#"[game]
id = "contagem-1"
title = "Contando Animais"
kind = "counting"
activity_id = "atv-contagem-1"

[[rounds]]
prompt = "Quantas patas tem um gato?"
answers = ["4", "quatro"]

[[rounds]]
prompt = "Quantos olhos temos?"
answers = ["2", "dois"]
"#;

#[test]
fn validate_valid_game() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contagem.toml");
    std::fs::write(&path, VALID_GAME).unwrap();

    ludoteca()
        .arg("validate")
        .arg("--game")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Contando Animais"))
        .stdout(predicate::str::contains("2 rounds"))
        .stdout(predicate::str::contains("All game definitions valid"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.toml"), VALID_GAME).unwrap();
    let second = VALID_GAME.replace("contagem-1", "contagem-2");
    std::fs::write(dir.path().join("b.toml"), second).unwrap();

    ludoteca()
        .arg("validate")
        .arg("--game")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All game definitions valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let with_unused_spares = format!(
        "{VALID_GAME}\n[[spares]]\nprompt = \"reserva\"\nanswers = [\"x\"]\n"
    );
    let path = dir.path().join("sobras.toml");
    std::fs::write(&path, with_unused_spares).unwrap();

    ludoteca()
        .arg("validate")
        .arg("--game")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("spares"));
}

#[test]
fn validate_nonexistent_file() {
    ludoteca()
        .arg("validate")
        .arg("--game")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ludoteca.toml"))
        .stdout(predicate::str::contains("Created games/exemplo.toml"));

    assert!(dir.path().join("ludoteca.toml").exists());
    assert!(dir.path().join("games/exemplo.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    ludoteca()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_validate_example_game() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    ludoteca()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--game")
        .arg("games/exemplo.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All game definitions valid"));
}

#[test]
fn select_show_with_empty_store() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("select")
        .arg("--show")
        .assert()
        .success()
        .stdout(predicate::str::contains("nenhuma"));
}

#[test]
fn select_persists_child() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("select")
        .arg("--child")
        .arg("c1")
        .assert()
        .success()
        .stdout(predicate::str::contains("c1"));

    ludoteca()
        .current_dir(dir.path())
        .arg("select")
        .arg("--show")
        .assert()
        .success()
        .stdout(predicate::str::contains("c1"));
}

#[test]
fn select_without_arguments_fails() {
    let dir = TempDir::new().unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("select")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to select"));
}

#[test]
fn play_without_selected_child_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jogo.toml");
    std::fs::write(&path, VALID_GAME).unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("play")
        .arg("--game")
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no child selected"));
}

#[test]
fn play_offline_prints_the_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jogo.toml");
    std::fs::write(&path, VALID_GAME).unwrap();

    ludoteca()
        .current_dir(dir.path())
        .arg("play")
        .arg("--game")
        .arg(&path)
        .arg("--child")
        .arg("c1")
        .arg("--offline")
        .write_stdin("4\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pontuação: 10.0"))
        .stdout(predicate::str::contains("crianca_id"));
}

#[test]
fn help_output() {
    ludoteca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mini-game sessions"));
}

#[test]
fn version_output() {
    ludoteca()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ludoteca"));
}
