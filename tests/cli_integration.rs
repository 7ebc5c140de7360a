use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rackplan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rackplan").unwrap();
    cmd.env("RACKPLAN_HOME", dir.path())
        .env_remove("RACKPLAN_LOG")
        .env("NO_COLOR", "1")
        .arg("--width")
        .arg("300");
    cmd
}

#[test]
fn test_layout_persists_across_invocations() {
    let dir = TempDir::new().unwrap();

    rackplan(&dir)
        .args(["grid", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grid defined: 3x3"));

    rackplan(&dir)
        .args(["add", "horizontal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at (0, 0)"));

    rackplan(&dir)
        .args(["add", "v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at (0, 1)"));

    rackplan(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("horizontal"))
        .stdout(predicate::str::contains("vertical"))
        .stdout(predicate::str::contains("x=100 y=0 w=100 h=200"));

    rackplan(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("H V .\n. v ."));
}

#[test]
fn test_invalid_grid_size_fails() {
    let dir = TempDir::new().unwrap();

    rackplan(&dir)
        .args(["grid", "-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive whole number"));

    rackplan(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No grid defined"));
}

#[test]
fn test_drag_reverts_onto_occupied_cell() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "3"]).assert().success();
    rackplan(&dir).args(["add", "h"]).assert().success();
    rackplan(&dir).args(["add", "h"]).assert().success();

    // drag the shelf under (50, 50) onto the origin of the other one
    rackplan(&dir)
        .args(["drag", "50", "50", "150", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("target cell is taken"))
        .stdout(predicate::str::contains("snap back to x=0 y=0 over 100ms"));

    rackplan(&dir)
        .args(["drag", "50", "50", "50", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to (2, 0)"));
}

#[test]
fn test_move_unknown_shelf_errors() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "3"]).assert().success();

    rackplan(&dir)
        .args(["move", "nope", "0", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Shelf not found"));
}

#[test]
fn test_reset_clears_everything() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "2"]).assert().success();
    rackplan(&dir).args(["add", "h"]).assert().success();

    rackplan(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 shelves removed"));

    assert!(!dir.path().join("rackplan.grid.json").exists());
    assert!(!dir.path().join("rackplan.shelves.json").exists());

    rackplan(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No grid defined"));
}

#[test]
fn test_show_without_overlay() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "2"]).assert().success();
    rackplan(&dir).args(["add", "v"]).assert().success();

    rackplan(&dir)
        .args(["show", "--no-grid"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".").not());
}

#[test]
fn test_config_width_is_saved() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rackplan").unwrap();
    cmd.env("RACKPLAN_HOME", dir.path())
        .args(["config", "width", "640"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("rackplan").unwrap();
    cmd.env("RACKPLAN_HOME", dir.path())
        .args(["config", "width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width = 640"));
}

#[test]
fn test_bad_width_is_rejected_before_touching_data() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "3"]).assert().success();
    let grid_file = dir.path().join("rackplan.grid.json");
    let before = std::fs::read_to_string(&grid_file).unwrap();

    for width in ["-300", "0"] {
        let mut cmd = Command::cargo_bin("rackplan").unwrap();
        cmd.env("RACKPLAN_HOME", dir.path())
            .args(["--width", width, "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("positive number of pixels"));
    }

    assert_eq!(std::fs::read_to_string(&grid_file).unwrap(), before);
}

#[test]
fn test_unknown_config_key_fails() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir)
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_door_and_rotated_view() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "3"]).assert().success();

    rackplan(&dir)
        .arg("door")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added door"));

    rackplan(&dir)
        .args(["show", "--rotate", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains(". d D"));

    rackplan(&dir)
        .args(["show", "--rotate", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rotation must be"));
}

#[test]
fn test_huge_grid_is_not_drawn() {
    let dir = TempDir::new().unwrap();
    rackplan(&dir).args(["grid", "100000"]).assert().success();

    rackplan(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large to draw"));
}
