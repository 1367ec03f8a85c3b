//! End-to-end tests for the logo-bg-remover binary

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::path::Path;

fn write_logo(path: &Path) {
    // Black frame around a white square, plus a near-black speck inside it
    let mut img = RgbaImage::from_fn(8, 8, |x, y| {
        if x == 0 || y == 0 || x == 7 || y == 7 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    img.put_pixel(4, 4, Rgba([5, 5, 5, 255]));
    img.save(path).unwrap();
}

fn cmd() -> Command {
    Command::cargo_bin("logo-bg-remover").unwrap()
}

#[test]
fn test_explicit_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("logo.png");
    let output = temp_dir.path().join("clean.png");
    write_logo(&input);

    cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Saved: {}", output.display())));

    let saved = image::open(&output).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (8, 8));
    assert_eq!(saved.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(saved.get_pixel(4, 4).0, [5, 5, 5, 0]);
    assert_eq!(saved.get_pixel(2, 2).0, [255, 255, 255, 255]);

    // Input untouched
    let original = image::open(&input).unwrap().to_rgba8();
    assert_eq!(original.get_pixel(0, 0).0[3], 255);
}

#[test]
fn test_overwrites_input_by_default() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("logo.png");
    write_logo(&input);

    cmd().arg(&input).assert().success();

    let saved = image::open(&input).unwrap().to_rgba8();
    assert_eq!(saved.get_pixel(7, 7).0[3], 0);
    assert_eq!(saved.get_pixel(3, 3).0[3], 255);
}

#[test]
fn test_default_logo_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp_dir.path().join("static")).unwrap();
    let logo = temp_dir.path().join("static").join("astrogroot-logo.png");
    write_logo(&logo);

    cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: static/astrogroot-logo.png"));

    let saved = image::open(&logo).unwrap().to_rgba8();
    assert_eq!(saved.get_pixel(0, 0).0[3], 0);
}

#[test]
fn test_quiet_and_verbose() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("logo.png");
    write_logo(&input);

    cmd()
        .arg(&input)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    write_logo(&input);
    cmd()
        .arg(&input)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("28 background + 1 isolated"));
}

#[test]
fn test_missing_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("out.png");

    cmd()
        .arg(temp_dir.path().join("nope.png"))
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Image not found"));

    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_leaves_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("logo.png");
    let output = temp_dir.path().join("no-such-dir").join("out.png");
    write_logo(&input);

    cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write"));

    assert!(!output.exists());
}

#[test]
fn test_rejects_out_of_range_threshold() {
    cmd()
        .args(["logo.png", "--dark-threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 1"));
}

#[test]
fn test_custom_thresholds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("logo.png");
    write_logo(&input);

    // Nothing qualifies at zero except pure black in the frame
    cmd()
        .arg(&input)
        .args(["--dark-threshold", "0", "--isolated-threshold", "0"])
        .assert()
        .success();

    let saved = image::open(&input).unwrap().to_rgba8();
    assert_eq!(saved.get_pixel(0, 0).0[3], 0);
    assert_eq!(saved.get_pixel(4, 4).0[3], 255);
}
