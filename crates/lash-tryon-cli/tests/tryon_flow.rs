//! End-to-end composition flow tests.
//!
//! Runs the binary against synthetic portraits and sidecars and checks
//! exit codes, the JSON summary, and the composed PNG.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lash_tryon_test_support::SyntheticFixtures;
use serde_json::Value;

/// Writes a decodable portrait into the directory.
fn write_portrait(dir: &Path) -> PathBuf {
    let photo = dir.join("portrait.png");
    fs::write(&photo, SyntheticFixtures::portrait_png(100, 100)).unwrap();
    photo
}

/// Writes a one-face landmark sidecar next to the photo.
///
/// The eye corners sit at (30,40) and (50,40) in image space; on a 200x200
/// surface the photo scales 2x centered, anchoring the overlay at known
/// coordinates.
fn write_face_sidecar(photo: &Path) {
    let faces = vec![SyntheticFixtures::face_with_eyes(
        (30.0, 40.0),
        (50.0, 40.0),
    )];
    fs::write(
        format!("{}.landmarks.json", photo.display()),
        SyntheticFixtures::sidecar_json(&faces),
    )
    .unwrap();
}

// === JSON Summary ===

#[test]
fn test_summary_reports_known_placement() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);
    let out = temp.path().join("frame.png");

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--surface")
        .arg("200x200")
        .arg("--overlay")
        .arg("natural")
        .arg("--json")
        .arg("--out")
        .arg(&out)
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["outcome"].as_str(), Some("loaded"));
    assert_eq!(summary["phase"].as_str(), Some("overlay-selected"));
    assert_eq!(summary["overlay"].as_str(), Some("natural"));
    assert_eq!(summary["surface"]["width"].as_u64(), Some(200));
    assert_eq!(summary["surface"]["height"].as_u64(), Some(200));

    // Eye corners at x=30 and x=50 scale to a 40px eye; the overlay leads
    // a quarter width past the outer corner and centers on the lash line.
    let placement = &summary["placement"];
    assert_eq!(placement["x"].as_f64(), Some(50.0));
    assert_eq!(placement["y"].as_f64(), Some(70.0));
    assert_eq!(placement["width"].as_f64(), Some(40.0));
    assert_eq!(placement["height"].as_f64(), Some(20.0));

    // The composed frame matches the requested surface
    let frame = image::open(&out).unwrap();
    assert_eq!(frame.width(), 200);
    assert_eq!(frame.height(), 200);
}

#[test]
fn test_summary_has_input_and_timestamp_fields() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--json")
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(summary["input"].is_string());
    assert!(
        summary["input"].as_str().unwrap().ends_with("portrait.png"),
        "'input' should carry the photo path"
    );

    let ts = summary["timestamp"].as_str().unwrap();
    assert!(
        ts.contains('T') && ts.contains('-'),
        "Timestamp should be ISO 8601 format: {ts}"
    );
}

#[test]
fn test_no_face_reports_notice_and_partial_summary() {
    let temp = tempfile::tempdir().unwrap();
    // Portrait without a sidecar: detection finds no face
    let photo = write_portrait(temp.path());

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--json")
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("notice: No face detected"));

    // The photo itself still loads; placement and overlay are absent
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["outcome"].as_str(), Some("no-face"));
    assert_eq!(summary["phase"].as_str(), Some("image-loaded"));
    assert!(summary.get("placement").is_none());
    assert!(summary.get("overlay").is_none());
}

// === Pretty Format ===

#[test]
fn test_pretty_json_is_indented() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--json")
        .arg("--pretty")
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("  "), "Pretty format should be indented");

    // Should still be valid JSON
    let parsed: Result<Value, _> = serde_json::from_str(&stdout);
    assert!(parsed.is_ok(), "Pretty JSON should still be valid");
}

#[test]
fn test_compact_json_is_single_line() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--json")
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let lines: Vec<_> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1, "Compact summary should be one line");
    assert!(lines[0].starts_with('{'));
}

// === Composed Frame ===

#[test]
fn test_composed_frame_is_deterministic() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);
    let first = temp.path().join("first.png");
    let second = temp.path().join("second.png");

    for out in [&first, &second] {
        let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
        cmd.arg(&photo)
            .arg("--surface")
            .arg("200x200")
            .arg("--overlay")
            .arg("volume")
            .arg("--out")
            .arg(out)
            .arg("--captures-dir")
            .arg(temp.path().join("captures"));
        cmd.assert().code(0);
    }

    assert_eq!(
        fs::read(&first).unwrap(),
        fs::read(&second).unwrap(),
        "Same inputs should compose byte-identical frames"
    );
}

#[test]
fn test_draw_landmarks_changes_frame() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);
    let plain = temp.path().join("plain.png");
    let marked = temp.path().join("marked.png");

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--out")
        .arg(&plain)
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));
    cmd.assert().code(0);

    let mut cmd2 = Command::cargo_bin("lash-tryon").unwrap();
    cmd2.arg(&photo)
        .arg("--draw-landmarks")
        .arg("--out")
        .arg(&marked)
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));
    cmd2.assert().code(0);

    assert_ne!(fs::read(&plain).unwrap(), fs::read(&marked).unwrap());
}

// === Stored Captures ===

#[test]
fn test_capture_stored_in_captures_dir() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);
    let captures = temp.path().join("captures");

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo).arg("--captures-dir").arg(&captures);
    cmd.assert().code(0);

    let stored: Vec<_> = fs::read_dir(&captures)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].ends_with(".jpg"));
}

#[test]
fn test_retention_caps_stored_captures() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    write_face_sidecar(&photo);
    let captures = temp.path().join("captures");

    for _ in 0..3 {
        let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
        cmd.arg(&photo)
            .arg("--retain")
            .arg("1")
            .arg("--captures-dir")
            .arg(&captures);
        cmd.assert().code(0);
    }

    let count = fs::read_dir(&captures).unwrap().count();
    assert_eq!(count, 1, "Retention should prune down to the newest capture");
}

// === Explicit Sidecar Path ===

#[test]
fn test_explicit_landmarks_path() {
    let temp = tempfile::tempdir().unwrap();
    let photo = write_portrait(temp.path());
    // Sidecar parked away from the photo
    let sidecar = temp.path().join("elsewhere.json");
    let faces = vec![SyntheticFixtures::face_with_eyes(
        (30.0, 40.0),
        (50.0, 40.0),
    )];
    fs::write(&sidecar, SyntheticFixtures::sidecar_json(&faces)).unwrap();

    let mut cmd = Command::cargo_bin("lash-tryon").unwrap();
    cmd.arg(&photo)
        .arg("--landmarks")
        .arg(&sidecar)
        .arg("--json")
        .arg("--captures-dir")
        .arg(temp.path().join("captures"));

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["outcome"].as_str(), Some("loaded"));
    assert_eq!(summary["phase"].as_str(), Some("landmarks-ready"));
}
