//! Binary exit codes and output placement

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn thumbcarve() -> Command {
    Command::new(env!("CARGO_BIN_EXE_thumbcarve"))
}

fn container() -> Vec<u8> {
    let mut data = b"Image8\n".to_vec();
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&[0x55; 12]);
    data
}

#[test]
fn test_wrong_argument_count_exits_one() {
    let status = thumbcarve().status().unwrap();
    assert_eq!(status.code(), Some(1));

    let status = thumbcarve().args(["a.bin", "b.bin"]).status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let status = thumbcarve().arg("--help").output().unwrap().status;
    assert_eq!(status.code(), Some(0));
}

#[test]
fn test_missing_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = thumbcarve()
        .current_dir(dir.path())
        .arg("does_not_exist.bin")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open input file"));
}

#[test]
fn test_directory_input_exits_one() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("dump")).unwrap();

    let output = thumbcarve()
        .current_dir(dir.path())
        .arg("dump")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a regular file"));
}

#[test]
fn test_writes_into_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("camera.dat"), container()).unwrap();

    let status = thumbcarve()
        .current_dir(dir.path())
        .arg("camera.dat")
        .status()
        .unwrap();

    assert!(status.success());
    let bmp = fs::read(dir.path().join("camera_extracted_1.bmp")).unwrap();
    assert_eq!(&bmp[..2], b"BM");
}

#[test]
fn test_no_images_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.dat"), b"nothing to see").unwrap();

    let status = thumbcarve()
        .current_dir(dir.path())
        .arg("empty.dat")
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("camera.dat"), container()).unwrap();

    let output = thumbcarve()
        .current_dir(dir.path())
        .args(["camera.dat", "--json", "--format", "png", "-o", "out"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "png");
    assert_eq!(report["extracted"][0]["sequence"], 1);
    assert!(dir.path().join("out").join("camera_extracted_1.png").exists());
}
