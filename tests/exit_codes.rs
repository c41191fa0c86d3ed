use std::process::Command;
use tempfile::tempdir;

fn thumbdir() -> Command {
    Command::new(env!("CARGO_BIN_EXE_thumbdir"))
}

#[test]
fn missing_arguments_exit_with_one() {
    let output = thumbdir().args(["only-one"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn non_integer_dimensions_exit_with_one() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir_all(&dest).unwrap();

    let output = thumbdir()
        .arg(&src)
        .arg(&dest)
        .args(["abc", "100"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn same_directory_exits_with_one() {
    let td = tempdir().unwrap();
    let output = thumbdir()
        .arg(td.path())
        .arg(td.path())
        .args(["100", "100"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must differ"));
}

#[test]
fn missing_destination_exits_with_one() {
    let td = tempdir().unwrap();
    let output = thumbdir()
        .arg(td.path())
        .arg(td.path().join("missing"))
        .args(["100", "100"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Inexisting destination"));
}

#[test]
fn successful_run_announces_created_directories() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    std::fs::create_dir_all(src.join("album")).unwrap();
    std::fs::create_dir_all(&dest).unwrap();
    image::RgbImage::new(30, 20)
        .save_with_format(src.join("album/pic.jpg"), image::ImageFormat::Jpeg)
        .unwrap();

    let output = thumbdir()
        .arg(&src)
        .arg(&dest)
        .args(["16", "16"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating"), "{stdout}");
    assert!(dest.join("album/pic.jpg").exists());
}

#[test]
fn unreadable_image_is_reported_and_run_succeeds() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    std::fs::create_dir_all(src.join("album")).unwrap();
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(src.join("album/bad.jpg"), b"not really a jpeg").unwrap();
    image::RgbImage::new(30, 20)
        .save_with_format(src.join("album/good.jpg"), image::ImageFormat::Jpeg)
        .unwrap();

    let output = thumbdir()
        .arg(&src)
        .arg(&dest)
        .args(["16", "16"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read"), "{stderr}");
    assert!(stderr.contains("bad.jpg"), "{stderr}");
    // piped stderr carries no colour codes
    assert!(!stderr.contains('\u{1b}'), "{stderr:?}");
    assert!(dest.join("album/good.jpg").exists());
    assert!(!dest.join("album/bad.jpg").exists());
}
