// Overlay extraction through the public `embark::image` API.

use std::fs;

use embark::image::{extract_overlay, overlay_from_sections, read_overlay, ExecutableFile, Section};
use embark::Error;
use tempfile::TempDir;

#[test]
fn overlapping_sections_cut_at_furthest_end() {
    let data: Vec<u8> = (0..=255u8).collect();
    let overlay =
        overlay_from_sections(&data, &[Section::new(0, 100), Section::new(50, 150)]).unwrap();
    assert_eq!(overlay, &data[200..]);
}

#[test]
fn fully_covered_file_has_no_overlay() {
    let data = vec![0u8; 200];
    let err = overlay_from_sections(&data, &[Section::new(0, 200)]).unwrap_err();
    assert!(matches!(err, Error::NoOverlayData));
}

#[test]
fn unknown_magic_is_invalid() {
    assert!(matches!(
        extract_overlay(b"not an executable at all"),
        Err(Error::InvalidImage(_))
    ));
}

#[test]
fn unreadable_file_is_invalid() {
    let dir = TempDir::new().unwrap();
    let exe = ExecutableFile::new(dir.path().join("missing.exe"));
    assert!(matches!(read_overlay(&exe), Err(Error::InvalidImage(_))));
}

#[test]
fn appended_bytes_are_recovered_from_real_binary() {
    let original = fs::read(env!("CARGO_BIN_EXE_embark")).unwrap();
    let suffix = b"install --force git\r\n";

    let mut patched = original.clone();
    patched.extend_from_slice(suffix);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patched");
    fs::write(&path, &patched).unwrap();

    let overlay = read_overlay(&ExecutableFile::new(&path)).unwrap();
    match extract_overlay(&original) {
        Err(Error::NoOverlayData) => assert_eq!(overlay, suffix),
        _ => assert!(overlay.ends_with(suffix)),
    }
}
