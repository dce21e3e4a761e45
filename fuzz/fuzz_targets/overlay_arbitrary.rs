#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through format detection and section table parsing.
    // Errors are expected; panics and out-of-bounds slicing are not.
    if let Ok(overlay) = embark::image::extract_overlay(data) {
        assert!(!overlay.is_empty());
        assert!(overlay.len() <= data.len());
        assert_eq!(overlay, &data[data.len() - overlay.len()..]);
    }

    // Every format reader on its own, even without matching magic.
    for reader in embark::image::readers() {
        if let Ok(sections) = reader.sections(data) {
            let _ = embark::image::overlay_from_sections(data, &sections);
        }
    }
});
