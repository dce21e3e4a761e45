#![no_main]
use std::ffi::OsString;

use libfuzzer_sys::fuzz_target;

use embark::cli::bootstrap::{select_args, ArgSource};

fuzz_target!(|data: &[u8]| {
    let eff = select_args(vec![OsString::from("embark")], Some(Ok(data.to_vec())));
    match eff.source {
        ArgSource::Process => assert_eq!(eff.args.len(), 1),
        ArgSource::Embedded(line) => {
            assert!(!line.is_empty());
            assert_eq!(eff.args.len(), line.split(' ').count() + 1);
        }
    }
});
