#![no_main]
use libfuzzer_sys::fuzz_target;
use shelfcode::{build_codes, decode};

fuzz_target!(|data: Vec<u8>| {
    if data.is_empty() {
        assert!(build_codes(&data).is_err());
        return;
    }

    let (encoded, book) = build_codes(&data).unwrap();
    assert_eq!(encoded.len(), data.len());
    for code in &encoded {
        assert!(!code.is_empty());
    }

    let decoded = decode(&encoded.concat(), &book).unwrap();
    assert_eq!(data, decoded);
});
