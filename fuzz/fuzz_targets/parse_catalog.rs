#![no_main]

use fazer_core::catalog::parse_catalog;
use libfuzzer_sys::fuzz_target;

// Arbitrary text must never panic the catalog parser, and anything it accepts
// must satisfy the load-time validation.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for format in ["toml", "json"] {
        if let Ok(catalog) = parse_catalog(text, format) {
            assert!(!catalog.is_empty());
            for (i, product) in catalog.products().iter().enumerate() {
                assert!((0.0..=5.0).contains(&product.rating));
                assert_eq!(catalog.position(product.id.as_str()), Some(i));
            }
        }
    }
});
