use proptest::prelude::*;

use sc_voice::catalog::AudioRef;
use sc_voice::catalog::manifest;
use sc_voice::config::Config;
use sc_voice::search::tokenize;
use sc_voice::test_utils::fixtures::{bilingual_catalog, handler};

proptest! {
    // =========================================================================
    // Query Safety Tests
    // =========================================================================

    #[test]
    fn test_search_never_panics(input in ".*") {
        let handler = handler(bilingual_catalog());
        let _ = handler.search(&input);
    }

    #[test]
    fn test_search_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let input = String::from_utf8_lossy(&bytes);
        let handler = handler(bilingual_catalog());
        let _ = handler.search(&input);
    }

    #[test]
    fn test_tokens_are_never_empty(input in ".*") {
        prop_assert!(tokenize(&input).iter().all(|token| !token.is_empty()));
    }

    // =========================================================================
    // Loader Safety Tests
    // =========================================================================

    #[test]
    fn test_manifest_parse_never_panics(input in ".*") {
        let _ = manifest::from_toml_str(&input);
    }

    #[test]
    fn test_audio_ref_parse_never_panics(input in ".*") {
        let _ = AudioRef::parse(&input);
    }

    #[test]
    fn test_config_parse_never_panics(input in ".*") {
        let _ = Config::from_toml_str(&input);
    }
}
