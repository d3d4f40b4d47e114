use proptest::prelude::*;

use sc_voice::catalog::{AudioRef, Catalog, ClipRecord};
use sc_voice::search::{QueryHandler, QueryOptions, SearchIndex, normalize, tokenize};
use sc_voice::test_utils::fixtures::{bilingual_catalog, handler};

/// Latin and Ukrainian letters, digits, apostrophes and punctuation
const LABEL: &str = "[a-zA-Zа-яА-ЯіїєґІЇЄҐ0-9' ,.!?-]{0,40}";

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec((LABEL, LABEL, prop::collection::vec("[a-z]{1,8}", 0..3)), 1..12)
        .prop_map(|rows| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(position, (en, uk, tags))| {
                    let en = if tokenize(&en).is_empty() { format!("clip {position}") } else { en };
                    let uk = if tokenize(&uk).is_empty() { String::new() } else { uk };
                    ClipRecord::new(
                        format!("clip-{position}"),
                        AudioRef::FileId(format!("file-{position}")),
                        en,
                        uk,
                        tags,
                    )
                })
                .collect();
            Catalog::from_records(records).unwrap()
        })
}

proptest! {
    #[test]
    fn test_normalize_deterministic(text in ".*") {
        prop_assert_eq!(normalize(&text), normalize(&text));
    }

    #[test]
    fn test_normalize_idempotent(text in "\\PC*") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn test_tokens_survive_retokenizing(text in LABEL) {
        let tokens = tokenize(&text);
        prop_assert_eq!(tokenize(&tokens.join(" ")), tokens.clone());
    }

    #[test]
    fn test_stress_marks_are_ignored(text in "[а-яіїєґ ]{0,30}") {
        let stressed: String = text
            .chars()
            .flat_map(|c| {
                let mark = matches!(c, 'а' | 'е' | 'и' | 'о' | 'у' | 'і').then_some('\u{300}');
                std::iter::once(c).chain(mark)
            })
            .collect();
        prop_assert_eq!(normalize(&stressed), normalize(&text));
    }

    #[test]
    fn test_case_insensitive(text in LABEL) {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text.to_lowercase()));
    }

    #[test]
    fn test_index_build_deterministic(catalog in arb_catalog()) {
        prop_assert_eq!(SearchIndex::build(&catalog), SearchIndex::build(&catalog));
    }

    #[test]
    fn test_postings_point_into_catalog(catalog in arb_catalog()) {
        let index = SearchIndex::build(&catalog);
        prop_assert_eq!(index.clip_count(), catalog.len());
        for (key, positions) in index.postings() {
            prop_assert!(!positions.is_empty(), "empty posting for {}", key);
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(positions.iter().all(|&position| position < catalog.len()));
        }
    }

    #[test]
    fn test_search_idempotent(query in LABEL) {
        let handler = handler(bilingual_catalog());
        prop_assert_eq!(handler.search_ids(&query), handler.search_ids(&query));
    }

    #[test]
    fn test_every_label_finds_its_clip(catalog in arb_catalog()) {
        let handler = QueryHandler::new(catalog.clone(), QueryOptions { limit: 100, ..QueryOptions::default() });
        for record in catalog.iter() {
            for label in [&record.label_en, &record.label_uk] {
                if label.is_empty() {
                    continue;
                }
                let ids = handler.search_ids(label);
                prop_assert!(ids.contains(&record.id), "{:?} missed {}", label, record.id);
            }
        }
    }

    #[test]
    fn test_ranking_is_ordered_and_capped(query in LABEL, limit in 1usize..10) {
        let handler = QueryHandler::new(
            bilingual_catalog(),
            QueryOptions { limit, ..QueryOptions::default() },
        );
        let hits = handler.search(&query);
        prop_assert!(hits.len() <= limit);
        prop_assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
        prop_assert!(hits.iter().all(|hit| hit.score >= 1));
    }
}
