//! Turning search hits and catalog data into Telegram payloads

use teloxide::types::{InlineQueryResult, InlineQueryResultCachedVoice, InlineQueryResultVoice};
use tracing::debug;
use url::Url;

use crate::catalog::{AudioRef, Catalog, ClipRecord};
use crate::search::SearchHit;

/// Telegram rejects inline answers with more results than this
pub const MAX_INLINE_RESULTS: usize = 50;

/// One inline voice result for a clip, or `None` when the clip has no
/// deliverable audio (an asset path without a media base URL).
pub fn inline_result(
    record: &ClipRecord,
    language: Option<&str>,
    base_url: Option<&Url>,
) -> Option<InlineQueryResult> {
    let title = record.title_for(language);
    match &record.audio {
        AudioRef::FileId(file_id) => Some(InlineQueryResult::CachedVoice(
            InlineQueryResultCachedVoice::new(record.id.as_str(), file_id.clone(), title),
        )),
        audio => {
            let Some(url) = audio.resolve_url(base_url) else {
                debug!(clip = %record.id, "skipping clip without deliverable audio");
                return None;
            };
            Some(InlineQueryResult::Voice(InlineQueryResultVoice::new(
                record.id.as_str(),
                url,
                title,
            )))
        }
    }
}

/// Inline results for ranked hits, in rank order, capped at Telegram's limit
pub fn inline_results(
    hits: &[SearchHit<'_>],
    language: Option<&str>,
    base_url: Option<&Url>,
) -> Vec<InlineQueryResult> {
    hits.iter()
        .filter_map(|hit| inline_result(hit.record, language, base_url))
        .take(MAX_INLINE_RESULTS)
        .collect()
}

/// `/start` and `/help` reply: the greeting plus a usage example
pub fn help_text(greeting: &str, bot_username: &str) -> String {
    format!("{greeting}\n\nExample / Приклад: @{bot_username} zealot")
}

/// `/stats` reply
pub fn stats_text(catalog: &Catalog) -> String {
    let mut text = format!("📊 Clips: {}\n\nBy category:\n", catalog.len());
    for entry in catalog.stats() {
        text.push_str(&format!(
            "  • {}: {}\n",
            capitalize(&entry.category),
            entry.count
        ));
    }
    text
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(audio: AudioRef) -> ClipRecord {
        ClipRecord::new("zealot-ready", audio, "My life for Aiur", "Моє життя за Айур", ["protoss"])
    }

    #[test]
    fn test_file_id_becomes_cached_voice() {
        let result = inline_result(&record(AudioRef::FileId("AwAC".into())), Some("uk"), None);
        match result {
            Some(InlineQueryResult::CachedVoice(voice)) => {
                assert_eq!(voice.id, "zealot-ready");
                assert_eq!(voice.title, "Моє життя за Айур");
            }
            other => panic!("expected cached voice, got {other:?}"),
        }
    }

    #[test]
    fn test_url_becomes_voice() {
        let url = Url::parse("https://cdn.example.com/a.ogg").unwrap();
        let result = inline_result(&record(AudioRef::Url(url)), Some("en"), None);
        match result {
            Some(InlineQueryResult::Voice(voice)) => {
                assert_eq!(voice.voice_url.as_str(), "https://cdn.example.com/a.ogg");
                assert_eq!(voice.title, "My life for Aiur");
            }
            other => panic!("expected voice, got {other:?}"),
        }
    }

    #[test]
    fn test_asset_needs_base_url() {
        let asset = record(AudioRef::Asset("protoss/zealot/ready.ogg".into()));
        assert!(inline_result(&asset, None, None).is_none());

        let base = Url::parse("https://cdn.example.com/sc/").unwrap();
        match inline_result(&asset, None, Some(&base)) {
            Some(InlineQueryResult::Voice(voice)) => assert_eq!(
                voice.voice_url.as_str(),
                "https://cdn.example.com/sc/protoss/zealot/ready.ogg"
            ),
            other => panic!("expected voice, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_results_cap() {
        let records: Vec<ClipRecord> = (0..60)
            .map(|i| {
                ClipRecord::new(
                    format!("clip-{i}"),
                    AudioRef::FileId(format!("f{i}")),
                    "Ready",
                    "",
                    ["terran"],
                )
            })
            .collect();
        let hits: Vec<SearchHit<'_>> = records
            .iter()
            .map(|record| SearchHit { record, score: 1 })
            .collect();
        assert_eq!(inline_results(&hits, None, None).len(), MAX_INLINE_RESULTS);
    }

    #[test]
    fn test_stats_text() {
        let catalog = Catalog::from_records(vec![
            record(AudioRef::FileId("a".into())),
            ClipRecord::new("m", AudioRef::FileId("b".into()), "Marine", "", ["terran"]),
        ])
        .unwrap();
        let text = stats_text(&catalog);
        assert!(text.starts_with("📊 Clips: 2"));
        assert!(text.contains("  • Protoss: 1\n"));
        assert!(text.contains("  • Terran: 1\n"));
    }

    #[test]
    fn test_help_text_mentions_username() {
        let text = help_text("hi", "scvoicebot");
        assert!(text.starts_with("hi\n\n"));
        assert!(text.ends_with("@scvoicebot zealot"));
    }
}
