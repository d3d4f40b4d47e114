//! Catalog fixtures shared by unit and integration tests.

use crate::catalog::{AudioRef, Catalog, ClipRecord};
use crate::search::{QueryHandler, QueryOptions};

/// The two-clip catalog: `1` Zealot Ready, `2` Marine Ready.
pub fn ready_catalog() -> Catalog {
    Catalog::from_records(vec![
        clip("1", "Zealot Ready", "", &["protoss", "zealot"]),
        clip("2", "Marine Ready", "", &["terran", "marine"]),
    ])
    .expect("fixture catalog is valid")
}

/// A small bilingual catalog covering all three races.
pub fn bilingual_catalog() -> Catalog {
    Catalog::from_records(vec![
        clip("zealot-ready", "My life for Aiur!", "Моє життя за Айур!", &["protoss", "zealot"]),
        clip("zealot-attack", "Thus I serve!", "Так я служу!", &["protoss", "zealot"]),
        clip("probe-ready", "Probe ready", "Зонд на зв'язку", &["protoss", "probe"]),
        clip("marine-ready", "You want a piece of me, boy?", "Хочеш шматочок мене, хлопче?", &["terran", "marine"]),
        clip("marine-stim", "Ah, that's the stuff!", "О, оце те що треба!", &["terran", "marine"]),
        clip("scv-ready", "SCV good to go, sir", "КСР готовий, сер", &["terran", "scv"]),
        clip("hydralisk-ready", "Hydralisk hisses", "Гідраліск шипить", &["zerg", "hydralisk"]),
        clip("overlord-ready", "Overlord rumbles", "Наглядач гуде", &["zerg", "overlord"]),
        clip("main-theme", "Main theme", "Головна тема", &[]),
    ])
    .expect("fixture catalog is valid")
}

pub fn handler(catalog: Catalog) -> QueryHandler {
    QueryHandler::new(catalog, QueryOptions::default())
}

fn clip(id: &str, en: &str, uk: &str, tags: &[&str]) -> ClipRecord {
    ClipRecord::new(
        id,
        AudioRef::FileId(format!("file-{id}")),
        en,
        uk,
        tags.iter().copied(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_load_every_clip() {
        assert_eq!(ready_catalog().len(), 2);
        assert_eq!(bilingual_catalog().len(), 9);
        assert!(bilingual_catalog().get("main-theme").is_some());
    }
}
