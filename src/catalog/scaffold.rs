//! Catalog scaffolding from an audio directory
//!
//! Walks a tree such as `protoss/zealot/ready.ogg` and emits one manifest
//! entry per audio file: directories become tags, the file stem becomes
//! the English label. Ukrainian labels are left blank for translation.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::MAX_ID_BYTES;
use super::manifest::{Manifest, ManifestClip};
use crate::error::LoadError;

const AUDIO_EXTENSIONS: &[&str] = &["ogg", "wav"];

/// Build a manifest skeleton for every audio file under `root`.
pub fn scaffold(root: &Path) -> Result<Manifest, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::Scan {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut relative_paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| LoadError::Scan {
            path: root.to_path_buf(),
            message: err.to_string(),
        })?;
        if !entry.file_type().is_file() || !is_audio(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        relative_paths.push(parts);
    }
    relative_paths.sort();

    let mut seen = HashSet::new();
    let clips = relative_paths
        .iter()
        .map(|parts| clip_for(parts, &mut seen))
        .collect::<Vec<_>>();

    debug!(root = %root.display(), clips = clips.len(), "scaffolded catalog");
    Ok(Manifest { clips })
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn clip_for(parts: &[String], seen: &mut HashSet<String>) -> ManifestClip {
    let (file_name, dirs) = parts.split_last().map_or(("", &[][..]), |(last, rest)| {
        (last.as_str(), rest)
    });
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    let mut slug_parts: Vec<String> = dirs.iter().map(|d| slugify(d)).collect();
    slug_parts.push(slugify(stem));
    let slug = slug_parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    ManifestClip {
        id: unique_id(slug, seen),
        audio: parts.join("/"),
        en: stem.replace(['_', '-'], " ").trim().to_string(),
        uk: String::new(),
        tags: dirs.iter().map(|d| d.to_lowercase()).collect(),
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn unique_id(slug: String, seen: &mut HashSet<String>) -> String {
    let base = if slug.is_empty() { "clip".to_string() } else { slug };
    let mut candidate = truncate_bytes(&base, MAX_ID_BYTES);
    let mut counter = 2;
    while seen.contains(&candidate) {
        let suffix = format!("-{counter}");
        candidate = format!(
            "{}{suffix}",
            truncate_bytes(&base, MAX_ID_BYTES - suffix.len())
        );
        counter += 1;
    }
    seen.insert(candidate.clone());
    candidate
}

fn truncate_bytes(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
