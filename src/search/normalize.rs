//! Text normalization shared by the index builder and the query path
//!
//! Both sides must call the same function; any change here requires an
//! index rebuild, which happens on every start anyway.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case-fold, transliterate Cyrillic to Latin, and strip diacritics.
///
/// `Протос`, `протос` and `PROTOS` all become `protos`. Letters are
/// transliterated twice: once before decomposition so `й` and `ї` keep
/// their own romanization, and once after stripping marks so stressed
/// vowels such as `ѐ` collapse onto their plain letter.
pub fn normalize(text: &str) -> String {
    let composed = romanize(text.nfkc().flat_map(char::to_lowercase));
    romanize(
        composed
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase),
    )
}

fn romanize(chars: impl Iterator<Item = char>) -> String {
    let mut latin = String::new();
    for c in chars {
        match transliterate(c) {
            Some(mapped) => latin.push_str(mapped),
            None => latin.push(c),
        }
    }
    latin
}

/// Normalize and split on every non-alphanumeric character.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ukrainian national romanization, plus the few Russian-only letters that
/// show up in fan translations. Apostrophes vanish so `м'ясо` stays one word.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "h",
        'ґ' => "g",
        'д' => "d",
        'е' | 'э' | 'ё' => "e",
        'є' => "ie",
        'ж' => "zh",
        'з' => "z",
        'и' | 'ы' => "y",
        'і' | 'ї' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ю' => "iu",
        'я' => "ia",
        'ь' | 'ъ' | '\'' | '’' | 'ʼ' | '`' => "",
        _ => return None,
    };
    Some(mapped)
}
