//! Query normalization and keyword extraction

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Words at or below this length (in characters) are never keywords
const MIN_KEYWORD_CHARS: usize = 3;

lazy_static! {
    /// Anything but letters, digits, underscore or whitespace. Joiners such
    /// as ZWNJ and combining marks count as separators.
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_\s]").unwrap();

    /// Persian function words, greetings, pronouns, politeness markers and
    /// colloquial question words that carry no product information
    static ref STOP_WORDS: HashSet<&'static str> = [
        // question words
        "چیه", "چیست", "چی", "چیا", "چه", "چها",
        "چرا", "چطور", "چطوری", "چجوری", "چگونه",
        "چقدر", "چقدره", "چنده", "کدام", "کدوم", "کدومش",
        "آیا", "آیه", "ایا", "مگر", "مگه",
        // copulas and auxiliaries
        "هست", "هستم", "هستی", "هستید", "هستند", "است", "استم", "بود", "بودم", "بودی", "بودند",
        "می", "میشه", "میشود", "شد", "شده", "شو", "شوید",
        "شود", "شوم", "شوی", "شوند", "شدم", "شدی", "شدند",
        "باید", "بایست", "باش", "نباید",
        "کن", "کنم", "کنی", "کنید", "کنند", "کنن",
        // prepositions and particles
        "را", "رو", "به", "از", "در", "درون", "داخل", "بیرون", "که", "کی", "کجا",
        "برای", "واسه", "برا", "بابت",
        "با", "بدون", "بی",
        "توی", "بین", "میان", "وسط",
        "روی", "زیر", "کنار", "پشت", "جلو", "بالا", "پایین",
        "مال", "متعلق", "مربوط", "درباره", "راجب", "راجع",
        // conjunctions
        "و", "یا", "اما", "ولی", "پس", "اگر", "اگه",
        "دیگه", "دیگر", "هم", "نیز", "همچنین", "علاوه",
        // demonstratives and quantifiers
        "این", "اون", "آن", "اینها", "آنها", "اونها",
        "یک", "یه", "دو", "سه", "چند", "چندتا", "تا",
        "هر", "همه", "تمام", "کل", "جمیع",
        // possession and desire
        "دارد", "دارم", "داری", "دارید", "دارن", "دارند", "داره", "دارین",
        "میخوام", "میخواهم", "میخوای", "میخواید", "میخوان", "میخواهید", "خواستم",
        // requests and politeness
        "بگو", "بگید", "بگین", "بگویید", "بفرما", "بفرمایید",
        "لطفا", "لطفاً", "خواهش", "خواهشا", "ممنون", "متشکرم", "سپاس",
        // greetings and time of day
        "سلام", "درود", "صبح", "عصر", "شب", "روز",
        "الان", "حالا", "اکنون", "فعلا", "فعلاً", "هنوز",
        // yes / no
        "نه", "نی", "خیر", "بله", "آره", "اره", "بلی",
        // pronouns
        "من", "تو", "ما", "شما", "او", "ایشان",
    ]
    .into_iter()
    .collect();
}

/// Whether `word` is in the stopword table
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Replace punctuation and symbols with spaces, collapse whitespace and trim
pub fn clean_query(query: &str) -> String {
    let replaced = NON_WORD.replace_all(query, " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a cleaned query into content-bearing terms.
///
/// Never returns an empty list: when every word is filtered out the cleaned
/// query itself is the only keyword.
pub fn extract_keywords(cleaned_query: &str) -> Vec<String> {
    let keywords: Vec<String> = cleaned_query
        .split_whitespace()
        .filter(|word| !is_stop_word(word) && word.chars().count() >= MIN_KEYWORD_CHARS)
        .map(String::from)
        .collect();

    if keywords.is_empty() {
        vec![cleaned_query.to_string()]
    } else {
        keywords
    }
}
