//! Static lookup tables used by the analysis pipeline.
//!
//! # Responsibility
//! - Hold the AFINN-165 base polarity lexicon, the bilingual override word
//!   lists, the category taxonomy and the stop-word set.
//! - Provide one process-wide immutable instance via `Lexicons::builtin()`.
//!
//! # Invariants
//! - Tables are never mutated after construction.
//! - `categories` keeps declaration order; category tie-breaks depend on it.
//! - All entries are stored lowercase.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// AFINN-165 word list, one `word<TAB>weight` entry per line.
const AFINN_165: &str = include_str!("../../data/afinn-165.txt");

const OVERRIDE_POSITIVE: &[&str] = &[
    "güzel", "harika", "mükemmel", "muhteşem", "süper", "iyi", "başarılı", "mutlu",
    "sevinçli", "keyifli", "hoş", "tatlı", "sevimli", "eğlenceli", "pozitif",
    "amazing", "great", "good", "excellent", "wonderful", "fantastic",
    "happy", "joy", "love", "perfect", "awesome", "brilliant", "beautiful", "nice",
];

const OVERRIDE_NEGATIVE: &[&str] = &[
    "kötü", "berbat", "korkunç", "üzücü", "kızgın", "sinirli", "mutsuz", "zor",
    "problem", "sorun", "hata", "yanlış", "başarısız", "negatif", "kırık",
    "terrible", "awful", "bad", "horrible", "sad", "angry", "frustrated", "disappointed",
];

const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "personal",
        &[
            "personal", "diary", "journal", "feeling", "emotion", "family", "friend",
            "kişisel", "günlük", "his", "duygu", "aile", "arkadaş", "sevgili", "ilişki",
            "güzel", "gün", "mutlu", "sevinçli", "keyifli",
        ],
    ),
    (
        "work",
        &[
            "work", "job", "project", "meeting", "deadline", "task", "business", "office",
            "iş", "işe", "proje", "toplantı", "görev", "ofis", "çalışma", "maaş", "patron",
        ],
    ),
    (
        "education",
        &[
            "ders", "okul", "üniversite", "sınav", "ödev", "araştırma", "kitap", "eğitim",
            "study", "learn", "school", "university", "exam", "homework", "research", "book",
        ],
    ),
    (
        "health",
        &[
            "sağlık", "doktor", "ilaç", "egzersiz", "diyet", "spor", "hastane",
            "health", "doctor", "medicine", "exercise", "diet", "wellness", "fitness",
        ],
    ),
    (
        "finance",
        &[
            "para", "bütçe", "harcama", "yatırım", "banka", "maliyet", "fiyat", "ücret",
            "money", "budget", "expense", "investment", "bank", "financial", "cost", "price",
        ],
    ),
    (
        "travel",
        &[
            "seyahat", "tatil", "uçak", "otel", "gezi", "yolculuk", "ülke", "şehir",
            "travel", "trip", "vacation", "flight", "hotel", "destination", "journey",
        ],
    ),
    (
        "food",
        &[
            "yemek", "tarif", "restoran", "mutfak", "kahvaltı", "öğle", "akşam", "lezzetli",
            "food", "recipe", "restaurant", "cooking", "meal", "dinner", "lunch", "breakfast",
        ],
    ),
    (
        "technology",
        &[
            "teknoloji", "yazılım", "uygulama", "bilgisayar", "program", "kod", "dijital",
            "technology", "software", "app", "computer", "programming", "code", "digital",
        ],
    ),
    (
        "shopping",
        &[
            "alışveriş", "satın", "mağaza", "ürün", "sipariş", "teslimat", "market",
            "shopping", "buy", "purchase", "store", "product", "order", "delivery",
        ],
    ),
    (
        "entertainment",
        &[
            "film", "müzik", "oyun", "eğlence", "hobi", "spor", "sinema", "konser",
            "movie", "music", "game", "entertainment", "fun", "hobby", "sport",
        ],
    ),
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "from", "up", "about", "into", "through", "during", "before", "after",
    "above", "below", "is", "are", "was", "were", "be", "been", "being", "have",
    "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "must", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them",
    "bir", "bu", "şu", "ve", "ile", "için", "var", "yok", "ben", "sen", "o", "biz", "siz",
    "onlar",
];

static BUILTIN: Lazy<Lexicons> = Lazy::new(Lexicons::from_tables);

/// One taxonomy bucket and its keyword list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryBucket {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable analysis configuration.
///
/// `Default` yields empty tables, useful for isolating a single pass in
/// tests. Production code uses `Lexicons::builtin()`.
#[derive(Debug, Clone, Default)]
pub struct Lexicons {
    /// Base polarity weight per lowercase word.
    pub polarity: HashMap<String, f64>,
    /// Words worth +2 per matching token.
    pub positive_overrides: Vec<String>,
    /// Words worth -2 per matching token.
    pub negative_overrides: Vec<String>,
    /// Taxonomy buckets in tie-break order.
    pub categories: Vec<CategoryBucket>,
    /// Tokens never reported as keywords.
    pub stop_words: HashSet<String>,
}

impl Lexicons {
    /// Returns the shared builtin tables, built on first use.
    pub fn builtin() -> &'static Lexicons {
        &BUILTIN
    }

    fn from_tables() -> Self {
        Self {
            polarity: parse_polarity(AFINN_165),
            positive_overrides: OVERRIDE_POSITIVE.iter().map(|w| (*w).to_string()).collect(),
            negative_overrides: OVERRIDE_NEGATIVE.iter().map(|w| (*w).to_string()).collect(),
            categories: TAXONOMY
                .iter()
                .map(|(name, keywords)| CategoryBucket::new(*name, keywords.iter().copied()))
                .collect(),
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// Parses `word<TAB>weight` lines; malformed lines are skipped.
fn parse_polarity(raw: &str) -> HashMap<String, f64> {
    raw.lines()
        .filter_map(|line| {
            let (word, weight) = line.split_once('\t')?;
            let weight = weight.trim().parse::<i8>().ok()?;
            Some((word.to_lowercase(), f64::from(weight)))
        })
        .collect()
}

/// Bidirectional substring match used by the override pass.
///
/// Short entries match many unrelated tokens; a lone `x` hits `excellent`.
pub fn fuzzy_match(token: &str, entry: &str) -> bool {
    token.contains(entry) || entry.contains(token)
}

/// Taxonomy variant of `fuzzy_match`: a single-character token only
/// matches an identical entry.
pub fn category_match(token: &str, entry: &str) -> bool {
    if token.chars().nth(1).is_none() {
        return token == entry;
    }
    fuzzy_match(token, entry)
}
