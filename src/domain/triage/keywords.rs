//! Curated keyword tables for risk classification.
//!
//! Kept as plain data so the lists can be reviewed and extended without
//! touching the classification logic. All entries are lowercase; matching
//! lowercases the input first. Accented and unaccented spellings are both
//! listed because user input is inconsistent about diacritics.

/// Phrases indicating acute self-harm risk.
pub(super) const HIGH_RISK_KEYWORDS: &[&str] = &[
    "suicídio",
    "suicidio",
    "me matar",
    "tirar minha vida",
    "tirar a minha vida",
    "acabar com tudo",
    "não quero mais viver",
    "nao quero mais viver",
    "não aguento mais viver",
    "nao aguento mais viver",
    "me machucar",
    "me cortar",
    "autolesão",
    "autolesao",
];

/// Phrases indicating distress short of acute risk.
pub(super) const DISTRESS_KEYWORDS: &[&str] = &[
    "depressão",
    "depressao",
    "deprimido",
    "deprimida",
    "pânico",
    "panico",
    "ansiedade",
    "angústia",
    "angustia",
    "sem esperança",
    "sem esperanca",
    "desesperança",
    "desesperanca",
    "muito sozinho",
    "muito sozinha",
    "isolado",
    "isolada",
];
