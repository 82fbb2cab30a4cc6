/*!
 * Lexicon-driven part-of-speech tagging.
 *
 * Closed word classes (determiners, pronouns, prepositions, conjunctions,
 * particles, interjections) are small enough to enumerate; open classes fall
 * back to morphological suffix heuristics. Anything the rules cannot place
 * stays untagged rather than being forced into a class.
 */

use std::collections::HashSet;

use isolang::Language;
use once_cell::sync::Lazy;

use super::LexicalClass;

static EN_DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "its", "our",
        "their", "each", "every", "either", "neither", "some", "any", "no", "both", "all", "few",
        "many", "much", "several", "such", "what", "which", "whose",
    ])
});

static EN_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "mine",
        "yours", "hers", "ours", "theirs", "myself", "yourself", "himself", "herself", "itself",
        "ourselves", "themselves", "who", "whom", "someone", "anyone", "everyone", "nobody",
        "something", "anything", "everything", "nothing",
    ])
});

static EN_PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
        "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
        "under", "again", "near", "without", "within", "along", "across", "behind", "beyond",
        "among", "around", "toward", "towards", "upon", "onto", "until",
    ])
});

static EN_CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while",
        "whereas", "unless", "since", "if", "than", "whether", "when", "whenever", "where",
        "wherever", "as",
    ])
});

static EN_PARTICLES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["to", "not", "n't"]));

static EN_INTERJECTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "oh", "ah", "wow", "ouch", "hey", "hi", "hello", "alas", "hmm", "oops", "yes", "yeah",
        "no", "please", "well", "okay",
    ])
});

// Auxiliaries and high-frequency irregular verbs that suffix rules miss
static EN_COMMON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
        "does", "did", "done", "go", "goes", "went", "gone", "say", "says", "said", "get", "got",
        "make", "made", "know", "knew", "known", "think", "thought", "take", "took", "taken",
        "see", "saw", "seen", "come", "came", "want", "give", "gave", "given", "find", "found",
        "tell", "told", "become", "became", "leave", "left", "feel", "felt", "put", "bring",
        "brought", "keep", "kept", "let", "begin", "began", "begun", "seem", "seemed", "can",
        "could", "will", "would", "shall", "should", "may", "might", "must",
    ])
});

static EN_COMMON_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "very", "too", "quite", "rather", "almost", "always", "never", "often", "sometimes",
        "soon", "now", "then", "here", "there", "today", "tomorrow", "yesterday", "already",
        "still", "just", "even", "only", "also", "perhaps", "maybe", "again", "away", "back",
    ])
});

static ES_DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "el", "la", "los", "las", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
        "ese", "esa", "esos", "esas", "aquel", "aquella", "mi", "mis", "tu", "tus", "su", "sus",
        "nuestro", "nuestra", "cada", "todo", "toda", "todos", "todas", "otro", "otra",
        "mucho", "mucha", "muchos", "muchas", "poco", "poca", "alguna", "algunos", "ninguna",
    ])
});

static ES_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "yo", "me", "mí", "nos", "nosotros", "nosotras", "te", "ti", "usted", "ustedes",
        "él", "ella", "ellos", "ellas", "lo", "le", "les", "se", "quien", "quienes", "que",
        "algo", "alguien", "nada", "nadie", "esto", "eso", "aquello",
    ])
});

static ES_PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "ante", "bajo", "con", "contra", "de", "desde", "durante", "en", "entre", "hacia",
        "hasta", "mediante", "para", "por", "según", "sin", "sobre", "tras",
    ])
});

static ES_CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "y", "e", "ni", "o", "u", "pero", "sino", "aunque", "porque", "pues", "si", "como",
        "cuando", "mientras", "donde",
    ])
});

static ES_PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from(["no"]));

static ES_INTERJECTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["ay", "eh", "hola", "uy", "vaya", "ojalá", "sí", "bueno", "claro"])
});

const EN_ADVERB_SUFFIXES: &[&str] = &["ly"];
const EN_NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ship", "hood", "ism", "ance", "ence", "er", "or",
];
const EN_ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "ish", "less", "est",
];
const EN_VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify"];

const ES_ADVERB_SUFFIXES: &[&str] = &["mente"];
const ES_NOUN_SUFFIXES: &[&str] = &["ción", "sión", "dad", "tad", "eza", "ismo", "ura", "aje"];
const ES_ADJECTIVE_SUFFIXES: &[&str] = &["oso", "osa", "ivo", "iva", "able", "ible", "ante"];
const ES_VERB_SUFFIXES: &[&str] = &["ar", "er", "ir", "ando", "iendo", "ado", "ido", "aba"];

/// Tag a single token with a lexical class.
///
/// The token is expected to be a word (no surrounding punctuation); `None`
/// means the rules could not place it, never that tagging failed.
pub fn tag(token: &str, language: Option<Language>) -> Option<LexicalClass> {
    if token.is_empty() {
        return None;
    }

    if is_number(token) {
        return Some(LexicalClass::Number);
    }

    let lowered = token.to_lowercase();
    match language {
        Some(Language::Spa) => tag_spanish(&lowered),
        // English rules double as the fallback: closed-class hits are
        // reliable even when detection guessed wrong on a short text
        _ => tag_english(&lowered),
    }
}

fn tag_english(word: &str) -> Option<LexicalClass> {
    if EN_DETERMINERS.contains(word) {
        return Some(LexicalClass::Determiner);
    }
    if EN_PRONOUNS.contains(word) {
        return Some(LexicalClass::Pronoun);
    }
    if EN_PARTICLES.contains(word) {
        return Some(LexicalClass::Particle);
    }
    if EN_PREPOSITIONS.contains(word) {
        return Some(LexicalClass::Preposition);
    }
    if EN_CONJUNCTIONS.contains(word) {
        return Some(LexicalClass::Conjunction);
    }
    if EN_INTERJECTIONS.contains(word) {
        return Some(LexicalClass::Interjection);
    }
    if EN_COMMON_VERBS.contains(word) {
        return Some(LexicalClass::Verb);
    }
    if EN_COMMON_ADVERBS.contains(word) {
        return Some(LexicalClass::Adverb);
    }

    suffix_class(
        word,
        EN_ADVERB_SUFFIXES,
        EN_VERB_SUFFIXES,
        EN_ADJECTIVE_SUFFIXES,
        EN_NOUN_SUFFIXES,
    )
}

fn tag_spanish(word: &str) -> Option<LexicalClass> {
    if ES_DETERMINERS.contains(word) {
        return Some(LexicalClass::Determiner);
    }
    if ES_PRONOUNS.contains(word) {
        return Some(LexicalClass::Pronoun);
    }
    if ES_PARTICLES.contains(word) {
        return Some(LexicalClass::Particle);
    }
    if ES_PREPOSITIONS.contains(word) {
        return Some(LexicalClass::Preposition);
    }
    if ES_CONJUNCTIONS.contains(word) {
        return Some(LexicalClass::Conjunction);
    }
    if ES_INTERJECTIONS.contains(word) {
        return Some(LexicalClass::Interjection);
    }

    suffix_class(
        word,
        ES_ADVERB_SUFFIXES,
        ES_VERB_SUFFIXES,
        ES_ADJECTIVE_SUFFIXES,
        ES_NOUN_SUFFIXES,
    )
}

fn suffix_class(
    word: &str,
    adverb: &[&str],
    verb: &[&str],
    adjective: &[&str],
    noun: &[&str],
) -> Option<LexicalClass> {
    // Suffix rules need a stem left over, otherwise "ring" tags as a verb
    // for its "ing" and "ed" beats out two-letter words entirely
    let has_stem = |suffix: &&str| word.len() > suffix.len() + 2 && word.ends_with(*suffix);

    if adverb.iter().any(has_stem) {
        return Some(LexicalClass::Adverb);
    }
    if noun.iter().any(has_stem) {
        return Some(LexicalClass::Noun);
    }
    if adjective.iter().any(has_stem) {
        return Some(LexicalClass::Adjective);
    }
    if verb.iter().any(has_stem) {
        return Some(LexicalClass::Verb);
    }

    None
}

fn is_number(token: &str) -> bool {
    let mut digits = 0usize;
    for ch in token.chars() {
        if ch.is_ascii_digit() {
            digits += 1;
        } else if !matches!(ch, '.' | ',' | '-' | '%') {
            return false;
        }
    }
    digits > 0
}
