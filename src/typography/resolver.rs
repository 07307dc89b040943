use crate::typography::table;

/// Second-tone mark.
pub const TONE_RISING: char = 'ˊ';
/// Third-tone mark.
pub const TONE_DIPPING: char = 'ˇ';
/// Fourth-tone mark.
pub const TONE_FALLING: char = 'ˋ';
/// Neutral-tone mark.
pub const TONE_NEUTRAL: char = '˙';

/// All recognized tone marks.
pub const TONE_MARKS: [char; 4] = [TONE_RISING, TONE_DIPPING, TONE_FALLING, TONE_NEUTRAL];

/// External phonetic dictionary consulted before the embedded table.
///
/// `Ok(None)` means "no entry"; `Err` is a lookup failure. Both fall back to the embedded table.
pub trait PhoneticDictionary: Send + Sync {
    /// Look up the Zhuyin reading for one character.
    fn lookup(&self, ch: char) -> anyhow::Result<Option<String>>;
}

/// Main symbols and optional trailing tone mark of one Zhuyin syllable.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PhoneticSplit {
    /// Symbols stacked vertically, in reading order.
    pub main: Vec<char>,
    /// Trailing tone mark, if any.
    pub tone: Option<char>,
}

/// Phonetic breakdown of one Han character.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CharPhonetics {
    /// The Han character.
    pub host: char,
    /// Raw reading, `None` when neither dictionary knows the character.
    pub reading: Option<String>,
    /// Split reading (empty when `reading` is `None`).
    pub split: PhoneticSplit,
}

/// Whether `ch` is one of the four tone marks.
pub fn is_tone_mark(ch: char) -> bool {
    TONE_MARKS.contains(&ch)
}

/// Whether `ch` is a CJK Unified Ideograph (base block or Extension A).
pub fn is_han_character(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

/// Whether `ch` is a Bopomofo symbol or tone mark.
pub fn is_zhuyin_symbol(ch: char) -> bool {
    matches!(ch, '\u{3100}'..='\u{312F}' | '\u{31A0}'..='\u{31BF}') || is_tone_mark(ch)
}

/// Han characters of a mixed phonetic/Han string, in order.
pub fn extract_han_chars(text: &str) -> Vec<char> {
    text.chars().filter(|&ch| is_han_character(ch)).collect()
}

/// Split a Zhuyin syllable into its main symbols and trailing tone mark.
///
/// Only a trailing tone mark counts as the tone; stray tone marks elsewhere are dropped.
/// Whitespace is ignored.
pub fn split_phonetic_symbols(reading: &str) -> PhoneticSplit {
    let mut symbols: Vec<char> = reading.chars().filter(|ch| !ch.is_whitespace()).collect();
    let tone = match symbols.last() {
        Some(&last) if is_tone_mark(last) => {
            symbols.pop();
            Some(last)
        }
        _ => None,
    };
    symbols.retain(|&ch| !is_tone_mark(ch));
    PhoneticSplit {
        main: symbols,
        tone,
    }
}

/// Resolves phonetic readings, preferring an optional external dictionary.
#[derive(Clone, Copy, Default)]
pub struct TypographyResolver<'a> {
    dictionary: Option<&'a dyn PhoneticDictionary>,
}

impl std::fmt::Debug for TypographyResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypographyResolver")
            .field("has_dictionary", &self.dictionary.is_some())
            .finish()
    }
}

impl<'a> TypographyResolver<'a> {
    /// Resolver backed only by the embedded table.
    pub fn new() -> Self {
        Self { dictionary: None }
    }

    /// Resolver that consults `dictionary` first.
    pub fn with_dictionary(dictionary: &'a dyn PhoneticDictionary) -> Self {
        Self {
            dictionary: Some(dictionary),
        }
    }

    /// Zhuyin reading for `ch`, or `None` if no source maps it. Never fails.
    pub fn lookup_phonetic(&self, ch: char) -> Option<String> {
        if let Some(dict) = self.dictionary {
            match dict.lookup(ch) {
                Ok(Some(reading)) if !reading.trim().is_empty() => return Some(reading),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%ch, error = %err, "phonetic dictionary lookup failed, using embedded table");
                }
            }
        }
        table::zhuyin_for(ch).map(str::to_owned)
    }

    /// Phonetic breakdown of every Han character in `text`.
    pub fn phonetics_for_word(&self, text: &str) -> Vec<CharPhonetics> {
        extract_han_chars(text)
            .into_iter()
            .map(|host| {
                let reading = self.lookup_phonetic(host);
                let split = reading
                    .as_deref()
                    .map(split_phonetic_symbols)
                    .unwrap_or_default();
                CharPhonetics {
                    host,
                    reading,
                    split,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/resolver.rs"]
mod tests;
