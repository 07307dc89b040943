use super::*;
use crate::typography::table::zhuyin_for;

struct FixedDict(Option<&'static str>);

impl PhoneticDictionary for FixedDict {
    fn lookup(&self, _ch: char) -> anyhow::Result<Option<String>> {
        Ok(self.0.map(str::to_owned))
    }
}

struct FailingDict;

impl PhoneticDictionary for FailingDict {
    fn lookup(&self, _ch: char) -> anyhow::Result<Option<String>> {
        anyhow::bail!("dictionary offline")
    }
}

#[test]
fn embedded_table_knows_ice() {
    assert_eq!(zhuyin_for('冰'), Some("ㄅㄧㄥ"));
    assert_eq!(zhuyin_for('x'), None);
}

#[test]
fn split_separates_trailing_tone() {
    let split = split_phonetic_symbols("ㄒㄩㄝˊ");
    assert_eq!(split.main, vec!['ㄒ', 'ㄩ', 'ㄝ']);
    assert_eq!(split.tone, Some('ˊ'));
}

#[test]
fn split_handles_empty_and_toneless_input() {
    assert_eq!(split_phonetic_symbols(""), PhoneticSplit::default());
    let split = split_phonetic_symbols("ㄅㄧㄥ");
    assert_eq!(split.main, vec!['ㄅ', 'ㄧ', 'ㄥ']);
    assert_eq!(split.tone, None);
    let split = split_phonetic_symbols("ˇ");
    assert!(split.main.is_empty());
    assert_eq!(split.tone, Some('ˇ'));
}

#[test]
fn split_drops_non_trailing_tone_marks_and_whitespace() {
    let split = split_phonetic_symbols("ˊㄇ ㄚˇ");
    assert_eq!(split.main, vec!['ㄇ', 'ㄚ']);
    assert_eq!(split.tone, Some('ˇ'));
}

#[test]
fn han_classification_and_extraction() {
    assert!(is_han_character('冰'));
    assert!(is_han_character('\u{3400}'));
    assert!(!is_han_character('ㄅ'));
    assert!(!is_han_character('A'));
    assert!(is_zhuyin_symbol('ㄅ'));
    assert!(is_zhuyin_symbol('˙'));
    assert!(!is_zhuyin_symbol('冰'));
    assert_eq!(extract_han_chars("ㄅㄧㄥ冰 淇ㄑㄧˊ淋"), vec!['冰', '淇', '淋']);
}

#[test]
fn dictionary_takes_precedence_over_table() {
    let dict = FixedDict(Some("ㄅㄧㄥˋ"));
    let resolver = TypographyResolver::with_dictionary(&dict);
    assert_eq!(resolver.lookup_phonetic('冰').as_deref(), Some("ㄅㄧㄥˋ"));
}

#[test]
fn dictionary_miss_or_failure_falls_back_to_table() {
    let miss = FixedDict(None);
    let blank = FixedDict(Some("  "));
    for dict in [&miss as &dyn PhoneticDictionary, &blank, &FailingDict] {
        let resolver = TypographyResolver::with_dictionary(dict);
        assert_eq!(resolver.lookup_phonetic('冰').as_deref(), Some("ㄅㄧㄥ"));
        assert_eq!(resolver.lookup_phonetic('\u{4E01}'), None);
    }
}

#[test]
fn phonetics_for_word_skips_non_han() {
    let resolver = TypographyResolver::new();
    let out = resolver.phonetics_for_word("ㄒㄩㄝˊ學生");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].host, '學');
    assert_eq!(out[0].split.tone, Some('ˊ'));
    assert_eq!(out[1].host, '生');
    assert_eq!(out[1].split.main, vec!['ㄕ', 'ㄥ']);
    assert_eq!(out[1].split.tone, None);
}

#[test]
fn unknown_character_has_empty_split() {
    let resolver = TypographyResolver::new();
    let out = resolver.phonetics_for_word("\u{4E01}");
    assert_eq!(out[0].reading, None);
    assert!(out[0].split.main.is_empty());
}
