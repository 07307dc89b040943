use super::*;
use crate::test_support::{EmptyCatalog, alphabet_catalog};

#[test]
fn variant_names_follow_case_convention() {
    assert_eq!(glyph_variant_name('A').as_deref(), Some("A_upper"));
    assert_eq!(glyph_variant_name('a').as_deref(), Some("a_lower"));
    assert_eq!(glyph_variant_name('7').as_deref(), Some("7"));
    assert_eq!(glyph_variant_name('!'), None);
    assert_eq!(glyph_variant_name('冰'), None);
}

#[test]
fn every_char_resolves_to_exactly_one_outcome() {
    let catalog = alphabet_catalog(100, 200);
    match resolve_glyph('I', &catalog) {
        Some(GlyphResolution::Found(g)) => {
            assert_eq!(g.ch, 'I');
            assert_eq!((g.source_w, g.source_h), (100, 200));
            assert_eq!(g.asset_ref, "letters/I_upper.png");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        resolve_glyph('?', &catalog),
        Some(GlyphResolution::Missing(MissingGlyph {
            ch: '?',
            reason: MissingReason::Unsupported
        }))
    );
    assert_eq!(resolve_glyph(' ', &catalog), None);
}

#[test]
fn catalog_failures_are_reported_with_reason() {
    let res = resolve_glyph('a', &EmptyCatalog(MissingReason::Unreadable));
    assert_eq!(
        res,
        Some(GlyphResolution::Missing(MissingGlyph {
            ch: 'a',
            reason: MissingReason::Unreadable
        }))
    );
    let empty = std::collections::BTreeMap::<String, GlyphSource>::new();
    assert!(matches!(
        resolve_glyph('a', &empty),
        Some(GlyphResolution::Missing(MissingGlyph {
            reason: MissingReason::Missing,
            ..
        }))
    ));
}

#[test]
fn zero_sized_source_is_unreadable() {
    let mut catalog = alphabet_catalog(100, 200);
    catalog.insert(
        "b_lower".to_string(),
        GlyphSource {
            width: 0,
            height: 200,
            asset_ref: "letters/b_lower.png".to_string(),
        },
    );
    assert!(matches!(
        resolve_glyph('b', &catalog),
        Some(GlyphResolution::Missing(MissingGlyph {
            reason: MissingReason::Unreadable,
            ..
        }))
    ));
}
