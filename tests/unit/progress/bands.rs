use super::*;

#[test]
fn bands_partition_width_exactly() {
    for width in 0..=257u32 {
        let bands = band_layout(width);
        assert_eq!(bands[0].start, 0);
        assert_eq!(bands[0].end, bands[1].start);
        assert_eq!(bands[1].end, bands[2].start);
        assert_eq!(bands[2].end, width);
        let total: u32 = bands.iter().map(Band::len).sum();
        assert_eq!(total, width, "width={width}");
    }
}

#[test]
fn full_hd_bar_splits_by_ratio() {
    let bands = band_layout(1000);
    assert_eq!(
        bands.map(|b| (b.kind, b.start, b.end)),
        [
            (BandKind::Safe, 0, 500),
            (BandKind::Warn, 500, 700),
            (BandKind::Danger, 700, 1000)
        ]
    );
}

#[test]
fn last_band_absorbs_rounding() {
    // 0.5*3 = 1.5 -> 2 (ties to even), 0.2*3 = 0.6 -> 1, danger gets the remaining 0.
    let bands = band_layout(3);
    assert_eq!(bands[0].len(), 2);
    assert_eq!(bands[1].len(), 1);
    assert!(bands[2].is_empty());
}

#[test]
fn mask_maps_columns_to_bands() {
    let mask = BandMask::new(10);
    assert_eq!(mask.band_at(0), Some(BandKind::Safe));
    assert_eq!(mask.band_at(4), Some(BandKind::Safe));
    assert_eq!(mask.band_at(5), Some(BandKind::Warn));
    assert_eq!(mask.band_at(7), Some(BandKind::Danger));
    assert_eq!(mask.band_at(10), None);
}

#[test]
fn spans_are_ordered_and_non_empty() {
    let mask = BandMask::new(10);
    let spans = mask.spans(4, 10);
    let kinds: Vec<(BandKind, u32, u32)> = spans.iter().map(|s| (s.kind, s.start, s.end)).collect();
    assert_eq!(
        kinds,
        vec![
            (BandKind::Safe, 4, 5),
            (BandKind::Warn, 5, 7),
            (BandKind::Danger, 7, 10)
        ]
    );
    let spans = mask.spans(8, 10);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].color, BandKind::Danger.color());
    assert!(mask.spans(10, 10).is_empty());
}
