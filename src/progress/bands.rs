use crate::foundation::{core::Rgba8, math::round_px};

/// One of the three color zones of the progress bar, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    /// Plenty of time left.
    Safe,
    /// Getting close.
    Warn,
    /// Last stretch; the part that stays visible longest.
    Danger,
}

impl BandKind {
    /// Share of the bar width.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Safe => 0.5,
            Self::Warn => 0.2,
            Self::Danger => 0.3,
        }
    }

    /// Fill color.
    pub fn color(self) -> Rgba8 {
        match self {
            Self::Safe => Rgba8::opaque(0x2e, 0xcc, 0x71),
            Self::Warn => Rgba8::opaque(0xf1, 0xc4, 0x0f),
            Self::Danger => Rgba8::opaque(0xe7, 0x4c, 0x3c),
        }
    }
}

/// Half-open pixel range `[start, end)` of one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Band {
    /// Band kind.
    pub kind: BandKind,
    /// First column.
    pub start: u32,
    /// One past the last column.
    pub end: u32,
}

impl Band {
    /// Columns covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the band covers no columns.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, width)` into safe/warn/danger bands. The last band absorbs rounding so the three
/// always partition the bar exactly.
pub fn band_layout(width: u32) -> [Band; 3] {
    let w = i64::from(width);
    let safe_end = round_px(f64::from(width) * BandKind::Safe.ratio()).clamp(0, w);
    let warn_end = (safe_end + round_px(f64::from(width) * BandKind::Warn.ratio())).clamp(0, w);
    let safe_end = safe_end as u32;
    let warn_end = warn_end as u32;
    [
        Band {
            kind: BandKind::Safe,
            start: 0,
            end: safe_end,
        },
        Band {
            kind: BandKind::Warn,
            start: safe_end,
            end: warn_end,
        },
        Band {
            kind: BandKind::Danger,
            start: warn_end,
            end: width,
        },
    ]
}

/// Visible slice of one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorSpan {
    /// Band the slice belongs to.
    pub kind: BandKind,
    /// First visible column (bar-relative).
    pub start: u32,
    /// One past the last visible column.
    pub end: u32,
    /// Fill color.
    pub color: Rgba8,
}

/// Band layout of one bar width plus its per-column band lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandMask {
    /// Bar width in pixels.
    pub width: u32,
    /// The three bands.
    pub bands: [Band; 3],
    columns: Vec<BandKind>,
}

impl BandMask {
    /// Build the mask for `width` columns.
    pub fn new(width: u32) -> Self {
        let bands = band_layout(width);
        let mut columns = Vec::with_capacity(width as usize);
        for band in &bands {
            columns.extend(std::iter::repeat_n(band.kind, band.len() as usize));
        }
        Self {
            width,
            bands,
            columns,
        }
    }

    /// Band owning column `x`.
    pub fn band_at(&self, x: u32) -> Option<BandKind> {
        self.columns.get(x as usize).copied()
    }

    /// Ordered non-empty intersections of `[x_start, x_end)` with the bands.
    pub fn spans(&self, x_start: u32, x_end: u32) -> Vec<ColorSpan> {
        self.bands
            .iter()
            .filter_map(|band| {
                let start = band.start.max(x_start);
                let end = band.end.min(x_end);
                (start < end).then(|| ColorSpan {
                    kind: band.kind,
                    start,
                    end,
                    color: band.kind.color(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/bands.rs"]
mod tests;
