use crate::{
    compose::config::LayoutConfig,
    compose::model::{
        LayoutResult, LettersLayout, LettersMode, PlacedHan, PlacedLetter, RevealLayout,
        TimerLayout, WordZhLayout, ZhuyinColumn,
    },
    compose::style::{ElementKind, LayoutStyle},
    compose::underline::{UNDERLINE_BASELINE_FALLBACK, UnderlineFrame, place_underlines},
    foundation::core::{BoundingBox, Canvas},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{px_u32, round_px},
    letters::catalog::{GlyphCatalog, MissingGlyph},
    letters::planner::{LetterPackParams, plan_letters},
    metrics::text::{TextMetrics, TextSize, fit_font_size, measure_text},
    timeline::formatter::format_countdown,
    typography::resolver::{CharPhonetics, PhoneticDictionary, TypographyResolver},
    zhuyin::column::{ColumnPlan, ToneAlignment, layout_column},
};

/// Size budget multiplier applied to a background element after a collision.
pub const SHRINK_FACTOR: f64 = 0.85;

/// Shrink rounds before a collision is reported as unresolvable.
pub const MAX_SHRINK_ATTEMPTS: u32 = 12;

/// Collaborators and style for [`compose_layout`].
#[derive(Clone, Copy)]
pub struct LayoutEnv<'a> {
    /// Glyph image metadata.
    pub catalog: &'a dyn GlyphCatalog,
    /// Text measurement.
    pub metrics: &'a dyn TextMetrics,
    /// Optional phonetic dictionary consulted before the embedded table.
    pub dictionary: Option<&'a dyn PhoneticDictionary>,
    /// Visual parameters.
    pub style: &'a LayoutStyle,
}

impl std::fmt::Debug for LayoutEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEnv")
            .field("has_dictionary", &self.dictionary.is_some())
            .field("style", self.style)
            .finish_non_exhaustive()
    }
}

impl<'a> LayoutEnv<'a> {
    /// Environment without a phonetic dictionary.
    pub fn new(
        catalog: &'a dyn GlyphCatalog,
        metrics: &'a dyn TextMetrics,
        style: &'a LayoutStyle,
    ) -> Self {
        Self {
            catalog,
            metrics,
            dictionary: None,
            style,
        }
    }

    /// Consult `dictionary` before the embedded reading table.
    pub fn with_dictionary(mut self, dictionary: &'a dyn PhoneticDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PxRect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl PxRect {
    fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
        }
    }

    fn from_box(b: BoundingBox) -> Self {
        Self::new(i64::from(b.x), i64::from(b.y), i64::from(b.w), i64::from(b.h))
    }

    fn right(&self) -> i64 {
        self.x + self.w
    }

    fn bottom(&self) -> i64 {
        self.y + self.h
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    fn inside(&self, canvas: Canvas) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= i64::from(canvas.width)
            && self.bottom() <= i64::from(canvas.height)
    }

    fn to_box(self) -> ReelResult<BoundingBox> {
        BoundingBox::from_signed(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Copy, Debug)]
struct Region {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

struct LettersDraft {
    mode: LettersMode,
    rect: Option<PxRect>,
    glyphs: Vec<(PlacedLetterDraft, PxRect)>,
    gap: u32,
    font_size: Option<u32>,
    missing: Vec<MissingGlyph>,
}

struct PlacedLetterDraft {
    ch: char,
    asset_ref: String,
    scale: f64,
}

struct ColumnDraft {
    host: char,
    main: Vec<char>,
    tone: Option<char>,
    plan: ColumnPlan,
    main_rect: PxRect,
    tone_rect: Option<PxRect>,
}

struct WordDraft {
    text: String,
    font_size: u32,
    chars: Vec<(char, PxRect)>,
    columns: Vec<ColumnDraft>,
    rect: PxRect,
}

/// Place every element of one card on the canvas.
///
/// The reveal is authoritative: when the letters or the Han word collide with it (or with a
/// visible timer, each other, or the canvas edge) the colliding element's size budget is
/// multiplied by [`SHRINK_FACTOR`] and it is recomposed, up to [`MAX_SHRINK_ATTEMPTS`] times.
#[tracing::instrument(level = "debug", skip(config, env), fields(word = %config.word_en))]
pub fn compose_layout(config: &LayoutConfig, env: &LayoutEnv<'_>) -> ReelResult<LayoutResult> {
    config.validate()?;
    let style = env.style;
    style.validate()?;

    let canvas = config.canvas;
    let cw = i64::from(canvas.width);
    let ch = i64::from(canvas.height);
    let margin = i64::from(style.safe_margin);
    let gap = i64::from(style.region_gap);
    if cw <= 2 * margin || ch <= 2 * margin {
        return Err(ReelError::invalid_config(format!(
            "canvas {}x{} leaves no room inside the {margin}px safe margin",
            canvas.width, canvas.height
        )));
    }

    let (progress_bar, bottom_limit) = if config.progress_bar {
        let h = i64::from(style.progress_bar_height);
        let bar = PxRect::new(margin, ch - margin - h, cw - 2 * margin, h);
        if bar.y < margin {
            return Err(ReelError::invalid_config(
                "progress bar does not fit inside the safe margin",
            ));
        }
        (Some(bar.to_box()?), bar.y - gap)
    } else {
        (None, ch - margin)
    };

    let timer = place_timer(config, env, canvas)?;
    let top_limit = i64::from(timer.bbox.bottom()) + gap;

    let reveal = place_reveal(config, env, canvas, top_limit, bottom_limit)?;
    let content_bottom = reveal
        .as_ref()
        .map_or(bottom_limit, |r| i64::from(r.bbox.y) - gap);

    let gutter = i64::from(style.column_gutter);
    let col_w = (cw - 2 * margin - gutter) / 2;
    let region_h = content_bottom - top_limit;
    if region_h <= 0 || col_w <= 0 {
        return Err(ReelError::invalid_config(format!(
            "no room for letters and word between the timer and the reveal \
             (region {col_w}x{region_h})"
        )));
    }
    let left = Region {
        x: margin,
        y: top_limit,
        w: col_w,
        h: region_h,
    };
    let right = Region {
        x: margin + col_w + gutter,
        y: top_limit,
        w: col_w,
        h: region_h,
    };

    let reveal_underlines = match &reveal {
        Some(r) => place_underlines(
            &UnderlineFrame {
                text: &r.text,
                font: &style.fonts.latin,
                font_size: r.font_size,
                text_box: r.text_bbox,
                reveal_box: r.bbox,
                thickness: style.reveal.underline_thickness,
                canvas,
            },
            env.metrics,
        )?,
        None => Vec::new(),
    };

    let mut fixed = Vec::with_capacity(2);
    if let Some(r) = &reveal {
        fixed.push(PxRect::from_box(r.bbox));
    }
    if timer.visible {
        fixed.push(PxRect::from_box(timer.bbox));
    }
    let blocked = |rect: &PxRect| {
        !rect.inside(canvas) || fixed.iter().any(|f| f.overlaps(rect))
    };

    let resolver = env
        .dictionary
        .map_or_else(TypographyResolver::new, TypographyResolver::with_dictionary);

    let mut letters_scale = 1.0f64;
    let mut word_scale = 1.0f64;
    let mut attempt = 0u32;
    let (letters, word) = loop {
        let letters = compose_letters(config, env, left, letters_scale)?;
        let word = compose_word(&resolver, config, env, right, word_scale)?;

        let letters_blocked = letters.rect.as_ref().is_some_and(blocked);
        let word_blocked = word.as_ref().is_some_and(|w| blocked(&w.rect));
        let mutual = match (&letters.rect, &word) {
            (Some(a), Some(w)) => a.overlaps(&w.rect),
            _ => false,
        };
        if !letters_blocked && !word_blocked && !mutual {
            break (letters, word);
        }

        attempt += 1;
        if attempt > MAX_SHRINK_ATTEMPTS {
            return Err(ReelError::invalid_config(format!(
                "could not place letters and word clear of the reveal after \
                 {MAX_SHRINK_ATTEMPTS} shrink attempts"
            )));
        }
        if letters_blocked || mutual {
            letters_scale *= SHRINK_FACTOR;
        }
        if word_blocked || mutual {
            word_scale *= SHRINK_FACTOR;
        }
        tracing::debug!(
            attempt,
            letters_blocked,
            word_blocked,
            mutual,
            letters_scale,
            word_scale,
            "background element collides, shrinking"
        );
    };

    let missing = letters.missing.clone();
    let (word_zh, zhuyin_columns) = match word {
        Some(w) => finish_word(w)?,
        None => (None, Vec::new()),
    };

    let result = LayoutResult {
        canvas,
        letters: finish_letters(letters)?,
        word_zh,
        zhuyin_columns,
        timer,
        reveal,
        reveal_underlines,
        progress_bar,
        progress_bar_y: progress_bar.map(|b| b.y),
        missing,
    };
    result.check_invariants()?;

    tracing::debug!(
        attempts = attempt,
        missing = result.missing.len(),
        columns = result.zhuyin_columns.len(),
        "composed layout"
    );
    Ok(result)
}

fn place_timer(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    canvas: Canvas,
) -> ReelResult<TimerLayout> {
    let style = env.style;
    let size = style.timer.font_size;
    // Every tick label is measured so a proportional digit never outgrows the box. The
    // starting label wins ties.
    let mut label = String::new();
    let mut measured = TextSize::default();
    for secs in (0..=config.countdown_sec.ceil() as u64).rev() {
        let text = format_countdown(secs);
        let size_of = measure_text(env.metrics, &text, &style.fonts.timer, size)?;
        if label.is_empty() || size_of.width > measured.width {
            label = text;
            measured.width = size_of.width;
        }
        measured.height = measured.height.max(size_of.height);
    }
    let pad = i64::from(style.padding(ElementKind::Timer));
    let margin = i64::from(style.safe_margin);

    let w = i64::from(measured.width) + 2 * pad;
    let h = i64::from(measured.height) + 2 * pad;
    let rect = PxRect::new(i64::from(canvas.width) - margin - w, margin, w, h);
    if rect.x < margin || !rect.inside(canvas) {
        return Err(ReelError::invalid_config(format!(
            "timer label {label:?} ({w}x{h}) does not fit the canvas"
        )));
    }
    Ok(TimerLayout {
        bbox: rect.to_box()?,
        label,
        font_size: size,
        visible: config.timer_visible,
    })
}

fn place_reveal(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    canvas: Canvas,
    top_limit: i64,
    bottom_limit: i64,
) -> ReelResult<Option<RevealLayout>> {
    let text = config.word_en.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let style = env.style;
    // A band too thin for the stroke grows to hold the fallback offset, so underlines stay
    // inside the reveal box.
    let thickness = i64::from(style.reveal.underline_thickness.max(1));
    let reserve = match i64::from(style.reveal.underline_reserve) {
        r if r >= thickness => r,
        _ => UNDERLINE_BASELINE_FALLBACK + thickness,
    };
    let margin = i64::from(style.safe_margin);
    let cw = i64::from(canvas.width);

    let max_w = px_u32(cw - 2 * margin);
    let max_h = px_u32((bottom_limit - top_limit - reserve) / 2);
    if max_h == 0 {
        return Err(ReelError::invalid_config("no vertical room for the reveal"));
    }
    let (size, measured) = fit_font_size(
        env.metrics,
        text,
        &style.fonts.latin,
        style.reveal.font_size,
        style.reveal.min_font_size,
        max_w,
        max_h,
    )?;
    if measured.width > max_w || measured.height > max_h {
        return Err(ReelError::invalid_config(format!(
            "reveal {text:?} does not fit {max_w}x{max_h} even at {size}px"
        )));
    }

    let text_w = i64::from(measured.width);
    let text_h = i64::from(measured.height);
    let y = bottom_limit - text_h - reserve;
    let x = (cw - text_w) / 2;
    Ok(Some(RevealLayout {
        text: text.to_owned(),
        font_size: size,
        bbox: PxRect::new(x, y, text_w, text_h + reserve).to_box()?,
        text_bbox: PxRect::new(x, y, text_w, text_h).to_box()?,
    }))
}

fn compose_letters(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    region: Region,
    scale: f64,
) -> ReelResult<LettersDraft> {
    if config.letters_as_image {
        compose_letter_images(config, env, region, scale)
    } else {
        compose_letter_text(config, env, region, scale)
    }
}

fn compose_letter_images(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    region: Region,
    scale: f64,
) -> ReelResult<LettersDraft> {
    let style = &env.style.letters;
    let target = f64::from(style.target_height).min(region.h as f64) * scale;
    let params = LetterPackParams {
        target_height: px_u32(round_px(target).max(1)),
        available_width: px_u32(round_px(region.w as f64 * scale).max(1)),
        gap_base: style.gap_base * scale,
        extra_scale: style.extra_scale,
        anchor_x: region.x,
    };
    let plan = plan_letters(&config.letters, env.catalog, &params)?;
    if plan.entries.is_empty() {
        return Ok(LettersDraft {
            mode: LettersMode::Image,
            rect: None,
            glyphs: Vec::new(),
            gap: 0,
            font_size: None,
            missing: plan.missing,
        });
    }

    let span = plan.bbox.span();
    let run_h = i64::from(plan.bbox.h);
    let left = (region.x + (region.w - span) / 2).max(0);
    let dx = left - (region.x + plan.bbox.x_offset);
    let baseline = region.y + (region.h + run_h) / 2;

    let glyphs = plan
        .entries
        .into_iter()
        .map(|e| {
            let h = i64::from(e.height);
            let rect = PxRect::new(region.x + e.x_offset + dx, baseline - h, i64::from(e.width), h);
            (
                PlacedLetterDraft {
                    ch: e.ch,
                    asset_ref: e.asset_ref,
                    scale: e.scale,
                },
                rect,
            )
        })
        .collect();

    Ok(LettersDraft {
        mode: LettersMode::Image,
        rect: Some(PxRect::new(left, baseline - run_h, span, run_h)),
        glyphs,
        gap: plan.gap,
        font_size: None,
        missing: plan.missing,
    })
}

fn compose_letter_text(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    region: Region,
    scale: f64,
) -> ReelResult<LettersDraft> {
    let style = env.style;
    let text = config.letters.trim();
    let mut draft = LettersDraft {
        mode: LettersMode::Text,
        rect: None,
        glyphs: Vec::new(),
        gap: 0,
        font_size: None,
        missing: Vec::new(),
    };
    if text.is_empty() {
        return Ok(draft);
    }

    let start = px_u32(round_px(f64::from(style.letters.text_font_size) * scale).max(1));
    let (size, measured) = fit_font_size(
        env.metrics,
        text,
        &style.fonts.latin,
        start,
        style.letters.min_font_size.min(start),
        px_u32(region.w),
        px_u32(region.h),
    )?;
    if measured.width == 0 || measured.height == 0 {
        return Ok(draft);
    }
    let w = i64::from(measured.width);
    let h = i64::from(measured.height);
    draft.rect = Some(PxRect::new(
        region.x + (region.w - w) / 2,
        region.y + (region.h - h) / 2,
        w,
        h,
    ));
    draft.font_size = Some(size);
    Ok(draft)
}

struct UnitMetrics {
    host_w: i64,
    host_h: i64,
    column: Option<ColumnPlan>,
    column_w: i64,
    top: i64,
    bottom: i64,
}

impl UnitMetrics {
    fn width(&self, zhuyin_gap: i64) -> i64 {
        match self.column {
            Some(_) => self.host_w + zhuyin_gap + self.column_w,
            None => self.host_w,
        }
    }
}

struct RowMetrics {
    units: Vec<UnitMetrics>,
    width: i64,
    top: i64,
    height: i64,
}

fn measure_row(
    phonetics: &[CharPhonetics],
    size: u32,
    env: &LayoutEnv<'_>,
) -> ReelResult<RowMetrics> {
    let style = env.style;
    let zhuyin_gap = i64::from(style.word.zhuyin_gap);
    let tone_gap = i64::from(style.zhuyin.tone_gap);
    let mut buf = [0u8; 4];

    let mut units = Vec::with_capacity(phonetics.len());
    for p in phonetics {
        let host = measure_text(env.metrics, p.host.encode_utf8(&mut buf), &style.fonts.han, size)?;
        let column = if p.split.main.is_empty() {
            None
        } else {
            Some(layout_column(
                host.height,
                &p.split.main,
                p.split.tone,
                0,
                &style.zhuyin,
                env.metrics,
                &style.fonts.zhuyin,
            )?)
        };

        let host_h = i64::from(host.height);
        let (column_w, top, bottom) = match &column {
            None => (0, 0, host_h),
            Some(c) => {
                let main_w = i64::from(c.main_box_width);
                let main_bottom = c.main_start_y + i64::from(c.main_box_height);
                let tone_w = i64::from(c.tone_box_width.unwrap_or(0));
                let (tone_top, tone_bottom) = match c.tone_start_y {
                    Some(y) => (y, y + i64::from(c.tone_box_height.unwrap_or(0))),
                    None => (0, 0),
                };
                let w = match c.tone_alignment {
                    ToneAlignment::Right => main_w + tone_gap + tone_w,
                    ToneAlignment::Center => main_w.max(tone_w),
                    ToneAlignment::None => main_w,
                };
                (
                    w,
                    tone_top.min(c.main_start_y).min(0),
                    host_h.max(main_bottom).max(tone_bottom),
                )
            }
        };
        units.push(UnitMetrics {
            host_w: i64::from(host.width),
            host_h,
            column,
            column_w,
            top,
            bottom,
        });
    }

    let char_gap = i64::from(style.word.char_gap);
    let width = units.iter().map(|u| u.width(zhuyin_gap)).sum::<i64>()
        + char_gap * (units.len().saturating_sub(1) as i64);
    let top = units.iter().map(|u| u.top).min().unwrap_or(0);
    let bottom = units.iter().map(|u| u.bottom).max().unwrap_or(0);
    Ok(RowMetrics {
        units,
        width,
        top,
        height: bottom - top,
    })
}

fn compose_word(
    resolver: &TypographyResolver<'_>,
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    region: Region,
    scale: f64,
) -> ReelResult<Option<WordDraft>> {
    let phonetics = resolver.phonetics_for_word(&config.word_zh);
    if phonetics.is_empty() {
        return Ok(None);
    }
    let style = env.style;

    let mut size = px_u32(round_px(f64::from(style.word.font_size) * scale).max(1));
    let min_size = style.word.min_font_size.clamp(1, size);
    let row = loop {
        let row = measure_row(&phonetics, size, env)?;
        let fits = row.width <= region.w && row.height <= region.h;
        if fits || size <= min_size || row.width <= 0 || row.height <= 0 {
            break row;
        }
        let ratio = (region.w as f64 / row.width as f64).min(region.h as f64 / row.height as f64);
        let next = (f64::from(size) * ratio).floor() as u32;
        size = next.clamp(min_size, size - 1);
        tracing::debug!(size, "shrinking han row");
    };

    let zhuyin_gap = i64::from(style.word.zhuyin_gap);
    let tone_gap = i64::from(style.zhuyin.tone_gap);
    let char_gap = i64::from(style.word.char_gap);
    let x0 = region.x + (region.w - row.width) / 2;
    let y0 = region.y + (region.h - row.height) / 2 - row.top;

    let mut x = x0;
    let mut chars = Vec::with_capacity(row.units.len());
    let mut columns = Vec::new();
    let mut rect: Option<PxRect> = None;
    let mut grow = |r: PxRect| {
        rect = Some(match rect {
            Some(acc) => acc.union(&r),
            None => r,
        });
    };

    for (p, unit) in phonetics.iter().zip(row.units) {
        let unit_w = unit.width(zhuyin_gap);
        let host_rect = PxRect::new(x, y0, unit.host_w, unit.host_h);
        chars.push((p.host, host_rect));
        grow(host_rect);

        if let Some(plan) = unit.column {
            let cx = x + unit.host_w + zhuyin_gap;
            let main_w = i64::from(plan.main_box_width);
            let main_rect = PxRect::new(
                cx,
                y0 + plan.main_start_y,
                main_w,
                i64::from(plan.main_box_height),
            );
            grow(main_rect);

            let tone_rect = match (plan.tone_start_y, plan.tone_box_width, plan.tone_box_height) {
                (Some(ty), Some(tw), Some(th)) if tw > 0 && th > 0 => {
                    let tw = i64::from(tw);
                    let tx = match plan.tone_alignment {
                        ToneAlignment::Center => cx + (main_w - tw) / 2,
                        _ => cx + main_w + tone_gap,
                    };
                    Some(PxRect::new(tx, y0 + ty, tw, i64::from(th)))
                }
                _ => None,
            };
            if let Some(t) = tone_rect {
                grow(t);
            }
            columns.push(ColumnDraft {
                host: p.host,
                main: p.split.main.clone(),
                tone: p.split.tone,
                plan,
                main_rect,
                tone_rect,
            });
        } else {
            tracing::debug!(ch = %p.host, "no reading for han character, column omitted");
        }
        x += unit_w + char_gap;
    }

    let Some(rect) = rect else {
        return Ok(None);
    };
    Ok(Some(WordDraft {
        text: phonetics.iter().map(|p| p.host).collect(),
        font_size: size,
        chars,
        columns,
        rect,
    }))
}

fn finish_letters(draft: LettersDraft) -> ReelResult<LettersLayout> {
    let glyphs = draft
        .glyphs
        .into_iter()
        .map(|(g, rect)| {
            Ok(PlacedLetter {
                ch: g.ch,
                asset_ref: g.asset_ref,
                bbox: rect.to_box()?,
                scale: g.scale,
            })
        })
        .collect::<ReelResult<Vec<_>>>()?;
    Ok(LettersLayout {
        mode: draft.mode,
        bbox: draft.rect.map(PxRect::to_box).transpose()?,
        glyphs,
        gap: draft.gap,
        font_size: draft.font_size,
    })
}

fn finish_word(draft: WordDraft) -> ReelResult<(Option<WordZhLayout>, Vec<ZhuyinColumn>)> {
    let chars = draft
        .chars
        .into_iter()
        .map(|(ch, rect)| {
            Ok(PlacedHan {
                ch,
                bbox: rect.to_box()?,
            })
        })
        .collect::<ReelResult<Vec<_>>>()?;

    let columns = draft
        .columns
        .into_iter()
        .map(|c| {
            let main_bbox = c.main_rect.to_box()?;
            let tone_bbox = c.tone_rect.map(PxRect::to_box).transpose()?;
            let bbox = tone_bbox.map_or(main_bbox, |t| main_bbox.union(&t));
            Ok(ZhuyinColumn {
                host_char: c.host,
                main_symbols: c.main,
                tone_symbol: c.tone,
                bbox,
                main_bbox,
                tone_bbox,
                tone_alignment: c.plan.tone_alignment,
                font_size: c.plan.font_size,
                symbol_offsets: c.plan.symbol_offsets,
            })
        })
        .collect::<ReelResult<Vec<_>>>()?;

    let word = WordZhLayout {
        text: draft.text,
        font_size: draft.font_size,
        chars,
        bbox: draft.rect.to_box()?,
    };
    Ok((Some(word), columns))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
