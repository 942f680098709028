use chrono::Local;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::services::report_document::RenderError;
use crate::services::report_view::{
    REPORT_NOTES, REPORT_SUBTITLE, REPORT_TITLE, ReportView, Stat,
};

const INK: RGBColor = RGBColor(17, 24, 39);
const ACCENT: RGBColor = RGBColor(14, 165, 233);
const SOFT: RGBColor = RGBColor(241, 245, 249);
const MUTED: RGBColor = RGBColor(100, 116, 139);
const BORDER: RGBColor = RGBColor(226, 232, 240);

const PADDING: i32 = 40;
const GAP: i32 = 20;
const STAT_HEIGHT: i32 = 140;
const INPUT_ROW_HEIGHT: i32 = 34;
const BREAKDOWN_ROW_HEIGHT: i32 = 100;
const NOTE_LINE_HEIGHT: i32 = 24;
const NOTE_LINE_CHARS: usize = 110;

/// Rasterizes the content region of a report.
pub trait RegionCapture: Send + Sync {
    fn capture_region(&self, view: &ReportView) -> Result<RgbImage, RenderError>;
}

/// Draws the report content with plotters into an in-memory RGB bitmap.
#[derive(Debug, Clone)]
pub struct PlottersCapture {
    pub width: u32,
}

impl Default for PlottersCapture {
    fn default() -> Self {
        // 600 logical pixels at scale 2
        Self { width: 1200 }
    }
}

impl PlottersCapture {
    fn height_for(&self, view: &ReportView) -> u32 {
        let header = 180;
        let stats = STAT_HEIGHT + 2 * GAP;
        let inputs = 60 + view.input_rows().len() as i32 * INPUT_ROW_HEIGHT + GAP;
        let breakdown = 60 + view.breakdown().len() as i32 * BREAKDOWN_ROW_HEIGHT + GAP;
        let costs = STAT_HEIGHT + 2 * GAP;
        let notes = 40 + wrap_words(REPORT_NOTES, NOTE_LINE_CHARS).len() as i32 * NOTE_LINE_HEIGHT;
        (header + stats + inputs + breakdown + costs + notes + PADDING) as u32
    }
}

impl RegionCapture for PlottersCapture {
    fn capture_region(&self, view: &ReportView) -> Result<RgbImage, RenderError> {
        let width = self.width;
        let height = self.height_for(view);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            draw_report(&root, view, width as i32).map_err(|e| RenderError::Capture(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Capture(e.to_string()))?;
        }
        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Capture("bitmap buffer has unexpected size".to_string()))
    }
}

fn draw_report<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, view: &ReportView, width: i32) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let content_width = width - 2 * PADDING;

    let mut y = PADDING;
    root.draw(&Rectangle::new(
        [(PADDING, y), (PADDING + 12, y + 56)],
        ShapeStyle::from(&ACCENT).filled(),
    ))?;
    draw_text(root, REPORT_TITLE, (PADDING + 28, y), 44, &INK)?;
    y += 64;
    draw_text(root, REPORT_SUBTITLE, (PADDING, y), 22, &MUTED)?;
    y += 36;
    let context = format!(
        "Locale: {} | Currency: {} | Generated {}",
        view.locale.code(),
        view.currency.code(),
        Local::now().format("%Y-%m-%d")
    );
    draw_text(root, &context, (PADDING, y), 18, &MUTED)?;
    y = 180;

    y += GAP;
    draw_stat_row(root, &view.headline_stats(), y, content_width)?;
    y += STAT_HEIGHT + GAP;

    draw_text(root, "Inputs", (PADDING, y + 10), 28, &INK)?;
    y += 60;
    for (index, row) in view.input_rows().iter().enumerate() {
        if index % 2 == 0 {
            root.draw(&Rectangle::new(
                [(PADDING, y - 4), (PADDING + content_width, y + INPUT_ROW_HEIGHT - 4)],
                ShapeStyle::from(&SOFT).filled(),
            ))?;
        }
        draw_text(root, &row.label, (PADDING + 16, y), 20, &INK)?;
        root.draw(&Text::new(
            row.value.clone(),
            (PADDING + content_width - 16, y),
            ("sans-serif", 20)
                .into_font()
                .color(&INK)
                .pos(Pos::new(HPos::Right, VPos::Top)),
        ))?;
        y += INPUT_ROW_HEIGHT;
    }
    y += GAP;

    draw_text(root, "Savings Breakdown", (PADDING, y + 10), 28, &INK)?;
    y += 60;
    let breakdown = view.breakdown();
    let largest = breakdown
        .iter()
        .map(|row| row.amount.max(0.0))
        .fold(0.0_f64, f64::max);
    let bar_space = content_width * 6 / 10;
    for row in &breakdown {
        draw_text(root, row.title, (PADDING, y), 20, &INK)?;
        let bar_width = if largest > 0.0 {
            ((row.amount.max(0.0) / largest) * bar_space as f64).round() as i32
        } else {
            0
        };
        root.draw(&Rectangle::new(
            [(PADDING, y + 30), (PADDING + bar_space, y + 56)],
            ShapeStyle::from(&SOFT).filled(),
        ))?;
        if bar_width > 0 {
            root.draw(&Rectangle::new(
                [(PADDING, y + 30), (PADDING + bar_width, y + 56)],
                ShapeStyle::from(&ACCENT).filled(),
            ))?;
        }
        draw_text(root, &row.value, (PADDING + bar_space + 20, y + 28), 26, &INK)?;
        draw_text(root, row.formula, (PADDING, y + 64), 16, &MUTED)?;
        y += BREAKDOWN_ROW_HEIGHT;
    }
    y += GAP;

    draw_stat_row(root, &view.cost_stats(), y, content_width)?;
    y += STAT_HEIGHT + GAP;

    for line in wrap_words(REPORT_NOTES, NOTE_LINE_CHARS) {
        draw_text(root, &line, (PADDING, y + 10), 16, &MUTED)?;
        y += NOTE_LINE_HEIGHT;
    }
    Ok(())
}

/// Greedy word wrap; a single word longer than `max_chars` gets its own line.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_stat_row<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    stats: &[Stat],
    top: i32,
    content_width: i32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let count = stats.len().max(1) as i32;
    let card_width = (content_width - GAP * (count - 1)) / count;
    for (index, stat) in stats.iter().enumerate() {
        let left = PADDING + index as i32 * (card_width + GAP);
        root.draw(&Rectangle::new(
            [(left, top), (left + card_width, top + STAT_HEIGHT)],
            ShapeStyle::from(&BORDER).stroke_width(2),
        ))?;
        draw_text(root, stat.title, (left + 16, top + 16), 18, &MUTED)?;
        draw_text(root, &stat.value, (left + 16, top + 46), 34, &INK)?;
        draw_text(root, stat.subtitle, (left + 16, top + 100), 15, &MUTED)?;
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    at: (i32, i32),
    size: u32,
    color: &RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.draw(&Text::new(
        text.to_string(),
        at,
        ("sans-serif", size).into_font().color(color),
    ))
}
