use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::ExportError;
use crate::services::layout::{GridLayout, LayoutRect, LineKind};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;
const TITLE_SPACE: f32 = 12.0;
/// Rough Helvetica advance per character, in mm per point of font size.
const CHAR_WIDTH: f32 = 0.19;

/// Maps layout pixels onto the page (PDF y grows upwards).
struct PageTransform {
    scale_x: f32,
    scale_y: f32,
    left: f32,
    top: f32,
}

impl PageTransform {
    fn fit(layout: &GridLayout) -> Self {
        let available_w = PAGE_WIDTH - 2.0 * MARGIN;
        let available_h = PAGE_HEIGHT - 2.0 * MARGIN - TITLE_SPACE;
        Self {
            scale_x: available_w / layout.width,
            scale_y: available_h / layout.height,
            left: MARGIN,
            top: PAGE_HEIGHT - MARGIN - TITLE_SPACE,
        }
    }

    fn x(&self, x: f32) -> f32 {
        self.left + x * self.scale_x
    }

    fn y(&self, y: f32) -> f32 {
        self.top - y * self.scale_y
    }

    fn width(&self, w: f32) -> f32 {
        w * self.scale_x
    }

    fn height(&self, h: f32) -> f32 {
        h * self.scale_y
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Truncates `text` to roughly fit `width_mm` at `size` points.
fn fit_text(text: &str, size: f32, width_mm: f32) -> String {
    let max_chars = (width_mm / (size * CHAR_WIDTH)).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Draws the full timetable layout on one landscape A4 page.
pub struct PdfSnapshot;

impl PdfSnapshot {
    pub fn write(layout: &GridLayout, child_name: &str, path: &Path) -> Result<(), ExportError> {
        let title = format!("{} - Weekly Timetable", child_name);
        let (doc, page, layer) =
            PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Timetable");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);
        let t = PageTransform::fit(layout);

        Self::draw_text(&layer, &font_bold, 16.0, MARGIN, PAGE_HEIGHT - MARGIN - 6.0, &title);

        // Bands first so rules stay visible on top of them.
        for band in &layout.blocked {
            Self::draw_rect(&layer, &t, &band.rect, Some(rgb(241, 245, 249)), None);
            let label = fit_text("School", 6.0, t.width(band.rect.width) - 2.0);
            Self::draw_text(
                &layer,
                &font,
                6.0,
                t.x(band.rect.x) + 1.0,
                t.y(band.rect.y) - 3.0,
                &label,
            );
        }

        for line in &layout.lines {
            let (color, thickness) = match line.kind {
                LineKind::Hour => (rgb(203, 213, 225), 0.6),
                LineKind::HalfHour => (rgb(226, 232, 240), 0.4),
                LineKind::Slot => continue,
            };
            Self::draw_line(
                &layer,
                (t.x(0.0), t.y(line.y)),
                (t.x(layout.width), t.y(line.y)),
                color,
                thickness,
            );
        }
        for header in &layout.day_headers {
            Self::draw_line(
                &layer,
                (t.x(header.rect.x), t.y(0.0)),
                (t.x(header.rect.x), t.y(layout.height)),
                rgb(203, 213, 225),
                0.6,
            );
            Self::draw_text(
                &layer,
                &font_bold,
                9.0,
                t.x(header.rect.x) + 2.0,
                t.y(header.rect.bottom()) + 2.0,
                header.day.short_name(),
            );
        }
        for label in &layout.hour_labels {
            Self::draw_text(
                &layer,
                &font,
                7.0,
                t.x(2.0),
                t.y(label.y) - 3.0,
                &label.text,
            );
        }

        for block in &layout.blocks {
            let [r, g, b] = block.color;
            Self::draw_rect(
                &layer,
                &t,
                &block.rect,
                Some(rgb(r, g, b)),
                Some(rgb(148, 163, 184)),
            );

            let width = t.width(block.rect.width) - 2.0;
            let height = t.height(block.rect.height);
            let x = t.x(block.rect.x) + 1.0;
            let top = t.y(block.rect.y);

            if height >= 3.0 {
                let title = fit_text(&block.title, 6.0, width);
                Self::draw_text(&layer, &font_bold, 6.0, x, top - 2.5, &title);
            }
            if height >= 6.0 {
                let times = fit_text(&block.time_label, 5.0, width);
                Self::draw_text(&layer, &font, 5.0, x, top - 5.0, &times);
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        Ok(())
    }

    fn draw_text(
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        size: f32,
        x: f32,
        y: f32,
        text: &str,
    ) {
        layer.begin_text_section();
        layer.set_font(font, size);
        layer.set_fill_color(rgb(15, 23, 42));
        layer.set_text_cursor(Mm(x), Mm(y));
        layer.write_text(text, font);
        layer.end_text_section();
    }

    fn draw_line(
        layer: &PdfLayerReference,
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        thickness: f32,
    ) {
        layer.set_outline_color(color);
        layer.set_outline_thickness(thickness);
        layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ]],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn draw_rect(
        layer: &PdfLayerReference,
        t: &PageTransform,
        rect: &LayoutRect,
        fill: Option<Color>,
        outline: Option<Color>,
    ) {
        let (x0, x1) = (t.x(rect.x), t.x(rect.right()));
        let (y0, y1) = (t.y(rect.bottom()), t.y(rect.y));
        let points = vec![
            (Point::new(Mm(x0), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x0), Mm(y1)), false),
        ];

        let mode = match (&fill, &outline) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, _) => PaintMode::Stroke,
        };
        if let Some(fill) = fill {
            layer.set_fill_color(fill);
        }
        if let Some(outline) = outline {
            layer.set_outline_color(outline);
            layer.set_outline_thickness(0.3);
        }
        layer.add_polygon(Polygon {
            rings: vec![points],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }
}
