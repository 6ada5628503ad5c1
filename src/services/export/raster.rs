use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use super::ExportError;
use crate::services::layout::{GridLayout, LayoutRect, LineKind, PIXELS_PER_HOUR};

/// Proportional face shipped with egui, so the PNG matches the on-screen grid.
const LABEL_FONT: &str = "Ubuntu-Light";
const ELLIPSIS: &str = "...";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CHROME: Rgba<u8> = Rgba([248, 250, 252, 255]);
const HOUR_LINE: Rgba<u8> = Rgba([226, 232, 240, 255]);
const HALF_HOUR_LINE: Rgba<u8> = Rgba([236, 240, 245, 255]);
const SLOT_LINE: Rgba<u8> = Rgba([244, 246, 249, 255]);
const BAND_FILL: Rgba<u8> = Rgba([241, 245, 249, 255]);
const BAND_HATCH: Rgba<u8> = Rgba([203, 213, 225, 255]);
const PREVIEW_FILL: Rgba<u8> = Rgba([219, 234, 254, 255]);
const PREVIEW_BLOCKED_FILL: Rgba<u8> = Rgba([254, 202, 202, 255]);

const INK: [u8; 3] = [15, 23, 42];
const MUTED_INK: [u8; 3] = [100, 116, 139];
const HATCH_SPACING: i64 = 8;

/// Pixel bounds `[x0, x1) x [y0, y1)` of a layout rect, clamped to the image.
fn bounds(image: &RgbaImage, rect: &LayoutRect) -> (u32, u32, u32, u32) {
    let clamp = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
    (
        clamp(rect.x, image.width()),
        clamp(rect.y, image.height()),
        clamp(rect.right(), image.width()),
        clamp(rect.bottom(), image.height()),
    )
}

fn fill_rect(image: &mut RgbaImage, rect: &LayoutRect, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = bounds(image, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

fn stroke_rect(image: &mut RgbaImage, rect: &LayoutRect, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = bounds(image, rect);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    for x in x0..x1 {
        image.put_pixel(x, y0, color);
        image.put_pixel(x, y1 - 1, color);
    }
    for y in y0..y1 {
        image.put_pixel(x0, y, color);
        image.put_pixel(x1 - 1, y, color);
    }
}

/// Diagonal stripes inside a rect.
fn hatch_rect(image: &mut RgbaImage, rect: &LayoutRect, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = bounds(image, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            if (x as i64 + y as i64).rem_euclid(HATCH_SPACING) == 0 {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn hline(image: &mut RgbaImage, y: f32, x0: f32, x1: f32, color: Rgba<u8>) {
    fill_rect(image, &LayoutRect::new(x0, y, x1 - x0, 1.0), color);
}

fn vline(image: &mut RgbaImage, x: f32, y0: f32, y1: f32, color: Rgba<u8>) {
    fill_rect(image, &LayoutRect::new(x, y0, 1.0, y1 - y0), color);
}

/// Mixes `color` into the pixel by glyph coverage. Off-image pixels are skipped.
fn blend(image: &mut RgbaImage, x: i64, y: i64, color: [u8; 3], coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for (channel, ink) in pixel.0.iter_mut().zip(color) {
        *channel = (*channel as f32 * (1.0 - alpha) + ink as f32 * alpha).round() as u8;
    }
}

fn darken(rgb: [u8; 3], factor: f32) -> Rgba<u8> {
    let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Rgba([scale(rgb[0]), scale(rgb[1]), scale(rgb[2]), 255])
}

/// Paints a grid layout into an RGBA image: rules, school bands, blocks and
/// the same labels the PDF carries (day names, hour and half-hour times,
/// block titles and time ranges, school band labels).
pub struct RasterSnapshot {
    font: FontVec,
}

impl RasterSnapshot {
    pub fn new() -> Result<Self, ExportError> {
        let fonts = egui::FontDefinitions::default();
        let data = fonts
            .font_data
            .get(LABEL_FONT)
            .ok_or_else(|| ExportError::Font(format!("{} is not bundled", LABEL_FONT)))?;
        let font = FontVec::try_from_vec_and_index(data.font.to_vec(), data.index)
            .map_err(|e| ExportError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn save(&self, layout: &GridLayout, path: &Path) -> Result<(), ExportError> {
        self.render(layout)
            .save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    pub fn render(&self, layout: &GridLayout) -> RgbaImage {
        let width = layout.width.ceil().max(1.0) as u32;
        let height = layout.height.ceil().max(1.0) as u32;
        let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

        let scale = layout.geometry.pixels_per_hour / PIXELS_PER_HOUR;
        let body_left = layout.metrics.time_column_width;
        let body_top = layout.body_top();

        fill_rect(&mut image, &LayoutRect::new(0.0, 0.0, layout.width, body_top), CHROME);
        fill_rect(&mut image, &LayoutRect::new(0.0, 0.0, body_left, layout.height), CHROME);

        for line in &layout.lines {
            let color = match line.kind {
                LineKind::Hour => HOUR_LINE,
                LineKind::HalfHour => HALF_HOUR_LINE,
                LineKind::Slot => SLOT_LINE,
            };
            let start = if line.kind == LineKind::Hour { 0.0 } else { body_left };
            hline(&mut image, line.y.min(layout.height - 1.0), start, layout.width, color);
        }
        for header in &layout.day_headers {
            vline(&mut image, header.rect.x, 0.0, layout.height, HOUR_LINE);
        }
        hline(&mut image, body_top, 0.0, layout.width, HOUR_LINE);

        self.draw_labels(&mut image, layout, scale);

        for band in &layout.blocked {
            fill_rect(&mut image, &band.rect, BAND_FILL);
            hatch_rect(&mut image, &band.rect, BAND_HATCH);
            let pad = 4.0 * scale;
            let size = 11.0 * scale;
            if band.rect.height >= size + pad {
                self.draw_fitted(
                    &mut image,
                    &band.label,
                    band.rect.x + pad,
                    band.rect.y + pad,
                    size,
                    band.rect.width - pad * 2.0,
                    MUTED_INK,
                );
            }
        }

        if let Some(preview) = &layout.preview {
            let fill = if preview.blocked { PREVIEW_BLOCKED_FILL } else { PREVIEW_FILL };
            fill_rect(&mut image, &preview.rect, fill);
            self.draw_fitted(
                &mut image,
                &preview.label,
                preview.rect.x + 4.0 * scale,
                preview.rect.y + 2.0 * scale,
                11.0 * scale,
                preview.rect.width - 8.0 * scale,
                INK,
            );
        }

        let inset = 4.0 * scale;
        for block in &layout.blocks {
            let rect = LayoutRect::new(
                block.rect.x + inset,
                block.rect.y + 1.0,
                (block.rect.width - inset * 2.0).max(1.0),
                (block.rect.height - 2.0).max(1.0),
            );
            let [r, g, b] = block.color;
            fill_rect(&mut image, &rect, Rgba([r, g, b, 255]));
            stroke_rect(&mut image, &rect, darken(block.color, 0.85));

            let title_size = 12.0 * scale;
            let time_size = 10.5 * scale;
            let text_x = rect.x + 4.0 * scale;
            let text_width = rect.width - 8.0 * scale;
            let mut cursor = rect.y + 3.0 * scale;
            if rect.height >= title_size + 3.0 * scale {
                self.draw_fitted(&mut image, &block.title, text_x, cursor, title_size, text_width, INK);
                cursor += title_size + 2.0 * scale;
            }
            if rect.bottom() - cursor >= time_size {
                self.draw_fitted(&mut image, &block.time_label, text_x, cursor, time_size, text_width, MUTED_INK);
            }
        }

        image
    }

    fn draw_labels(&self, image: &mut RgbaImage, layout: &GridLayout, scale: f32) {
        let header_size = 14.0 * scale;
        for header in &layout.day_headers {
            let name = self.fit_text(header.day.full_name(), header_size, header.rect.width - 8.0 * scale);
            let x = header.rect.x + (header.rect.width - self.text_width(&name, header_size)) / 2.0;
            let y = header.rect.y + (header.rect.height - header_size) / 2.0;
            self.draw_text(image, &name, x, y, header_size, INK);
        }

        let hour_size = 12.0 * scale;
        let half_size = 10.0 * scale;
        let half_hour = layout.geometry.pixels_per_hour / 2.0;
        let label_width = layout.metrics.time_column_width - 8.0 * scale;
        for label in &layout.hour_labels {
            self.draw_fitted(image, &label.text, 6.0 * scale, label.y + 2.0 * scale, hour_size, label_width, INK);
            self.draw_fitted(
                image,
                &label.half_text,
                6.0 * scale,
                label.y + half_hour + 2.0 * scale,
                half_size,
                label_width,
                MUTED_INK,
            );
        }
    }

    /// Horizontal advance of `text` at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let font = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(previous) = previous {
                width += font.kern(previous, id);
            }
            width += font.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Shortens `text` with a trailing ellipsis until it fits `max_width`.
    pub fn fit_text(&self, text: &str, size: f32, max_width: f32) -> String {
        if self.text_width(text, size) <= max_width {
            return text.to_string();
        }
        let mut kept = String::new();
        for c in text.chars() {
            let candidate = format!("{}{}{}", kept, c, ELLIPSIS);
            if self.text_width(&candidate, size) > max_width {
                break;
            }
            kept.push(c);
        }
        if kept.is_empty() && self.text_width(ELLIPSIS, size) > max_width {
            return String::new();
        }
        kept.push_str(ELLIPSIS);
        kept
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_fitted(
        &self,
        image: &mut RgbaImage,
        text: &str,
        x: f32,
        top: f32,
        size: f32,
        max_width: f32,
        color: [u8; 3],
    ) {
        if max_width <= 0.0 || size <= 0.0 {
            return;
        }
        let text = self.fit_text(text, size, max_width);
        self.draw_text(image, &text, x, top, size, color);
    }

    /// Rasterises `text` with its top edge at `top`.
    fn draw_text(&self, image: &mut RgbaImage, text: &str, x: f32, top: f32, size: f32, color: [u8; 3]) {
        let px_scale = PxScale::from(size);
        let scaled = self.font.as_scaled(px_scale);
        let mut caret = point(x, top + scaled.ascent());
        let mut previous = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret.x += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(px_scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let origin = outlined.px_bounds().min;
                outlined.draw(|gx, gy, coverage| {
                    blend(
                        image,
                        origin.x as i64 + gx as i64,
                        origin.y as i64 + gy as i64,
                        color,
                        coverage,
                    );
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::day::DayOfWeek;
    use crate::models::event::ScheduleEvent;
    use crate::models::school_time::SchoolTime;
    use crate::services::export::snapshot_layout;

    fn tuesday_swim(title: &str) -> ScheduleEvent {
        let mut event = ScheduleEvent::new(
            "child1",
            title,
            DayOfWeek::Tue,
            "15:00".parse().unwrap(),
            "16:00".parse().unwrap(),
        )
        .unwrap();
        event.category = "Sports".into();
        event
    }

    fn has_ink(image: &RgbaImage, rect: &LayoutRect) -> bool {
        let (x0, y0, x1, y1) = bounds(image, rect);
        (y0..y1).any(|y| (x0..x1).any(|x| image.get_pixel(x, y).0[0] < 190))
    }

    #[test]
    fn test_fill_is_clamped_to_image() {
        let mut image = RgbaImage::from_pixel(10, 10, BACKGROUND);
        fill_rect(&mut image, &LayoutRect::new(-5.0, 2.0, 8.0, 3.0), Rgba([1, 2, 3, 255]));
        assert_eq!(*image.get_pixel(0, 2), Rgba([1, 2, 3, 255]));
        assert_eq!(*image.get_pixel(2, 4), Rgba([1, 2, 3, 255]));
        assert_eq!(*image.get_pixel(3, 2), BACKGROUND);
        assert_eq!(*image.get_pixel(0, 5), BACKGROUND);
    }

    #[test]
    fn test_render_draws_full_range_with_blocks() {
        let layout = snapshot_layout(&[tuesday_swim("Swim")], &SchoolTime::default_week(), 1.0);
        let image = RasterSnapshot::new().unwrap().render(&layout);

        assert_eq!(image.width(), layout.width as u32);
        assert_eq!(image.height(), layout.height as u32);

        let block = &layout.blocks[0];
        let cx = (block.rect.x + block.rect.width / 2.0) as u32;
        let cy = (block.rect.y + block.rect.height / 2.0) as u32;
        assert_eq!(*image.get_pixel(cx, cy), Rgba([0xFE, 0xE2, 0xE2, 255]));
    }

    #[test]
    fn test_block_titles_reach_the_image() {
        let snapshot = RasterSnapshot::new().unwrap();
        let school = SchoolTime::default_week();
        let short = snapshot.render(&snapshot_layout(&[tuesday_swim("Swim")], &school, 1.0));
        let long = snapshot.render(&snapshot_layout(
            &[tuesday_swim("Violin lesson with Ms Park")],
            &school,
            1.0,
        ));

        assert_ne!(short.as_raw(), long.as_raw());
    }

    #[test]
    fn test_headers_and_hour_labels_are_drawn() {
        let layout = snapshot_layout(&[tuesday_swim("Swim")], &[], 1.0);
        let image = RasterSnapshot::new().unwrap().render(&layout);

        for header in &layout.day_headers {
            assert!(has_ink(&image, &header.rect), "{} header is blank", header.day);
        }
        let first_hour = &layout.hour_labels[0];
        let gutter = LayoutRect::new(0.0, first_hour.y, layout.metrics.time_column_width, 20.0);
        assert!(has_ink(&image, &gutter));
    }

    #[test]
    fn test_school_band_carries_its_label() {
        let layout = snapshot_layout(&[tuesday_swim("Swim")], &SchoolTime::default_week(), 1.0);
        let image = RasterSnapshot::new().unwrap().render(&layout);
        let band = &layout.blocked[0];
        let label_strip = LayoutRect::new(band.rect.x, band.rect.y, band.rect.width, 18.0);

        let blank = RasterSnapshot::new()
            .unwrap()
            .render(&snapshot_layout(&[tuesday_swim("Swim")], &[], 1.0));
        assert!(has_ink(&image, &label_strip));
        assert!(!has_ink(&blank, &label_strip));
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        let snapshot = RasterSnapshot::new().unwrap();
        assert_eq!(snapshot.fit_text("Swim", 12.0, 500.0), "Swim");

        let fitted = snapshot.fit_text("Violin lesson with Ms Park", 12.0, 60.0);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(snapshot.text_width(&fitted, 12.0) <= 60.0);
        assert_eq!(snapshot.fit_text("Violin", 12.0, 1.0), "");
    }

    #[test]
    fn test_save_writes_png_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");
        let layout = snapshot_layout(&[tuesday_swim("Swim")], &[], 1.0);
        RasterSnapshot::new().unwrap().save(&layout, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
