// panels.rs — tab contents

use crate::catalog::{Resolution, SensorFormat};
use crate::i18n::{group_thousands, tr, tr_with};
use crate::layout::{self, Block};
use crate::optics::{FocalLength, FOCAL_PRESETS, MAX_FOCAL_MM, MIN_FOCAL_MM};
use crate::viewport::{preview_layout, FocalViewport, ImageSize, PREVIEW_WIDTH};
use egui::{pos2, vec2, Color32, FontId, Rect, Rounding, Sense, Stroke};
use glam::DVec2;

const BLOCK_FILL: Color32 = Color32::from_rgb(239, 246, 255);
const BLOCK_HOVER_FILL: Color32 = Color32::from_rgb(219, 234, 254);
const BLOCK_STROKE: Color32 = Color32::from_rgb(156, 163, 175);
const LABEL_FILL: Color32 = Color32::from_rgba_premultiplied(191, 191, 191, 191);
const MUTED_TEXT: Color32 = Color32::from_rgb(107, 114, 128);
const VIEW_RECT_STROKE: Color32 = Color32::from_rgb(239, 68, 68);
const CARD_FILL: Color32 = Color32::from_rgb(243, 244, 246);

/// Fixed box the gallery fits each sample into.
const GALLERY_IMAGE: ImageSize = ImageSize { width: 582.0, height: 437.0 };

/// Seconds for the crop rectangle to glide to a new position.
const VIEW_RECT_ANIMATION: f32 = 0.3;

/// An uploaded image plus its intrinsic size.
pub struct Photo {
    pub texture: egui::TextureHandle,
    pub natural: ImageSize,
}

fn full_uv() -> Rect {
    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
}

pub fn about_box(ui: &mut egui::Ui, title_key: &str, body: &str) {
    ui.add_space(16.0);
    egui::Frame::none()
        .fill(CARD_FILL)
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(tr(title_key)).strong());
            ui.label(egui::RichText::new(body).color(MUTED_TEXT));
        });
}

/// Header row with a title on the left and a stack toggle on the right.
pub fn header_with_toggle(ui: &mut egui::Ui, title_key: &str, toggle_key: &str, stacked: &mut bool) {
    ui.horizontal(|ui| {
        ui.heading(tr(title_key));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.toggle_value(stacked, tr(toggle_key));
        });
    });
    ui.add_space(12.0);
}

fn paint_block(painter: &egui::Painter, rect: Rect, hovered: bool, outlined: bool) {
    let fill = if hovered { BLOCK_HOVER_FILL } else { BLOCK_FILL };
    let stroke = if outlined {
        Stroke::new(2.0, BLOCK_STROKE)
    } else {
        Stroke::new(1.0, BLOCK_FILL)
    };
    painter.rect(rect, Rounding::ZERO, fill, stroke);
}

/// Text line describing a block; `top` pins it to the top-left, otherwise it
/// spans the bottom edge.
fn paint_block_label(painter: &egui::Painter, rect: Rect, text: &str, top: bool) {
    let font = FontId::proportional(12.0);
    let galley = painter.layout_no_wrap(text.to_owned(), font, Color32::from_gray(55));
    let size = galley.size() + vec2(12.0, 6.0);
    let label_rect = if top {
        Rect::from_min_size(rect.min + vec2(8.0, 8.0), size)
    } else {
        Rect::from_min_max(pos2(rect.min.x, rect.max.y - size.y), rect.max)
    };
    painter.rect_filled(label_rect, Rounding::same(if top { 4.0 } else { 0.0 }), LABEL_FILL);
    painter.galley(label_rect.min + vec2(6.0, 3.0), galley);
}

/// Proportional blocks for either resolutions or sensor formats.
///
/// `stack_label` is drawn on each block in stacked mode; `tile_label` and
/// `captions` are used in the side-by-side list.
pub fn comparison_blocks<T: Block>(
    ui: &mut egui::Ui,
    items: &[T],
    stacked: bool,
    stack_label: impl Fn(T) -> String,
    tile_label: impl Fn(T) -> String,
    captions: impl Fn(T) -> [String; 2],
) {
    let container_width = ui.available_width();

    if stacked {
        let stack = layout::stacked(items, container_width);
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(
                vec2(stack.width.min(container_width), stack.height.max(200.0)),
                Sense::hover(),
            );
            let painter = ui.painter_at(rect);
            let hover = ui.ctx().pointer_hover_pos();
            let mut blocks: Vec<_> = stack.blocks.iter().collect();
            blocks.sort_by_key(|b| b.z);
            for block in blocks {
                let drawn = block.size.drawn();
                let r = Rect::from_min_size(
                    rect.min + vec2(block.offset[0], block.offset[1]),
                    vec2(drawn.width, drawn.height),
                );
                let hovered = hover.map_or(false, |p| r.contains(p));
                paint_block(&painter, r, hovered, true);
                paint_block_label(&painter, r, &stack_label(block.item), false);
            }
        });
        ui.add_space(24.0);
        return;
    }

    ui.vertical_centered(|ui| {
        for (item, size) in layout::side_by_side(items, container_width) {
            let drawn = size.drawn();
            let (rect, response) = ui.allocate_exact_size(
                vec2(drawn.width.min(container_width), drawn.height),
                Sense::hover(),
            );
            paint_block(ui.painter(), rect, response.hovered(), false);
            paint_block_label(ui.painter(), rect, &tile_label(item), true);

            let [primary, secondary] = captions(item);
            ui.label(egui::RichText::new(primary).color(MUTED_TEXT));
            ui.label(egui::RichText::new(secondary).small().color(Color32::from_gray(156)));
            ui.add_space(24.0);
        }
    });
}

pub fn size_comparison(ui: &mut egui::Ui, selected: &[Resolution], stacked: &mut bool) {
    header_with_toggle(ui, "size.title", "size.stack", stacked);

    comparison_blocks(
        ui,
        selected,
        *stacked,
        |r| {
            let (w, h) = r.dimensions();
            format!("{} MP ({} × {})", r.megapixels(), w, h)
        },
        |r| format!("{} MP", r.megapixels()),
        |r| {
            let (w, h) = r.dimensions();
            [
                tr_with("size.pixels", &[("w", w.to_string()), ("h", h.to_string())]),
                tr_with("size.total_pixels", &[("total", group_thousands(r.total_pixels()))]),
            ]
        },
    );

    let mode = if *stacked { "size.about.stacked" } else { "size.about.unstacked" };
    about_box(ui, "size.about.title", &format!("{} {}", tr("size.about.description"), tr(mode)));
}

pub fn sensor_comparison(ui: &mut egui::Ui, selected: &[SensorFormat], stacked: &mut bool) {
    header_with_toggle(ui, "sensor.title", "sensor.stack", stacked);

    comparison_blocks(
        ui,
        selected,
        *stacked,
        |s| {
            let (w, h) = s.dimensions_mm();
            format!("{} ({}×{}mm)", crate::i18n::sensor_name(s), w, h)
        },
        crate::i18n::sensor_name,
        |s| {
            let (w, h) = s.dimensions_mm();
            [format!("{}×{}mm", w, h), format!("({:.1} mm²)", s.area_mm2())]
        },
    );

    about_box(ui, "sensor.about.title", &tr("sensor.about.description"));
}

fn photo_or_spinner(ui: &mut egui::Ui, photo: Option<&Photo>, bounds: ImageSize) {
    let Some(photo) = photo else {
        let (rect, _) = ui.allocate_exact_size(
            vec2(bounds.width as f32, bounds.height as f32),
            Sense::hover(),
        );
        ui.painter().rect_filled(rect, Rounding::same(4.0), CARD_FILL);
        ui.put(Rect::from_center_size(rect.center(), vec2(24.0, 24.0)), egui::Spinner::new());
        return;
    };

    let fitted = photo.natural.fit_within(bounds);
    let (rect, _) = ui.allocate_exact_size(
        vec2(fitted.width as f32, fitted.height as f32),
        Sense::hover(),
    );
    ui.painter().image(photo.texture.id(), rect, full_uv(), Color32::WHITE);
}

/// Sample images, all fitted to the same box regardless of resolution.
pub fn gallery<'a>(
    ui: &mut egui::Ui,
    selected: &[Resolution],
    sample: impl Fn(Resolution) -> Option<&'a Photo>,
) {
    ui.heading(tr("gallery.title"));
    ui.add_space(12.0);

    let available = ui.available_width();
    let card_width = (GALLERY_IMAGE.width as f32).min(available);
    let columns = if available >= 2.0 * GALLERY_IMAGE.width as f32 + 48.0 { 2 } else { 1 };
    let bounds = ImageSize::new(
        f64::from(card_width),
        f64::from(card_width) * GALLERY_IMAGE.height / GALLERY_IMAGE.width,
    );

    for row in selected.chunks(columns) {
        ui.horizontal_top(|ui| {
            for &r in row {
                ui.vertical(|ui| {
                    ui.set_width(card_width);
                    egui::Frame::none()
                        .fill(CARD_FILL)
                        .rounding(8.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| photo_or_spinner(ui, sample(r), bounds));

                    ui.vertical_centered(|ui| {
                        let (w, h) = r.dimensions();
                        ui.label(
                            egui::RichText::new(tr_with("gallery.megapixels", &[("mp", r.megapixels().to_string())]))
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(tr_with(
                                "gallery.actual",
                                &[("w", w.to_string()), ("h", h.to_string())],
                            ))
                            .color(MUTED_TEXT),
                        );
                        ui.label(
                            egui::RichText::new(tr_with(
                                "size.total_pixels",
                                &[("total", group_thousands(r.total_pixels()))],
                            ))
                            .small()
                            .color(Color32::from_gray(156)),
                        );
                    });
                });
                ui.add_space(24.0);
            }
        });
        ui.add_space(24.0);
    }

    about_box(ui, "gallery.about.title", &tr("gallery.about.description"));
}

fn focal_controls(ui: &mut egui::Ui, viewport: &mut FocalViewport) {
    let mm = tr("focal.mm");
    let mut focal = viewport.focal().mm();

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{} {}{}", tr("focal.length"), focal, mm)).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("{} {:.1}{}", tr("focal.fov"), viewport.fov(), tr("focal.degrees")))
                    .color(MUTED_TEXT),
            );
        });
    });

    ui.spacing_mut().slider_width = ui.available_width();
    ui.add(
        egui::Slider::new(&mut focal, MIN_FOCAL_MM..=MAX_FOCAL_MM)
            .step_by(1.0)
            .show_value(false),
    );

    ui.horizontal_wrapped(|ui| {
        for preset in FOCAL_PRESETS {
            if ui
                .selectable_label(focal == preset, format!("{}{}", preset, mm))
                .clicked()
            {
                focal = preset;
            }
        }
    });

    viewport.set_focal_length(FocalLength::new(focal));
}

fn animated_rect(ctx: &egui::Context, target: Rect) -> Rect {
    let id = egui::Id::new("focal_view_rect");
    let v = |salt: &str, value: f32| {
        ctx.animate_value_with_time(id.with(salt), value, VIEW_RECT_ANIMATION)
    };
    Rect::from_min_size(
        pos2(v("x", target.min.x), v("y", target.min.y)),
        vec2(v("w", target.width()), v("h", target.height())),
    )
}

fn crop_preview(ui: &mut egui::Ui, viewport: &FocalViewport, photo: Option<&Photo>) {
    let focal = viewport.focal().mm();
    let mm = tr("focal.mm");

    ui.vertical_centered(|ui| {
        ui.label(format!("{} ({}{})", tr("focal.selected"), focal, mm));

        let rect = viewport.view_rect();
        let crop = photo.and_then(|p| viewport.crop(p.natural).map(|c| (p, c)));
        match crop {
            Some((photo, crop)) => {
                let layout = preview_layout(crop, rect, photo.natural);
                let (panel, _) = ui.allocate_exact_size(
                    vec2(layout.width as f32, layout.height as f32),
                    Sense::hover(),
                );
                let background = Rect::from_min_size(
                    panel.min + vec2(layout.background_offset.x as f32, layout.background_offset.y as f32),
                    vec2(layout.background_size.x as f32, layout.background_size.y as f32),
                );
                ui.painter().rect_filled(panel, Rounding::same(8.0), CARD_FILL);
                ui.painter_at(panel)
                    .image(photo.texture.id(), background, full_uv(), Color32::WHITE);
            }
            None => {
                let (panel, _) = ui.allocate_exact_size(
                    vec2(PREVIEW_WIDTH as f32, (PREVIEW_WIDTH * 2.0 / 3.0) as f32),
                    Sense::hover(),
                );
                ui.painter().rect_filled(panel, Rounding::same(8.0), CARD_FILL);
            }
        }

        ui.label(
            egui::RichText::new(format!("{} {}{}", tr("focal.appears"), focal, mm))
                .small()
                .italics()
                .color(MUTED_TEXT),
        );
    });
}

/// Gap between the preview and photo columns in the wide layout.
const COLUMN_GAP: f32 = 24.0;

/// Width left for the reference photo once the preview column (if beside it)
/// and the gaps are taken out.
fn photo_column_width(available: f32, wide: bool, item_spacing: f32) -> f32 {
    if !wide {
        return available;
    }
    // preview | spacing | gap | spacing | photo
    (available - PREVIEW_WIDTH as f32 - COLUMN_GAP - 2.0 * item_spacing).max(0.0)
}

fn reference_photo(ui: &mut egui::Ui, viewport: &mut FocalViewport, photo: Option<&Photo>) {
    let Some(photo) = photo else {
        ui.spinner();
        return;
    };

    let display = viewport.display();
    let (rect, response) = ui.allocate_exact_size(
        vec2(display.width as f32, display.height as f32),
        Sense::click(),
    );

    if response.clicked() {
        if let Some(p) = response.interact_pointer_pos() {
            viewport.click(
                DVec2::new(f64::from(p.x), f64::from(p.y)),
                DVec2::new(f64::from(rect.min.x), f64::from(rect.min.y)),
            );
        }
    }
    response.on_hover_cursor(egui::CursorIcon::Crosshair);

    let painter = ui.painter_at(rect);
    painter.image(photo.texture.id(), rect, full_uv(), Color32::WHITE);

    let state = viewport.state();
    if state.view_rect.is_ready() {
        let (view, pos) = (state.view_rect, state.position);
        let target = Rect::from_min_size(
            rect.min + vec2(pos.x as f32, pos.y as f32),
            vec2(view.width as f32, view.height as f32),
        );
        let shown = animated_rect(ui.ctx(), target);
        painter.rect_stroke(shown.shrink(2.0), Rounding::ZERO, Stroke::new(4.0, VIEW_RECT_STROKE));
    }

    ui.label(egui::RichText::new(tr("focal.click")).small().italics().color(MUTED_TEXT));
}

pub fn focal_length(ui: &mut egui::Ui, viewport: &mut FocalViewport, photo: Option<&Photo>) {
    ui.heading(tr("focal.title"));
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
        focal_controls(ui, viewport);
    });
    ui.add_space(16.0);

    let available = ui.available_width();
    let wide = available >= PREVIEW_WIDTH as f32 * 2.5;
    // Measure before either column is laid out so the preview never lags a frame.
    // Window resizes and newly loaded photos both land here.
    if let Some(photo) = photo {
        let width = photo_column_width(available, wide, ui.spacing().item_spacing.x);
        viewport.set_image_size(photo.natural.fit_width(f64::from(width)));
    }

    if wide {
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(PREVIEW_WIDTH as f32);
                crop_preview(ui, viewport, photo);
            });
            ui.add_space(COLUMN_GAP);
            ui.vertical(|ui| reference_photo(ui, viewport, photo));
        });
    } else {
        reference_photo(ui, viewport, photo);
        ui.add_space(16.0);
        crop_preview(ui, viewport, photo);
    }

    about_box(ui, "focal.about.title", &tr("focal.about.description"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_column_width() {
        assert_eq!(photo_column_width(640.0, false, 8.0), 640.0);
        assert_eq!(photo_column_width(1000.0, true, 8.0), 1000.0 - 300.0 - 24.0 - 16.0);
        assert_eq!(photo_column_width(100.0, true, 8.0), 0.0);
    }

    #[test]
    fn test_measuring_before_layout_gives_preview_a_crop() {
        // What focal_length does ahead of drawing either column.
        let mut viewport = FocalViewport::default();
        let natural = ImageSize::from_pixels(3000, 2000);
        assert!(viewport.crop(natural).is_none());

        let width = photo_column_width(1104.0, true, 8.0);
        viewport.set_image_size(natural.fit_width(f64::from(width)));
        let crop = viewport.crop(natural).expect("measured before the preview draws");
        assert!(crop.width > 0.0 && crop.width <= natural.width);
    }
}
