// app.rs — application state and top-level UI

use crate::assets::{self, ImageSlot, ImageSource, LoadedImage};
use crate::catalog::{Resolution, SensorFormat};
use crate::i18n::{self, tr, Language};
use crate::panels::{self, Photo};
use crate::prefs::Prefs;
use crate::selection::{ResolutionSelection, SensorSelection};
use crate::viewport::{FocalViewport, ImageSize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Content column never grows wider than this.
const MAX_CONTENT_WIDTH: f32 = 1152.0;

const REPO_URL: &str = "https://github.com/franklioxygen/mega-comparison";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Size,
    Sensor,
    Gallery,
    Focal,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Size, Tab::Sensor, Tab::Gallery, Tab::Focal];

    fn title_key(self) -> &'static str {
        match self {
            Tab::Size => "tabs.size",
            Tab::Sensor => "tabs.sensor",
            Tab::Gallery => "tabs.gallery",
            Tab::Focal => "tabs.focal",
        }
    }

    pub fn shows_resolution_picker(self) -> bool {
        matches!(self, Tab::Size | Tab::Gallery)
    }

    pub fn shows_sensor_picker(self) -> bool {
        self == Tab::Sensor
    }
}

/// Everything the UI edits, independent of textures and windows.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tab: Tab,
    pub language: Language,
    pub resolutions: ResolutionSelection,
    pub sensors: SensorSelection,
    pub size_stacked: bool,
    pub sensor_stacked: bool,
    pub viewport: FocalViewport,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Flip between English and Chinese and return the new language.
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.other();
        self.language
    }

    /// Message key to show instead of the tab content, if nothing is selected.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.tab {
            Tab::Size if self.resolutions.is_empty() => Some("controls.empty"),
            Tab::Sensor if self.sensors.is_empty() => Some("controls.empty.sensors"),
            _ => None,
        }
    }
}

pub struct App {
    pub state: AppState,
    prefs: Prefs,
    reference: Option<Photo>,
    samples: HashMap<Resolution, Photo>,
    loading_reference: bool,
    reference_is_placeholder: bool,
    /// Bumped per reference request; results from older requests are dropped.
    reference_generation: u64,
    tx: Sender<LoadedImage>,
    rx: Receiver<LoadedImage>,
    title_changed: bool,
    exit_requested: bool,
}

impl App {
    pub fn new(prefs: Prefs, language: Language, reference: ImageSource) -> Self {
        let (tx, rx) = channel();

        for r in Resolution::ALL {
            assets::start_load_image(ImageSlot::Sample(r), ImageSource::sample(r), tx.clone());
        }
        assets::start_load_image(ImageSlot::Reference(0), reference, tx.clone());

        Self {
            state: AppState::new(language),
            prefs,
            reference: None,
            samples: HashMap::new(),
            loading_reference: true,
            reference_is_placeholder: false,
            reference_generation: 0,
            tx,
            rx,
            title_changed: false,
            exit_requested: false,
        }
    }

    fn next_reference_slot(&mut self) -> ImageSlot {
        self.reference_generation += 1;
        self.loading_reference = true;
        ImageSlot::Reference(self.reference_generation)
    }

    pub fn open_photo(&mut self, source: ImageSource) {
        let slot = self.next_reference_slot();
        assets::start_load_image(slot, source, self.tx.clone());
    }

    pub fn open_photo_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(&tr("file.filter.images"), &["jpg", "jpeg", "png", "bmp", "webp"])
            .pick_file()
        {
            self.open_photo(ImageSource::File(path));
        }
    }

    pub fn open_dropped(&mut self, path: PathBuf) {
        self.open_photo(ImageSource::File(path));
    }

    /// Upload any images the loader threads have finished.
    pub fn poll_images(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.rx.try_recv() {
            if let ImageSlot::Reference(generation) = loaded.slot {
                if generation != self.reference_generation {
                    log::debug!(
                        "{}",
                        i18n::tr_with("log.stale_image", &[("generation", generation.to_string())])
                    );
                    continue;
                }
            }

            let (w, h) = loaded.rgba.dimensions();
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], loaded.rgba.as_raw());
            let name = match loaded.slot {
                ImageSlot::Reference(_) => "reference".to_string(),
                ImageSlot::Sample(r) => format!("sample_{}", r.megapixels()),
            };
            let photo = Photo {
                texture: ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR),
                natural: ImageSize::from_pixels(loaded.natural.0, loaded.natural.1),
            };

            match loaded.slot {
                ImageSlot::Reference(_) => {
                    self.reference = Some(photo);
                    self.loading_reference = false;
                    self.reference_is_placeholder = loaded.is_placeholder;
                    // Forget the old measurement so the next layout re-centers.
                    self.state.viewport.set_image_size(ImageSize::ZERO);
                }
                ImageSlot::Sample(r) => {
                    self.samples.insert(r, photo);
                }
            }
            ctx.request_repaint();
        }
    }

    /// True once after the language changed, so the window title can follow.
    pub fn take_title_change(&mut self) -> bool {
        std::mem::take(&mut self.title_changed)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn toggle_language(&mut self) {
        let lang = self.state.toggle_language();
        i18n::init(lang);
        self.prefs.language = Some(lang);
        self.prefs.save();
        self.title_changed = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.menu_bar(ui));
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.status_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let available = ui.available_width();
                let width = available.min(MAX_CONTENT_WIDTH);
                ui.horizontal(|ui| {
                    ui.add_space((available - width) / 2.0);
                    ui.vertical(|ui| {
                        ui.set_width(width);
                        self.page(ui);
                    });
                });
            });
        });
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(tr("menu.file"), |ui| {
                if ui.button(tr("menu.open_image")).clicked() {
                    ui.close_menu();
                    self.open_photo_dialog();
                }
                if ui.button(tr("menu.reset_image")).clicked() {
                    ui.close_menu();
                    self.open_photo(ImageSource::reference());
                }
                ui.separator();
                if ui.button(tr("menu.exit")).clicked() {
                    self.exit_requested = true;
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(i18n::toggle_label()).clicked() {
                    self.toggle_language();
                }
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.loading_reference {
                ui.label(egui::RichText::new(tr("status.loading_image")).color(egui::Color32::from_rgb(202, 138, 4)));
                ui.label("|");
            } else if self.reference_is_placeholder {
                ui.label(egui::RichText::new(tr("status.placeholder")).color(egui::Color32::from_gray(107)));
                ui.label("|");
            }
            let vp = &self.state.viewport;
            ui.label(format!("{}{}", vp.focal().mm(), tr("focal.mm")));
            ui.label("|");
            ui.label(format!("FOV: {:.1}°", vp.fov()));
        });
    }

    fn page(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(tr("app.title")).size(30.0).strong());
            ui.add_space(8.0);
            ui.label(egui::RichText::new(tr("app.description")).color(egui::Color32::from_gray(75)));
        });
        ui.add_space(24.0);

        egui::Frame::none()
            .fill(egui::Color32::WHITE)
            .rounding(12.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.tab_bar(ui);
                ui.separator();
                self.pickers(ui);
                self.content(ui);
            });

        ui.add_space(32.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(tr("footer.copyright")).small().color(egui::Color32::from_gray(107)));
            ui.hyperlink_to(tr("footer.github"), REPO_URL);
        });
        ui.add_space(24.0);
    }

    fn tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut self.state.tab, tab, tr(tab.title_key()));
            }
        });
    }

    fn pickers(&mut self, ui: &mut egui::Ui) {
        let tab = self.state.tab;
        if tab.shows_resolution_picker() {
            ui.add_space(8.0);
            ui.heading(tr("controls.title"));
            ui.horizontal_wrapped(|ui| {
                for r in Resolution::ALL {
                    let mut checked = self.state.resolutions.contains(r);
                    if ui.checkbox(&mut checked, i18n::megapixel_label(r)).changed() {
                        self.state.resolutions.toggle(r);
                    }
                }
            });
            ui.separator();
        } else if tab.shows_sensor_picker() {
            ui.add_space(8.0);
            ui.heading(tr("controls.sensors"));
            ui.horizontal_wrapped(|ui| {
                for s in SensorFormat::ALL {
                    let mut checked = self.state.sensors.contains(s);
                    if ui.checkbox(&mut checked, i18n::sensor_name(s)).changed() {
                        self.state.sensors.toggle(s);
                    }
                }
            });
            ui.separator();
        }
        ui.add_space(8.0);
    }

    fn content(&mut self, ui: &mut egui::Ui) {
        if let Some(key) = self.state.empty_message() {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(egui::RichText::new(tr(key)).color(egui::Color32::from_gray(107)));
                ui.add_space(16.0);
            });
            return;
        }

        let state = &mut self.state;
        match state.tab {
            Tab::Size => panels::size_comparison(ui, state.resolutions.as_slice(), &mut state.size_stacked),
            Tab::Sensor => panels::sensor_comparison(ui, state.sensors.as_slice(), &mut state.sensor_stacked),
            Tab::Gallery => {
                if !state.resolutions.is_empty() {
                    panels::gallery(ui, state.resolutions.as_slice(), |r| self.samples.get(&r));
                }
            }
            Tab::Focal => panels::focal_length(ui, &mut state.viewport, self.reference.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::new(Language::Zh);
        assert_eq!(state.tab, Tab::Size);
        assert_eq!(state.language, Language::Zh);
        assert!(!state.size_stacked && !state.sensor_stacked);
        assert_eq!(state.viewport.focal().mm(), crate::optics::DEFAULT_FOCAL_MM);
    }

    #[test]
    fn test_pickers_per_tab() {
        assert!(Tab::Size.shows_resolution_picker());
        assert!(Tab::Gallery.shows_resolution_picker());
        assert!(!Tab::Focal.shows_resolution_picker());
        assert!(Tab::Sensor.shows_sensor_picker());
        assert!(!Tab::Focal.shows_sensor_picker());
    }

    #[test]
    fn test_empty_messages() {
        let mut state = AppState::default();
        assert_eq!(state.empty_message(), None);

        state.resolutions = ResolutionSelection::empty();
        assert_eq!(state.empty_message(), Some("controls.empty"));
        state.tab = Tab::Gallery;
        assert_eq!(state.empty_message(), None);

        state.tab = Tab::Sensor;
        assert_eq!(state.empty_message(), None);
        state.sensors = SensorSelection::empty();
        assert_eq!(state.empty_message(), Some("controls.empty.sensors"));

        state.tab = Tab::Focal;
        assert_eq!(state.empty_message(), None);
    }

    #[test]
    fn test_toggle_language_round_trip() {
        let mut state = AppState::default();
        assert_eq!(state.toggle_language(), Language::Zh);
        assert_eq!(state.toggle_language(), Language::En);
    }

    /// App whose startup loads (six samples plus the reference) have all landed.
    fn settled_app(ctx: &egui::Context, before_load: impl FnOnce(&mut App)) -> App {
        let mut app = App::new(Prefs::default(), Language::En, ImageSource::Asset("missing-2b8e.png".into()));
        before_load(&mut app);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while app.reference.is_none() || app.samples.len() < Resolution::ALL.len() {
            assert!(std::time::Instant::now() < deadline, "loaders did not finish");
            std::thread::sleep(std::time::Duration::from_millis(20));
            app.poll_images(ctx);
        }
        app
    }

    fn reference_result(slot: ImageSlot, width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            slot,
            natural: (width, height),
            rgba: image::RgbaImage::new(width, height),
            is_placeholder: false,
        }
    }

    #[test]
    fn test_loaded_reference_resets_measurement() {
        let ctx = egui::Context::default();
        let app = settled_app(&ctx, |app| {
            app.state.viewport.set_image_size(ImageSize::new(900.0, 600.0));
        });

        assert!(!app.loading_reference);
        assert!(app.reference_is_placeholder);
        assert!(!app.state.viewport.display().is_measured());
        assert_eq!(
            app.reference.as_ref().map(|p| p.natural),
            Some(ImageSize::from_pixels(assets::PLACEHOLDER_WIDTH, assets::PLACEHOLDER_HEIGHT))
        );
    }

    #[test]
    fn test_only_latest_reference_request_is_shown() {
        let ctx = egui::Context::default();
        let mut app = settled_app(&ctx, |_| {});
        let placeholder = ImageSize::from_pixels(assets::PLACEHOLDER_WIDTH, assets::PLACEHOLDER_HEIGHT);

        let slow = app.next_reference_slot();
        let fast = app.next_reference_slot();

        // An older request finishing first neither shows nor ends loading.
        app.tx.send(reference_result(slow, 40, 30)).expect("send");
        app.poll_images(&ctx);
        assert!(app.loading_reference);
        assert_eq!(app.reference.as_ref().map(|p| p.natural), Some(placeholder));

        app.tx.send(reference_result(fast, 8, 6)).expect("send");
        app.poll_images(&ctx);
        assert!(!app.loading_reference);
        assert!(!app.reference_is_placeholder);
        assert_eq!(app.reference.as_ref().map(|p| p.natural), Some(ImageSize::from_pixels(8, 6)));

        // A late result from the older request changes nothing.
        app.state.viewport.set_image_size(ImageSize::new(900.0, 675.0));
        app.tx.send(reference_result(slow, 40, 30)).expect("send");
        app.poll_images(&ctx);
        assert_eq!(app.reference.as_ref().map(|p| p.natural), Some(ImageSize::from_pixels(8, 6)));
        assert!(app.state.viewport.display().is_measured());
    }
}
