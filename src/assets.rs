// assets.rs — asset lookup, background decoding, placeholder fallback
//
// Assets are searched in:
// 1) --assets <dir> / MEGA_COMPARISON_ASSETS
// 2) <exe_dir>/assets
// 3) ./assets (dev working dir)

use crate::catalog::Resolution;
use crate::error::{Error, Result};
use image::io::Reader as ImageReader;
use image::{Rgba, RgbaImage};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

pub const ASSETS_ENV: &str = "MEGA_COMPARISON_ASSETS";

/// Reference photo for the focal length view, under `images/`.
pub const REFERENCE_PHOTO: &str = "origin.png";

/// Decoded images are downscaled to fit this on each side before upload.
pub const MAX_TEXTURE_SIDE: u32 = 4096;

pub const PLACEHOLDER_WIDTH: u32 = 600;
pub const PLACEHOLDER_HEIGHT: u32 = 400;

static ASSET_ROOT: OnceCell<PathBuf> = OnceCell::new();

/// Set the asset directory given on the command line. Only the first call counts.
pub fn set_asset_root(dir: PathBuf) {
    let _ = ASSET_ROOT.set(dir);
}

pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(root) = ASSET_ROOT.get() {
        dirs.push(root.clone());
    }

    if let Ok(v) = std::env::var(ASSETS_ENV) {
        if !v.trim().is_empty() {
            dirs.push(PathBuf::from(v));
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.join("assets"));
        }
    }

    dirs.push(PathBuf::from("assets"));
    dirs
}

pub fn find_asset(relative: &Path) -> Option<PathBuf> {
    search_dirs()
        .into_iter()
        .map(|d| d.join(relative))
        .find(|p| p.exists())
}

fn image_asset(name: &str) -> Result<PathBuf> {
    let relative = Path::new("images").join(name);
    find_asset(&relative).ok_or_else(|| Error::AssetNotFound(relative.display().to_string()))
}

pub fn decode_image(path: &Path) -> Result<RgbaImage> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let img = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|mut r| {
            r.no_limits();
            r.decode()
        })
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(img.to_rgba8())
}

/// Grey card with a cross, shown wherever an image failed to load.
pub fn placeholder_image() -> RgbaImage {
    let (w, h) = (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT);
    let background = Rgba([229, 231, 235, 255]);
    let stroke = Rgba([156, 163, 175, 255]);

    RgbaImage::from_fn(w, h, |x, y| {
        let is_border = x < 3 || x >= w - 3 || y < 3 || y >= h - 3;
        // Diagonals of a non-square image: compare in normalized coordinates.
        let u = x as f32 / (w - 1) as f32;
        let v = y as f32 / (h - 1) as f32;
        let thickness = 2.0 / h as f32;
        let on_diagonal = (u - v).abs() < thickness || (1.0 - u - v).abs() < thickness;

        if is_border || on_diagonal {
            stroke
        } else {
            background
        }
    })
}

fn fit_texture(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= MAX_TEXTURE_SIDE && h <= MAX_TEXTURE_SIDE {
        return img;
    }
    let scale = MAX_TEXTURE_SIDE as f32 / w.max(h) as f32;
    let new_w = ((w as f32 * scale) as u32).max(1);
    let new_h = ((h as f32 * scale) as u32).max(1);
    image::imageops::resize(&img, new_w, new_h, image::imageops::FilterType::Lanczos3)
}

/// Which on-screen slot an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// The focal-view photo, tagged with the request generation that asked for it.
    Reference(u64),
    Sample(Resolution),
}

#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file under `images/` in the asset directories.
    Asset(String),
    /// A file the user picked or dropped.
    File(PathBuf),
}

impl ImageSource {
    pub fn reference() -> Self {
        ImageSource::Asset(REFERENCE_PHOTO.to_string())
    }

    pub fn sample(r: Resolution) -> Self {
        ImageSource::Asset(r.sample_file())
    }

    fn describe(&self) -> String {
        match self {
            ImageSource::Asset(name) => name.clone(),
            ImageSource::File(path) => path.display().to_string(),
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        match self {
            ImageSource::Asset(name) => image_asset(name),
            ImageSource::File(path) => Ok(path.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub slot: ImageSlot,
    /// Intrinsic pixel size of the source, before any downscaling.
    pub natural: (u32, u32),
    pub rgba: RgbaImage,
    pub is_placeholder: bool,
}

/// Decode `source`, or fall back to the placeholder if anything goes wrong.
pub fn load_or_placeholder(slot: ImageSlot, source: &ImageSource) -> LoadedImage {
    match source.resolve().and_then(|p| decode_image(&p)) {
        Ok(rgba) => {
            let natural = rgba.dimensions();
            log::info!(
                "{}",
                crate::i18n::tr_with(
                    "log.image_loaded_size",
                    &[("w", natural.0.to_string()), ("h", natural.1.to_string())]
                )
            );
            LoadedImage {
                slot,
                natural,
                rgba: fit_texture(rgba),
                is_placeholder: false,
            }
        }
        Err(e) => {
            log::warn!(
                "{}",
                crate::i18n::tr_with(
                    "log.placeholder",
                    &[("name", source.describe()), ("err", e.to_string())]
                )
            );
            let rgba = placeholder_image();
            LoadedImage {
                slot,
                natural: rgba.dimensions(),
                rgba,
                is_placeholder: true,
            }
        }
    }
}

pub fn start_load_image(slot: ImageSlot, source: ImageSource, tx: Sender<LoadedImage>) {
    thread::spawn(move || {
        log::debug!(
            "{}",
            crate::i18n::tr_with("log.loading_image_bg", &[("path", source.describe())])
        );

        let loaded = load_or_placeholder(slot, &source);
        if tx.send(loaded).is_err() {
            log::error!("{}", crate::i18n::tr("error.send_to_main_failed"));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_placeholder_has_border_and_cross() {
        let img = placeholder_image();
        assert_eq!(img.dimensions(), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
        let stroke = Rgba([156, 163, 175, 255]);
        assert_eq!(*img.get_pixel(0, 0), stroke);
        assert_eq!(*img.get_pixel(PLACEHOLDER_WIDTH / 2, PLACEHOLDER_HEIGHT / 2), stroke);
        assert_ne!(*img.get_pixel(PLACEHOLDER_WIDTH / 2, 20), stroke);
    }

    #[test]
    fn test_missing_asset_falls_back() {
        let source = ImageSource::Asset("does-not-exist-7f3a.png".to_string());
        let loaded = load_or_placeholder(ImageSlot::Reference(0), &source);
        assert!(loaded.is_placeholder);
        assert_eq!(loaded.natural, (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
    }

    #[test]
    fn test_undecodable_file_falls_back() {
        let path = std::env::temp_dir().join(format!("mega_comparison_bad_{}.png", std::process::id()));
        std::fs::write(&path, b"not an image").expect("write temp file");
        let loaded = load_or_placeholder(ImageSlot::Sample(Resolution::Mp20), &ImageSource::File(path.clone()));
        let _ = std::fs::remove_file(&path);
        assert!(loaded.is_placeholder);
        assert_eq!(loaded.slot, ImageSlot::Sample(Resolution::Mp20));
    }

    #[test]
    fn test_decodes_real_file() {
        let path = std::env::temp_dir().join(format!("mega_comparison_ok_{}.png", std::process::id()));
        RgbaImage::from_pixel(30, 20, Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");
        let loaded = load_or_placeholder(ImageSlot::Reference(0), &ImageSource::File(path.clone()));
        let _ = std::fs::remove_file(&path);
        assert!(!loaded.is_placeholder);
        assert_eq!(loaded.natural, (30, 20));
    }

    #[test]
    fn test_large_images_are_downscaled() {
        let img = RgbaImage::new(MAX_TEXTURE_SIDE * 2, 10);
        let fitted = fit_texture(img);
        assert_eq!(fitted.width(), MAX_TEXTURE_SIDE);
        assert!(fitted.height() >= 1);
    }

    #[test]
    fn test_background_load_delivers() {
        let (tx, rx) = channel();
        start_load_image(ImageSlot::Reference(3), ImageSource::Asset("missing-9c1d.png".into()), tx);
        let loaded = rx.recv().expect("worker sends a result");
        assert_eq!(loaded.slot, ImageSlot::Reference(3));
        assert!(loaded.is_placeholder);
    }

    #[test]
    fn test_missing_asset_error_names_path() {
        let err = image_asset("nope-4471.jpg").unwrap_err();
        assert!(err.to_string().contains("nope-4471.jpg"));
    }
}
