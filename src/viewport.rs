// viewport.rs — focal-length crop rectangle over the reference photo
//
// Everything is in display units (egui points) unless the name says natural.
// Pipeline: FocalLength + display size (+ optional click) -> fov, ViewRect, Position,
// and from there the crop in natural pixels that feeds the magnified preview.

use crate::optics::FocalLength;
use glam::DVec2;

/// Width / height of the crop rectangle.
pub const VIEW_ASPECT: f64 = 3.0 / 2.0;

/// Fixed width of the magnified preview panel.
pub const PREVIEW_WIDTH: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }

    /// False until the image has been laid out at least once.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Size of this image when drawn `available_width` wide with its aspect kept.
    pub fn fit_width(&self, available_width: f64) -> Self {
        if !self.is_measured() || available_width <= 0.0 {
            return Self::ZERO;
        }
        Self::new(available_width, available_width * self.height / self.width)
    }

    /// Largest size with this aspect that fits in `bounds`.
    pub fn fit_within(&self, bounds: ImageSize) -> Self {
        if !self.is_measured() || !bounds.is_measured() {
            return Self::ZERO;
        }
        let scale = (bounds.width / self.width).min(bounds.height / self.height);
        Self::new(self.width * scale, self.height * scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewRect {
    pub width: f64,
    pub height: f64,
}

impl ViewRect {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    /// A zero rect means the image is not measured yet; skip drawing the overlay.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Top-left corner of the [`ViewRect`] relative to the image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Crop rectangle for `fov` degrees over an image `display_width` wide.
///
/// The widest focal length spans the full width; longer lenses shrink the rect
/// by the ratio of their field of view to the widest one.
pub fn view_rect(fov: f64, display_width: f64) -> ViewRect {
    if display_width <= 0.0 {
        return ViewRect::ZERO;
    }
    let scale = fov / FocalLength::widest().fov();
    let width = display_width * scale;
    ViewRect { width, height: width / VIEW_ASPECT }
}

pub fn centered_position(display: ImageSize, rect: ViewRect) -> Position {
    Position {
        x: (display.width - rect.width) / 2.0,
        y: (display.height - rect.height) / 2.0,
    }
}

/// Position that centers `rect` on `point`, then pulls it back inside the image.
///
/// When the rect is larger than the image on an axis the range collapses and
/// that axis pins to 0.
pub fn position_for_click(point: DVec2, display: ImageSize, rect: ViewRect) -> Position {
    let half = DVec2::new(rect.width, rect.height) / 2.0;
    let max = DVec2::new(display.width - rect.width, display.height - rect.height);
    // min-then-max rather than clamp(): max may be negative.
    (point - half).min(max).max(DVec2::ZERO).into()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub fov: f64,
    pub view_rect: ViewRect,
    pub position: Position,
}

/// Derive everything the overlay needs from the current inputs.
///
/// `last_click` is relative to the image's top-left corner. Without it the rect
/// sits in the center.
pub fn derive_view_state(
    focal: FocalLength,
    display: ImageSize,
    last_click: Option<DVec2>,
) -> ViewState {
    let fov = focal.fov();
    let rect = view_rect(fov, display.width);
    let position = match last_click {
        Some(point) if display.is_measured() => position_for_click(point, display, rect),
        _ => centered_position(display, rect),
    };
    ViewState { fov, view_rect: rect, position }
}

/// Interactive state of the focal-length view.
///
/// Any change of focal length or display size re-centers the rect; a click
/// moves it until the next such change.
#[derive(Debug, Clone)]
pub struct FocalViewport {
    focal: FocalLength,
    display: ImageSize,
    /// Last click relative to the image's top-left corner.
    last_click: Option<DVec2>,
}

impl Default for FocalViewport {
    fn default() -> Self {
        Self::new(FocalLength::default())
    }
}

impl FocalViewport {
    pub fn new(focal: FocalLength) -> Self {
        Self {
            focal,
            display: ImageSize::ZERO,
            last_click: None,
        }
    }

    pub fn focal(&self) -> FocalLength {
        self.focal
    }

    pub fn display(&self) -> ImageSize {
        self.display
    }

    pub fn position(&self) -> Position {
        self.state().position
    }

    pub fn fov(&self) -> f64 {
        self.focal.fov()
    }

    pub fn view_rect(&self) -> ViewRect {
        view_rect(self.fov(), self.display.width)
    }

    pub fn set_focal_length(&mut self, focal: FocalLength) {
        if focal == self.focal {
            return;
        }
        self.focal = focal;
        self.recenter();
    }

    /// Record the laid-out size of the image. Returns true if it changed.
    pub fn set_image_size(&mut self, display: ImageSize) -> bool {
        if display == self.display {
            return false;
        }
        self.display = display;
        self.recenter();
        true
    }

    pub fn recenter(&mut self) {
        self.last_click = None;
    }

    /// Move the rect so it is centered on a pointer press at `pointer`, given
    /// the image's top-left corner at `container_origin` (same coordinate space).
    pub fn click(&mut self, pointer: DVec2, container_origin: DVec2) {
        if !self.display.is_measured() {
            return;
        }
        self.last_click = Some(pointer - container_origin);
    }

    pub fn state(&self) -> ViewState {
        derive_view_state(self.focal, self.display, self.last_click)
    }

    pub fn crop(&self, natural: ImageSize) -> Option<CropProjection> {
        crop_projection(self.position(), self.view_rect(), self.display, natural)
    }
}

/// The covered region in natural (source pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProjection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn crop_projection(
    position: Position,
    rect: ViewRect,
    display: ImageSize,
    natural: ImageSize,
) -> Option<CropProjection> {
    if !display.is_measured() || !natural.is_measured() || !rect.is_ready() {
        return None;
    }
    let scale_x = natural.width / display.width;
    let scale_y = natural.height / display.height;
    Some(CropProjection {
        x: position.x * scale_x,
        y: position.y * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
    })
}

/// Panel size plus background zoom/pan that shows exactly the crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub width: f64,
    pub height: f64,
    /// Size the whole source image is drawn at behind the panel.
    pub background_size: DVec2,
    /// Where the source image's top-left lands relative to the panel.
    pub background_offset: DVec2,
}

pub fn preview_layout(crop: CropProjection, rect: ViewRect, natural: ImageSize) -> PreviewLayout {
    let width = PREVIEW_WIDTH;
    let height = width / rect.width * rect.height;
    let zoom = DVec2::new(width / crop.width, height / crop.height);
    PreviewLayout {
        width,
        height,
        background_size: DVec2::new(natural.width, natural.height) * zoom,
        background_offset: -DVec2::new(crop.x, crop.y) * zoom,
    }
}
