// layout.rs — proportional block sizes for the resolution and sensor comparisons

use crate::catalog::{Resolution, SensorFormat};

/// Blocks are never drawn smaller than this, so labels stay readable.
pub const MIN_BLOCK_WIDTH: f32 = 40.0;
pub const MIN_BLOCK_HEIGHT: f32 = 30.0;

/// Sensor blocks never grow past this width regardless of the window.
pub const MAX_SENSOR_BASE_WIDTH: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSize {
    pub width: f32,
    pub height: f32,
}

impl BlockSize {
    /// Size to actually paint, with the minimum applied.
    pub fn drawn(&self) -> BlockSize {
        BlockSize {
            width: self.width.max(MIN_BLOCK_WIDTH),
            height: self.height.max(MIN_BLOCK_HEIGHT),
        }
    }
}

/// A block to paint in stacked mode. Offsets are from the stack's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedBlock<T> {
    pub item: T,
    pub size: BlockSize,
    pub offset: [f32; 2],
    /// Paint order; higher is on top.
    pub z: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<StackedBlock<T>>,
}

/// Anything that can be drawn as a scaled block.
pub trait Block: Copy {
    /// Physical size in the item's own units.
    fn extent(&self) -> (f64, f64);

    /// Display units per physical unit for a container `container_width` wide.
    fn scale(container_width: f32) -> f32;

    fn block_size(&self, container_width: f32) -> BlockSize {
        let (w, h) = self.extent();
        let scale = Self::scale(container_width);
        BlockSize {
            width: w as f32 * scale,
            height: h as f32 * scale,
        }
    }

    /// Sort key; larger blocks come first in stacked order.
    fn magnitude(&self) -> f64 {
        let (w, h) = self.extent();
        w * h
    }
}

impl Block for Resolution {
    fn extent(&self) -> (f64, f64) {
        let (w, h) = self.dimensions();
        (f64::from(w), f64::from(h))
    }

    fn scale(container_width: f32) -> f32 {
        let reference = Resolution::LARGEST.dimensions().0 as f32;
        container_width.clamp(0.0, reference) / reference
    }
}

impl Block for SensorFormat {
    fn extent(&self) -> (f64, f64) {
        self.dimensions_mm()
    }

    fn scale(container_width: f32) -> f32 {
        let reference = SensorFormat::LARGEST.dimensions_mm().0 as f32;
        container_width.clamp(0.0, MAX_SENSOR_BASE_WIDTH) / reference
    }
}

/// Items ordered largest first.
pub fn largest_first<T: Block>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
    sorted
}

/// Items ordered smallest first, each with its size, for the side-by-side view.
pub fn side_by_side<T: Block>(items: &[T], container_width: f32) -> Vec<(T, BlockSize)> {
    let mut sorted = largest_first(items);
    sorted.reverse();
    sorted
        .into_iter()
        .map(|item| (item, item.block_size(container_width)))
        .collect()
}

/// Center every block inside the bounding box of the largest one, biggest at the bottom.
pub fn stacked<T: Block>(items: &[T], container_width: f32) -> Stack<T> {
    let sizes: Vec<BlockSize> = items.iter().map(|i| i.block_size(container_width)).collect();
    let width = sizes.iter().map(|s| s.width).fold(0.0, f32::max);
    let height = sizes.iter().map(|s| s.height).fold(0.0, f32::max);

    let blocks = largest_first(items)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let size = item.block_size(container_width);
            StackedBlock {
                item,
                size,
                offset: [(width - size.width) / 2.0, (height - size.height) / 2.0],
                z: index + 1,
            }
        })
        .collect();

    Stack { width, height, blocks }
}
