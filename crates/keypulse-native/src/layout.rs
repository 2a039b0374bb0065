// Quadrant geometry and compositing of the per-region rasters into one frame.

use keypulse_core::{PixelSurface, Region, REGION_COUNT};

/// Pixel rectangle of one quadrant inside the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Split a `width` x `height` window into the 2x2 grid. The right column and
/// bottom row absorb odd pixels so the cells tile the window exactly.
pub fn quadrants(width: u32, height: u32) -> [Cell; REGION_COUNT] {
    let left = width / 2;
    let top = height / 2;
    Region::ALL.map(|region| {
        let (col, row) = region.grid_cell();
        let (x, w) = if col == 0 { (0, left) } else { (left, width - left) };
        let (y, h) = if row == 0 { (0, top) } else { (top, height - top) };
        Cell {
            x,
            y,
            width: w,
            height: h,
        }
    })
}

/// Copy every region's raster into `frame` (row-major RGBA8, `width` wide).
pub fn compose(
    frame: &mut Vec<[u8; 4]>,
    width: u32,
    height: u32,
    surfaces: &[PixelSurface; REGION_COUNT],
) {
    frame.resize((width as usize) * (height as usize), [0; 4]);
    for (cell, surface) in quadrants(width, height).iter().zip(surfaces) {
        let (sw, sh) = surface.dimensions();
        let cols = sw.min(cell.width) as usize;
        for y in 0..sh.min(cell.height) {
            let start = ((cell.y + y) as usize) * (width as usize) + cell.x as usize;
            frame[start..start + cols].copy_from_slice(&surface.row(y)[..cols]);
        }
    }
}
