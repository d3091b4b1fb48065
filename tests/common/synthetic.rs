use ndarray::{Array2, Array3};

/// Mask with a filled axis-aligned rectangle `[y0, y1) x [x0, x1)`.
pub fn rect_mask(height: usize, width: usize, y0: usize, x0: usize, y1: usize, x1: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        (y >= y0 && y < y1 && x >= x0 && x < x1) as u8
    })
}

/// Mask with a filled disk.
pub fn disk_mask(height: usize, width: usize, cy: f64, cx: f64, radius: f64) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        let dy = y as f64 - cy;
        let dx = x as f64 - cx;
        (dy * dy + dx * dx <= radius * radius) as u8
    })
}

/// Deterministic RGB image covering the full byte range in every channel.
pub fn rgb_pattern(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        ((y * 31 + x * 17 + c * 89) % 256) as u8
    })
}
