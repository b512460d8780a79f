use crate::braille::BrailleCanvas;

/// Largest marker radius in braille pixels
const MAX_MARKER_RADIUS: i32 = 6;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel_signed(x, y);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Marker radius for a point size. Sizes are areas, so the radius follows
/// their square root: 20 → 1, 250 → 2, 420 → 3, merged clusters grow to 6.
pub fn marker_radius(size: f64) -> i32 {
    if !size.is_finite() || size <= 0.0 {
        return 0;
    }
    ((size.sqrt() / 7.0).round() as i32).clamp(0, MAX_MARKER_RADIUS)
}
