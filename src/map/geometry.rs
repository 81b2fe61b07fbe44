use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Fill pixel-space rings with the even-odd rule.
///
/// All rings belong to one shape, so an inner ring cuts a hole in an outer one.
/// Pixel centers are sampled; rows and columns are clipped to the canvas.
pub fn fill_polygon(canvas: &mut BrailleCanvas, rings: &[Vec<(i32, i32)>]) {
    let px_width = (canvas.width() * 2) as i32;
    let px_height = (canvas.height() * 4) as i32;

    let Some((min_y, max_y)) = rings
        .iter()
        .flatten()
        .fold(None, |acc: Option<(i32, i32)>, &(_, y)| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    else {
        return;
    };

    let mut crossings: Vec<f64> = Vec::new();
    for y in min_y.max(0)..=max_y.min(px_height - 1) {
        let scan = y as f64 + 0.5;
        crossings.clear();

        for ring in rings {
            if ring.len() < 3 {
                continue;
            }
            for (i, &(x0, y0)) in ring.iter().enumerate() {
                let (x1, y1) = ring[(i + 1) % ring.len()];
                let (fy0, fy1) = (y0 as f64, y1 as f64);
                // Half-open test so shared vertices are counted once
                if (fy0 <= scan && fy1 > scan) || (fy1 <= scan && fy0 > scan) {
                    let t = (scan - fy0) / (fy1 - fy0);
                    crossings.push(x0 as f64 + t * (x1 - x0) as f64);
                }
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = ((pair[0] - 0.5).ceil() as i32).max(0);
            let end = ((pair[1] - 0.5).floor() as i32).min(px_width - 1);
            for x in start..=end {
                canvas.set_pixel(x as usize, y as usize);
            }
        }
    }
}

/// Even-odd point-in-polygon test in geographic coordinates
pub fn point_in_rings(lon: f64, lat: f64, rings: &[Vec<(f64, f64)>]) -> bool {
    let mut inside = false;
    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Top dot of both columns in every cell
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_fill_square() {
        let mut canvas = BrailleCanvas::new(4, 2);
        fill_polygon(&mut canvas, &[vec![(0, 0), (8, 0), (8, 8), (0, 8)]]);
        assert_eq!(canvas.to_string(), "⣿⣿⣿⣿\n⣿⣿⣿⣿");
    }

    #[test]
    fn test_fill_with_hole() {
        let mut canvas = BrailleCanvas::new(6, 3);
        let outer = vec![(0, 0), (12, 0), (12, 12), (0, 12)];
        let hole = vec![(4, 4), (8, 4), (8, 8), (4, 8)];
        fill_polygon(&mut canvas, &[outer, hole]);
        assert_eq!(canvas.dot_count(0, 0), 8);
        assert_eq!(canvas.dot_count(2, 1), 0);
        assert_eq!(canvas.dot_count(5, 2), 8);
    }

    #[test]
    fn test_fill_clips_to_canvas() {
        let mut canvas = BrailleCanvas::new(2, 1);
        fill_polygon(&mut canvas, &[vec![(-10, -10), (50, -10), (50, 50), (-10, 50)]]);
        assert_eq!(canvas.to_string(), "⣿⣿");
    }

    #[test]
    fn test_fill_degenerate_ring() {
        let mut canvas = BrailleCanvas::new(2, 1);
        fill_polygon(&mut canvas, &[vec![(0, 0), (3, 3)]]);
        fill_polygon(&mut canvas, &[]);
        assert_eq!(canvas.to_string(), "\u{2800}\u{2800}");
    }

    #[test]
    fn test_point_in_rings() {
        let square = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let hole = vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)];
        assert!(point_in_rings(2.0, 2.0, &[square.clone()]));
        assert!(!point_in_rings(12.0, 2.0, &[square.clone()]));
        assert!(!point_in_rings(5.0, 5.0, &[square.clone(), hole.clone()]));
        assert!(point_in_rings(8.0, 8.0, &[square, hole]));
    }
}
