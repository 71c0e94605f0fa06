//! Projecting a [`Drawing`] through window bounds and writing it out.
//!
//! A [`Viewport`] maps the world-coordinate window of an
//! [`IfsConfig`](crate::config::IfsConfig) onto a pixel rectangle, pinning the
//! longer world axis to the requested window size and scaling the other by the
//! aspect ratio. [`write_svg`] emits one `<polyline>` per recorded stroke;
//! [`write_json`] dumps the drawing itself for other renderers to pick up.

use crate::config::Bounds;
use crate::drawing::{Drawing, palette_color};
use glam::Vec2;
use std::io::{self, Write};

/// A pixel window looking at a world-coordinate rectangle.
///
/// Construction fixes the pixel size; [`project`](Viewport::project) then maps
/// world points into it. World y grows upward, pixel y grows downward, so the
/// projection flips the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Fits a window of at most `window_size` pixels per side around `bounds`.
    ///
    /// The longer world axis gets exactly `window_size` pixels; the other is
    /// scaled by the aspect ratio and rounded, so world squares stay square on
    /// screen.
    pub fn fit(bounds: Bounds, window_size: u32) -> Self {
        let size = window_size as f32;
        let (width, height) = if bounds.height() > bounds.width() {
            ((bounds.width() / bounds.height() * size).round() as u32, window_size)
        } else {
            (window_size, (bounds.height() / bounds.width() * size).round() as u32)
        };
        Self {
            bounds,
            width,
            height,
        }
    }

    /// World bounds this viewport was fitted around.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Maps a world point to pixel coordinates, flipping the y axis.
    ///
    /// Points outside the bounds land outside the pixel rectangle; nothing is
    /// clipped here.
    pub fn project(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            (point.x - self.bounds.x_min) / self.bounds.width() * self.width as f32,
            (self.bounds.y_max - point.y) / self.bounds.height() * self.height as f32,
        )
    }
}

/// Writes `drawing` as an SVG document seen through `viewport`.
///
/// Emits a white background and one `<polyline>` per stroke, stroked with the
/// palette color the stroke was recorded with. Strokes keep their draw order.
pub fn write_svg<W: Write>(drawing: &Drawing, viewport: &Viewport, out: &mut W) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = viewport.width,
        h = viewport.height,
    )?;
    writeln!(out, r##"  <rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    for path in &drawing.paths {
        write!(
            out,
            r#"  <polyline fill="none" stroke="{}" stroke-width="1" points=""#,
            palette_color(path.color).to_hex()
        )?;
        for (i, &point) in path.points.iter().enumerate() {
            let pixel = viewport.project(point);
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{:.2},{:.2}", pixel.x, pixel.y)?;
        }
        writeln!(out, r#""/>"#)?;
    }
    writeln!(out, "</svg>")
}

/// Renders the SVG document to a string.
pub fn svg_to_string(drawing: &Drawing, viewport: &Viewport) -> String {
    let mut buf = Vec::new();
    write_svg(drawing, viewport, &mut buf).expect("writing to Vec cannot fail");
    String::from_utf8(buf).expect("output is valid UTF-8")
}

/// Writes `drawing` as pretty-printed JSON, world coordinates untouched.
pub fn write_json<W: Write>(drawing: &Drawing, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, drawing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::Polyline;

    fn square_bounds() -> Bounds {
        Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn wide_bounds_pin_the_width() {
        let bounds = Bounds {
            x_min: -0.1,
            x_max: 1.1,
            y_min: -0.1,
            y_max: 0.4,
        };
        let viewport = Viewport::fit(bounds, 600);
        assert_eq!(viewport.width, 600);
        // 0.5 / 1.2 * 600 = 250
        assert_eq!(viewport.height, 250);
    }

    #[test]
    fn tall_bounds_pin_the_height() {
        let bounds = Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 4.0,
        };
        let viewport = Viewport::fit(bounds, 600);
        assert_eq!(viewport.height, 600);
        assert_eq!(viewport.width, 150);
    }

    #[test]
    fn scaled_side_is_rounded_to_pixels() {
        let bounds = Bounds {
            x_min: 0.0,
            x_max: 3.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        // 1/3 * 100 = 33.33... -> 33
        assert_eq!(Viewport::fit(bounds, 100).height, 33);
    }

    #[test]
    fn projection_flips_y() {
        let viewport = Viewport::fit(square_bounds(), 100);
        assert_eq!(viewport.project(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 100.0));
        assert_eq!(viewport.project(Vec2::new(0.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(viewport.project(Vec2::new(1.0, 0.5)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn projection_respects_offset_bounds() {
        let bounds = Bounds {
            x_min: -2.0,
            x_max: 2.0,
            y_min: -1.0,
            y_max: 1.0,
        };
        let viewport = Viewport::fit(bounds, 400);
        // World origin sits in the middle of the window.
        assert_eq!(viewport.project(Vec2::ZERO), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn svg_contains_one_polyline_per_stroke() {
        let mut drawing = Drawing::new();
        drawing.add_path(Polyline {
            color: 0,
            points: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        });
        drawing.add_path(Polyline {
            color: 1,
            points: vec![Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
        });
        let svg = svg_to_string(&drawing, &Viewport::fit(square_bounds(), 100));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(r##"stroke="#000000""##));
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains(r#"points="0.00,100.00 100.00,100.00""#));
    }

    #[test]
    fn svg_has_background_and_dimensions() {
        let svg = svg_to_string(&Drawing::new(), &Viewport::fit(square_bounds(), 250));
        assert!(svg.contains(r#"width="250" height="250""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(!svg.contains("<polyline"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn json_round_trips_the_drawing() {
        let mut drawing = Drawing::new();
        drawing.add_path(Polyline {
            color: 3,
            points: vec![Vec2::ZERO, Vec2::ONE],
        });
        let mut buf = Vec::new();
        write_json(&drawing, &mut buf).unwrap();
        let parsed: Drawing = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, drawing);
    }
}
