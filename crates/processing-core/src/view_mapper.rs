//! Source-video ↔ output-canvas coordinate mapping.
//!
//! The source video is aspect-fit inside the output canvas after a padding
//! inset; `content_rect` is where it lands. Camera viewports are expressed
//! in canvas pixels, so a viewport may show padding as well as video.

use zoomreel_project_model::geometry::{Point, Rect, Size};

/// Matching sub-rectangles for drawing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRects {
    /// Region of the source video to sample (source pixels).
    pub source: Rect,
    /// Where that region lands on screen (output pixels).
    pub destination: Rect,
}

/// Affine mapping between source-video space and output-canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewMapper {
    input_size: Size,
    output_size: Size,
    content_rect: Rect,
    scale: f64,
}

impl ViewMapper {
    /// `padding` is the fraction of each canvas dimension inset on every
    /// side before fitting; it is clamped to `[0, 0.5)`.
    pub fn new(input_size: Size, output_size: Size, padding: f64) -> Self {
        let padding = if padding.is_finite() {
            padding.clamp(0.0, 0.49)
        } else {
            0.0
        };
        let avail_w = output_size.width * (1.0 - 2.0 * padding);
        let avail_h = output_size.height * (1.0 - 2.0 * padding);

        let scale = if input_size.is_empty() {
            1.0
        } else {
            (avail_w / input_size.width).min(avail_h / input_size.height)
        };
        let width = input_size.width * scale;
        let height = input_size.height * scale;
        let content_rect = Rect::new(
            (output_size.width - width) / 2.0,
            (output_size.height - height) / 2.0,
            width,
            height,
        );

        Self {
            input_size,
            output_size,
            content_rect,
            scale,
        }
    }

    pub fn input_size(&self) -> Size {
        self.input_size
    }

    pub fn output_size(&self) -> Size {
        self.output_size
    }

    /// Placement of the source video inside the canvas.
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    /// Source → output scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Full source frame in source coordinates.
    pub fn input_frame(&self) -> Rect {
        Rect::from_size(self.input_size)
    }

    /// Full canvas in output coordinates.
    pub fn output_frame(&self) -> Rect {
        Rect::from_size(self.output_size)
    }

    pub fn input_to_output_point(&self, p: Point) -> Point {
        Point::new(
            self.content_rect.x + p.x * self.scale,
            self.content_rect.y + p.y * self.scale,
        )
    }

    pub fn input_to_output_rect(&self, r: &Rect) -> Rect {
        let origin = self.input_to_output_point(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * self.scale, r.height * self.scale)
    }

    /// Inverse of [`input_to_output_rect`](Self::input_to_output_rect).
    pub fn output_to_input_rect(&self, r: &Rect) -> Rect {
        if self.scale <= 0.0 {
            return Rect::default();
        }
        Rect::new(
            (r.x - self.content_rect.x) / self.scale,
            (r.y - self.content_rect.y) / self.scale,
            r.width / self.scale,
            r.height / self.scale,
        )
    }

    /// Source and screen rectangles to draw for the given viewport, or
    /// `None` when the viewport shows only padding.
    pub fn resolve_render_rects(&self, viewport: &Rect) -> Option<RenderRects> {
        if viewport.is_empty() {
            return None;
        }
        let visible = viewport.intersection(&self.content_rect)?;
        let zoom_x = self.output_size.width / viewport.width;
        let zoom_y = self.output_size.height / viewport.height;

        Some(RenderRects {
            source: self.output_to_input_rect(&visible),
            destination: Rect::new(
                (visible.x - viewport.x) * zoom_x,
                (visible.y - viewport.y) * zoom_y,
                visible.width * zoom_x,
                visible.height * zoom_y,
            ),
        })
    }

    /// Where a source point appears on screen under the given viewport.
    pub fn project_to_screen(&self, p: Point, viewport: &Rect) -> Point {
        let canvas = self.input_to_output_point(p);
        if viewport.is_empty() {
            return canvas;
        }
        Point::new(
            (canvas.x - viewport.x) * self.output_size.width / viewport.width,
            (canvas.y - viewport.y) * self.output_size.height / viewport.height,
        )
    }
}
