//! Canvas 2D drawing surface.
//!
//! [`CanvasSurface`] implements the core `Surface` trait on top of an
//! `HtmlCanvasElement`, so the core renderer draws straight onto the page.
//! Filters go through the context's `filter` property and the browser applies
//! them while drawing.
//!
//! The decoded pixels of the current image are uploaded once into an offscreen
//! canvas, keyed by the image id, and reused by every redraw.

use image::RgbaImage;
use pixelpress_core::{FilterChain, LoadedImage, Surface, SurfaceError};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

fn backend_error(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
    canvas
        .get_context("2d")
        .map_err(backend_error)?
        .ok_or_else(|| SurfaceError::Backend("no 2d context".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SurfaceError::Backend("context is not a CanvasRenderingContext2d".to_string()))
}

/// Offscreen canvas holding the pixels of one loaded image.
#[derive(Debug)]
struct SourceCanvas {
    image_id: u64,
    canvas: HtmlCanvasElement,
}

/// A [`Surface`] backed by a browser canvas.
#[derive(Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    source: Option<SourceCanvas>,
}

impl CanvasSurface {
    /// Bind to `canvas`, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            source: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Offscreen canvas for `image`, uploading its pixels on first use.
    fn source_for(&mut self, image: &LoadedImage) -> Result<&HtmlCanvasElement, SurfaceError> {
        let cached = matches!(&self.source, Some(source) if source.image_id == image.id());
        if !cached {
            let canvas = upload(image)?;
            log::debug!(
                "uploaded {}x{} image {} to offscreen canvas",
                image.natural_width(),
                image.natural_height(),
                image.id()
            );
            self.source = Some(SourceCanvas {
                image_id: image.id(),
                canvas,
            });
        }

        self.source
            .as_ref()
            .map(|source| &source.canvas)
            .ok_or_else(|| SurfaceError::Backend("offscreen canvas missing".to_string()))
    }
}

/// Copy the decoded pixels of `image` into a new offscreen canvas.
fn upload(image: &LoadedImage) -> Result<HtmlCanvasElement, SurfaceError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| SurfaceError::Backend("no document".to_string()))?;
    let canvas = document
        .create_element("canvas")
        .map_err(backend_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SurfaceError::Backend("created element is not a canvas".to_string()))?;

    let (width, height) = image.natural_size();
    canvas.set_width(width);
    canvas.set_height(height);

    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(image.pixels().as_raw().as_slice()),
        width,
        height,
    )
    .map_err(backend_error)?;
    context_2d(&canvas)?
        .put_image_data(&data, 0.0, 0.0)
        .map_err(backend_error)?;

    Ok(canvas)
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Assigning either dimension clears the canvas and resets the context state.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_filter(&mut self, chain: &FilterChain) {
        self.ctx.set_filter(&chain.to_css());
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.translate(x, y).map_err(backend_error)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError> {
        self.ctx.rotate(radians).map_err(backend_error)
    }

    fn draw_image(
        &mut self,
        image: &LoadedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SurfaceError> {
        // A zero-sized source canvas cannot be drawn.
        if image.is_empty() {
            return Ok(());
        }
        let source = self.source_for(image)?.clone();
        self.ctx
            .draw_image_with_html_canvas_element_and_dw_and_dh(&source, x, y, width, height)
            .map_err(backend_error)
    }

    fn snapshot(&self) -> Result<RgbaImage, SurfaceError> {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Ok(RgbaImage::new(width, height));
        }

        let data = self
            .ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(backend_error)?
            .data()
            .0;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data).ok_or(SurfaceError::SnapshotMismatch {
            expected: width as usize * height as usize * 4,
            actual,
        })
    }
}
