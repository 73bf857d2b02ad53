use pano_core::indicator::IconSpec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use super::pipeline::create_texture_bind_group;

const GLYPH_SIZE: u32 = 64;

pub(crate) enum TextureState {
    Pending,
    Ready {
        _texture: wgpu::Texture,
        bind_group: wgpu::BindGroup,
    },
    Failed(String),
    /// Released before the image arrived; the upload is skipped.
    Released,
}

pub(crate) type TextureSlot = Rc<RefCell<TextureState>>;

/// Everything an async image callback needs to finish an upload on its own.
#[derive(Clone)]
pub(crate) struct Uploader {
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) layout: wgpu::BindGroupLayout,
    pub(crate) sampler: wgpu::Sampler,
}

impl Uploader {
    fn upload(
        &self,
        label: &str,
        source: wgpu::ExternalImageSource,
        width: u32,
        height: u32,
    ) -> TextureState {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source,
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group =
            create_texture_bind_group(&self.device, &self.layout, &view, &self.sampler);
        TextureState::Ready {
            _texture: texture,
            bind_group,
        }
    }

    fn max_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

async fn load_image(uri: &str) -> Result<web::HtmlImageElement, String> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(uri);
    JsFuture::from(img.decode()).await.map_err(js_err)?;
    Ok(img)
}

fn create_canvas(
    width: u32,
    height: u32,
) -> Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d), JsValue> {
    let document =
        crate::dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: web::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    Ok((canvas, ctx))
}

/// Round badge in the action color with the fallback glyph on top.
fn draw_glyph(icon: &IconSpec) -> Result<web::HtmlCanvasElement, JsValue> {
    let (canvas, ctx) = create_canvas(GLYPH_SIZE, GLYPH_SIZE)?;
    let half = GLYPH_SIZE as f64 / 2.0;
    let [r, g, b] = icon.color;
    ctx.begin_path();
    ctx.arc(half, half, half - 2.0, 0.0, std::f64::consts::TAU)?;
    ctx.set_fill_style_str(&format!(
        "rgb({}, {}, {})",
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8
    ));
    ctx.fill();
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("bold 34px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&icon.glyph.to_string(), half, half + 2.0)?;
    Ok(canvas)
}

/// Images larger than the device allows are scaled down through a canvas.
fn fit_to_limit(
    img: &web::HtmlImageElement,
    max: u32,
) -> Result<(wgpu::ExternalImageSource, u32, u32), JsValue> {
    let (w, h) = (img.natural_width(), img.natural_height());
    if w <= max && h <= max {
        return Ok((wgpu::ExternalImageSource::HTMLImageElement(img.clone()), w, h));
    }
    let scale = max as f64 / w.max(h) as f64;
    let (sw, sh) = (
        ((w as f64 * scale) as u32).max(1),
        ((h as f64 * scale) as u32).max(1),
    );
    log::warn!("[texture] downscaling {}x{} image to {}x{}", w, h, sw, sh);
    let (canvas, ctx) = create_canvas(sw, sh)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, sw as f64, sh as f64)?;
    Ok((wgpu::ExternalImageSource::HTMLCanvasElement(canvas), sw, sh))
}

fn finish(slot: &TextureSlot, state: TextureState) {
    let mut current = slot.borrow_mut();
    if !matches!(*current, TextureState::Released) {
        *current = state;
    }
}

/// Fetch and upload an equirectangular panorama image.
pub(crate) fn spawn_panorama_load(uploader: Uploader, slot: TextureSlot, uri: String) {
    spawn_local(async move {
        let result = match load_image(&uri).await {
            Ok(img) => fit_to_limit(&img, uploader.max_dimension()).map_err(js_err),
            Err(e) => Err(e),
        };
        if matches!(*slot.borrow(), TextureState::Released) {
            return;
        }
        let state = match result {
            Ok((source, w, h)) => uploader.upload("panorama_tex", source, w, h),
            Err(reason) => {
                log::warn!("[texture] {} failed: {}", uri, reason);
                TextureState::Failed(reason)
            }
        };
        finish(&slot, state);
    });
}

/// Load an icon asset, falling back to the generated glyph.
pub(crate) fn spawn_icon_load(uploader: Uploader, slot: TextureSlot, icon: IconSpec) {
    spawn_local(async move {
        let asset = match icon.asset.as_deref() {
            Some(uri) => match load_image(uri).await {
                Ok(img) => Some(img),
                Err(e) => {
                    log::debug!("[texture] icon {} unavailable ({}); using glyph", uri, e);
                    None
                }
            },
            None => None,
        };
        if matches!(*slot.borrow(), TextureState::Released) {
            return;
        }
        let state = match asset {
            Some(img) => {
                let (w, h) = (img.natural_width(), img.natural_height());
                uploader.upload(
                    "icon_tex",
                    wgpu::ExternalImageSource::HTMLImageElement(img),
                    w,
                    h,
                )
            }
            None => match draw_glyph(&icon) {
                Ok(canvas) => uploader.upload(
                    "glyph_tex",
                    wgpu::ExternalImageSource::HTMLCanvasElement(canvas),
                    GLYPH_SIZE,
                    GLYPH_SIZE,
                ),
                Err(e) => TextureState::Failed(js_err(e)),
            },
        };
        finish(&slot, state);
    });
}
