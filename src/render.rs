use crate::batch::{bucket_opacity, Streak, StreakBatches};
use crate::constants::*;
use crate::dom;
use crate::input::{centered_transform, tablet_transform};
use fnv::FnvHashMap;
use katharos_core::{
    css_rgba, DrawHint, EntityId, Layer, RenderInstance, Resolved, SpriteId, Viewport, CURSOR_GOLD,
    RAIN_COLOR,
};
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn deg_to_rad(deg: f32) -> f64 {
    deg as f64 * PI / 180.0
}

#[inline]
fn rgb_key(color: [f32; 4]) -> [u8; 3] {
    [
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

/// Canvas 2D painter for the per-frame layers below the DOM overlays.
pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    sprite: Option<web::HtmlImageElement>,
    dpr: f64,
    rain: StreakBatches,
    rain_styles: Vec<String>,
    /// Opaque fill per distinct colour; alpha goes through global alpha.
    fills: FnvHashMap<[u8; 3], String>,
}

impl Painter {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let dpr = dom::sync_canvas_backing_size(&canvas);
        let rain = StreakBatches::new(RAIN_OPACITY_BUCKETS);
        let rain_styles = (0..rain.bucket_count())
            .map(|b| css_rgba(RAIN_COLOR, bucket_opacity(b, rain.bucket_count())))
            .collect();
        Ok(Self {
            canvas,
            ctx,
            sprite: None,
            dpr,
            rain,
            rain_styles,
            fills: FnvHashMap::default(),
        })
    }

    pub fn set_sprite(&mut self, image: web::HtmlImageElement) {
        self.sprite = Some(image);
    }

    pub fn resize(&mut self) {
        self.dpr = dom::sync_canvas_backing_size(&self.canvas);
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn paint(&mut self, instances: &[RenderInstance], viewport: Viewport) {
        _ = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
        for inst in instances {
            // rain is contiguous; stroke it before the next layer covers it
            if inst.layer != Layer::Rain && !self.rain.is_empty() {
                self.flush_rain();
            }
            match (inst.layer, inst.hint) {
                (Layer::Embers, DrawHint::Glow) => self.ember(inst),
                (Layer::Rain, DrawHint::Line { length }) => {
                    self.rain.push(
                        inst.opacity,
                        Streak {
                            x: inst.position.x,
                            y0: inst.position.y,
                            y1: inst.position.y + length,
                        },
                    );
                }
                (Layer::Relics, DrawHint::Cube(sprite)) => self.relic(inst, sprite),
                (Layer::Ripples, DrawHint::Ring) => self.ripple(inst),
                (Layer::Sparks, DrawHint::Dot) => self.spark(inst),
                _ => {}
            }
        }
        self.flush_rain();
    }

    fn flush_rain(&mut self) {
        let ctx = &self.ctx;
        ctx.set_line_width(RAIN_STROKE_WIDTH);
        for (b, streaks) in self.rain.batches() {
            ctx.set_stroke_style_str(&self.rain_styles[b]);
            ctx.begin_path();
            for s in streaks {
                ctx.move_to(s.x as f64, s.y0 as f64);
                ctx.line_to(s.x as f64, s.y1 as f64);
            }
            ctx.stroke();
        }
        self.rain.clear();
    }

    fn fill_style(&mut self, color: [f32; 4]) {
        let style = self
            .fills
            .entry(rgb_key(color))
            .or_insert_with(|| css_rgba([color[0], color[1], color[2], 1.0], 1.0));
        self.ctx.set_fill_style_str(style);
    }

    fn disc(&self, x: f32, y: f32, radius: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        _ = ctx.arc(x as f64, y as f64, radius, 0.0, 2.0 * PI);
        ctx.fill();
    }

    fn ember(&mut self, inst: &RenderInstance) {
        self.fill_style(inst.color);
        let core = inst.scale as f64 * 0.5;
        let (x, y) = (inst.position.x, inst.position.y);
        _ = self.ctx.set_global_composite_operation("lighter");
        self.ctx.set_global_alpha(inst.opacity as f64 * 0.25);
        self.disc(x, y, core * EMBER_GLOW_SPREAD);
        self.ctx.set_global_alpha(inst.opacity as f64);
        self.disc(x, y, core);
        _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx.set_global_alpha(1.0);
    }

    fn spark(&mut self, inst: &RenderInstance) {
        if inst.opacity <= 0.0 {
            return;
        }
        self.fill_style(inst.color);
        self.ctx.set_global_alpha(inst.opacity as f64);
        self.disc(inst.position.x, inst.position.y, inst.scale as f64 * 0.5);
        self.ctx.set_global_alpha(1.0);
    }

    fn relic(&self, inst: &RenderInstance, sprite: Resolved<SpriteId>) {
        if inst.opacity <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        let size = inst.scale as f64;
        let half = size * 0.5;
        ctx.save();
        _ = ctx.translate(inst.position.x as f64, inst.position.y as f64);
        _ = ctx.rotate(deg_to_rad(inst.rotation.z));
        // cheap tumble: squash by the x/y spin
        let sx = deg_to_rad(inst.rotation.y).cos().abs().max(0.2);
        let sy = deg_to_rad(inst.rotation.x).cos().abs().max(0.2);
        _ = ctx.scale(sx, sy);
        ctx.set_global_alpha(inst.opacity as f64);

        let drew_sprite = match (sprite.loaded(), &self.sprite) {
            (Some(_), Some(img)) => ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, -half, -half, size, size)
                .is_ok(),
            _ => false,
        };
        if !drew_sprite {
            let face = [
                (inst.color[0] + RELIC_FACE_LIGHTEN).min(1.0),
                (inst.color[1] + RELIC_FACE_LIGHTEN).min(1.0),
                (inst.color[2] + RELIC_FACE_LIGHTEN).min(1.0),
                inst.color[3],
            ];
            ctx.set_fill_style_str(&css_rgba(face, 1.0));
            ctx.fill_rect(-half, -half, size, size);
            ctx.set_stroke_style_str(&css_rgba(inst.color, RELIC_EDGE_ALPHA));
            ctx.set_line_width(1.0);
            ctx.stroke_rect(-half, -half, size, size);
        }
        ctx.restore();
    }

    fn ripple(&self, inst: &RenderInstance) {
        if inst.opacity <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        let [r, g, b, _] = inst.color;
        ctx.set_stroke_style_str(&css_rgba([r, g, b, 1.0], inst.opacity));
        ctx.set_line_width(RIPPLE_STROKE_WIDTH);
        ctx.begin_path();
        _ = ctx.arc(
            inst.position.x as f64,
            inst.position.y as f64,
            RIPPLE_BASE_RADIUS * inst.scale as f64,
            0.0,
            2.0 * PI,
        );
        ctx.stroke();
    }

    pub fn clear(&self) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

/// DOM-driven layers: floating tablets, the flash wash and the cursor.
pub struct DomLayers {
    tablet_layer: Option<web::HtmlElement>,
    tablets: FnvHashMap<EntityId, web::HtmlElement>,
    flash: Option<web::HtmlElement>,
    cursor_dot: Option<web::HtmlElement>,
    cursor_ring: Option<web::HtmlElement>,
    last_hover: bool,
}

impl DomLayers {
    pub fn mount(document: &web::Document) -> Self {
        let tablet_layer = dom::append_div(
            document,
            TABLET_LAYER_ID,
            &format!(
                "position:fixed;inset:0;pointer-events:none;overflow:hidden;\
                 perspective:{}px;transform-style:preserve-3d;z-index:{}",
                TABLET_PERSPECTIVE_PX, Z_TABLETS
            ),
        );
        let flash = dom::append_div(
            document,
            FLASH_OVERLAY_ID,
            &format!(
                "position:fixed;inset:0;pointer-events:none;opacity:0;background:{};z-index:{}",
                css_rgba(FLASH_COLOR, 1.0),
                Z_FLASH
            ),
        );
        let cursor_css = format!(
            "position:fixed;left:0;top:0;pointer-events:none;border-radius:50%;\
             opacity:0;z-index:{}",
            Z_CURSOR
        );
        let cursor_ring = dom::append_div(document, CURSOR_RING_ID, &cursor_css);
        let cursor_dot = dom::append_div(document, CURSOR_DOT_ID, &cursor_css);
        if tablet_layer.is_none() || flash.is_none() {
            log::warn!("[scene] could not create overlay layers; visuals degraded");
        }
        Self {
            tablet_layer,
            tablets: FnvHashMap::default(),
            flash,
            cursor_dot,
            cursor_ring,
            last_hover: false,
        }
    }

    pub fn update(
        &mut self,
        document: &web::Document,
        instances: &[RenderInstance],
        flash_opacity: f32,
        hovering: bool,
    ) {
        for inst in instances {
            match (inst.layer, inst.hint) {
                (Layer::Tablets, DrawHint::Plane { inscription }) => {
                    self.tablet(document, inst, inscription)
                }
                (Layer::Cursor, DrawHint::Ring) => {
                    if let Some(el) = &self.cursor_ring {
                        place_cursor_part(el, inst, false);
                    }
                }
                (Layer::Cursor, DrawHint::Dot) => {
                    if let Some(el) = &self.cursor_dot {
                        place_cursor_part(el, inst, true);
                    }
                }
                _ => {}
            }
        }
        if let Some(flash) = &self.flash {
            dom::set_style(flash, "opacity", &format!("{:.3}", flash_opacity));
        }
        if hovering != self.last_hover {
            self.last_hover = hovering;
            for el in [&self.cursor_ring, &self.cursor_dot].into_iter().flatten() {
                let cl = el.class_list();
                _ = if hovering {
                    cl.add_1(CURSOR_HOVER_CLASS)
                } else {
                    cl.remove_1(CURSOR_HOVER_CLASS)
                };
            }
        }
    }

    fn tablet(&mut self, document: &web::Document, inst: &RenderInstance, inscription: &str) {
        let Some(layer) = &self.tablet_layer else {
            return;
        };
        if !self.tablets.contains_key(&inst.id) {
            let Some(el) = create_tablet(document, layer, inst, inscription) else {
                return;
            };
            self.tablets.insert(inst.id, el);
        }
        let Some(el) = self.tablets.get(&inst.id) else {
            return;
        };
        dom::set_style(
            el,
            "transform",
            &tablet_transform(inst.offset.y, inst.position.z, inst.rotation),
        );
    }

    /// Hide the cursor parts, e.g. once a coarse pointer is detected.
    pub fn hide_cursor(&self) {
        for el in [&self.cursor_ring, &self.cursor_dot].into_iter().flatten() {
            dom::set_style(el, "opacity", "0");
        }
    }

    /// Detach every node this layer created. Idempotent.
    pub fn remove(&mut self) {
        self.tablets.clear();
        for el in [
            self.tablet_layer.take(),
            self.flash.take(),
            self.cursor_dot.take(),
            self.cursor_ring.take(),
        ]
        .into_iter()
        .flatten()
        {
            el.remove();
        }
    }
}

fn create_tablet(
    document: &web::Document,
    layer: &web::HtmlElement,
    inst: &RenderInstance,
    inscription: &str,
) -> Option<web::HtmlElement> {
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    let size = inst.scale;
    _ = el.set_attribute(
        "style",
        &format!(
            "position:absolute;left:{:.2}%;top:{:.2}%;width:{:.0}px;height:{:.0}px;\
             margin:-{:.0}px 0 0 -{:.0}px;display:flex;align-items:center;\
             justify-content:center;text-align:center;font:10px serif;\
             letter-spacing:0.1em;color:{};background:{};\
             border:1px solid {};backface-visibility:hidden",
            inst.position.x,
            inst.position.y,
            size,
            size * 1.4,
            size * 0.7,
            size * 0.5,
            css_rgba(CURSOR_GOLD, 1.0),
            css_rgba(inst.color, inst.opacity),
            css_rgba(CURSOR_GOLD, 0.5),
        ),
    );
    el.set_text_content(Some(inscription));
    layer.append_child(&el).ok()?;
    Some(el)
}

fn place_cursor_part(el: &web::HtmlElement, inst: &RenderInstance, filled: bool) {
    let size = inst.scale;
    let px = format!("{:.0}px", size);
    dom::set_style(el, "width", &px);
    dom::set_style(el, "height", &px);
    dom::set_style(
        el,
        "transform",
        &centered_transform(inst.position.truncate(), size),
    );
    dom::set_style(el, "opacity", if inst.opacity > 0.0 { "1" } else { "0" });
    let color = css_rgba(inst.color, 1.0);
    if filled {
        dom::set_style(el, "background", &color);
    } else {
        dom::set_style(el, "border", &format!("1px solid {}", color));
    }
}
