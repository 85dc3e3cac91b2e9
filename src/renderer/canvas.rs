//! Canvas 2D backend executing a `Scene`

use anyhow::{Result, anyhow};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{DrawCommand, Scene};
use crate::platform::browser;

const FONT: &str = "24px Arial";
const TEXT_COLOR: &str = "#fff";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attach to the page's game canvas
    pub fn new() -> Result<Self> {
        let canvas = browser::canvas()?;
        let ctx = browser::context(&canvas)?;
        log::info!("Canvas renderer ready");
        Ok(Self { canvas, ctx })
    }

    /// Match the canvas to the field size
    fn fit(&self, scene: &Scene) {
        let (w, h) = (scene.size.x as u32, scene.size.y as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
    }

    pub fn render(&self, scene: &Scene) -> Result<()> {
        self.fit(scene);
        let ctx = &self.ctx;
        for command in &scene.commands {
            match command {
                DrawCommand::Clear => {
                    ctx.clear_rect(0.0, 0.0, scene.size.x as f64, scene.size.y as f64);
                }
                DrawCommand::Rect { pos, size, color } => {
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::Polygon { points, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_string());
                    ctx.begin_path();
                    ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )
                    .map_err(|err| anyhow!("arc failed: {:?}", err))?;
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCommand::Text { text, pos } => {
                    ctx.set_fill_style_str(TEXT_COLOR);
                    ctx.set_font(FONT);
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)
                        .map_err(|err| anyhow!("fill_text failed: {:?}", err))?;
                }
            }
        }
        Ok(())
    }
}
