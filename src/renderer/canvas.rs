//! Canvas 2D backend for the scene

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::colors::css;
use super::scene::DrawCmd;

/// Paint a draw list onto a 2D canvas context
pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { color } => {
                let canvas = ctx.canvas().ok_or("context has no canvas")?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
            }
            DrawCmd::Frame {
                size,
                thickness,
                color,
            } => {
                let t = *thickness as f64;
                if t <= 0.0 {
                    continue;
                }
                let (w, h) = (size.x as f64, size.y as f64);
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(t);
                ctx.stroke_rect(t / 2.0, t / 2.0, w - t, h - t);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCmd::Polygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                ctx.set_fill_style_str(&css(*color));
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Text { pos, text, color } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.set_font("14px monospace");
                ctx.set_text_baseline("top");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
    }
    Ok(())
}
