//! HTML canvas implementation of `DrawSurface`
//!
//! World coordinates are translated so the origin sits at the canvas center.

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{Backdrop, CanvasSize, DrawSurface, Look};
use crate::sim::{Color, palette};

const BACKGROUND: &str = "#0a0a12";
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.06)";
const SPRITE_RADIUS: f64 = 12.0;
const RAIN_STREAKS: usize = 120;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    canvas: CanvasSize,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, canvas: CanvasSize) -> Self {
        Self { ctx, canvas }
    }

    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    fn to_screen(&self, p: DVec2) -> DVec2 {
        p + self.canvas.center()
    }

    fn half_extent(&self) -> DVec2 {
        DVec2::new(self.canvas.width / 2.0, self.canvas.height / 2.0)
    }

    fn fill_rect(&self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn line(&self, from: DVec2, to: DVec2) {
        let (a, b) = (self.to_screen(from), self.to_screen(to));
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.stroke();
    }

    fn disc(&self, center: DVec2, radius: f64, color: &str) {
        let c = self.to_screen(center);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(c.x, c.y, radius, 0.0, TAU);
        self.ctx.fill();
    }

    fn label(&self, at: DVec2, text: &str, color: &str) {
        let p = self.to_screen(at);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font("12px monospace");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, p.x, p.y);
    }

    fn stick_figure(&self, pos: DVec2, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(2.0);
        self.disc(pos + DVec2::new(0.0, -22.0), 6.0, color);
        self.line(pos + DVec2::new(0.0, -16.0), pos);
        self.line(pos + DVec2::new(-8.0, -10.0), pos + DVec2::new(8.0, -10.0));
        self.line(pos, pos + DVec2::new(-6.0, 14.0));
        self.line(pos, pos + DVec2::new(6.0, 14.0));
    }

    fn polygon(&self, pos: DVec2, points: &[(f64, f64)], color: &str) {
        let Some(&(x0, y0)) = points.first() else {
            return;
        };
        let origin = self.to_screen(pos);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(origin.x + x0, origin.y + y0);
        for &(x, y) in &points[1..] {
            self.ctx.line_to(origin.x + x, origin.y + y);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_line_dash(&js_sys::Array::new()).ok();
        self.fill_rect(BACKGROUND, 0.0, 0.0, canvas.width, canvas.height);
    }

    fn backdrop(&mut self, backdrop: Backdrop) {
        let (w, h) = (self.canvas.width, self.canvas.height);
        match backdrop {
            Backdrop::Plain => {}
            Backdrop::Sky => self.fill_rect("#0d1b2a", 0.0, 0.0, w, h),
            Backdrop::River { upper, lower } => {
                let top = self.to_screen(DVec2::new(0.0, upper)).y;
                let bottom = self.to_screen(DVec2::new(0.0, lower)).y;
                self.fill_rect("#1b3a1b", 0.0, 0.0, w, top);
                self.fill_rect("#0b2545", 0.0, top, w, bottom - top);
                self.fill_rect("#1b3a1b", 0.0, bottom, w, h - bottom);
            }
            Backdrop::Storm { ground_y, flash } => {
                self.fill_rect("#11151c", 0.0, 0.0, w, h);
                let ground = self.to_screen(DVec2::new(0.0, ground_y)).y;
                self.fill_rect("#1d1d1d", 0.0, ground, w, h - ground);
                if flash > 0.0 {
                    self.ctx.set_global_alpha(flash);
                    self.fill_rect("#ffffff", 0.0, 0.0, w, h);
                    self.ctx.set_global_alpha(1.0);
                }
            }
        }
    }

    fn grid(&mut self, spacing: f64) {
        if spacing <= 0.0 {
            return;
        }
        let half = self.half_extent();
        self.ctx.set_stroke_style_str(GRID_COLOR);
        self.ctx.set_line_width(1.0);
        let mut x = -(half.x / spacing).floor() * spacing;
        while x <= half.x {
            self.line(DVec2::new(x, -half.y), DVec2::new(x, half.y));
            x += spacing;
        }
        let mut y = -(half.y / spacing).floor() * spacing;
        while y <= half.y {
            self.line(DVec2::new(-half.x, y), DVec2::new(half.x, y));
            y += spacing;
        }
    }

    fn road(&mut self, y: f64) {
        let half = self.half_extent();
        let top = self.to_screen(DVec2::new(0.0, y - 20.0)).y;
        self.fill_rect("#2a2a2a", 0.0, top, self.canvas.width, 40.0);
        self.ctx.set_stroke_style_str("#f4d35e");
        self.ctx.set_line_width(2.0);
        self.dashed_line(DVec2::new(-half.x, y), DVec2::new(half.x, y));
    }

    fn sprite(&mut self, pos: DVec2, look: Look, color: Color, label: &str) {
        let css = color.css();
        match look {
            Look::Ball => self.disc(pos, SPRITE_RADIUS, &css),
            Look::Car => {
                let p = self.to_screen(pos);
                self.fill_rect(&css, p.x - 20.0, p.y - 10.0, 40.0, 20.0);
            }
            Look::Boat => self.polygon(
                pos,
                &[(-20.0, -6.0), (20.0, -6.0), (12.0, 8.0), (-12.0, 8.0)],
                &css,
            ),
            Look::Swimmer => {
                self.disc(pos, 7.0, &css);
                self.ctx.set_stroke_style_str(&css);
                self.line(pos + DVec2::new(-14.0, 4.0), pos + DVec2::new(14.0, 4.0));
            }
            Look::Plane => self.polygon(
                pos,
                &[(24.0, 0.0), (-16.0, -14.0), (-8.0, 0.0), (-16.0, 14.0)],
                &css,
            ),
            Look::Man => self.stick_figure(pos, &css),
            Look::FlagMan { flag_angle } => {
                self.stick_figure(pos, &css);
                let top = pos + DVec2::new(8.0, -40.0);
                self.ctx.set_stroke_style_str(&palette::WHITE.css());
                self.line(pos + DVec2::new(8.0, -10.0), top);
                // Screen y grows downward
                let rad = flag_angle.to_radians();
                let tip = top + DVec2::new(rad.cos(), -rad.sin()) * 28.0;
                self.ctx.set_stroke_style_str(&palette::MAGENTA.css());
                self.ctx.set_line_width(6.0);
                self.line(top, tip);
                self.ctx.set_line_width(2.0);
            }
            Look::RainSource => self.disc(pos, 4.0, &css),
            Look::Cloud { scale } => {
                let fill = "rgba(180, 190, 200, 0.5)";
                for (dx, r) in [(-25.0, 18.0), (0.0, 25.0), (25.0, 18.0)] {
                    self.disc(pos + DVec2::new(dx * scale, 0.0), r * scale, fill);
                }
                return;
            }
        }
        self.label(pos + DVec2::new(0.0, -SPRITE_RADIUS - 8.0), label, &css);
    }

    fn vector(&mut self, origin: DVec2, v: DVec2, color: Color, label: &str) {
        let len = v.length();
        if len < 1.0 {
            return;
        }
        let css = color.css();
        let tip = origin + v;
        self.ctx.set_stroke_style_str(&css);
        self.ctx.set_line_width(2.0);
        self.line(origin, tip);

        let dir = v / len;
        let back = tip - dir * 10.0;
        let side = dir.perp() * 5.0;
        let (a, b, c) = (
            self.to_screen(tip),
            self.to_screen(back + side),
            self.to_screen(back - side),
        );
        self.ctx.set_fill_style_str(&css);
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.line_to(c.x, c.y);
        self.ctx.close_path();
        self.ctx.fill();

        self.label(tip + dir * 14.0, label, &css);
    }

    fn dashed_line(&mut self, from: DVec2, to: DVec2) {
        let dash = js_sys::Array::of2(&JsValue::from(6.0), &JsValue::from(6.0));
        self.ctx.set_line_dash(&dash).ok();
        self.ctx.set_stroke_style_str("rgba(255, 255, 255, 0.5)");
        self.line(from, to);
        self.ctx.set_line_dash(&js_sys::Array::new()).ok();
    }

    fn path(&mut self, points: &[DVec2], color: Color) {
        let Some(first) = points.first().map(|p| self.to_screen(*p)) else {
            return;
        };
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(1.5);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in &points[1..] {
            let s = self.to_screen(*p);
            self.ctx.line_to(s.x, s.y);
        }
        self.ctx.stroke();
    }

    fn rain(&mut self, around: DVec2, slant: f64, time: f64) {
        let half = self.half_extent();
        let rad = slant.to_radians();
        // Streak direction is `slant` degrees from straight down
        let dir = DVec2::new(rad.sin(), rad.cos());
        let span = 2.0 * half.y;
        let fall = (time * 400.0) % span;
        self.ctx.set_stroke_style_str("rgba(150, 180, 255, 0.5)");
        self.ctx.set_line_width(1.0);
        for i in 0..RAIN_STREAKS {
            let x = (i as f64 * 0.618_034).fract() * 2.0 * half.x - half.x;
            let y0 = (i * 53) as f64 % span;
            let y = (y0 + fall).rem_euclid(span) - half.y;
            // No rain below the ground line under the subject
            if y > around.y + 15.0 {
                continue;
            }
            let start = DVec2::new(x, y);
            self.line(start, start + dir * 12.0);
        }
    }
}
