//! Per-scenario draw rules
//!
//! Read-only over the body arena; everything visual goes through `DrawSurface`.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Backdrop, DrawSurface, FrameInfo, GRID_SPACING, Look, VECTOR_SCALE};
use crate::sim::labs::{aeroplane, flag, rain};
use crate::sim::{BodyArena, ScenarioId, SimParams, Sprite, VisualTheme, palette};

impl ScenarioId {
    /// Draw the current state of this lab
    pub fn render(
        self,
        surface: &mut dyn DrawSurface,
        bodies: &BodyArena,
        params: &SimParams,
        frame: &FrameInfo,
    ) {
        surface.clear(frame.canvas);
        match self {
            ScenarioId::OneD => draw_sandbox(surface, bodies, params),
            ScenarioId::AngularVelocity => {
                draw_sandbox(surface, bodies, params);
                draw_angular(surface, bodies, frame);
            }
            ScenarioId::MinDistance => {
                draw_sandbox(surface, bodies, params);
                if let (Some(a), Some(b)) = (bodies.get(0), bodies.get(1)) {
                    surface.dashed_line(a.pos, b.pos);
                }
            }
            ScenarioId::River => draw_river(surface, bodies, params, frame),
            ScenarioId::Aeroplane => draw_aeroplane(surface, bodies, params, frame),
            ScenarioId::Rain => draw_rain(surface, bodies, params, frame),
            ScenarioId::FlagFlutter => draw_flag(surface, bodies, params, frame),
        }
    }
}

/// Appearance of `sprite` under `theme`
pub fn look_for(sprite: Sprite, theme: VisualTheme) -> Look {
    match sprite {
        Sprite::Auto => match theme {
            VisualTheme::Car => Look::Car,
            VisualTheme::Boat => Look::Boat,
            VisualTheme::Swimmer => Look::Swimmer,
            VisualTheme::Ball => Look::Ball,
        },
        Sprite::Ball => Look::Ball,
        Sprite::Boat if theme == VisualTheme::Swimmer => Look::Swimmer,
        Sprite::Boat => Look::Boat,
        Sprite::Plane => Look::Plane,
        Sprite::Man => Look::Man,
        Sprite::RainSource => Look::RainSource,
        Sprite::Cloud => Look::Cloud { scale: 1.0 },
        Sprite::FlagMan => Look::FlagMan { flag_angle: 0.0 },
    }
}

fn draw_sandbox(surface: &mut dyn DrawSurface, bodies: &BodyArena, params: &SimParams) {
    surface.backdrop(Backdrop::Plain);
    if params.show_grid {
        surface.grid(GRID_SPACING);
    }
    for body in bodies {
        let look = look_for(body.sprite, params.theme);
        if look == Look::Car {
            surface.road(body.pos.y);
        }
        surface.sprite(body.pos, look, body.color, &body.label);
    }
}

fn draw_angular(surface: &mut dyn DrawSurface, bodies: &BodyArena, frame: &FrameInfo) {
    let (Some(a), Some(b)) = (bodies.get(0), bodies.get(1)) else {
        return;
    };
    surface.dashed_line(a.pos, b.pos);
    if frame.overlays.vectors {
        surface.vector(b.pos, (b.vel - a.vel) * VECTOR_SCALE, palette::MINT, "v_BA");
    }
}

fn draw_river(
    surface: &mut dyn DrawSurface,
    bodies: &BodyArena,
    params: &SimParams,
    frame: &FrameInfo,
) {
    if let Some(vessel) = bodies.get(0).and_then(|b| b.vessel()) {
        surface.backdrop(Backdrop::River {
            upper: vessel.upper_bank,
            lower: vessel.lower_bank,
        });
        if frame.overlays.path && vessel.path.len() > 1 {
            let points: Vec<DVec2> = vessel.path.iter().copied().collect();
            surface.path(&points, palette::MINT);
        }
    } else {
        surface.backdrop(Backdrop::Plain);
    }

    for body in bodies {
        surface.sprite(
            body.pos,
            look_for(body.sprite, params.theme),
            body.color,
            &body.label,
        );
    }

    if frame.overlays.vectors
        && let Some(vessel) = bodies.get(0)
    {
        let heading = crate::heading_velocity(params.v1, params.angle1);
        surface.vector(vessel.pos, heading * VECTOR_SCALE, palette::MINT, "v_BW");
        surface.vector(
            vessel.pos,
            DVec2::new(params.v2, 0.0) * VECTOR_SCALE,
            palette::CYAN,
            "v_WG",
        );
    }
}

fn draw_aeroplane(
    surface: &mut dyn DrawSurface,
    bodies: &BodyArena,
    params: &SimParams,
    frame: &FrameInfo,
) {
    surface.backdrop(Backdrop::Sky);
    if frame.overlays.vectors
        && let (Some(plane), Some(_)) = (bodies.get(0), bodies.get(1))
    {
        let (plane_vel, wind_vel) = aeroplane::velocities(params);
        surface.vector(plane.pos, plane_vel * VECTOR_SCALE, palette::MINT, "v_AW");
        surface.vector(plane.pos, wind_vel * VECTOR_SCALE, palette::CYAN, "v_WG");
    }
    for body in bodies {
        surface.sprite(
            body.pos,
            look_for(body.sprite, params.theme),
            body.color,
            &body.label,
        );
    }
}

/// Brief storm flash, reproducible for a given animation time
fn lightning(time: f64) -> f64 {
    if (time * 20.0).sin() <= 0.95 {
        return 0.0;
    }
    let mut rng = Pcg32::seed_from_u64((time * 60.0) as u64);
    if rng.random::<f64>() > 0.8 { 0.3 } else { 0.0 }
}

fn draw_rain(
    surface: &mut dyn DrawSurface,
    bodies: &BodyArena,
    params: &SimParams,
    frame: &FrameInfo,
) {
    let Some(man) = bodies.iter().find(|b| b.sprite == Sprite::Man) else {
        return;
    };

    let flash = if frame.overlays.lightning {
        lightning(frame.time)
    } else {
        0.0
    };
    surface.backdrop(Backdrop::Storm {
        ground_y: man.pos.y + 15.0,
        flash,
    });

    let rel = rain::relative_rain(params);
    surface.rain(man.pos, rel.x.atan2(rel.y).to_degrees(), frame.time);

    for body in bodies {
        let look = match body.cloud_scale() {
            Some(scale) => Look::Cloud { scale },
            None => look_for(body.sprite, params.theme),
        };
        surface.sprite(body.pos, look, body.color, &body.label);
    }
}

fn draw_flag(
    surface: &mut dyn DrawSurface,
    bodies: &BodyArena,
    params: &SimParams,
    frame: &FrameInfo,
) {
    let Some(man) = bodies.get(0) else {
        return;
    };
    surface.backdrop(Backdrop::Plain);
    surface.sprite(
        man.pos,
        Look::FlagMan {
            flag_angle: flag::flag_angle(params),
        },
        man.color,
        &man.label,
    );
    if frame.overlays.vectors {
        surface.vector(
            man.pos,
            flag::relative_wind(params) * VECTOR_SCALE,
            palette::CYAN,
            "v_rel",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CanvasSize, DrawCmd, Overlays, RecordingSurface};

    fn frame() -> FrameInfo {
        FrameInfo {
            canvas: CanvasSize::default(),
            time: 0.0,
            overlays: Overlays::default(),
        }
    }

    fn render(id: ScenarioId, params: &SimParams) -> RecordingSurface {
        let bodies = id.init(DVec2::ZERO, params);
        let mut surface = RecordingSurface::new();
        id.render(&mut surface, &bodies, params, &frame());
        surface
    }

    #[test]
    fn test_car_theme_draws_roads() {
        let params = SimParams {
            theme: VisualTheme::Car,
            ..Default::default()
        };
        let surface = render(ScenarioId::OneD, &params);
        let roads = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Road(_)))
            .count();
        assert_eq!(roads, 2);
        assert!(surface.sprites().all(|(_, look, _)| *look == Look::Car));
    }

    #[test]
    fn test_grid_toggle() {
        let params = SimParams {
            show_grid: false,
            ..Default::default()
        };
        let surface = render(ScenarioId::MinDistance, &params);
        assert!(!surface.commands.iter().any(|c| matches!(c, DrawCmd::Grid(_))));
        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCmd::DashedLine { .. })));
    }

    #[test]
    fn test_river_uses_swimmer_look() {
        let params = SimParams {
            theme: VisualTheme::Swimmer,
            ..Default::default()
        };
        let surface = render(ScenarioId::River, &params);
        assert_eq!(
            surface.commands[1],
            DrawCmd::Backdrop(Backdrop::River {
                upper: -150.0,
                lower: 150.0
            })
        );
        let (_, look, label) = surface.sprites().next().unwrap();
        assert_eq!((*look, label), (Look::Swimmer, "Boat"));
        assert_eq!(surface.vector_labels(), ["v_BW", "v_WG"]);
    }

    #[test]
    fn test_aeroplane_vectors() {
        let surface = render(ScenarioId::Aeroplane, &SimParams::default());
        assert_eq!(surface.vector_labels(), ["v_AW", "v_WG"]);
    }

    #[test]
    fn test_rain_draws_scaled_clouds() {
        let surface = render(ScenarioId::Rain, &SimParams::default());
        let scales: Vec<f64> = surface
            .sprites()
            .filter_map(|(_, look, _)| match look {
                Look::Cloud { scale } => Some(*scale),
                _ => None,
            })
            .collect();
        assert_eq!(scales, [0.8, 1.2, 0.6, 0.9, 0.7]);
        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCmd::Rain { .. })));
    }

    #[test]
    fn test_empty_arena_only_clears() {
        for id in ScenarioId::ALL {
            let mut surface = RecordingSurface::new();
            id.render(&mut surface, &BodyArena::new(), &SimParams::default(), &frame());
            assert!(surface.sprites().next().is_none(), "{id}");
        }
    }

    #[test]
    fn test_lightning_is_reproducible() {
        for i in 0..500 {
            let t = i as f64 * 0.013;
            assert_eq!(lightning(t), lightning(t));
            assert!(lightning(t) == 0.0 || lightning(t) == 0.3);
        }
    }
}
