//! Scene generation for 2D primitives

use glam::Vec2;

use super::effects::ShrinkEffects;
use crate::sim::{Arcade, Ball, BallColor, Block, BreakoutState, Paddle, PongState, Rgb};

/// Depth of the shaded bevel on 3D rects, in pixels
const BEVEL: f32 = 10.0;
/// Brightness change of the lit and shadowed bevel faces
const SHADE_PERCENT: i32 = 20;

const FLAME: Rgb = Rgb([0xFF, 0x00, 0x00]);

/// One backend-neutral drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { pos: Vec2, size: Vec2, color: Rgb },
    Polygon { points: Vec<Vec2>, color: Rgb },
    Circle { center: Vec2, radius: f32, color: Rgb },
    Text { text: String, pos: Vec2 },
}

/// Everything drawn for one frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: vec![DrawCommand::Clear],
        }
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    fn text(&mut self, text: String, x: f32, y: f32) {
        self.push(DrawCommand::Text {
            text,
            pos: Vec2::new(x, y),
        });
    }

    /// Text commands, for assertions and logging
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Filled rect with a darker right bevel and a lighter bottom bevel
pub fn rect_3d(pos: Vec2, size: Vec2, color: Rgb) -> [DrawCommand; 3] {
    let Vec2 { x, y } = pos;
    let Vec2 { x: w, y: h } = size;
    [
        DrawCommand::Rect { pos, size, color },
        DrawCommand::Polygon {
            points: vec![
                Vec2::new(x + w, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x + w - BEVEL, y + h - BEVEL),
                Vec2::new(x + w - BEVEL, y - BEVEL),
            ],
            color: color.shade(-SHADE_PERCENT),
        },
        DrawCommand::Polygon {
            points: vec![
                Vec2::new(x, y + h),
                Vec2::new(x + w, y + h),
                Vec2::new(x + w - BEVEL, y + h - BEVEL),
                Vec2::new(x - BEVEL, y + h - BEVEL),
            ],
            color: color.shade(SHADE_PERCENT),
        },
    ]
}

fn paddle(paddle: &Paddle) -> [DrawCommand; 3] {
    rect_3d(paddle.pos, paddle.size, Rgb::WHITE)
}

fn ball(ball: &Ball) -> DrawCommand {
    let color = match ball.color {
        BallColor::Normal => Rgb::WHITE,
        BallColor::Flame => FLAME,
    };
    DrawCommand::Circle {
        center: ball.pos,
        radius: ball.radius,
        color,
    }
}

fn active_blocks(blocks: &[Block]) -> impl Iterator<Item = DrawCommand> + '_ {
    blocks
        .iter()
        .filter(|block| block.is_active())
        .flat_map(|block| rect_3d(block.pos, block.size, block.color))
}

pub fn breakout_scene(state: &BreakoutState, effects: &ShrinkEffects) -> Scene {
    let field = state.field();
    let mut scene = Scene::new(field);

    scene.extend(paddle(&state.paddle));
    scene.push(ball(&state.ball));
    scene.text(format!("Score: {}", state.score), 10.0, 20.0);
    scene.text(format!("Level: {}", state.level), field.x - 100.0, 20.0);
    scene.extend(active_blocks(&state.blocks));

    for (block, scale) in effects.iter() {
        if scale > 0.0 {
            scene.extend(rect_3d(block.pos, block.size * scale, block.color));
        }
    }

    if state.is_paused() {
        scene.text("Paused".to_string(), field.x / 2.0 - 50.0, field.y / 2.0);
    }
    scene
}

pub fn pong_scene(state: &PongState) -> Scene {
    let field = state.field();
    let mut scene = Scene::new(field);

    scene.extend(paddle(&state.player));
    scene.extend(paddle(&state.ai));
    scene.push(ball(&state.ball));
    scene.text(format!("Player: {}", state.player_score), 10.0, 20.0);
    scene.text(format!("Level: {}", state.level), field.x / 2.0 - 40.0, 20.0);
    scene.text(format!("AI: {}", state.ai_score), field.x - 100.0, 20.0);
    scene.extend(active_blocks(&state.blocks));
    scene
}

/// Build the frame for whichever game is running
pub fn scene(game: &Arcade, effects: &ShrinkEffects) -> Scene {
    match game {
        Arcade::Breakout(state) => breakout_scene(state, effects),
        Arcade::Pong(state) => pong_scene(state),
    }
}
