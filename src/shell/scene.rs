//! In-game scene drawing

use glam::Vec2;

use super::{Renderer, TextAnchor};
use crate::sim::{Rect, RenderSnapshot};

/// Linear RGBA
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];

    pub const BACKGROUND: Color = WHITE;
    pub const PLAYER: Color = BLACK;
    pub const OBSTACLE: Color = RED;
    pub const SCORE_TEXT: Color = BLACK;

    /// Game-over text cycles through these
    pub const GAME_OVER_CYCLE: [Color; 6] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, 1.0],
    ];
}

pub const SCORE_POS: Vec2 = Vec2::new(10.0, 10.0);
pub const SCORE_FONT_SIZE: f32 = 55.0;

/// Draw background, obstacles, player and score for one frame
pub fn draw_scene(renderer: &mut impl Renderer, snapshot: &RenderSnapshot, width: i32, height: i32) {
    renderer.draw_rect(Rect::new(0, 0, width, height), colors::BACKGROUND);

    for &obstacle in &snapshot.obstacles {
        renderer.draw_rect(obstacle, colors::OBSTACLE);
    }

    renderer.draw_text(
        &format!("SCORE: {}", snapshot.score),
        SCORE_POS,
        TextAnchor::TopLeft,
        colors::SCORE_TEXT,
        SCORE_FONT_SIZE,
    );

    renderer.draw_rect(snapshot.player, colors::PLAYER);
}

/// CSS `rgba()` string for DOM text overlays
pub fn to_css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::{DrawCall, RecordingRenderer};
    use crate::sim::SessionState;

    #[test]
    fn test_draw_order() {
        let snapshot = RenderSnapshot {
            player: Rect::new(375, 540, 50, 50),
            obstacles: vec![Rect::new(10, 300, 50, 50), Rect::new(500, 40, 50, 50)],
            score: 7,
            state: SessionState::Running,
        };
        let mut renderer = RecordingRenderer::default();
        draw_scene(&mut renderer, &snapshot, 800, 600);

        assert_eq!(
            renderer.calls,
            vec![
                DrawCall::Rect(Rect::new(0, 0, 800, 600), colors::WHITE),
                DrawCall::Rect(Rect::new(10, 300, 50, 50), colors::RED),
                DrawCall::Rect(Rect::new(500, 40, 50, 50), colors::RED),
                DrawCall::Text {
                    text: "SCORE: 7".to_string(),
                    pos: SCORE_POS,
                    anchor: TextAnchor::TopLeft,
                    color: colors::BLACK,
                    size: SCORE_FONT_SIZE,
                },
                DrawCall::Rect(Rect::new(375, 540, 50, 50), colors::BLACK),
            ]
        );
    }

    #[test]
    fn test_to_css() {
        assert_eq!(to_css(colors::RED), "rgba(255, 0, 0, 1)");
        assert_eq!(to_css([0.5, 2.0, -1.0, 0.5]), "rgba(128, 255, 0, 0.5)");
    }
}
