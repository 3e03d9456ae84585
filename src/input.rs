//! Input boundary
//!
//! The game consumes a one-dimensional axis in [-1, 1] plus an edge-triggered
//! restart flag, sampled once per frame. `FrameInput` is the plain value
//! holder a driver (or a test) fills in; `dodge_axis` is the self-playing
//! pilot the headless demo runs on.

use glam::Vec2;

/// Source of per-frame player input
pub trait InputSource {
    /// Horizontal axis in [-1, 1]
    fn horizontal_axis(&self) -> f32;
    /// True only on the frame the restart key went down
    fn restart_pressed(&self) -> bool;
}

/// One frame's worth of input
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub axis: f32,
    pub restart: bool,
}

impl InputSource for FrameInput {
    fn horizontal_axis(&self) -> f32 {
        self.axis
    }

    fn restart_pressed(&self) -> bool {
        self.restart
    }
}

/// How close (horizontally) a falling body must be before the pilot dodges
const DODGE_RANGE: f32 = 2.5;

/// Steer away from the most urgent falling body still above the paddle.
///
/// Urgency favors bodies that are horizontally close and nearly down at
/// paddle height. With nothing threatening, the pilot drifts back toward the
/// center of the band so it never camps an edge.
pub fn dodge_axis(player_x: f32, player_y: f32, min_x: f32, max_x: f32, threats: &[Vec2]) -> f32 {
    let threat = threats
        .iter()
        .filter(|pos| pos.y > player_y)
        .min_by(|a, b| {
            let urgency_a = (a.x - player_x).abs() + 0.5 * (a.y - player_y);
            let urgency_b = (b.x - player_x).abs() + 0.5 * (b.y - player_y);
            urgency_a
                .partial_cmp(&urgency_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match threat {
        Some(pos) if (pos.x - player_x).abs() < DODGE_RANGE => {
            if pos.x >= player_x { -1.0 } else { 1.0 }
        }
        _ => {
            let center = (min_x + max_x) * 0.5;
            ((center - player_x) * 0.25).clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_input_passthrough() {
        let input = FrameInput {
            axis: -0.5,
            restart: true,
        };
        assert_eq!(input.horizontal_axis(), -0.5);
        assert!(input.restart_pressed());
        assert!(!FrameInput::default().restart_pressed());
    }

    #[test]
    fn test_dodges_away_from_nearby_threat() {
        let threats = [Vec2::new(1.0, 0.0)];
        let axis = dodge_axis(0.0, -4.5, -7.0, 7.0, &threats);
        assert_eq!(axis, -1.0);

        let threats = [Vec2::new(-1.0, 0.0)];
        let axis = dodge_axis(0.0, -4.5, -7.0, 7.0, &threats);
        assert_eq!(axis, 1.0);
    }

    #[test]
    fn test_ignores_bodies_already_below_paddle() {
        let threats = [Vec2::new(0.2, -5.5)];
        let axis = dodge_axis(0.0, -4.5, -7.0, 7.0, &threats);
        // Nothing overhead: drift toward center, which is already here.
        assert_eq!(axis, 0.0);
    }

    #[test]
    fn test_drifts_toward_center_when_clear() {
        let axis = dodge_axis(6.0, -4.5, -7.0, 7.0, &[]);
        assert!(axis < 0.0);
        let axis = dodge_axis(-6.0, -4.5, -7.0, 7.0, &[]);
        assert!(axis > 0.0);
    }

    #[test]
    fn test_axis_is_always_in_range() {
        let cases = [
            (0.0, &[][..]),
            (-7.0, &[][..]),
            (7.0, &[][..]),
            (0.0, &[Vec2::new(0.0, 3.0)][..]),
        ];
        for (x, threats) in cases {
            let axis = dodge_axis(x, -4.5, -7.0, 7.0, threats);
            assert!((-1.0..=1.0).contains(&axis));
        }
    }
}
