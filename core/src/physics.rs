use crate::constants::*;
use crate::input::HeldActions;
use crate::types::*;

pub fn is_grounded(p: &PlayerState, arena: &Arena) -> bool {
    p.y == arena.ground_y
}

/// Jump impulse, only from the ground and only if not already mid-jump.
pub fn try_jump(p: &PlayerState, arena: &Arena) -> PlayerState {
    if !is_grounded(p, arena) || p.jumping {
        return *p;
    }
    PlayerState {
        vy: JUMP_VELOCITY,
        jumping: true,
        ..*p
    }
}

/// Step left/right for held movement keys. A step that would leave the
/// arena is skipped rather than clamped.
pub fn apply_player_input(p: &PlayerState, held: &HeldActions, arena: &Arena) -> PlayerState {
    let mut x = p.x;
    let mut f = p.facing;

    if held.contains(Action::MoveLeft) && x - p.speed >= 0.0 {
        x -= p.speed;
        f = facing::LEFT;
    }
    if held.contains(Action::MoveRight) && x + p.speed <= arena.width - p.width {
        x += p.speed;
        f = facing::RIGHT;
    }

    PlayerState { x, facing: f, ..*p }
}

/// Position first, then velocity picks up gravity for the next tick.
pub fn apply_gravity(p: &PlayerState) -> PlayerState {
    PlayerState {
        y: p.y + p.vy,
        vy: p.vy + GRAVITY,
        ..*p
    }
}

/// At or below the floor: snap to it and stop falling.
pub fn land_on_ground(p: &PlayerState, arena: &Arena) -> PlayerState {
    if p.y < arena.ground_y {
        return *p;
    }
    PlayerState {
        y: arena.ground_y,
        vy: 0.0,
        jumping: false,
        ..*p
    }
}

/// Full per-tick physics for one player.
pub fn physics_step(p: &PlayerState, held: &HeldActions, arena: &Arena) -> PlayerState {
    let p = apply_player_input(p, held, arena);
    let p = apply_gravity(&p);
    land_on_ground(&p, arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{arena, spawn_player};

    fn grounded_player(x: f64) -> PlayerState {
        PlayerState {
            x,
            ..spawn_player(PlayerId::One, &arena())
        }
    }

    #[test]
    fn input_moves_right() {
        let p = grounded_player(100.0);
        let held = HeldActions::default().with(Action::MoveRight);
        let result = apply_player_input(&p, &held, &arena());
        assert_eq!(result.x, 100.0 + PLAYER_SPEED);
        assert_eq!(result.facing, facing::RIGHT);
    }

    #[test]
    fn input_moves_left() {
        let p = grounded_player(100.0);
        let held = HeldActions::default().with(Action::MoveLeft);
        let result = apply_player_input(&p, &held, &arena());
        assert_eq!(result.x, 100.0 - PLAYER_SPEED);
        assert_eq!(result.facing, facing::LEFT);
    }

    #[test]
    fn both_directions_cancel() {
        let p = grounded_player(100.0);
        let held = HeldActions::default()
            .with(Action::MoveLeft)
            .with(Action::MoveRight);
        let result = apply_player_input(&p, &held, &arena());
        assert_eq!(result.x, 100.0);
    }

    #[test]
    fn step_off_left_edge_skipped() {
        let p = grounded_player(3.0);
        let held = HeldActions::default().with(Action::MoveLeft);
        let result = apply_player_input(&p, &held, &arena());
        assert_eq!(result.x, 3.0);

        let p = grounded_player(0.0);
        assert_eq!(apply_player_input(&p, &held, &arena()).x, 0.0);
    }

    #[test]
    fn step_off_right_edge_skipped() {
        let a = arena();
        let p = grounded_player(a.width - PLAYER_WIDTH);
        let held = HeldActions::default().with(Action::MoveRight);
        let result = apply_player_input(&p, &held, &a);
        assert_eq!(result.x, a.width - PLAYER_WIDTH);
    }

    #[test]
    fn gravity_applies_after_position() {
        let mut p = grounded_player(100.0);
        p.vy = JUMP_VELOCITY;
        let result = apply_gravity(&p);
        assert_eq!(result.y, GROUND_Y + JUMP_VELOCITY);
        assert_eq!(result.vy, JUMP_VELOCITY + GRAVITY);
    }

    #[test]
    fn idle_on_ground_stays_put() {
        let p = grounded_player(100.0);
        let result = physics_step(&p, &HeldActions::default(), &arena());
        assert_eq!(result.y, GROUND_Y);
        assert_eq!(result.vy, 0.0);
        assert!(!result.jumping);
    }

    #[test]
    fn standing_player_never_gathers_fall_speed() {
        let a = arena();
        let mut p = grounded_player(100.0);
        for _ in 0..10 {
            p = physics_step(&p, &HeldActions::default(), &a);
            assert_eq!(p.y, GROUND_Y);
            assert_eq!(p.vy, 0.0);
            assert!(is_grounded(&p, &a));
        }
    }

    #[test]
    fn touching_floor_resets_velocity() {
        let a = arena();
        let p = PlayerState {
            vy: 10.5,
            jumping: true,
            ..grounded_player(100.0)
        };
        let landed = land_on_ground(&p, &a);
        assert_eq!(landed.vy, 0.0);
        assert!(!landed.jumping);

        let airborne = PlayerState {
            y: GROUND_Y - 1.0,
            ..p
        };
        assert_eq!(land_on_ground(&airborne, &a), airborne);
    }

    #[test]
    fn jump_only_when_grounded() {
        let a = arena();
        let p = grounded_player(100.0);
        let result = try_jump(&p, &a);
        assert_eq!(result.vy, JUMP_VELOCITY);
        assert!(result.jumping);

        // In the air — no jump
        let mut airborne = grounded_player(100.0);
        airborne.y = GROUND_Y - 20.0;
        let result2 = try_jump(&airborne, &a);
        assert_eq!(result2.vy, 0.0);
        assert!(!result2.jumping);
    }

    #[test]
    fn jump_arc_lands_and_clears_flag() {
        let a = arena();
        let mut p = try_jump(&grounded_player(100.0), &a);
        let mut min_y = p.y;
        let mut ticks = 0;
        loop {
            p = physics_step(&p, &HeldActions::default(), &a);
            ticks += 1;
            min_y = min_y.min(p.y);
            assert!(p.y <= a.ground_y);
            if !p.jumping {
                break;
            }
            assert!(ticks < 100, "never landed");
        }
        assert_eq!(p.y, a.ground_y);
        assert_eq!(p.vy, 0.0);
        // Peak of a -10 / 0.5 arc: 10 + 9.5 + ... + 0.5 = 105
        assert_eq!(min_y, GROUND_Y - 105.0);
    }
}
