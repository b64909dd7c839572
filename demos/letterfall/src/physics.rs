use crate::config::PhysicsConfig;
use crate::letter::Letter;

/// Advance every ungrounded letter by one fixed step of `dt` seconds.
///
/// Letters are processed in collection order and updated in place, so a
/// letter grounded earlier in the pass is a collider for later ones.
pub fn step_letters(letters: &mut [Letter], dt: f32, config: &PhysicsConfig) {
    let scale = dt * config.reference_rate;

    for i in 0..letters.len() {
        if letters[i].kin.grounded {
            continue;
        }

        let mut moving = letters[i].clone();
        let previous = moving.kin.pos;

        moving.kin.pos += moving.kin.velocity * scale;
        moving.kin.velocity.y -= config.gravity * scale;
        moving.kin.rotation += moving.kin.rotation_speed * scale;

        if moving.kin.pos.y < config.floor_y {
            if config.ground_on_floor {
                moving.kin.ground();
            }
            letters[i].kin = moving.kin;
            continue;
        }

        let bounds = moving.world_bounds();
        let hit = letters
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && other.kin.grounded)
            .map(|(_, other)| other.world_bounds())
            .find(|other| bounds.intersects(other));

        if let Some(other) = hit {
            moving.kin.pos = previous;
            moving.kin.pos.y = other.max.y;
            if config.ground_on_collision {
                moving.kin.ground();
            }
        }

        letters[i].kin = moving.kin;
    }
}
