use asteroids_core::game::{replay, replay_with_checkpoints, Game, ReplayCheckpoint, WorldSnapshot};
use asteroids_core::{GameConfig, StateId};

fn mix_u64(hash: u64, value: u64) -> u64 {
    hash.wrapping_mul(0x0000_0100_0000_01B3) ^ value
}

fn checkpoint_fingerprint(checkpoints: &[ReplayCheckpoint]) -> u64 {
    let mut hash = 0xCBF2_9CE4_8422_2325u64;

    for checkpoint in checkpoints {
        hash = mix_u64(hash, checkpoint.frame_count as u64);
        hash = mix_u64(hash, checkpoint.rng_state as u64);
        hash = mix_u64(hash, checkpoint.score as u64);
        hash = mix_u64(hash, checkpoint.lives as i64 as u64);
        hash = mix_u64(hash, checkpoint.asteroids as u64);
        hash = mix_u64(hash, checkpoint.missiles as u64);
        hash = mix_u64(hash, checkpoint.explosions as u64);
        hash = mix_u64(hash, checkpoint.ship_x.to_bits() as u64);
        hash = mix_u64(hash, checkpoint.ship_y.to_bits() as u64);
        hash = mix_u64(hash, checkpoint.ship_vx.to_bits() as u64);
        hash = mix_u64(hash, checkpoint.ship_vy.to_bits() as u64);
        hash = mix_u64(hash, checkpoint.ship_angle.to_bits() as u64);
    }

    hash
}

/// Start, then a repeating pattern of turning, thrusting and firing.
fn scripted_inputs(frames: usize) -> Vec<u8> {
    const PATTERN: [u8; 8] = [0x04, 0x04, 0x0C, 0x01, 0x01, 0x08, 0x02, 0x00];
    let mut inputs = Vec::with_capacity(frames);
    inputs.push(0x10);
    inputs.extend(PATTERN.iter().cycle().take(frames.saturating_sub(1)));
    inputs
}

#[test]
fn checkpoint_fingerprint_is_stable_across_runs() {
    let inputs = scripted_inputs(2_000);
    let config = GameConfig::default();

    let first = replay_with_checkpoints(config, 0xDEAD_BEEF, &inputs, 50);
    let second = replay_with_checkpoints(config, 0xDEAD_BEEF, &inputs, 50);

    assert_eq!(first.first().expect("checkpoint").frame_count, 0);
    assert_eq!(
        first.last().expect("checkpoint").frame_count,
        inputs.len() as u32
    );
    assert_eq!(checkpoint_fingerprint(&first), checkpoint_fingerprint(&second));
}

#[test]
fn different_seeds_diverge() {
    let inputs = scripted_inputs(600);
    let config = GameConfig::default();

    let a = replay_with_checkpoints(config, 1, &inputs, 100);
    let b = replay_with_checkpoints(config, 2, &inputs, 100);

    assert_ne!(checkpoint_fingerprint(&a), checkpoint_fingerprint(&b));
}

#[test]
fn final_checkpoint_agrees_with_replay_result() {
    let inputs = scripted_inputs(1_500);
    let config = GameConfig::default();

    let checkpoints = replay_with_checkpoints(config, 0x0BAD_5EED, &inputs, 0);
    let result = replay(config, 0x0BAD_5EED, &inputs);
    let last = checkpoints.last().expect("checkpoint");

    assert_eq!(checkpoints.len(), inputs.len() + 1);
    assert_eq!(last.score, result.final_score);
    assert_eq!(last.lives, result.final_lives);
    assert_eq!(last.state, result.final_state);
}

#[test]
fn score_and_lives_stay_in_range_for_a_long_session() {
    let inputs = scripted_inputs(6_000);
    let config = GameConfig::default();
    let checkpoints = replay_with_checkpoints(config, 0x5EED_0001, &inputs, 1);

    let mut previous_score = 0;
    for checkpoint in &checkpoints {
        assert!(checkpoint.lives <= config.initial_lives);
        if checkpoint.state == StateId::Gameplay {
            assert!(checkpoint.lives >= 1);
            assert!(checkpoint.score >= previous_score || checkpoint.score == 0);
        }
        previous_score = checkpoint.score;
    }
}

#[test]
fn snapshot_survives_json() {
    let mut game = Game::new(GameConfig::default(), 42);
    for input in scripted_inputs(240) {
        game.step_byte(input);
    }

    let snapshot = game.snapshot();
    let json = serde_json::to_string(&snapshot).expect("serialise snapshot");
    let back: WorldSnapshot = serde_json::from_str(&json).expect("deserialise snapshot");
    assert_eq!(back, snapshot);
}
