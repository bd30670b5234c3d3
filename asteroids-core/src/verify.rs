use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::TapeError;
use crate::game::{replay, ReplayResult, StateId};
use crate::tape::parse_tape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub seed: u32,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub final_state: StateId,
    pub tape_checksum: u32,
}

/// Parses the tape, replays its inputs from its seed and checks the claimed
/// footer against what the simulation actually produced.
pub fn verify_tape(
    bytes: &[u8],
    config: GameConfig,
    max_frames: u32,
) -> Result<VerificationReport, TapeError> {
    verify_tape_with_replay(bytes, max_frames, |seed, inputs| {
        replay(config, seed, inputs)
    })
}

fn verify_tape_with_replay<F>(
    bytes: &[u8],
    max_frames: u32,
    replay_fn: F,
) -> Result<VerificationReport, TapeError>
where
    F: FnOnce(u32, &[u8]) -> ReplayResult,
{
    let tape = parse_tape(bytes, max_frames)?;
    let replay_result = replay_fn(tape.header.seed, tape.inputs);

    if replay_result.frame_count != tape.header.frame_count {
        return Err(TapeError::FrameCountMismatch {
            claimed: tape.header.frame_count,
            computed: replay_result.frame_count,
        });
    }

    if replay_result.final_score != tape.footer.final_score {
        return Err(TapeError::ScoreMismatch {
            claimed: tape.footer.final_score,
            computed: replay_result.final_score,
        });
    }

    if replay_result.final_lives != tape.footer.final_lives {
        return Err(TapeError::LivesMismatch {
            claimed: tape.footer.final_lives,
            computed: replay_result.final_lives,
        });
    }

    tracing::debug!(
        seed = tape.header.seed,
        frames = tape.header.frame_count,
        score = replay_result.final_score,
        "tape verified"
    );

    Ok(VerificationReport {
        seed: tape.header.seed,
        frame_count: tape.header.frame_count,
        final_score: replay_result.final_score,
        final_lives: replay_result.final_lives,
        final_state: replay_result.final_state,
        tape_checksum: tape.footer.checksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TAPE_HEADER_SIZE, TAPE_MAGIC, TAPE_VERSION};
    use crate::tape::serialize_tape;

    fn footer_offset(frame_count: usize) -> usize {
        TAPE_HEADER_SIZE + frame_count
    }

    fn valid_tape(seed: u32, inputs: &[u8]) -> Vec<u8> {
        let result = replay(GameConfig::default(), seed, inputs);
        serialize_tape(seed, inputs, result.final_score, result.final_lives)
    }

    #[test]
    fn accepts_honest_tape() {
        let mut inputs = vec![0x10u8];
        inputs.extend([0x08, 0x00, 0x01, 0x04, 0x0C].repeat(20));
        let tape = valid_tape(0x1234_5678, &inputs);

        let report = verify_tape(&tape, GameConfig::default(), 10_000).expect("honest tape");
        assert_eq!(report.seed, 0x1234_5678);
        assert_eq!(report.frame_count, inputs.len() as u32);
        assert_eq!(report.tape_checksum, crate::tape::crc32(&tape[..footer_offset(inputs.len())]));
    }

    #[test]
    fn rejects_reserved_input_bits() {
        let tape = serialize_tape(0xAABB_CCDD, &[0x20], 0, 3);
        let err = verify_tape(&tape, GameConfig::default(), 10).unwrap_err();
        assert_eq!(
            err,
            TapeError::ReservedInputBitsNonZero {
                frame: 0,
                byte: 0x20
            }
        );
    }

    #[test]
    fn detects_score_tampering() {
        let inputs = [0x00u8; 60];
        let mut tape = valid_tape(0x1234_5678, &inputs);
        let report = verify_tape(&tape, GameConfig::default(), 10_000).expect("honest tape");

        let offset = footer_offset(inputs.len());
        tape[offset..offset + 4].copy_from_slice(&(report.final_score + 1).to_le_bytes());

        let err = verify_tape(&tape, GameConfig::default(), 10_000).unwrap_err();
        assert!(matches!(err, TapeError::ScoreMismatch { .. }));
    }

    #[test]
    fn detects_lives_tampering() {
        let inputs = [0x00u8; 48];
        let mut tape = valid_tape(0x1234_5678, &inputs);
        let offset = footer_offset(inputs.len());
        tape[offset + 4..offset + 8].copy_from_slice(&99i32.to_le_bytes());

        let err = verify_tape(&tape, GameConfig::default(), 10_000).unwrap_err();
        assert_eq!(
            err,
            TapeError::LivesMismatch {
                claimed: 99,
                computed: 3
            }
        );
    }

    #[test]
    fn honours_max_frames() {
        let tape = valid_tape(0x1122_3344, &[0x00u8; 32]);
        let err = verify_tape(&tape, GameConfig::default(), 8).unwrap_err();
        assert_eq!(
            err,
            TapeError::FrameCountOutOfRange {
                frame_count: 32,
                max_frames: 8
            }
        );
    }

    #[test]
    fn detects_frame_count_mismatch_when_replay_disagrees() {
        let inputs = [0x00u8; 4];
        let tape = valid_tape(0xDEAD_BEEF, &inputs);
        let expected = replay(GameConfig::default(), 0xDEAD_BEEF, &inputs);
        let err = verify_tape_with_replay(&tape, 100, |_seed, _inputs| ReplayResult {
            frame_count: expected.frame_count + 1,
            ..expected
        })
        .unwrap_err();

        assert_eq!(
            err,
            TapeError::FrameCountMismatch {
                claimed: 4,
                computed: 5
            }
        );
    }

    #[test]
    fn single_byte_tampering_is_rejected() {
        let inputs = [0x10u8, 0x02, 0x04, 0x08, 0x03, 0x0C, 0x00, 0x07];
        let good_tape = valid_tape(0xFEED_BEEF, &inputs);
        assert!(verify_tape(&good_tape, GameConfig::default(), 100).is_ok());

        for idx in 0..good_tape.len() {
            let mut tampered = good_tape.clone();
            tampered[idx] ^= 0x01;
            assert!(
                verify_tape(&tampered, GameConfig::default(), 100).is_err(),
                "tampering byte index {idx} must fail verification"
            );
        }
    }

    #[test]
    fn parse_checks_happen_before_replay() {
        let mut tape = valid_tape(0xDEAD_BEEF, &[0x00u8; 4]);
        tape[0..4].copy_from_slice(&TAPE_MAGIC.wrapping_add(1).to_le_bytes());
        tape[4] = TAPE_VERSION + 1;

        let err = verify_tape_with_replay(&tape, 10, |_seed, _inputs| {
            panic!("replay must not run when parse fails")
        })
        .unwrap_err();

        assert!(matches!(err, TapeError::InvalidMagic { .. }));
    }
}
