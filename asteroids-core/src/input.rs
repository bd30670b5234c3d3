use serde::{Deserialize, Serialize};

pub const INPUT_LEFT: u8 = 0x01;
pub const INPUT_RIGHT: u8 = 0x02;
pub const INPUT_THRUST: u8 = 0x04;
pub const INPUT_FIRE: u8 = 0x08;
pub const INPUT_START: u8 = 0x10;
pub const INPUT_RESERVED_MASK: u8 = 0xE0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Fire,
    Other,
}

/// Discrete events, consumed once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown { x: f32, y: f32 },
    Quit,
}

/// Level-triggered keys, sampled every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

/// One tick of player intent in its compact, tape-storable form. `fire` is a
/// key-down event this tick; `start` is a click on the title region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub start: bool,
}

impl FrameInput {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        thrust: false,
        fire: false,
        start: false,
    };

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.left,
            right: self.right,
            thrust: self.thrust,
        }
    }

    /// Expands the edge-triggered bits into events. `click_at` is where a
    /// start click lands.
    pub fn events(&self, click_at: (f32, f32)) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.fire {
            events.push(InputEvent::KeyDown(Key::Fire));
        }
        if self.start {
            events.push(InputEvent::MouseDown {
                x: click_at.0,
                y: click_at.1,
            });
        }
        events
    }
}

#[inline]
pub fn encode_input_byte(input: FrameInput) -> u8 {
    (if input.left { INPUT_LEFT } else { 0 })
        | (if input.right { INPUT_RIGHT } else { 0 })
        | (if input.thrust { INPUT_THRUST } else { 0 })
        | (if input.fire { INPUT_FIRE } else { 0 })
        | (if input.start { INPUT_START } else { 0 })
}

#[inline]
pub fn decode_input_byte(byte: u8) -> FrameInput {
    FrameInput {
        left: (byte & INPUT_LEFT) != 0,
        right: (byte & INPUT_RIGHT) != 0,
        thrust: (byte & INPUT_THRUST) != 0,
        fire: (byte & INPUT_FIRE) != 0,
        start: (byte & INPUT_START) != 0,
    }
}
