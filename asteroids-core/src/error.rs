use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    Zero { field: &'static str },
    InvertedRange { field: &'static str, min: f32, max: f32 },
    DragOutOfRange { value: f32 },
    TitleExceedsScreen,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Zero { field } => write!(f, "{field} must be non-zero"),
            Self::InvertedRange { field, min, max } => {
                write!(f, "{field} range is inverted: min={min} > max={max}")
            }
            Self::DragOutOfRange { value } => {
                write!(f, "ship_drag must be in (0, 1], got {value}")
            }
            Self::TitleExceedsScreen => write!(f, "title region does not fit on screen"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapeError {
    TapeTooShort { actual: usize, min: usize },
    InvalidMagic { found: u32 },
    UnsupportedVersion { found: u8 },
    HeaderReservedNonZero,
    FrameCountOutOfRange { frame_count: u32, max_frames: u32 },
    TapeLengthMismatch { expected: usize, actual: usize },
    ReservedInputBitsNonZero { frame: u32, byte: u8 },
    CrcMismatch { stored: u32, computed: u32 },
    FrameCountMismatch { claimed: u32, computed: u32 },
    ScoreMismatch { claimed: u32, computed: u32 },
    LivesMismatch { claimed: i32, computed: i32 },
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TapeTooShort { actual, min } => {
                write!(f, "tape too short: got {actual} bytes, need at least {min}")
            }
            Self::InvalidMagic { found } => write!(f, "invalid tape magic: 0x{found:08x}"),
            Self::UnsupportedVersion { found } => write!(f, "unsupported tape version: {found}"),
            Self::HeaderReservedNonZero => write!(f, "header reserved bytes are non-zero"),
            Self::FrameCountOutOfRange {
                frame_count,
                max_frames,
            } => write!(
                f,
                "frame count out of range: {frame_count} (allowed 1..={max_frames})"
            ),
            Self::TapeLengthMismatch { expected, actual } => write!(
                f,
                "tape length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::ReservedInputBitsNonZero { frame, byte } => write!(
                f,
                "input byte reserved bits set at frame {frame}: 0x{byte:02x}"
            ),
            Self::CrcMismatch { stored, computed } => write!(
                f,
                "crc mismatch: stored=0x{stored:08x}, computed=0x{computed:08x}"
            ),
            Self::FrameCountMismatch { claimed, computed } => {
                write!(
                    f,
                    "frame-count mismatch: claimed={claimed}, computed={computed}"
                )
            }
            Self::ScoreMismatch { claimed, computed } => {
                write!(f, "score mismatch: claimed={claimed}, computed={computed}")
            }
            Self::LivesMismatch { claimed, computed } => {
                write!(f, "lives mismatch: claimed={claimed}, computed={computed}")
            }
        }
    }
}

impl std::error::Error for TapeError {}

/// A state was requested by a name no state answers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownState {
    pub name: String,
}

impl fmt::Display for UnknownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game state '{}'", self.name)
    }
}

impl std::error::Error for UnknownState {}
