// MIT License - Copyright (c) 2026 Peter Wright
// Protocol constants

/// Frame header, always the first two bytes of a frame.
pub const HEADER: [u8; 2] = [0xFE, 0xFE];
/// Frame footer, always the last two bytes of a frame.
pub const FOOTER: [u8; 2] = [0xFE, 0x0D];

/// Header + checksum + footer. A frame is never shorter than this.
pub const FRAME_OVERHEAD: usize = HEADER.len() + 2 + FOOTER.len();

/// Seed of the panel checksum.
pub const CHECKSUM_SEED: u16 = 0x147A;

/// `7E` — integration module / panel version query.
pub const CMD_DEVICE_INFO: u8 = 0x7E;
/// `0A` — armed partitions (really) bitmap.
pub const CMD_ARMED_PARTITIONS: u8 = 0x0A;

/// Length of a `7E` payload: command, type, 11 version digits, language.
pub const DEVICE_INFO_PAYLOAD_LEN: usize = 14;
/// Version string template; each `%s` takes one version byte in order.
pub const VERSION_PATTERN: &str = "%s.%s%s %s%s%s%s-%s%s-%s%s";
/// Number of version bytes consumed by [`VERSION_PATTERN`].
pub const VERSION_LEN: usize = 11;

/// Default TCP port of the ETHM-1 integration protocol.
pub const DEFAULT_PORT: u16 = 7094;
/// Default panel address.
pub const DEFAULT_HOST: &str = "192.168.1.10";
/// Connect timeout used by the reference tool.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 750;
/// Response timeout used by the reference tool.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 750;

/// Panel model reported in byte 1 of a `7E` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AlarmType {
    Integra24,
    Integra32,
    Integra64,
    Integra128,
    Integra128WrlSim300,
    Integra64Plus,
    Integra128Plus,
    Integra256Plus,
    Integra128WrlLeon,
    /// Any code not in the table above.
    Unknown(u8),
}

impl AlarmType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Integra24,
            1 => Self::Integra32,
            2 => Self::Integra64,
            3 => Self::Integra128,
            4 => Self::Integra128WrlSim300,
            66 => Self::Integra64Plus,
            67 => Self::Integra128Plus,
            72 => Self::Integra256Plus,
            132 => Self::Integra128WrlLeon,
            other => Self::Unknown(other),
        }
    }

    /// Raw code as sent by the panel.
    pub fn code(&self) -> u8 {
        match self {
            Self::Integra24 => 0,
            Self::Integra32 => 1,
            Self::Integra64 => 2,
            Self::Integra128 => 3,
            Self::Integra128WrlSim300 => 4,
            Self::Integra64Plus => 66,
            Self::Integra128Plus => 67,
            Self::Integra256Plus => 72,
            Self::Integra128WrlLeon => 132,
            Self::Unknown(code) => *code,
        }
    }

    /// Model name, or `None` for an unknown code.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Integra24 => Some("Integra 24"),
            Self::Integra32 => Some("Integra 32"),
            Self::Integra64 => Some("Integra 64"),
            Self::Integra128 => Some("Integra 128"),
            Self::Integra128WrlSim300 => Some("INTEGRA 128-WRL SIM300"),
            Self::Integra64Plus => Some("INTEGRA 64 PLUS"),
            Self::Integra128Plus => Some("INTEGRA 128 PLUS"),
            Self::Integra256Plus => Some("INTEGRA 256 PLUS"),
            Self::Integra128WrlLeon => Some("INTEGRA 128-WRL LEON"),
            Self::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for AlarmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown ({})", self.code()),
        }
    }
}

/// Panel user-interface language reported in the last byte of a `7E` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Language {
    English,
    Italian,
    Dutch,
    Unknown(u8),
}

impl Language {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::English,
            6 => Self::Italian,
            9 => Self::Dutch,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::English => 1,
            Self::Italian => 6,
            Self::Dutch => 9,
            Self::Unknown(code) => *code,
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::English => Some("English"),
            Self::Italian => Some("Italian"),
            Self::Dutch => Some("Dutch"),
            Self::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown ({})", self.code()),
        }
    }
}
