//! Privilege Modes.
//!
//! The tile tracks three privilege levels: User, Supervisor, and Machine.
//! The numeric encodings match the values stored in the mstatus MPP field,
//! so conversion in either direction is a straight cast.

/// Processor privilege level.
///
/// Trap entry always lands in Machine mode; the xRET instructions restore
/// the level saved in mstatus.MPP. Each of uret/sret/mret is legal only at
/// exactly its own level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrivilegeMode {
    /// U-mode: application code, lowest level.
    User = 0,
    /// S-mode: intermediate level; tracked for privilege checks only.
    Supervisor = 1,
    /// M-mode: highest level; the tile resets into it.
    Machine = 3,
}

impl PrivilegeMode {
    /// Decodes a numeric privilege value, defaulting to Machine for
    /// anything outside {0, 1, 3}.
    pub fn from_u8(val: u8) -> Self {
        match val {
            0 => PrivilegeMode::User,
            1 => PrivilegeMode::Supervisor,
            _ => PrivilegeMode::Machine,
        }
    }

    /// The numeric encoding used by mstatus.MPP.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable mode name.
    pub fn name(&self) -> &'static str {
        match self {
            PrivilegeMode::User => "User",
            PrivilegeMode::Supervisor => "Supervisor",
            PrivilegeMode::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
