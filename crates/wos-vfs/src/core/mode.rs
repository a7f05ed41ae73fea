//! chmod mode grammar.

use super::error::VfsError;
use super::types::Permissions;

/// A parsed chmod argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSpec {
    /// Three octal digits, e.g. `755`
    Octal(u16),
    /// `+x`: set execute for owner, group and other
    AddExecute,
    /// `-x`: clear execute for owner, group and other
    RemoveExecute,
}

impl ModeSpec {
    /// Parse a mode argument.
    pub fn parse(mode: &str) -> Result<Self, VfsError> {
        match mode {
            "+x" => return Ok(Self::AddExecute),
            "-x" => return Ok(Self::RemoveExecute),
            _ => {}
        }

        let bytes = mode.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return Err(VfsError::InvalidModeSpec(String::from(mode)));
        }

        let bits = bytes
            .iter()
            .fold(0u16, |acc, b| (acc << 3) | u16::from(b - b'0'));
        Ok(Self::Octal(bits))
    }

    /// Apply this mode to existing permissions. The kind flag never changes.
    pub fn apply(self, perms: Permissions) -> Permissions {
        match self {
            Self::Octal(bits) => perms.with_bits(bits),
            Self::AddExecute => perms.with_execute(),
            Self::RemoveExecute => perms.without_execute(),
        }
    }
}
