//! Error types for decoding wire values.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised when a raw value does not map onto a known protocol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Notice code outside the known range.
    #[error("unknown notice code 0x{0:02X}")]
    UnknownNotice(u8),

    /// Security level outside 0..=3.
    #[error("unknown security level {0}")]
    UnknownSecurityLevel(u8),

    /// Team id that is neither alliance nor horde.
    #[error("unknown team {0}")]
    UnknownTeam(u8),

    /// Member flag byte carrying bits this protocol does not define.
    #[error("member flags 0x{0:02X} carry undefined bits")]
    UndefinedMemberBits(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProtocolError::UnknownNotice(0x2A).to_string(),
            "unknown notice code 0x2A"
        );
        assert_eq!(
            ProtocolError::UndefinedMemberBits(0x04).to_string(),
            "member flags 0x04 carry undefined bits"
        );
    }
}
