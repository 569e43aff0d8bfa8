//! CLI Exit Code Registry
//!
//! Single source of truth for `renoplan` exit codes. Scripts rely on these.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | Usage error (bad args, bad date)         |
//! | 3     | Universal | IO error (read/write file)               |
//! | 10-19 | estimate  | Config and project input codes           |
//! | 20-29 | payments  | Milestone status codes                   |

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unparseable dates.
pub const EXIT_USAGE: u8 = 2;

/// IO error - cannot read input or write output.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Estimate (10-19)
// =============================================================================

/// Engine config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 10;

/// Project file failed to parse.
pub const EXIT_INVALID_PROJECT: u8 = 11;

// =============================================================================
// Payments (20-29)
// =============================================================================

/// Requested milestone status change is not allowed or the id is unknown.
pub const EXIT_INVALID_TRANSITION: u8 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let mut codes = vec![
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_IO,
            EXIT_INVALID_CONFIG,
            EXIT_INVALID_PROJECT,
            EXIT_INVALID_TRANSITION,
        ];
        let len = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), len);
    }
}
