//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Description                                           |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 1    | General error (unspecified)                           |
//! | 2    | Usage error (bad args, unreadable file or config)     |
//! | 3    | Document error (not JSON, missing pattern, bad entry) |
//! | 4    | Validation error (pattern does not fit the grid)      |

use gridmenu_reader::ReadError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing file, unreadable config.
pub const EXIT_USAGE: u8 = 2;

/// The document could not be compiled.
pub const EXIT_DOCUMENT: u8 = 3;

/// The document compiled but the interface it describes is invalid.
pub const EXIT_VALIDATION: u8 = 4;

pub fn read_exit_code(err: &ReadError) -> u8 {
    match err {
        ReadError::Io(_) => EXIT_USAGE,
        ReadError::Json(_) | ReadError::Structural(_) => EXIT_DOCUMENT,
        ReadError::Interface(_) => EXIT_VALIDATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmenu_engine::InterfaceError;

    #[test]
    fn codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_ERROR, EXIT_USAGE, EXIT_DOCUMENT, EXIT_VALIDATION];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn read_errors_map_to_codes() {
        assert_eq!(read_exit_code(&ReadError::Io("x".into())), EXIT_USAGE);
        assert_eq!(read_exit_code(&ReadError::Json("x".into())), EXIT_DOCUMENT);
        assert_eq!(read_exit_code(&ReadError::Structural("x".into())), EXIT_DOCUMENT);
        assert_eq!(
            read_exit_code(&ReadError::Interface(InterfaceError::UnboundCharacter('x'))),
            EXIT_VALIDATION
        );
    }
}
