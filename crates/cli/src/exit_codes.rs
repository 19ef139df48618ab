//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | CLI usage error (bad args, conflicting flags)   |
//! | 3    | IO error (dataset missing, unreadable, output)  |
//! | 4    | Dataset loaded but contained no products        |
//! | 5    | Invalid config (TOML syntax or validation)      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. clap exits with 2 on its own parse errors,
/// this covers checks done after parsing.
pub const EXIT_USAGE: u8 = 2;

/// Dataset or config file not found / unreadable, or the report could not
/// be written.
pub const EXIT_IO: u8 = 3;

/// Every row was skipped or the file was empty.
pub const EXIT_NO_PRODUCTS: u8 = 4;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;
