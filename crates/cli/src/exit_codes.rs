//! CLI Exit Code Registry
//!
//! Single source of truth for `satcat` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success (join misses included)                      |
//! | 1    | General error                                       |
//! | 2    | Usage error (bad arguments, missing config file)    |
//! | 3    | Config file failed to parse or validate             |
//! | 4    | A source could not be read, fetched or parsed       |
//! | 5    | A row or header has the wrong number of columns     |
//! | 6    | The database rejected a table or batch              |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options or files.
pub const EXIT_USAGE: u8 = 2;

/// Config file is not valid TOML or fails validation.
pub const EXIT_CONFIG_INVALID: u8 = 3;

/// Registry or catalog could not be loaded.
pub const EXIT_LOAD: u8 = 4;

/// Column count does not match the declared schema.
pub const EXIT_SCHEMA: u8 = 5;

/// Database open, table creation or batch write failed.
pub const EXIT_SINK: u8 = 6;
