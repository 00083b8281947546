//! Maintenance subcommands: `seed` and `check-db`.

pub mod check_db;
pub mod seed;
