//! # Carlot CLI
//!
//! Administrative operations used by the `carlot-cli` binary. They are
//! written against the store traits, so they run the same over PostgreSQL
//! and over the in-memory store in tests.
//!
//! ## Usage
//!
//! ```ignore
//! use carlot_cli::seeder::seed_defaults;
//!
//! let report = seed_defaults(&store).await?;
//! println!("{} permissions created", report.permissions_created);
//! ```

pub mod accounts;
pub mod seeder;
