//! Spasibka domain logic.
//!
//! Pure rules with no I/O: rate-limit windows, reward eligibility, purchase
//! checks, game window validation, pagination math and the employee audit
//! diff. The `db` and `engine` crates wire these rules to Postgres.

pub mod eligibility;
pub mod employee;
pub mod error;
pub mod game;
pub mod pagination;
pub mod period;
pub mod purchase;
pub mod types;
