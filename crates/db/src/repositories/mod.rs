//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads that
//! never run inside a transaction take `&PgPool`; the statements used by the
//! reward / purchase transactions take `&mut PgConnection` (pass `&mut *tx`)
//! or any `PgExecutor`.

pub mod audit_repo;
pub mod buy_transaction_repo;
pub mod employee_repo;
pub mod game_repo;
pub mod item_repo;
pub mod like_transaction_repo;
pub mod rating_repo;

pub use audit_repo::EmployeeAuditRepo;
pub use buy_transaction_repo::BuyTransactionRepo;
pub use employee_repo::EmployeeRepo;
pub use game_repo::GameRepo;
pub use item_repo::ItemRepo;
pub use like_transaction_repo::LikeTransactionRepo;
pub use rating_repo::RatingRepo;
