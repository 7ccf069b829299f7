/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Stable numeric identifier assigned to an employee by Bitrix24.
pub type BitrixId = i64;

/// Spendable coin amounts (balances, prices, debits).
pub type Coins = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
