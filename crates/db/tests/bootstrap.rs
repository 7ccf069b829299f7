use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    spasibka_db::health_check(&pool).await.unwrap();

    let tables = [
        "employees",
        "employee_audit",
        "games",
        "like_transactions",
        "items",
        "buy_transactions",
    ];

    for table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert!(exists.0, "{table} should exist after migrations");
    }
}

/// The partial unique index rejects a second active game.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_single_active_game_index(pool: PgPool) {
    let insert = "INSERT INTO games (name, game_start, game_end, game_is_active, limit_parameter) \
                  VALUES ($1, NOW(), NOW() + INTERVAL '1 day', true, 'day')";
    sqlx::query(insert).bind("first").execute(&pool).await.unwrap();

    let err = sqlx::query(insert)
        .bind("second")
        .execute(&pool)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_games_single_active"));
}

/// Balances can never go negative, even when bypassing the engine.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_balances_rejected(pool: PgPool) {
    sqlx::query("INSERT INTO employees (bitrix_id, name, lastname) VALUES (1, 'A', 'B')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query("UPDATE employees SET coins = coins - 1 WHERE bitrix_id = 1")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "coins below zero must violate the check constraint");

    sqlx::query("INSERT INTO items (name, price, stock) VALUES ('Mug', 10, 0)")
        .execute(&pool)
        .await
        .unwrap();
    let result = sqlx::query("UPDATE items SET stock = stock - 1")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "stock below zero must violate the check constraint");
}

/// Games must start before they end.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_game_window_check(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO games (name, game_start, game_end, limit_parameter) \
         VALUES ('bad', NOW(), NOW(), 'week')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
