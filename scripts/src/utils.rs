use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use chrono::Utc;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::str::FromStr;
use uuid::Uuid;

const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/9.x/croodles/svg?seed=";

pub async fn run_migrations(db_pool: &SqlitePool, file_name: &str) -> anyhow::Result<()> {
    let mut tera = tera::Tera::new("../migrations/**/*.sql")?;
    tera.autoescape_on(vec![]);

    let create_tables_query = tera.render(file_name, &tera::Context::new())?;

    sqlx::raw_sql(&create_tables_query).execute(db_pool).await?;
    Ok(())
}

pub async fn setup_sqlite_db_pool(db_host: &str) -> anyhow::Result<SqlitePool> {
    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|err| anyhow!("password salt couldn't be created: {}", err))?;

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("password couldn't be hashed: {}", err))?
        .to_string())
}

/// Flags the user with `email` as admin, creating it when missing.
/// Returns `true` when the user was created.
pub async fn upsert_admin(
    db_pool: &SqlitePool,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<bool> {
    let email = email.trim().to_lowercase();
    let now = Utc::now();

    let promoted = sqlx::query("UPDATE user_app SET is_admin = 1, updated_at = $1 WHERE email = $2")
        .bind(now)
        .bind(&email)
        .execute(db_pool)
        .await?
        .rows_affected();

    if promoted > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO user_app (username, email, password_hash, profile_image, is_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 1, $5, $6)
        "#,
    )
    .bind(username)
    .bind(&email)
    .bind(hash_password(password)?)
    .bind(format!("{DEFAULT_AVATAR_URL}{username}"))
    .bind(now)
    .bind(now)
    .execute(db_pool)
    .await?;

    Ok(true)
}
