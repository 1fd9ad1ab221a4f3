//! Provision an admin account: a user plus the admin profile that lets it
//! into the CMS.
//!
//! ```text
//! create-admin <email> <password> [admin|editor]
//! ```
//!
//! Arguments fall back to `ADMIN_EMAIL`, `ADMIN_PASSWORD` and `ADMIN_ROLE`.

use std::env;
use std::sync::Arc;

use anyhow::{Context, bail};

use vinculo_core::domain::{AdminProfile, AdminRole, User};
use vinculo_core::ports::{BaseRepository, PasswordService, UserRepository};
use vinculo_infra::database::connect;
use vinculo_infra::{
    Argon2PasswordService, DatabaseConfig, PostgresAdminProfileRepository, PostgresUserRepository,
};

const MIN_PASSWORD_LEN: usize = 8;

fn arg_or_env(args: &[String], index: usize, key: &str) -> Option<String> {
    args.get(index)
        .cloned()
        .or_else(|| env::var(key).ok())
        .filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let email = arg_or_env(&args, 0, "ADMIN_EMAIL").context("missing admin email")?;
    let password = arg_or_env(&args, 1, "ADMIN_PASSWORD").context("missing admin password")?;
    let role = match arg_or_env(&args, 2, "ADMIN_ROLE") {
        Some(role) => role.parse::<AdminRole>().map_err(anyhow::Error::msg)?,
        None => AdminRole::Admin,
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("password must be at least {} characters", MIN_PASSWORD_LEN);
    }

    let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = connect(&DatabaseConfig::new(url))
        .await
        .context("failed to connect to the content store")?;

    let db = Arc::new(db);
    let users = PostgresUserRepository::new(db.clone());
    let profiles = PostgresAdminProfileRepository::new(db);
    let passwords = Argon2PasswordService::new();

    let user = match users.find_by_email(&email).await? {
        Some(mut user) => {
            tracing::info!(user_id = %user.id, "User exists, resetting password");
            user.password_hash = passwords.hash(&password)?;
            users.save(user).await?
        }
        None => {
            let hash = passwords.hash(&password)?;
            users.save(User::new(email.trim().to_lowercase(), hash)).await?
        }
    };

    let profile = profiles.save(AdminProfile::new(user.id, role)).await?;
    tracing::info!(
        user_id = %user.id,
        role = %profile.role,
        "Admin profile provisioned"
    );

    Ok(())
}
