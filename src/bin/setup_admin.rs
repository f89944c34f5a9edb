//! Grants or revokes admin access for an existing account.
//!
//! Usage: `setup_admin <email> [--revoke]`

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::auth_service,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_api=debug".into()),
        )
        .init();

    let mut email = None;
    let mut grant = true;
    for arg in std::env::args().skip(1) {
        if arg == "--revoke" {
            grant = false;
        } else if email.is_none() {
            email = Some(arg);
        } else {
            anyhow::bail!("unexpected argument: {arg}");
        }
    }
    let Some(email) = email else {
        anyhow::bail!("usage: setup_admin <email> [--revoke]");
    };

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let user = auth_service::set_admin(&orm, &email, grant)
        .await
        .map_err(|e| anyhow::anyhow!("could not update {email}: {e}"))?;

    let action = if grant { "granted to" } else { "revoked from" };
    println!("Admin {action} {} ({})", user.email, user.id);
    println!("The user must log in again to receive a token with the new claim.");
    Ok(())
}
