use clap::{Args, Parser, Subcommand};

use crate::{config, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    #[arg(short, long)]
    file: String,
}

#[derive(Args, Debug, Clone)]
pub struct CreateAdminArgs {
    #[arg(long, default_value = "admin@happypaws.com")]
    email: String,
    #[arg(long, default_value = "admin")]
    username: String,
    #[arg(long, default_value = "admin123")]
    password: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Renders a file of `migrations/` and runs it
    RunMigrations(RunMigrationsArgs),
    /// Creates the admin account, or promotes the user owning the email
    CreateAdmin(CreateAdminArgs),
}

/// HappyPaws maintenance tasks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let db_pool = utils::setup_sqlite_db_pool(&config::APP_CONFIG.db_host).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                utils::run_migrations(&db_pool, file).await
            }
            Action::CreateAdmin(CreateAdminArgs {
                email,
                username,
                password,
            }) => {
                let created = utils::upsert_admin(&db_pool, email, username, password).await?;
                if created {
                    println!("admin {email} created");
                } else {
                    println!("user {email} promoted to admin");
                }

                Ok(())
            }
        }
    }
}
