use anyhow::Context;
use carlot_cli::accounts::{self, NewAccount};
use carlot_cli::seeder;
use carlot_db::{MIGRATOR, PgStore, init_db_pool};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "carlot-cli")]
#[command(about = "Carlot CLI - Administrative tools for Carlot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed default permissions and the admin/viewer roles
    Seed,
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Slug of a role to assign, e.g. `admin`
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Assign a role to an existing user
    AssignRole {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: String,

        /// Role slug
        #[arg(short = 'r', long)]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            MIGRATOR.run(&pool).await.context("failed to run migrations")?;
            println!("✅ Migrations applied");
        }
        Commands::Seed => {
            let store = PgStore::new(pool);
            let report = seeder::seed_defaults(&store).await?;
            println!(
                "✅ Seeded {} permissions and {} roles",
                report.permissions_created, report.roles_created
            );
        }
        Commands::CreateUser {
            name,
            email,
            password,
            role,
        } => {
            let name = match name {
                Some(name) => name,
                None => Input::new().with_prompt("Name").interact_text()?,
            };
            let email = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email address").interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let store = PgStore::new(pool);
            let user = accounts::create_account(
                &store,
                &store,
                NewAccount {
                    name,
                    email,
                    password,
                    role,
                },
                bcrypt_cost(),
            )
            .await?;

            println!("\n✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
        }
        Commands::AssignRole { email, role } => {
            let store = PgStore::new(pool);
            accounts::assign_role(&store, &store, &email, &role).await?;
            println!("✅ Assigned role `{}` to {}", role, email);
        }
    }

    Ok(())
}

fn bcrypt_cost() -> u32 {
    std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|cost| (4..=31).contains(cost))
        .unwrap_or(12)
}
