use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use dzskills_cli::create_teacher;
use dzskills_cli::seeder::{self, SeedConfig};
use dzskills_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "dzskills-cli")]
#[command(about = "DZ Skills CLI - Administrative tools for DZ Skills", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a teacher account
    CreateTeacher {
        /// Full name of the teacher
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Login username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake accounts, categories and courses
    Seed {
        /// Number of teachers to create
        #[arg(long, default_value = "5")]
        teachers: usize,

        /// Number of students to create
        #[arg(long, default_value = "20")]
        students: usize,

        /// Number of categories to create
        #[arg(long, default_value = "4")]
        categories: usize,

        /// Number of courses to create, spread over teachers and categories
        #[arg(long, default_value = "10")]
        courses: usize,
    },
    /// Remove every row from every table
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = init_db_pool().await;
    if let Err(e) = run_migrations(&pool).await {
        eprintln!("❌ Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateTeacher {
            full_name,
            username,
            email,
            password,
        } => handle_create_teacher(&pool, full_name, username, email, password).await,
        Commands::Seed {
            teachers,
            students,
            categories,
            courses,
        } => {
            let config = SeedConfig {
                teachers,
                students,
                categories,
                courses,
            };
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn handle_create_teacher(
    pool: &PgPool,
    full_name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let full_name = match full_name {
        Some(v) => v,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let username = match username {
        Some(v) => v,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(v) => v,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(v) => v,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let id = create_teacher(pool, &full_name, &username, &email, &password).await?;

    println!("\n✅ Teacher created successfully!");
    println!("   ID: {}", id);
    println!("   Username: {}", username);
    println!("   Email: {}", email);

    Ok(())
}
