//! create-veld-app - Scaffold Payload CMS + Next.js projects

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use veld_core::tui::{run_prompts, PromptFlags};
use veld_core::{pipeline, Database, Features, PackageManager, ProjectConfig, TemplateSource};

#[derive(Parser, Debug)]
#[command(name = "create-veld-app")]
#[command(about = "Create a new Payload CMS + Next.js project")]
#[command(version)]
pub struct Args {
    /// Name of the project
    pub name: Option<String>,

    /// Database adapter
    #[arg(short, long, value_enum)]
    pub database: Option<Database>,

    /// Include Better Auth for authentication
    #[arg(long = "better-auth")]
    pub better_auth: bool,

    /// Include tRPC for a type-safe API layer
    #[arg(long)]
    pub trpc: bool,

    /// Package manager
    #[arg(short, long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Initialize a git repository
    #[arg(long, overrides_with = "no_git")]
    pub git: bool,

    /// Skip git initialization
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Skip prompts and use defaults
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Args {
    /// Three-state git flag: forced on, forced off, or unset (ask/default)
    fn git_flag(&self) -> Option<bool> {
        if self.no_git {
            Some(false)
        } else if self.git {
            Some(true)
        } else {
            None
        }
    }

    fn into_defaults(self) -> ProjectConfig {
        let init_git = self.git_flag().unwrap_or(true);
        ProjectConfig {
            name: self.name.unwrap_or_else(|| "my-veld-app".to_string()),
            database: self.database.unwrap_or(Database::Postgres),
            features: Features {
                better_auth: self.better_auth,
                trpc: self.trpc,
            },
            package_manager: self.package_manager.unwrap_or(PackageManager::Pnpm),
            init_git,
        }
    }

    fn into_prompt_flags(self) -> PromptFlags {
        let git = self.git_flag();
        PromptFlags {
            name: self.name,
            database: self.database,
            better_auth: self.better_auth,
            trpc: self.trpc,
            package_manager: self.package_manager,
            git,
        }
    }
}

fn print_next_steps(config: &ProjectConfig) {
    println!();
    println!("  {}", "Next steps:".bold());
    println!();
    println!("  {} cd {}", "1.".dimmed(), config.name);
    println!("  {} Update .env with your database credentials", "2.".dimmed());
    println!("  {} {}", "3.".dimmed(), config.package_manager.run_command("dev"));
    println!();
    println!("  {} {}", "Open".dimmed(), "http://localhost:3000".cyan());
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Delete any half-built project before exiting on Ctrl+C
    ctrlc::set_handler(move || {
        if let Some(dir) = pipeline::take_in_flight_target() {
            let _ = std::fs::remove_dir_all(&dir);
        }
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let config = if args.yes {
        args.into_defaults()
    } else {
        match run_prompts(args.into_prompt_flags())? {
            Some(config) => config,
            // Cancelled prompts are a clean exit, not a failure
            None => return Ok(()),
        }
    };

    let templates = TemplateSource::discover()?;

    match pipeline::create_project(&config, &templates).await {
        Ok(report) => {
            let _ = console::Term::stderr().show_cursor();
            println!();
            println!("{}", "Project created successfully!".green().bold());
            for warning in &report.warnings {
                println!("{} {}", "Warning:".yellow(), warning);
            }
            print_next_steps(&config);
            Ok(())
        }
        Err(err) => {
            let _ = console::Term::stderr().show_cursor();
            eprintln!();
            eprintln!("{} {:#}", "Failed to create project:".red().bold(), err);
            std::process::exit(1);
        }
    }
}
