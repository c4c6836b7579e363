use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bizboost::config::{self, Config};
use bizboost::export;
use bizboost::generation::SiteGenerator;
use bizboost::llm::{read_api_key, LlmPool};
use bizboost::session::{Applied, Field, Session};
use bizboost::tui::{app::TuiApp, runner};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.bizboost/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gemini model or alias (flash, flash-lite, pro)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Language for the dashboard summary (en-US, te-IN, hi-IN)
    #[arg(long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Generate a website and save it as index.html
    Generate {
        /// What the business does and what the site should show
        description: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        business: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Modern, Vibrant, Corporate, or Elegant
        #[arg(long, default_value = "Modern")]
        palette: String,
        /// Follow-up change to apply to the generated site
        #[arg(long)]
        change: Option<String>,
        /// Output directory (default: config output_dir)
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Also write announcement text for chat apps
        #[arg(long)]
        marketing: bool,
    },
    /// Write announcement text for a business
    Newsletter {
        description: String,
        #[arg(long)]
        business: String,
    },
    /// Summarize the business dashboard in the chosen language
    Analyze {
        #[arg(long)]
        business: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    init_logging(matches!(command, Commands::Tui));

    let config = Config::load(cli.config.as_deref())?;
    let model = cli.model.unwrap_or_else(|| config.model.clone());
    let language = cli.language.unwrap_or_else(|| config.language.clone());
    let generator = build_generator(&config, &model)?;
    info!(%model, %language, "starting");

    match command {
        Commands::Tui => {
            let (app, jobs) = TuiApp::new(Session::new(&language), generator, config.output_dir());
            runner::run(app, jobs).await?;
        }
        Commands::Generate {
            description,
            name,
            business,
            email,
            phone,
            palette,
            change,
            out,
            marketing,
        } => {
            let mut session = Session::new(&language);
            session.set_field(Field::UserName, name);
            session.set_field(Field::BusinessName, business);
            session.set_field(Field::UserEmail, email);
            session.set_field(Field::UserPhone, phone);
            session.set_field(Field::Description, description);
            if !session.select_palette(&palette) {
                bail!("unknown palette {palette:?}");
            }

            let applied = session_run(&mut session, &generator, None).await?;
            expect_accepted(&session, applied)?;
            if let Some(change) = change {
                let applied = session_run(&mut session, &generator, Some(change)).await?;
                expect_accepted(&session, applied)?;
            }

            let dir = out.unwrap_or_else(|| config.output_dir());
            let path = export::save_html(&dir, session.artifact())?;
            println!("{}", path.display());

            if marketing {
                if session.run_newsletter(&generator).await {
                    println!("\n{}", session.newsletter());
                } else if let Some(err) = session.error() {
                    bail!("{err}");
                }
            }
        }
        Commands::Newsletter {
            description,
            business,
        } => {
            let text = generator.generate_newsletter(&description, &business).await?;
            println!("{text}");
        }
        Commands::Analyze { business } => {
            let mut session = Session::new(&language);
            session.set_field(Field::BusinessName, business);
            match session.run_analysis(&generator).await {
                Some(summary) => println!("{summary}"),
                None => match session.error() {
                    Some(err) => bail!("{err}"),
                    None => bail!("business name is required"),
                },
            }
        }
    }
    Ok(())
}

async fn session_run(
    session: &mut Session,
    generator: &SiteGenerator,
    change: Option<String>,
) -> Result<Applied> {
    let applied = match change {
        Some(change) => {
            session.set_field(Field::Modification, change);
            session.run_assist(generator).await?
        }
        None => session.run_website(generator).await?,
    };
    Ok(applied)
}

fn expect_accepted(session: &Session, applied: Applied) -> Result<()> {
    match (applied, session.error()) {
        (Applied::Accepted, _) => Ok(()),
        (_, Some(err)) => bail!("{err}"),
        (other, None) => bail!("generation did not complete ({other:?})"),
    }
}

fn build_generator(config: &Config, model: &str) -> Result<SiteGenerator> {
    let api_key = read_api_key(&config.api_key_env)
        .with_context(|| format!("set {} to your Gemini API key", config.api_key_env))?;
    let pool = LlmPool::with_base_url(api_key, model, config.base_url.clone());
    Ok(SiteGenerator::new(Arc::new(pool)))
}

/// TUI logs go to `~/.bizboost/bizboost.log` so they don't tear the screen;
/// CLI logs go to stderr.
fn init_logging(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bizboost=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !to_file {
        builder.with_writer(std::io::stderr).init();
        return;
    }

    let file = config::data_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("bizboost.log"))
            .ok()
    });
    match file {
        Some(file) => builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => builder.with_writer(std::io::sink).init(),
    }
}
