//! Resume crafter: build an ATS-friendly resume from the command line

use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use resume_crafter::analysis::AtsScorer;
use resume_crafter::cli::{self, BulletAction, Cli, Commands, ConfigAction};
use resume_crafter::config::OutputFormat;
use resume_crafter::output::export::{copy_as_text, file_stem, write_export};
use resume_crafter::output::{export_pdf, to_plain_text, AtsReport, ConsoleFormatter, PdfExport, PrintPdfRasterizer, ReportGenerator};
use resume_crafter::session::{Edit, FileStore, ResumeSession, SaveScheduler, Section};
use resume_crafter::{Config, Result, ResumeCrafterError};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn parse_section(section: &str) -> Result<Section> {
    section.parse()
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let store = Arc::new(FileStore::new(&config.storage.data_dir));
    let mut session = ResumeSession::load_or_default(&*store, config.storage.history_limit);
    let scorer = AtsScorer::new(config.scoring.clone());

    let validation = match command {
        Commands::Show => {
            print!("{}", to_plain_text(&session.document())?);
            return Ok(());
        }

        Commands::Score { detailed, json } => {
            let report = AtsReport::build(&session.document(), &scorer);
            if json {
                println!("{}", report.to_json()?);
            } else {
                let formatter = ConsoleFormatter::new(config.output.color_output, detailed);
                print!("{}", formatter.format_report(&report));
            }
            return Ok(());
        }

        Commands::Validate => {
            let report = AtsReport::build(&session.document(), &scorer);
            let formatter = ConsoleFormatter::new(config.output.color_output, false);
            print!("{}", formatter.format_validation(&report.validation));
            return Ok(());
        }

        Commands::Export { format, out } => {
            let format = cli::parse_output_format(&format).map_err(ResumeCrafterError::InvalidInput)?;
            let output_dir = out.unwrap_or_else(|| config.output.export_dir.clone());
            export(&session, &config, format, &output_dir).await?;
            return Ok(());
        }

        Commands::Copy => {
            copy_as_text(&session.document(), &mut std::io::stdout().lock())?;
            return Ok(());
        }

        Commands::Config { action } => {
            run_config_action(action, &config, config_path)?;
            return Ok(());
        }

        Commands::Import { file } => {
            info!("Importing resume from {}", file.display());
            let text = std::fs::read_to_string(&file)?;
            let validation = session.apply_json_edit(&text)?;
            println!("📥 Imported {}", file.display());
            validation
        }

        Commands::Reset { empty } => {
            let validation = session.reset(&*store, empty)?;
            if empty {
                println!("🧹 Starting from an empty resume");
            } else {
                println!("🔄 Restored the example resume");
            }
            validation
        }

        Commands::Set { path, value } => session.apply(&Edit::set(&path, &value)?)?,

        Commands::Add { section } => {
            let section = parse_section(&section)?;
            let validation = session.apply(&Edit::AddEntry(section))?;
            println!("➕ Added {} entry {}", section, section.len(&session.document()));
            validation
        }

        Commands::Remove { section, position } => {
            let section = parse_section(&section)?;
            session.apply(&Edit::RemoveEntry { section, position })?
        }

        Commands::Move { section, from, to } => {
            let section = parse_section(&section)?;
            session.apply(&Edit::MoveEntry { section, from, to })?
        }

        Commands::Bullet { action } => match action {
            BulletAction::Add { entry, text } => session.apply(&Edit::AddBullet { position: entry, text })?,
            BulletAction::Remove { entry, bullet } => {
                session.apply(&Edit::RemoveBullet { position: entry, bullet })?
            }
        },
    };

    persist(&config, store, &session).await?;

    let formatter = ConsoleFormatter::new(config.output.color_output, false);
    if !validation.is_valid {
        print!("{}", formatter.format_validation(&validation));
    }
    let report = AtsReport::build(&session.document(), &scorer);
    println!("📊 ATS score: {}% [{}]", report.score, report.score_label());
    if let Some(banner) = report.banner {
        println!("   {}: {}", banner.title, banner.message);
    }

    Ok(())
}

async fn persist(config: &Config, store: Arc<FileStore>, session: &ResumeSession) -> Result<()> {
    let scheduler = SaveScheduler::spawn(store, Duration::from_millis(config.storage.save_debounce_ms));
    scheduler.schedule(session.document());
    scheduler.flush().await?;
    scheduler.shutdown().await
}

async fn export(session: &ResumeSession, config: &Config, format: OutputFormat, output_dir: &Path) -> Result<()> {
    let document = session.document();
    let generator = ReportGenerator::with_style(config.output.style());

    if format != OutputFormat::Pdf {
        let path = write_export(&generator, &document, format, output_dir)?;
        println!("💾 Saved {}", path.display());
        return Ok(());
    }

    let html = generator.generate(&document, OutputFormat::Pdf)?;
    let rasterizer = PrintPdfRasterizer::new(output_dir);
    match export_pdf(&rasterizer, &html, &file_stem(&document), output_dir).await? {
        PdfExport::Rasterized(path) => println!("💾 Saved {}", path.display()),
        PdfExport::PrintView(path) => {
            println!("⚠️  PDF conversion failed; open {} and print it to PDF", path.display())
        }
    }
    Ok(())
}

fn run_config_action(action: Option<ConfigAction>, config: &Config, config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(Config::config_path);

    match action {
        Some(ConfigAction::Show) | None => {
            println!("⚙️  Current Configuration\n");
            println!("Config file: {}", path.display());
            println!("Resume file: {}", config.document_path().display());
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| ResumeCrafterError::Configuration(format!("Failed to serialize config: {}", e)))?;
            println!("\n{}", rendered);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default().save_to(&path)?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => println!("{}", path.display()),
    }

    Ok(())
}
