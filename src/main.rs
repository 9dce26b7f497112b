use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launch_catalog::cache::Cache;
use launch_catalog::catalog::Catalog;
use launch_catalog::config::Settings;
use launch_catalog::models::{Entity, EntityKind};
use launch_catalog::report::LogReporter;
use launch_catalog::repository::Repository;

#[derive(Parser)]
#[command(name = "lcat")]
#[command(about = "Catalog of launch vehicle specifications")]
struct Cli {
    /// Settings file (defaults to the user's config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings if none exist and print where data is stored
    Init,
    /// List every stored entity of a kind
    List { kind: Kind },
    /// Print one entity as JSON
    Show { kind: Kind, name: String },
    /// Print the price, fairing and capability roll-up of a collection or family
    Summary { kind: Kind, name: String },
    /// List the families that contain a launcher
    Owners { launcher: String },
    /// List launchers with a fairing and lift capacity suited to a payload
    Carriers { payload: String },
    /// Store an entity from a JSON file, replacing any stored entity of the same name
    Import { kind: Kind, file: PathBuf },
    /// Delete an entity from storage
    Delete { kind: Kind, name: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Launcher,
    Collection,
    Family,
    Payload,
}

impl From<Kind> for EntityKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Launcher => EntityKind::Launcher,
            Kind::Collection => EntityKind::LauncherCollection,
            Kind::Family => EntityKind::VehicleFamily,
            Kind::Payload => EntityKind::Payload,
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "launch_catalog=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings_path = match cli.settings {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let settings = Settings::load_or_create(&settings_path)?;

    let mut catalog = Catalog::open(settings, Arc::new(LogReporter));
    catalog.populate_all();

    match cli.command {
        Commands::Init => {
            println!("Settings: {}", settings_path.display());
            let counts = [
                catalog.launchers().len(),
                catalog.collections().len(),
                catalog.families().len(),
                catalog.payloads().len(),
            ];
            for (kind, count) in EntityKind::ALL.into_iter().zip(counts) {
                println!(
                    "{:<20} {:>5}  {}",
                    kind.as_str(),
                    count,
                    catalog.settings().location_for(kind).display()
                );
            }
        }
        Commands::List { kind } => match kind {
            Kind::Launcher => {
                for launcher in sorted(catalog.launchers()) {
                    println!("{:<32} {:>12.0}", launcher.name, launcher.price);
                }
            }
            Kind::Collection => print_names(catalog.collections()),
            Kind::Family => print_names(catalog.families()),
            Kind::Payload => print_names(catalog.payloads()),
        },
        Commands::Show { kind, name } => match kind {
            Kind::Launcher => print_json(catalog.launchers(), &name)?,
            Kind::Collection => print_json(catalog.collections(), &name)?,
            Kind::Family => print_json(catalog.families(), &name)?,
            Kind::Payload => print_json(catalog.payloads(), &name)?,
        },
        Commands::Summary { kind, name } => {
            let summary = match kind {
                Kind::Collection => catalog
                    .collections()
                    .retrieve(&name)?
                    .map(|c| c.summary()),
                Kind::Family => catalog.families().retrieve(&name)?.map(|f| f.summary()),
                _ => anyhow::bail!("Summaries exist for collections and families only"),
            }
            .with_context(|| format!("No {} named '{}'", EntityKind::from(kind).as_str(), name))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Owners { launcher } => {
            for family in catalog.families().families_containing(&launcher) {
                println!("{}", family.name);
            }
        }
        Commands::Carriers { payload } => {
            let payload = catalog
                .payloads()
                .retrieve(&payload)?
                .with_context(|| format!("No payload named '{}'", payload))?;
            for launcher in sorted(catalog.launchers()) {
                if payload.carried_by(launcher) {
                    println!("{:<32} {:>12.0}", launcher.name, launcher.price);
                }
            }
        }
        Commands::Import { kind, file } => {
            let saved = match kind {
                Kind::Launcher => import(catalog.launchers_mut(), &file)?,
                Kind::Collection => import(catalog.collections_mut(), &file)?,
                Kind::Family => import(catalog.families_mut(), &file)?,
                Kind::Payload => import(catalog.payloads_mut(), &file)?,
            };
            if !saved {
                anyhow::bail!("Failed to import {}", file.display());
            }
        }
        Commands::Delete { kind, name } => {
            let deleted = match kind {
                Kind::Launcher => catalog.launchers_mut().delete(&name),
                Kind::Collection => catalog.collections_mut().delete(&name),
                Kind::Family => catalog.families_mut().delete(&name),
                Kind::Payload => catalog.payloads_mut().delete(&name),
            };
            if !deleted {
                anyhow::bail!("Nothing deleted for '{}'", name);
            }
            tracing::info!("Deleted {} '{}'", EntityKind::from(kind).as_str(), name);
        }
    }

    Ok(())
}

fn sorted<T: Entity, R: Repository<T>>(cache: &Cache<T, R>) -> Vec<&T> {
    let mut entries: Vec<&T> = cache.iter().collect();
    entries.sort_by_key(|e| e.name().to_lowercase());
    entries
}

fn print_names<T: Entity, R: Repository<T>>(cache: &Cache<T, R>) {
    for entity in sorted(cache) {
        println!("{}", entity.name());
    }
}

fn print_json<T, R>(cache: &Cache<T, R>, name: &str) -> anyhow::Result<()>
where
    T: Entity + Serialize,
    R: Repository<T>,
{
    let entity = cache
        .retrieve(name)?
        .with_context(|| format!("No {} named '{}'", T::KIND.as_str(), name))?;
    println!("{}", serde_json::to_string_pretty(entity)?);
    Ok(())
}

fn import<T, R>(cache: &mut Cache<T, R>, file: &Path) -> anyhow::Result<bool>
where
    T: Entity + DeserializeOwned,
    R: Repository<T>,
{
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entity: T = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a {}", file.display(), T::KIND.as_str()))?;
    Ok(cache.save(&entity))
}
