//! Sourcebook CLI
//!
//! Command-line interface for the Sourcebook backend:
//! - Open a `/<project>/<mode>` path the way the web client does
//! - Create, update and delete projects
//! - Add, edit and remove sources

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sourcebook::{
    App, Config, EntryView, Existence, LoggingConfig, Project, Screen, SessionState, SourceApi,
    SourceApiClient, SourceChange, SourceDraft, SourceEditor, SourceEntry, SourceField,
    SourceViewer,
};

#[derive(Parser)]
#[command(name = "sourcebook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage bibliographic sources attached to projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/sourcebook/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a path such as /<project>/edit or /<project>/view
    Open {
        path: String,
    },

    /// List all projects
    Projects,

    /// Show a project and its sources
    Show {
        project: String,
    },

    /// Create or update a project
    Save {
        /// Project to update (ignored with --create)
        project: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        password: String,
        /// Create a new project instead of updating
        #[arg(long)]
        create: bool,
    },

    /// Delete a project and all of its sources
    DeleteProject {
        project: String,
        #[arg(long)]
        password: String,
    },

    /// Manage the sources of a project
    Source {
        #[command(subcommand)]
        action: SourceCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SourceCommand {
    /// Add a source
    Add {
        project: String,
        #[arg(long, default_value = "")]
        tag: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        accessed: String,
        #[arg(long, default_value = "")]
        published: String,
    },

    /// Change one field of a source (tag, url, author, title, date_accessed, date_published)
    Set {
        project: String,
        source_id: String,
        field: SourceField,
        value: String,
    },

    /// Remove a source
    Rm {
        project: String,
        source_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.trim_end_matches('/').to_string();
    }

    init_logging(&config.logging);
    tracing::debug!("Backend: {}", config.api.url);

    let json = cli.format == "json";
    let api: Arc<dyn SourceApi> = Arc::new(SourceApiClient::new(&config.api)?);

    match cli.command {
        Commands::Open { path } => {
            let app = App::mount(&path, Arc::clone(&api));
            app.start().await?;

            match app.screen() {
                Screen::Editor(editor) => {
                    print_session(&editor.state().await, &editor.entries().await, json)?
                }
                Screen::Viewer(viewer) => {
                    print_session(&viewer.state().await, &viewer.entries().await, json)?
                }
            }
        }

        Commands::Projects => {
            let projects = api.list_projects().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else if projects.is_empty() {
                println!("No projects yet.");
                println!();
                println!("Create one with:");
                println!("  sourcebook save --create --name <name> --password <password>");
            } else {
                println!("{:<38} {:<24} {}", "ID", "Name", "Description");
                println!("{}", "-".repeat(80));
                for project in projects {
                    println!(
                        "{:<38} {:<24} {}",
                        project.id, project.name, project.description
                    );
                }
            }
        }

        Commands::Show { project } => {
            let viewer = SourceViewer::new(Arc::clone(&api), Some(project));
            viewer.reload().await?;
            print_session(&viewer.state().await, &viewer.entries().await, json)?;
        }

        Commands::Save {
            project,
            name,
            description,
            password,
            create,
        } => {
            if !create && project.is_none() {
                bail!("A project id is required unless --create is given");
            }

            let editor = SourceEditor::new(Arc::clone(&api), project);
            editor
                .edit_form(|form| {
                    form.name = name;
                    form.description = description;
                    form.password = password;
                    form.create_new = create;
                })
                .await;

            let saved = editor.save().await?;
            print_project(&saved, json)?;
        }

        Commands::DeleteProject { project, password } => {
            let editor = open_editor(&api, project).await?;
            editor.delete_project(&password).await?;
            println!("Project deleted");
        }

        Commands::Source { action } => match action {
            SourceCommand::Add {
                project,
                tag,
                url,
                author,
                title,
                accessed,
                published,
            } => {
                let editor = open_editor(&api, project).await?;
                let created = editor
                    .add_source(SourceDraft {
                        tag,
                        url,
                        author,
                        title,
                        date_accessed: accessed,
                        date_published: published,
                    })
                    .await?;
                println!("Added source {}", created.id);
            }

            SourceCommand::Set {
                project,
                source_id,
                field,
                value,
            } => {
                let editor = open_editor(&api, project).await?;
                let saved = editor
                    .change_source(SourceChange {
                        id: source_id,
                        field,
                        value,
                    })
                    .await?;

                let entry = SourceEntry::new(saved, sourcebook::EntryMode::Edit);
                print_entries(std::slice::from_ref(&entry), json)?;
            }

            SourceCommand::Rm { project, source_id } => {
                let editor = open_editor(&api, project).await?;
                editor.delete_source(&source_id).await?;
                println!("Removed source {}", source_id);
            }
        },

        Commands::Config { output } => {
            let config = sourcebook::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sourcebook={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load a project into an editor, failing if it does not exist
async fn open_editor(api: &Arc<dyn SourceApi>, project: String) -> anyhow::Result<SourceEditor> {
    let editor = SourceEditor::new(Arc::clone(api), Some(project.clone()));
    if editor.reload().await? == Existence::Missing {
        bail!("Project not found: {}", project);
    }
    Ok(editor)
}

fn print_session(state: &SessionState, entries: &[SourceEntry], json: bool) -> anyhow::Result<()> {
    match (&state.existence, &state.project) {
        (Existence::Exists, Some(project)) => {
            print_project(project, json)?;
            if !json {
                println!();
            }
            print_entries(entries, json)
        }
        _ => match &state.project_id {
            Some(id) => bail!("Project not found: {}", id),
            None => bail!("No project selected. Use a path like /<project>/view"),
        },
    }
}

fn print_project(project: &Project, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(project)?);
    } else {
        println!("Project ID: {}", project.id);
        println!("Project Name: {}", project.name);
        println!("Project Description: {}", project.description);
    }
    Ok(())
}

fn print_entries(entries: &[SourceEntry], json: bool) -> anyhow::Result<()> {
    if json {
        let rendered: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| serde_json::json!({ "id": entry.key(), "entry": entry.render() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No sources yet.");
        return Ok(());
    }

    for entry in entries {
        match entry.render() {
            EntryView::View {
                tag,
                title,
                author,
                date_accessed,
                date_published,
                link,
            } => {
                println!(
                    "{:<10} {:<32} {:<20} {:<12} {:<12} {}",
                    tag, title, author, date_accessed, date_published, link
                );
            }
            EntryView::Edit { inputs } => {
                println!("[{}]", entry.key());
                for input in inputs {
                    println!("  {:<16} {}", input.field, input.value);
                }
            }
        }
    }

    Ok(())
}
