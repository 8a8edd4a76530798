// Archive browser - command line front end
// Entry point and application setup

use anyhow::{anyhow, Context};
use archive_browser::api::ArchiveClient;
use archive_browser::config::{ClientConfig, TOKEN_ENV_VAR};
use archive_browser::error::Result;
use archive_browser::models::{Archive, ArchiveVideoKind};
use archive_browser::services::{
    ArchiveService, CredentialProvider, KeyringCredentials, RecentsService, StaticToken,
};
use archive_browser::session::{LogNavigator, SessionStore};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the recents list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Bearer token; falls back to the OS credential store
    #[arg(long, global = true, env = TOKEN_ENV_VAR, hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new archive on a server and open it
    Create {
        #[arg(long)]
        server: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        path: String,
        /// Channel or playlist to capture
        #[arg(long)]
        target: String,
    },
    /// Import an existing archive into a server and open it
    Import {
        #[arg(long)]
        server: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        path: String,
    },
    /// Open an archive already known to a server
    Open {
        #[arg(long)]
        server: String,
        #[arg(long)]
        slug: String,
    },
    /// Show recently opened archives, oldest first
    Recents,
    /// List videos of the most recently opened archive
    Videos {
        #[arg(long, default_value_t = ArchiveVideoKind::Videos)]
        kind: ArchiveVideoKind,
    },
    /// Show one video of the most recently opened archive
    Video {
        id: String,
        /// Print the server response verbatim
        #[arg(long)]
        raw: bool,
    },
    /// Attach a note to a video
    AddNote {
        video_id: String,
        /// Seconds from the start of the video
        #[arg(long)]
        at: f64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Delete a note from a video
    DeleteNote { video_id: String, note_id: Uuid },
    /// Print direct links to a video file and its current thumbnail
    Links { video_id: String },
    /// Store a bearer token for a server in the OS credential store
    Login {
        #[arg(long)]
        server: String,
        token: String,
    },
    /// Remove the stored bearer token for a server
    Logout {
        #[arg(long)]
        server: String,
    },
}

/// Token source chosen on the command line
#[derive(Clone)]
enum CliCredentials {
    Static(StaticToken),
    Keyring(KeyringCredentials),
}

impl CredentialProvider for CliCredentials {
    async fn bearer_token(&self, server: &str) -> Result<String> {
        match self {
            CliCredentials::Static(provider) => provider.bearer_token(server).await,
            CliCredentials::Keyring(provider) => provider.bearer_token(server).await,
        }
    }
}

fn data_dir(args: &Args) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &args.data_dir {
        return Ok(dir.clone());
    }

    ProjectDirs::from("com", "archive-browser", "archive-browser")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine a data directory, pass --data-dir"))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archive_browser=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let data_dir = data_dir(&args)?;
    tracing::debug!("Data directory: {:?}", data_dir);

    let credentials = match &args.token {
        Some(token) => CliCredentials::Static(StaticToken::new(token.clone())),
        None => CliCredentials::Keyring(KeyringCredentials),
    };
    let config = ClientConfig {
        timeout: args.timeout.map(Duration::from_secs),
        ..ClientConfig::default()
    };

    let session = SessionStore::restore(RecentsService::new(data_dir), Arc::new(LogNavigator))
        .await
        .context("Failed to load recent archives")?;
    let client = ArchiveClient::with_config(credentials, &config)?;
    let service = ArchiveService::new(session.clone(), client);

    match args.command {
        Command::Create {
            server,
            slug,
            path,
            target,
        } => {
            let archive = service.create_and_open(&server, &slug, &path, &target).await?;
            print_json(&archive)?;
        }
        Command::Import { server, slug, path } => {
            let archive = service.import_and_open(&server, &slug, &path).await?;
            print_json(&archive)?;
        }
        Command::Open { server, slug } => {
            service.open(Archive::new(server, slug)).await?;
        }
        Command::Recents => {
            print_json(&session.recents().await)?;
        }
        Command::Login { server, token } => {
            KeyringCredentials::store_token(&server, &token)?;
            if !KeyringCredentials::has_token(&server) {
                return Err(anyhow!(
                    "Token for {} could not be read back from the OS credential store, pass --token instead",
                    server
                ));
            }
            println!("Token for {} stored", server);
        }
        Command::Logout { server } => {
            if !KeyringCredentials::has_token(&server) {
                println!("No token stored for {}", server);
                return Ok(());
            }
            KeyringCredentials::delete_token(&server)?;
            println!("Token for {} removed", server);
        }
        command => {
            session
                .resume_last()
                .await
                .ok_or_else(|| anyhow!("No archive has been opened yet, use `open` first"))?;
            run_archive_command(&service, command).await?;
        }
    }

    Ok(())
}

/// Commands that act on the open archive
async fn run_archive_command(
    service: &ArchiveService<CliCredentials>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Videos { kind } => {
            print_json(&service.list_videos(kind).await?)?;
        }
        Command::Video { id, raw } => {
            let fetched = service.video_details(&id).await?;
            if raw {
                println!("{}", fetched.raw);
            } else {
                print_json(&fetched.video)?;
                if fetched.video.was_updated() {
                    println!("(updated since the previous capture)");
                }
            }
        }
        Command::AddNote {
            video_id,
            at,
            title,
            body,
        } => {
            let note = service.add_note(&video_id, at, title, body).await?;
            print_json(&note)?;
        }
        Command::DeleteNote { video_id, note_id } => {
            let fetched = service.video_details(&video_id).await?;
            let note = fetched
                .video
                .notes
                .iter()
                .find(|note| note.id == note_id)
                .ok_or_else(|| anyhow!("Video {} has no note {}", video_id, note_id))?;
            service.remove_note(&video_id, note).await?;
        }
        Command::Links { video_id } => {
            println!("{}", service.file_link(&video_id).await?);

            let fetched = service.video_details(&video_id).await?;
            if let Some(thumbnail_id) = fetched.video.thumbnail.current() {
                println!("{}", service.thumbnail_link(thumbnail_id).await?);
            }
        }
        other => return Err(anyhow!("{:?} does not act on an open archive", other)),
    }

    Ok(())
}
