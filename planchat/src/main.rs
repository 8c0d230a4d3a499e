use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use miette::{miette, Context, IntoDiagnostic, Result};
use planchat::{
    content_type_for, parse_header, render,
    shared::{HeaderMap, HeaderName, HeaderValue, MultipartForm, PlanMode, SendMessageRequest},
    Config,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "planchat")]
#[command(author, version, about = "Talk to the project planner backend", long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL. Defaults to PLANCHAT_API_URL or http://localhost:8000.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Extra request header as NAME=VALUE. May be repeated.
    #[arg(long = "header", global = true, value_parser = parse_header)]
    headers: Vec<(HeaderName, HeaderValue)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message and print the generated plan
    Send {
        message: String,

        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// List every conversation in the current session
    List,

    /// Show one conversation
    Show { id: String },

    /// Delete every conversation in the current session
    Clear,

    /// Mark a task complete or incomplete
    Task {
        conversation_id: String,
        time_block_index: usize,
        task_index: usize,

        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        completed: bool,
    },

    /// Upload a file as multipart form data
    Upload {
        path: PathBuf,

        #[arg(long, default_value = planchat::shared::files::UPLOAD_PATH)]
        endpoint: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Basic,
    Detailed,
}

impl From<Mode> for PlanMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Basic => PlanMode::Basic,
            Mode::Detailed => PlanMode::Detailed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).into_diagnostic()?;

    let config = match &cli.api_url {
        Some(url) => Config::with_api_url(url),
        None => Config::from_env(),
    };
    let http = config.client()?;
    let chat = http.chat();

    let headers: HeaderMap = cli.headers.into_iter().collect();
    let extra = (!headers.is_empty()).then_some(&headers);

    match cli.command {
        Commands::Send { message, mode } => {
            let mut request = SendMessageRequest::new(message);
            request.mode = mode.map(PlanMode::from);

            let conversation = chat.send_message(&request, extra).await.into_diagnostic()?;
            println!("{}", render::conversation(&conversation));
        }
        Commands::List => {
            let conversations = chat.get_conversations(extra).await.into_diagnostic()?;
            println!("{}", render::conversation_list(&conversations));
        }
        Commands::Show { id } => {
            let conversation = chat.get_conversation(&id, extra).await.into_diagnostic()?;
            println!("{}", render::conversation(&conversation));
        }
        Commands::Clear => {
            if extra.is_some() {
                return Err(miette!("clear does not accept extra headers"));
            }
            chat.clear_conversations().await.into_diagnostic()?;
            info!("Conversations cleared");
        }
        Commands::Task {
            conversation_id,
            time_block_index,
            task_index,
            completed,
        } => {
            let ack = chat
                .update_task_status(
                    &conversation_id,
                    time_block_index,
                    task_index,
                    completed,
                    extra,
                )
                .await
                .into_diagnostic()?;
            println!("{}", ack.message);
        }
        Commands::Upload { path, endpoint } => {
            if !endpoint.starts_with('/') {
                return Err(miette!("upload endpoint `{endpoint}` must start with `/`"));
            }
            let data = tokio::fs::read(&path)
                .await
                .into_diagnostic()
                .wrap_err_with(|| format!("Could not read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| miette!("{} has no file name", path.display()))?;
            let content_type = content_type_for(&filename).map(str::to_string);

            let form = MultipartForm::new().file("file", filename, content_type, data);
            let uploaded: serde_json::Value =
                http.upload_file(&endpoint, form).await.into_diagnostic()?;

            match serde_json::from_value(uploaded.clone()) {
                Ok(file) => println!("{}", render::file_upload(&file)),
                Err(_) => println!(
                    "{}",
                    serde_json::to_string_pretty(&uploaded).into_diagnostic()?
                ),
            }
        }
    }

    Ok(())
}
