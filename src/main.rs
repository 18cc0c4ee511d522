use std::io;

use clap::Parser;
use readunwise::config::{Cli, Command, Config, Settings};
use readunwise::discord::DiscordClient;
use readunwise::handler::{self, AppState};
use readunwise::index::BookIndex;
use readunwise::unpack_error;
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.without_time().with_target(false).init();
    }
}

fn main() {
    let args = Cli::parse();

    // Lets DISCORD_TOKEN live in a .env next to the clippings.
    let _ = dotenvy::dotenv();

    init_logging(args.log_json);

    let cfg = Config::load(args.config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %unpack_error(&e), "failed to load config file");
        std::process::exit(1);
    });
    let settings = Settings::resolve(&args, cfg);

    let index = BookIndex::load(&settings.clippings_file).unwrap_or_else(|e| {
        tracing::error!(error = %unpack_error(&e), "failed to load clippings");
        std::process::exit(1);
    });
    let state = AppState::new(index, settings);

    let mut stdout = io::stdout().lock();
    let mut rng = rand::thread_rng();

    let result = match &args.command {
        Command::List => handler::list_books(&state, &mut stdout),
        Command::Export { book, export_dir } => handler::export(&state, book, export_dir, &mut stdout),
        Command::Random { .. } => handler::print_random_highlight(&state, &mut rng, &mut stdout),
        Command::Discord { channel_id, .. } => match state.settings.token() {
            Ok(token) => {
                let client = DiscordClient::with_api_base(token, *channel_id, &state.settings.discord_api_base);
                handler::send_to_channel(&state, &client, &mut rng, &mut stdout)
            }
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        let message = format!("{:#}", err);
        tracing::error!(error = %message, "{} failed", command_name(&args.command));
        std::process::exit(1);
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Export { .. } => "export",
        Command::Random { .. } => "random",
        Command::Discord { .. } => "discord",
    }
}
