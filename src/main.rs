use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use musicard::{app::App, cli, config, error, types::Category};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in to Apple Music and store the user token
    Auth(AuthOptions),

    /// Show which song a scanned code maps to
    Lookup(LookupOptions),

    /// List the songs of a category
    List(ListOptions),

    /// Play the song behind a scanned code
    Play(PlayOptions),

    /// Read scanned codes and transport commands from stdin
    Listen,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Forget the stored user token and sign in again
    #[clap(long)]
    pub reset: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LookupOptions {
    /// Scanned code content
    pub code: String,

    /// Also resolve the Apple Music catalog track
    #[clap(long)]
    pub track: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Category to list
    #[clap(long, default_value = "standard", value_parser = parse_category)]
    pub category: Category,

    /// Only show songs whose artist or title contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Scanned code content
    pub code: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse()
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let app = App::bootstrap().await;

    match cli.command {
        Command::Auth(opt) => cli::auth(&app, opt.reset).await,
        Command::Lookup(opt) => cli::lookup(&app, &opt.code, opt.track).await,
        Command::List(opt) => cli::list(&app, opt.category, opt.search),
        Command::Play(opt) => cli::play(&app, &opt.code).await,
        Command::Listen => cli::listen(&app).await,
        Command::Completions(_) => {}
    }
}
