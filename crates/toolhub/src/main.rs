use crate::prelude::*;
use clap::Parser;

mod commands;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse and manage the toolhub blog, users and SEO data"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: commands::Global,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Blog post operations
    Blog(commands::blog::App),

    /// User account operations
    Users(commands::users::App),

    /// SEO metrics and content recommendations
    Seo(commands::seo::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Blog(sub_app) => commands::blog::run(sub_app, app.global).await,
        SubCommands::Users(sub_app) => commands::users::run(sub_app, app.global).await,
        SubCommands::Seo(sub_app) => commands::seo::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
