use super::input::read_config_source;
use super::print::{print_messages, print_rendered};
use super::setup::{Cli, Commands};
use chainctl::api::{ChainsApi, CmdMessage};
use chainctl::client::http::ReqwestClient;
use chainctl::commands::create;
use chainctl::config::{config_dir, ClientConfig};
use chainctl::error::Result;
use chainctl::model::ChainResource;
use chainctl::presenters::{ChainPresenter, ChainPresenters, Renderer};
use clap::Parser;

struct AppContext {
    api: ChainsApi<ReqwestClient>,
    renderer: Renderer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::List { page } => handle_list(&ctx, page),
        Commands::Create { id, config } => handle_create(&ctx, id, config),
        Commands::Remove { id } => handle_remove(&ctx, id),
        Commands::Configure { id, params } => handle_configure(&ctx, id, params),
    }
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match config_dir() {
        Some(dir) => ClientConfig::load(dir)?,
        None => ClientConfig::default(),
    }
    .with_env()
    .with_overrides(cli.url.clone(), cli.chain_type.clone());
    log::debug!("using {} ({} chains)", config.url, config.chain_type);

    let client = ReqwestClient::from_config(&config)?;
    let renderer = if cli.json {
        Renderer::Json
    } else {
        Renderer::Table
    };

    Ok(AppContext {
        api: ChainsApi::new(client, config.chain_type()?),
        renderer,
    })
}

fn handle_list(ctx: &AppContext, page: u32) -> Result<()> {
    let mut result = ctx.api.list_chains(page)?;
    if let Some(page) = result.page.take() {
        print_rendered(ctx.renderer, &ChainPresenters::from(&page))?;
        if let Some(next) = page.next_page() {
            result.add_message(CmdMessage::info(format!(
                "More chains available, use --page {}",
                next
            )));
        }
    }
    print_messages(&result.messages, ctx.renderer);
    Ok(())
}

fn handle_create(ctx: &AppContext, id: Option<String>, config: Option<String>) -> Result<()> {
    let id = id.unwrap_or_default();
    create::validate(&id, config.is_some())?;
    let config = config.as_deref().map(read_config_source).transpose()?;
    let result = ctx.api.create_chain(&id, config)?;
    print_chains(ctx, result.affected_chains)?;
    print_messages(&result.messages, ctx.renderer);
    Ok(())
}

fn handle_remove(ctx: &AppContext, id: Option<String>) -> Result<()> {
    let result = ctx.api.remove_chain(id.as_deref().unwrap_or_default())?;
    print_messages(&result.messages, ctx.renderer);
    Ok(())
}

fn handle_configure(ctx: &AppContext, id: Option<String>, params: Vec<String>) -> Result<()> {
    let result = ctx
        .api
        .configure_chain(id.as_deref().unwrap_or_default(), params.as_slice())?;
    print_chains(ctx, result.affected_chains)?;
    print_messages(&result.messages, ctx.renderer);
    Ok(())
}

fn print_chains(ctx: &AppContext, chains: Vec<ChainResource>) -> Result<()> {
    for chain in chains {
        print_rendered(ctx.renderer, &ChainPresenter::new(chain))?;
    }
    Ok(())
}
