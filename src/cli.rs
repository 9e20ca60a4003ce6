use std::net::TcpListener;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};

use crate::dashboard::{CampaignForm, Dashboard, Filter, HttpCampaignClient};
use crate::database::{Database, MemoryDatabase, MongoDatabase};
use crate::error::Error;
use crate::seed;

#[derive(Debug, Parser)]
#[command(
    name = "campaign_tracker",
    version,
    about = "Track marketing campaigns through a small REST service"
)]
pub struct Cli {
    /// Most verbose level of log output (written to stderr)
    #[arg(
        long,
        global = true,
        env = "CAMPAIGN_TRACKER_LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the campaign api
    Serve(ServeArgs),
    /// Show or add campaigns through a running server
    Dashboard(DashboardArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "CAMPAIGN_TRACKER_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// MongoDB connection string
    #[arg(
        long,
        env = "CAMPAIGN_TRACKER_DB_URI",
        default_value = "mongodb://localhost:27017"
    )]
    pub db_uri: String,

    /// MongoDB database name
    #[arg(long, env = "CAMPAIGN_TRACKER_DB_NAME", default_value = "campaign_tracker")]
    pub db_name: String,

    /// Where campaigns are kept; `memory` forgets everything on exit
    #[arg(long, env = "CAMPAIGN_TRACKER_STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// Insert sample campaigns if the store is empty
    #[arg(long)]
    pub seed: bool,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Base url of the campaign server
    #[arg(long, env = "CAMPAIGN_TRACKER_URL", default_value = "http://127.0.0.1:8080")]
    pub url: String,

    /// Only show campaigns with this status (all, active, upcoming, completed)
    #[arg(long, global = true, default_value = "all")]
    pub filter: Filter,

    /// Print the visible campaigns as json instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub action: DashboardAction,
}

#[derive(Debug, Subcommand)]
pub enum DashboardAction {
    /// List campaigns
    List,
    /// Add a campaign, then list campaigns
    Add(AddArgs),
}

// every field defaults to empty so missing values reach form validation
#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub budget: String,
    #[arg(long, default_value = "")]
    pub start_date: String,
    #[arg(long, default_value = "")]
    pub end_date: String,
    #[arg(long, default_value = "")]
    pub status: String,
}

impl AddArgs {
    pub fn into_form(self) -> CampaignForm {
        CampaignForm {
            name: self.name,
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

pub async fn run(cli: Cli) -> Result<ExitCode, Error> {
    match cli.command {
        Command::Serve(args) => {
            serve(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Dashboard(args) => dashboard(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), Error> {
    let db: Box<dyn Database> = match args.store {
        StoreKind::Mongo => Box::new(MongoDatabase::connect(&args.db_uri, &args.db_name).await?),
        StoreKind::Memory => {
            info!("using in-memory store");
            Box::new(MemoryDatabase::new())
        }
    };

    if args.seed {
        seed::seed(&*db).await?;
    }

    let listener = TcpListener::bind(&args.bind)?;
    info!("listening on {}", listener.local_addr()?);

    crate::server(listener, db)?.await?;

    Ok(())
}

async fn dashboard(args: DashboardArgs) -> Result<ExitCode, Error> {
    let mut dashboard = Dashboard::new(HttpCampaignClient::new(&args.url));
    let loaded = dashboard.load().await;
    dashboard.apply_filter(args.filter);

    match args.action {
        DashboardAction::List => loaded?,
        DashboardAction::Add(add) => {
            // a failed fetch must not keep the new campaign from being sent
            if let Err(err) = loaded {
                warn!(error = %err, "could not load campaigns before submitting");
            }
            dashboard.submit(add.into_form()).await;
        }
    }

    if args.json {
        let visible = serde_json::to_string_pretty(&dashboard.visible())
            .map_err(|err| Error::ExistentialState(err.to_string()))?;
        println!("{}", visible);
        if !dashboard.error().is_empty() {
            eprintln!("{}", dashboard.error());
        }
    } else {
        print!("{}", dashboard.render());
    }

    if dashboard.error().is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
