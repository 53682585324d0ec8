//! Command-line front end over the dashboard HTTP API.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;

use common::overview::Overview;
use common::types::{ClientInput, ClientRecord, ServiceInput, ServiceKind, ServiceRecord, ServiceStatus};
use gateway::{DataStore, HttpDashboardApi};

const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(version)]
#[command(about = "Manage hosting/domain services and clients from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the dashboard API
    #[arg(long, global = true, env = "DASHBOARD_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show summary statistics, upcoming renewals and recent clients
    Overview {
        /// Reference date (YYYY-MM-DD); defaults to today in local time
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List services
    Services,
    /// List clients
    Clients,
    /// Create a service
    AddService(ServiceArgs),
    /// Change fields of an existing service
    UpdateService {
        id: i32,
        #[command(flatten)]
        fields: ServiceArgs,
    },
    /// Create a client
    AddClient(ClientArgs),
    /// Change fields of an existing client
    UpdateClient {
        id: i32,
        #[command(flatten)]
        fields: ClientArgs,
    },
    /// Delete a service by id
    DeleteService { id: i32 },
    /// Delete a client by id
    DeleteClient { id: i32 },
}

#[derive(Args)]
struct ServiceArgs {
    /// hosting or domain
    #[arg(long = "type")]
    kind: Option<ServiceKind>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    purchase_price: Option<Decimal>,
    #[arg(long)]
    renewal_price: Option<Decimal>,
    #[arg(long)]
    purchase_date: Option<NaiveDate>,
    #[arg(long)]
    renewal_date: Option<NaiveDate>,
    #[arg(long)]
    next_renewal: Option<NaiveDate>,
    /// Remove the stored next-renewal override
    #[arg(long, conflicts_with = "next_renewal")]
    clear_next_renewal: bool,
    /// active, inactive (running is accepted as active)
    #[arg(long)]
    status: Option<ServiceStatus>,
}

impl From<ServiceArgs> for ServiceInput {
    fn from(a: ServiceArgs) -> Self {
        ServiceInput {
            kind: a.kind,
            name: a.name,
            purchase_price: a.purchase_price,
            renewal_price: a.renewal_price,
            purchase_date: a.purchase_date,
            renewal_date: a.renewal_date,
            next_renewal: if a.clear_next_renewal { Some(None) } else { a.next_renewal.map(Some) },
            status: a.status,
        }
    }
}

#[derive(Args)]
struct ClientArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    repo_link: Option<String>,
    #[arg(long)]
    drive_link: Option<String>,
}

impl From<ClientArgs> for ClientInput {
    fn from(a: ClientArgs) -> Self {
        ClientInput {
            name: a.name,
            email: a.email,
            phone: a.phone,
            company: a.company,
            repo_link: a.repo_link,
            drive_link: a.drive_link,
        }
    }
}

/// `--api-url` / `DASHBOARD_API_URL`, then `[gateway].base_url` from the config file.
/// A config file that exists but does not parse is an error.
fn resolve_api_url(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    Ok(configs::load_default_if_exists()?
        .map(|c| c.gateway.base_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn date_cell(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn print_services(services: &[ServiceRecord]) {
    println!("{:>5}  {:<8}  {:<32}  {:>10}  {:>10}  {:<10}  {:<8}", "ID", "TYPE", "NAME", "PURCHASE", "RENEWAL", "RENEWS", "STATUS");
    for s in services {
        println!(
            "{:>5}  {:<8}  {:<32}  {:>10}  {:>10}  {:<10}  {:<8}",
            s.id,
            s.kind,
            s.name,
            s.purchase_price,
            s.renewal_price,
            date_cell(s.effective_renewal()),
            s.status
        );
    }
}

fn print_clients(clients: &[ClientRecord]) {
    println!("{:>5}  {:<24}  {:<32}  {:<16}  {:<20}", "ID", "NAME", "EMAIL", "PHONE", "COMPANY");
    for c in clients {
        println!("{:>5}  {:<24}  {:<32}  {:<16}  {:<20}", c.id, c.name, c.email, c.phone, c.company);
    }
}

fn print_overview(o: &Overview) {
    println!("Services         {} ({} active)", o.total_services, o.active_services);
    println!("Domains          {} ({} active)", o.total_domains, o.active_domains);
    println!("Clients          {}", o.total_clients);
    println!("Total revenue    {}", o.total_revenue);
    println!("Monthly revenue  {}", o.monthly_revenue);
    println!("Renewal rate     {}", o.renewal_rate_display());
    println!();
    println!("Upcoming renewals");
    if o.upcoming_renewals.is_empty() {
        println!("  none");
    }
    for s in &o.upcoming_renewals {
        println!("  {}  {:<32}  {}", date_cell(s.effective_renewal()), s.name, s.renewal_price);
    }
    println!();
    println!("Recent clients");
    for c in &o.recent_clients {
        println!("  {:<24}  {}", c.name, c.email);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api = HttpDashboardApi::new(resolve_api_url(cli.api_url)?);
    let store = DataStore::new(api);
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Overview { today } => {
            store.refresh().await?;
            let o = store.overview(today.unwrap_or_else(|| Local::now().date_naive())).await;
            if json { print_json(&o)? } else { print_overview(&o) }
        }
        Commands::Services => {
            store.refresh_services().await?;
            let list = store.services().await;
            if json { print_json(&list)? } else { print_services(&list) }
        }
        Commands::Clients => {
            store.refresh_clients().await?;
            let list = store.clients().await;
            if json { print_json(&list)? } else { print_clients(&list) }
        }
        Commands::AddService(args) => {
            let created = store.add_service(&args.into()).await?;
            if json { print_json(&created)? } else { print_services(&[created]) }
        }
        Commands::UpdateService { id, fields } => {
            let updated = store.update_service(id, &fields.into()).await?;
            if json { print_json(&updated)? } else { print_services(&[updated]) }
        }
        Commands::AddClient(args) => {
            let created = store.add_client(&args.into()).await?;
            if json { print_json(&created)? } else { print_clients(&[created]) }
        }
        Commands::UpdateClient { id, fields } => {
            let updated = store.update_client(id, &fields.into()).await?;
            if json { print_json(&updated)? } else { print_clients(&[updated]) }
        }
        Commands::DeleteService { id } => {
            store.delete_service(id).await?;
            println!("deleted service {id}");
        }
        Commands::DeleteClient { id } => {
            store.delete_client(id).await?;
            println!("deleted client {id}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_stderr("warn");
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_service_parses_typed_fields() {
        let cli = Cli::try_parse_from([
            "dashboard", "add-service", "--type", "Domain", "--name", "example.com",
            "--purchase-price", "12.50", "--renewal-price", "15", "--status", "running",
            "--renewal-date", "2026-01-10",
        ])
        .unwrap();
        let Commands::AddService(args) = cli.command else { panic!("wrong subcommand") };
        let input: ServiceInput = args.into();
        assert_eq!(input.kind, Some(ServiceKind::Domain));
        assert_eq!(input.status, Some(ServiceStatus::Active));
        assert_eq!(input.purchase_price, Some(Decimal::new(1250, 2)));
        assert_eq!(input.renewal_date, NaiveDate::from_ymd_opt(2026, 1, 10));
    }

    #[test]
    fn api_url_flag_wins() {
        assert_eq!(resolve_api_url(Some("http://api:9000".into())).unwrap(), "http://api:9000");
    }

    #[test]
    fn clear_next_renewal_sends_explicit_null() {
        let cli = Cli::try_parse_from(["dashboard", "update-service", "4", "--clear-next-renewal"]).unwrap();
        let Commands::UpdateService { id, fields } = cli.command else { panic!("wrong subcommand") };
        assert_eq!(id, 4);
        let input: ServiceInput = fields.into();
        assert_eq!(input.next_renewal, Some(None));

        let both = ["dashboard", "update-service", "4", "--clear-next-renewal", "--next-renewal", "2026-01-01"];
        assert!(Cli::try_parse_from(both).is_err());
    }
}
