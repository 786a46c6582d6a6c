use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use email_search_client::{
  format_date,
  utils::{init_email_service, preview},
  AppConfig, DisplayConfig, Email, EmailService, Hit, SearchOptions, SortOrder,
};

#[derive(Parser)]
#[command(name = "email-search-client", version, about = "Query and edit emails on the search API")]
struct Cli {
  /// API root, overrides EMAIL_API_BASE_URL
  #[arg(long, global = true)]
  base_url: Option<String>,

  /// Display locale, overrides DISPLAY_LOCALE
  #[arg(long, global = true)]
  locale: Option<String>,

  /// Display time zone, overrides DISPLAY_TIME_ZONE
  #[arg(long, global = true)]
  time_zone: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List indexed emails
  List {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long, default_value_t = 100)]
    size: u32,
  },
  /// Full-text search
  Search {
    query: String,
    #[arg(long)]
    from: Option<u32>,
    #[arg(long)]
    size: Option<u32>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    order: Option<SortOrder>,
    /// Restrict the search to these fields (repeatable)
    #[arg(long = "field")]
    fields: Vec<String>,
  },
  /// Show one email
  Get { id: String },
  /// Create an email from a JSON document
  Create { json: String },
  /// Replace an email with a JSON document
  Update { id: String, json: String },
  /// Delete an email
  Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut config = AppConfig::from_env()?;
  if let Some(base_url) = &cli.base_url {
    config.set_base_url(base_url)?;
  }
  config.override_display(cli.locale.as_deref(), cli.time_zone.as_deref())?;

  let service = init_email_service(config.api.clone())?;

  match cli.command {
    Command::List { page, size } => {
      let emails = match page {
        Some(page) => service.list_page(page, size).await?,
        None => service.get_all().await?,
      };
      print_hits(&emails, &config.display);
    }
    Command::Search {
      query,
      from,
      size,
      sort,
      order,
      fields,
    } => {
      let plain = from.is_none() && size.is_none() && sort.is_none() && order.is_none() && fields.is_empty();
      let emails = if plain {
        service.search(&query).await?
      } else {
        let options = SearchOptions {
          query,
          fields,
          from,
          size,
          sort_field: sort,
          sort_order: order,
        };
        service.search_with_options(&options).await?
      };
      print_hits(&emails, &config.display);
    }
    Command::Get { id } => print_json(&service.get_by_id(&id).await?)?,
    Command::Create { json } => print_json(&service.create(&parse_body(&json)?).await?)?,
    Command::Update { id, json } => print_json(&service.update(&id, &parse_body(&json)?).await?)?,
    Command::Delete { id } => print_json(&service.delete(&id).await?)?,
  }

  Ok(())
}

fn parse_body(json: &str) -> anyhow::Result<Value> {
  serde_json::from_str(json).context("Email data must be a JSON document")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn print_hits(emails: &[Email], display: &DisplayConfig) {
  if emails.is_empty() {
    println!("No emails found");
    return;
  }

  for email in emails {
    match Hit::from_value(email) {
      Ok(hit) => {
        let doc = hit.source;
        let date = doc
          .date
          .map(|d| format_date(&d.to_rfc3339(), display))
          .unwrap_or_default();
        println!("[{}] {}", hit.id, doc.subject);
        println!("  From: {}  To: {}  {}", doc.sender, doc.recipient, date);
        println!("  {}", preview(&doc.content, 100));
      }
      Err(e) => {
        tracing::warn!("Unrecognized hit shape: {}", e);
        println!("{}", email);
      }
    }
  }
}
