//! OnDemand CLI
//!
//! Lists and looks up the browsers Sauce Labs supports, through the same
//! one-hour cache CI integrations use.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ondemand_api::{ApiConfig, ApiServer};
use ondemand_cache::{BrowserFactory, FactoryConfig};
use ondemand_core::constants::{
    DEFAULT_SAUCE_REST_URL, DEFAULT_TIMEOUT_SECONDS, ENV_SAUCE_ACCESS_KEY,
    ENV_SAUCE_REST_ENDPOINT, ENV_SAUCE_USERNAME,
};
use ondemand_core::types::{Browser, Category};
use ondemand_rest::{SauceConfig, SauceRestClient};

/// OnDemand - cached Sauce Labs browser lookup
#[derive(Parser)]
#[command(name = "ondemand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    sauce: SauceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SauceArgs {
    /// Sauce REST base URL
    #[arg(long, global = true, env = ENV_SAUCE_REST_ENDPOINT, default_value = DEFAULT_SAUCE_REST_URL)]
    endpoint: String,

    /// Sauce username
    #[arg(long, global = true, env = ENV_SAUCE_USERNAME)]
    username: Option<String>,

    /// Sauce access key
    #[arg(long, global = true, env = ENV_SAUCE_ACCESS_KEY, hide_env_values = true)]
    access_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout: u64,
}

impl SauceArgs {
    fn to_config(&self) -> SauceConfig {
        let mut config = SauceConfig::new(&self.endpoint).with_timeout(self.timeout);
        if let (Some(user), Some(key)) = (&self.username, &self.access_key) {
            config = config.with_credentials(user, key);
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List supported browsers for a category
    List {
        /// classic, webdriver, or appium
        category: Category,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Look up one browser by key
    Lookup {
        /// classic, webdriver, or appium
        category: Category,
        /// Browser key (eg. chrome48)
        key: String,
        /// Resolve to the newest version of the same browser and OS
        #[arg(long)]
        latest: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a category now, failing if the service is unreachable
    Refresh {
        /// classic, webdriver, or appium
        category: Category,
    },

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3002")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "ondemand=debug,info"
    } else {
        "ondemand=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sauce = cli.sauce.to_config();

    match cli.command {
        Commands::List { category, json } => cmd_list(sauce, category, json).await,
        Commands::Lookup { category, key, latest, json } => {
            cmd_lookup(sauce, category, &key, latest, json).await
        }
        Commands::Refresh { category } => cmd_refresh(sauce, category).await,
        Commands::Serve { port, bind } => cmd_serve(sauce, port, &bind).await,
    }
}

/// Builds a cold factory; the first read fetches.
fn factory(sauce: SauceConfig) -> Result<BrowserFactory> {
    let client = SauceRestClient::with_config(sauce).context("Invalid Sauce REST configuration")?;
    let config = FactoryConfig {
        warm_on_start: false,
        ..Default::default()
    };
    Ok(BrowserFactory::with_config(Arc::new(client), config))
}

fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_browser(browser: &Browser) {
    println!(
        "   {:<48} {:<36} {}",
        browser.key.green(),
        browser.label,
        browser.os.dimmed()
    );
}

/// List browsers
async fn cmd_list(sauce: SauceConfig, category: Category, json: bool) -> Result<()> {
    let factory = factory(sauce)?;

    let pb = spinner(format!("Fetching {} browsers...", category))?;
    let browsers = factory.list(category).await;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&browsers)?);
        return Ok(());
    }

    if browsers.is_empty() {
        println!("{}", format!("No {} browsers available.", category).yellow());
        return Ok(());
    }

    println!("{} {} browser(s):", category.to_string().cyan().bold(), browsers.len());
    for browser in &browsers {
        print_browser(browser);
    }

    Ok(())
}

/// Look up a browser by key
async fn cmd_lookup(
    sauce: SauceConfig,
    category: Category,
    key: &str,
    latest: bool,
    json: bool,
) -> Result<()> {
    let factory = factory(sauce)?;

    let pb = spinner(format!("Fetching {} browsers...", category))?;
    let result = resolve(&factory, category, key, latest).await;
    pb.finish_and_clear();
    let browser = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&browser)?);
        return Ok(());
    }

    if latest && browser.key != key {
        println!("{} {} → {}", "Newer version:".cyan().bold(), key, browser.key.green());
    }
    println!("   {} {}", "Key:".dimmed(), browser.key);
    println!("   {} {}", "Label:".dimmed(), browser.label);
    println!("   {} {}", "OS:".dimmed(), browser.os);
    println!("   {} {}", "Browser:".dimmed(), browser.browser_name);
    println!("   {} {}", "Version:".dimmed(), browser.long_version);
    if let Some(device) = &browser.device {
        println!("   {} {}", "Device:".dimmed(), device);
    }
    if let Some(orientation) = browser.orientation {
        println!("   {} {}", "Orientation:".dimmed(), orientation);
    }

    Ok(())
}

/// Fetches the category, then looks up `key` in it.
async fn resolve(factory: &BrowserFactory, category: Category, key: &str, latest: bool) -> Result<Browser> {
    factory
        .refresh(category)
        .await
        .with_context(|| format!("Failed to fetch {} browsers", category))?;

    factory
        .lookup_with(category, key, latest)?
        .with_context(|| format!("No {} browser found for key '{}'", category, key))
}

/// Strict refresh of one category
async fn cmd_refresh(sauce: SauceConfig, category: Category) -> Result<()> {
    let factory = factory(sauce)?;

    let pb = spinner(format!("Refreshing {} browsers...", category))?;
    let result = factory.refresh(category).await;
    pb.finish_and_clear();

    let browsers = result.with_context(|| format!("Failed to refresh {} browsers", category))?;
    println!("{} {} {} browser(s)", "✅ Refreshed".green().bold(), browsers.len(), category);

    Ok(())
}

/// Run API server
async fn cmd_serve(sauce: SauceConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting OnDemand API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig {
        sauce,
        ..ApiConfig::from_env()
    };
    let server = ApiServer::new(config).await.context("Failed to start API server")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ondemand_core::error::OnDemandError;
    use ondemand_core::traits::PlatformSource;
    use ondemand_core::types::PlatformDescriptor;

    struct StubSource {
        online: bool,
    }

    #[async_trait]
    impl PlatformSource for StubSource {
        async fn supported_platforms(
            &self,
            _category: Category,
        ) -> ondemand_core::error::Result<Vec<PlatformDescriptor>> {
            if !self.online {
                return Err(OnDemandError::ConnectionTimeout("saucelabs.com".into()));
            }
            Ok(vec![
                PlatformDescriptor::new("chrome", "Google Chrome", "48", "48", "Windows 2012 R2"),
                PlatformDescriptor::new("chrome", "Google Chrome", "50", "50", "Windows 2012 R2"),
            ])
        }
    }

    fn stub_factory(online: bool) -> BrowserFactory {
        BrowserFactory::new(Arc::new(StubSource { online }))
    }

    #[tokio::test]
    async fn test_resolve_latest() {
        let browser = resolve(&stub_factory(true), Category::WebDriver, "chrome48", true).await.unwrap();
        assert_eq!(browser.key, "chrome50");
    }

    #[tokio::test]
    async fn test_resolve_reports_unreachable_service() {
        let err = resolve(&stub_factory(false), Category::WebDriver, "chrome48", false)
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to fetch webdriver browsers"), "{}", message);
        assert!(!message.contains("No webdriver browser found"), "{}", message);
    }

    #[tokio::test]
    async fn test_resolve_missing_key() {
        let err = resolve(&stub_factory(true), Category::WebDriver, "opera12", false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No webdriver browser found for key 'opera12'"));
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from(["ondemand", "lookup", "webdriver", "chrome48", "--latest"]).unwrap();
        match cli.command {
            Commands::Lookup { category, key, latest, json } => {
                assert_eq!(category, Category::WebDriver);
                assert_eq!(key, "chrome48");
                assert!(latest);
                assert!(!json);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["ondemand", "list", "espresso"]).is_err());
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let cli = Cli::try_parse_from([
            "ondemand",
            "--endpoint",
            "http://localhost:8080",
            "--username",
            "alice",
            "list",
            "classic",
        ])
        .unwrap();
        let config = cli.sauce.to_config();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.credentials().is_none());
    }
}
