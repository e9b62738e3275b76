//! LinkedIn MCP Server
//!
//! Exposes the LinkedIn API client and the browser-session post reader as
//! Model Context Protocol tools. Configuration comes from command-line
//! arguments, falling back to environment variables (and a `.env` file).

use clap::{Parser, ValueEnum};
use linkedin_mcp::{browser::LaunchOptions,
                   config::{ClientConfig, ReaderConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL},
                   error::ConfigError,
                   tools::ToolContext,
                   LinkedInClient, LinkedInServer, PostReader};
use rmcp::{transport::{sse_server::{SseServer, SseServerConfig},
                       stdio,
                       streamable_http_server::{session::local::LocalSessionManager, StreamableHttpService}},
           ServiceExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "linkedin-mcp")]
#[command(version)]
#[command(about = "LinkedIn MCP server", long_about = None)]
struct Cli {
    /// OAuth access token with w_member_social scope; API tools are disabled without it
    #[arg(long, env = "LINKEDIN_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// REST API base URL
    #[arg(long, env = "LINKEDIN_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    /// LinkedIn-Version header (YYYYMM)
    #[arg(long, env = "LINKEDIN_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// li_at session cookie; post reading is disabled without it
    #[arg(long, env = "LINKEDIN_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Seconds to wait after navigation for the post to render
    #[arg(long, default_value = "4")]
    settle_secs: u64,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    /// Build the tool context; blank credentials disable the matching tools
    fn tool_context(&self) -> Result<ToolContext, ConfigError> {
        let api = match self.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                let config = ClientConfig::new(token.trim())
                    .with_base_url(&self.api_base_url)
                    .with_api_version(&self.api_version);
                config.validate()?;
                log::info!("API tools enabled (LinkedIn-Version {})", config.api_version);
                Some(LinkedInClient::new(config))
            }
            None => {
                log::warn!("LINKEDIN_ACCESS_TOKEN is not set; API tools are disabled");
                None
            }
        };

        let reader = match self.cookie.as_deref().map(ReaderConfig::new) {
            Some(config) if config.validate().is_ok() => {
                let mut launch = LaunchOptions::new().headless(!self.headed);
                if let Some(path) = &self.executable_path {
                    launch = launch.chrome_path(path);
                }
                log::info!("Post reading enabled (browser mode: {})", if self.headed { "headed" } else { "headless" });
                Some(PostReader::new(
                    config.settle_delay(Duration::from_secs(self.settle_secs)).launch_options(launch),
                ))
            }
            _ => {
                log::warn!("LINKEDIN_COOKIE is not set; read_linkedin_post is disabled");
                None
            }
        };

        Ok(ToolContext::new(api, reader))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let context = cli.tool_context()?;

    log::info!("LinkedIn MCP Server v{}", env!("CARGO_PKG_VERSION"));

    match cli.transport {
        Transport::Stdio => {
            log::info!("Ready to accept MCP connections via stdio");
            let server = LinkedInServer::new(context).serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Sse => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.sse_path);

            // Sessions share the context, and with it the identity cache
            let _cancellation_token = sse_server.with_service(move || LinkedInServer::new(context.clone()));

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || Ok::<_, std::io::Error>(LinkedInServer::new(context.clone()));

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
