//! # linkedin-mcp
//!
//! LinkedIn integration for AI agents, exposed through the Model Context Protocol.
//!
//! ## Features
//!
//! - **API client**: posts, image/video/document uploads, reactions and profile
//!   lookups against the LinkedIn REST API, with the member identity resolved
//!   once and cached
//! - **Post reader**: reads any post through a headless Chrome session
//!   authenticated with the `li_at` cookie, with per-field selector fallbacks
//! - **MCP Server**: every action as a status-tagged tool
//!
//! ## Running the MCP Server
//!
//! ```bash
//! LINKEDIN_ACCESS_TOKEN=... LINKEDIN_COOKIE=... cargo run --bin mcp-server --features mcp-server
//!
//! # Visible browser for debugging the reader
//! cargo run --bin mcp-server --features mcp-server -- --headed
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use linkedin_mcp::{ClientConfig, LinkedInClient, Visibility};
//!
//! # async fn run() -> linkedin_mcp::Result<()> {
//! let client = LinkedInClient::new(ClientConfig::new("token"));
//! let receipt = client.create_post("Hello LinkedIn", Visibility::Public, &[]).await?;
//! println!("created {:?}", receipt.post_urn);
//! # Ok(())
//! # }
//! ```
//!
//! ```rust,no_run
//! use linkedin_mcp::{PostReader, ReaderConfig};
//!
//! # fn main() -> linkedin_mcp::Result<()> {
//! let reader = PostReader::new(ReaderConfig::new("li_at=AQED..."));
//! let post = reader.read("https://www.linkedin.com/posts/someone_activity-7123456789012345678-abcd")?;
//! println!("{}", post.data());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: REST API client and its HTTP transport
//! - [`browser`]: Chrome launch options and the render-surface abstraction
//! - [`reader`]: post reading pipeline and field extraction
//! - [`post_url`]: post id extraction from URLs
//! - [`tools`]: status-tagged actions shared by every front end
//! - [`config`]: client and reader configuration
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod post_url;
pub mod reader;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use api::{LinkedInClient, ReactionKind, Visibility};
pub use browser::{LaunchOptions, RenderSurface, SurfaceLauncher};
pub use config::{ClientConfig, ReaderConfig};
pub use error::{ApiError, BrowserError, ConfigError, Error, Result};
pub use reader::{ExtractedPost, PostReader};
pub use tools::{ToolContext, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::LinkedInServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
