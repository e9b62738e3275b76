use crate::tools::ToolContext;
use rmcp::{handler::server::router::tool::ToolRouter,
           model::{Implementation, ServerCapabilities, ServerInfo},
           tool_handler, ServerHandler};
use std::sync::Arc;

const INSTRUCTIONS: &str = "LinkedIn tools: create, update and delete posts; upload images, videos and documents; \
                            manage reactions; read the member profile; and read any post through a logged-in \
                            browser session with read_linkedin_post. API tools need LINKEDIN_ACCESS_TOKEN, post \
                            reading needs LINKEDIN_COOKIE.";

/// MCP server exposing the LinkedIn actions as tools
#[derive(Clone)]
pub struct LinkedInServer {
    context: Arc<ToolContext>,
    tool_router: ToolRouter<Self>,
}

impl LinkedInServer {
    pub fn new(context: ToolContext) -> Self {
        Self {
            context: Arc::new(context),
            tool_router: Self::tool_router(),
        }
    }

    pub(crate) fn context(&self) -> &ToolContext {
        &self.context
    }
}

#[tool_handler]
impl ServerHandler for LinkedInServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
