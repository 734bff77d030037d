//! Web 服务器模块
//!
//! 提供 `/extract` 与 `/translate` 两个 JSON 接口

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use axum::Router;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::core::StoryRelay;

/// 服务器错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind server on {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, relay: StoryRelay) -> Self {
        Self {
            config,
            state: AppState::new(relay),
        }
    }

    /// 启动 Web 服务器，收到 Ctrl-C 后平滑退出
    pub async fn start(&self) -> Result<(), ServerError> {
        let app = create_router(self.state.clone());
        let address = self.config.listen_address();

        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;

        tracing::info!("Web server starting at http://{}", address);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Web server stopped");
        Ok(())
    }
}

/// 创建路由器
pub fn create_router(state: AppState) -> Router {
    create_routes()
        .with_state(state)
        // 添加CORS支持
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("收到退出信号，正在关闭");
}
