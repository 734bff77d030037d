//! Web 服务器配置

use crate::env::EnvConfig;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
}

impl WebConfig {
    /// 命令行参数覆盖环境变量中的地址与端口
    pub fn with_overrides(mut self, bind_addr: Option<String>, port: Option<u16>) -> Self {
        if let Some(bind_addr) = bind_addr {
            self.bind_addr = bind_addr;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// 监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl From<&EnvConfig> for WebConfig {
    fn from(config: &EnvConfig) -> Self {
        Self {
            bind_addr: config.bind_address.clone(),
            port: config.port,
        }
    }
}
