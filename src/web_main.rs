//! Web 服务器主程序入口

#[cfg(feature = "web")]
use wattpad_burmese::core::StoryRelay;
#[cfg(feature = "web")]
use wattpad_burmese::env::{generate_env_docs, load_dotenv, EnvConfig};
#[cfg(feature = "web")]
use wattpad_burmese::web::{WebConfig, WebServer};

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut bind_override: Option<String> = None;
    let mut port_override: Option<u16> = None;

    // 简单的命令行参数解析
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_override = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port_override = Some(args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    load_dotenv();

    let config = EnvConfig::from_env()?;
    init_tracing(&config.log_level);
    config.log_summary();

    // 阻塞客户端在工作线程上创建
    let relay = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || StoryRelay::from_config(&config)).await??
    };

    // 命令行参数优先于环境变量
    let web_config = WebConfig::from(&config).with_overrides(bind_override, port_override);

    // 启动 Web 服务器
    let server = WebServer::new(web_config, relay);
    server.start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn init_tracing(level: &str) {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

#[cfg(feature = "web")]
fn print_help() {
    println!("Wattpad Burmese Web Server");
    println!();
    println!("USAGE:");
    println!("    wattpad-burmese-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 0.0.0.0]");
    println!("    -p, --port <PORT>        Port number [default: 5000]");
    println!("    -h, --help               Print help information");
    println!();
    print!("{}", generate_env_docs());
    println!();
    println!("EXAMPLES:");
    println!("    GROQ_API_KEY_1=gsk_... wattpad-burmese-web");
    println!("    wattpad-burmese-web --bind 127.0.0.1 --port 8080");
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
