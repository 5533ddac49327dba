//! CloudAppHive - 云应用配置注册服务
//!
//! Usage:
//! - Normal mode: `cloud-app-hive`
//! - With custom port: `cloud-app-hive --port 9000`
//! - Strict validation: `cloud-app-hive --strict`

use cloud_app_hive::RuntimeConfig;

/// 解析命令行参数
fn parse_args() -> RuntimeConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                if config.port_override.is_none() {
                    eprintln!("Ignoring invalid --port value: {}", args[i + 1]);
                }
                i += 2;
            }
            "--strict" => {
                config.strict = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("CloudAppHive - 云应用配置注册服务");
    println!();
    println!("USAGE:");
    println!("    cloud-app-hive [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>    Override the listening port (default 8080)");
    println!("    --strict         Validate required fields before registering");
    println!("    -h, --help       Print help information");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT, HOST, HIVE_VALIDATION, HIVE_UNIQUE_NAMES, HIVE_SEED, LOG_FORMAT, RUST_LOG");
}

#[tokio::main]
async fn main() {
    let config = parse_args();

    if let Err(e) = cloud_app_hive::init_and_run_with_config(config).await {
        tracing::error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
