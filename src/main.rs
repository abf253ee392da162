use anyhow::Result;
use clap::Parser;

use snaplink::config::{Cli, StaticConfig, apply_cli_overrides, get_config, init_config};

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    // 优先级：命令行 > 环境变量 > 配置文件 > 默认值
    let mut config = match StaticConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &cli);
    if let Err(e) = config.validate() {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    init_config(config);

    // guard 需要存活到进程结束，保证非阻塞日志写完
    let _log_guard = match snaplink::system::init_logging(&get_config().logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    #[cfg(feature = "server")]
    return snaplink::runtime::modes::run_server().await;

    #[cfg(not(feature = "server"))]
    anyhow::bail!("snaplink was built without the `server` feature");
}
