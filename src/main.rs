use std::sync::Arc;

use proxy_router::config::{self, Config};
use proxy_router::{lambda, logger, server};

mod resources;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Runtime sized by server.workers, CPU count otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_debug(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger::log_debug("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;
    if lambda::is_lambda_environment() {
        return runtime
            .block_on(lambda::run(resources::handlers(), cfg.logging))
            .map_err(|e| -> Box<dyn std::error::Error> { e });
    }
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr, cfg.performance.backlog)?;

    let handlers = resources::handlers();
    logger::log_server_start(&addr, &cfg, &handlers.keys());

    let state = Arc::new(server::HostState::new(cfg, handlers));
    server::serve(listener, state).await
}
