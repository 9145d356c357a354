use actix_web::{web, App, HttpServer};
use gateway::config::{ServerConfig, UpstreamConfig};
use gateway::middleware::{
    cors_middleware, RateLimitBackends, RequestTrace, SecurityHeaders, StructuredLogger,
    TraceSpan,
};
use gateway::routes;
use gateway::state::build_state;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_upstream(UpstreamConfig::from_env())
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting AI gateway on http://{}:{} (upstream: {})",
        server.host,
        server.port,
        app_state.upstream_mode()
    );

    let data = web::Data::new(app_state);
    let backends = RateLimitBackends::new().with_trusted_proxies(server.trusted_proxies.clone());

    HttpServer::new(move || {
        let backends = backends.clone();
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(|cfg| routes::configure(cfg, &backends))
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
