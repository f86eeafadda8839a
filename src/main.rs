use actix_cors::Cors;
use actix_web::{get, web::Data, App, HttpResponse, HttpServer, Responder};
use coin_dashboard::{config::Settings, fetcher::CoinSource, routes, utils::coingecko::CoinGecko};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().body("Coin Dashboard Server")
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let coingecko = CoinGecko::init(&settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    info!(
        upstream = %settings.coingecko_base_url,
        cache_ttl_secs = settings.cache_ttl.as_secs(),
        "Upstream client ready"
    );

    let source: Data<dyn CoinSource> = Data::from(Arc::new(coingecko) as Arc<dyn CoinSource>);
    let bind = (settings.host.clone(), settings.port);
    info!(host = %bind.0, port = bind.1, "Starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(source.clone())
            .wrap(Cors::permissive())
            .service(home)
            .configure(routes::coins::init)
    })
    .bind(bind)?
    .run()
    .await
}
