use actix_web::{
    get,
    web::{self, ServiceConfig},
    HttpResponse, Responder,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info_span, warn, Instrument};

use crate::{
    fetcher::{CoinSource, PAGE_SIZE},
    models::Currency,
    utils::parse_u32,
};

#[derive(Deserialize, Debug, Default)]
pub struct CoinsQuery {
    currency: Option<String>,
    page: Option<String>,
}

impl CoinsQuery {
    /// Missing or unusable values fall back to usd / page 1.
    pub fn resolve(&self) -> (Currency, u32) {
        let currency = match self.currency.as_deref() {
            Some(raw) => raw.parse::<Currency>().unwrap_or_else(|_| {
                warn!(currency = raw, "Unsupported currency, using default");
                Currency::default()
            }),
            None => Currency::default(),
        };

        let page = match self.page.as_deref().map(parse_u32) {
            Some(Ok(page)) if page >= 1 => page,
            Some(_) => {
                warn!(page = ?self.page, "Invalid page, using 1");
                1
            }
            None => 1,
        };

        (currency, page)
    }
}

#[get("/api/coins")]
pub async fn coins(
    source: web::Data<dyn CoinSource>,
    query: web::Query<CoinsQuery>,
) -> impl Responder {
    let (currency, page) = query.resolve();
    let span = info_span!(
        "coins",
        request_id = %nanoid::nanoid!(10),
        %currency,
        page
    );

    async move {
        match source.fetch_coins(currency, page, PAGE_SIZE).await {
            Ok(coins) => HttpResponse::Ok().json(coins),
            Err(err) => {
                error!(error = %err, "Failed to fetch coins");
                HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch coins" }))
            }
        }
    }
    .instrument(span)
    .await
}

pub fn init(config: &mut ServiceConfig) {
    config.service(coins);
}
