//! HTTP request handlers for the API endpoints.

use actix_web::{HttpResponse, web};
use urban_map_geocoder::GeocodeError;
use urban_map_server_models::{ApiAnalyzeRequest, ApiError, ApiHealth, GeoSearchParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/analyze`
///
/// Analyzes a rectangle or circle selection. Upstream data failures are
/// not errors here: the analyzer answers with a zeroed result instead.
pub async fn analyze(
    state: web::Data<AppState>,
    body: web::Json<ApiAnalyzeRequest>,
) -> HttpResponse {
    let selection = match body.into_inner().into_selection() {
        Ok(selection) => selection,
        Err(e) => {
            log::debug!("Rejecting analyze request: {e}");
            return HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            });
        }
    };

    let analysis = state.analyzer.analyze(&selection).await;
    HttpResponse::Ok().json(analysis)
}

/// `GET /api/geosearch?q=`
pub async fn geosearch(
    state: web::Data<AppState>,
    params: web::Query<GeoSearchParams>,
) -> HttpResponse {
    match state.geocoder.search(&params.q).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(GeocodeError::RateLimited) => {
            log::warn!("Place search rate limited for query {:?}", params.q);
            HttpResponse::TooManyRequests().json(ApiError {
                error: GeocodeError::RateLimited.to_string(),
            })
        }
        Err(e) => {
            log::error!("Place search failed: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: e.to_string(),
            })
        }
    }
}
