use actix_web::{web, HttpResponse};

use super::period_query::PeriodQuery;
use crate::core::Result;
use crate::modules::analytics::services::DashboardService;

/// GET /analytics/dashboard
///
/// Live financial, service and customer figures for the requested period.
pub async fn get_dashboard(
    service: web::Data<DashboardService>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse> {
    let request = query.to_request()?;
    let summary = service.summary(&request).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /analytics/inventory
pub async fn get_inventory(service: web::Data<DashboardService>) -> Result<HttpResponse> {
    let snapshot = service.inventory().await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Configure routes for analytics module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/dashboard", web::get().to(get_dashboard))
            .route("/inventory", web::get().to(get_inventory)),
    );
}
