use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::middleware::Caller;
use crate::modules::analytics::controllers::PeriodQuery;
use crate::modules::reports::models::{Report, ReportStatus};
use crate::modules::reports::services::{GenerateReport, ReportService};

/// Body of POST /reports
#[derive(Debug, Deserialize)]
pub struct GenerateReportBody {
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub period: PeriodQuery,
}

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<Report>,
}

/// HTTP status for a stored failure, by error code
fn failure_status(code: &str) -> StatusCode {
    match code {
        "TIMEOUT" => StatusCode::GATEWAY_TIMEOUT,
        "REPOSITORY_ERROR" => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /reports
///
/// 201 with the completed report. A generation that failed after validation
/// answers with the error category and the stored failed report.
pub async fn create_report(
    service: web::Data<ReportService>,
    caller: Caller,
    body: web::Json<GenerateReportBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let request = GenerateReport {
        report_type: body.report_type,
        title: body.title,
        description: body.description,
        period: body.period.to_request()?,
    };

    let report = service.generate(request, caller.display_name()).await?;

    if report.status == ReportStatus::Completed {
        return Ok(HttpResponse::Created().json(report));
    }

    let (code, message) = report
        .failure
        .as_ref()
        .map(|f| (f.code.clone(), f.message.clone()))
        .unwrap_or_else(|| ("INTERNAL_ERROR".to_string(), "Internal server error".to_string()));

    Ok(HttpResponse::build(failure_status(&code)).json(serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "report_id": report.id,
        },
        "report": report,
    })))
}

/// GET /reports?type=
pub async fn list_reports(
    service: web::Data<ReportService>,
    query: web::Query<ListReportsQuery>,
) -> Result<HttpResponse> {
    let reports = service.list(query.report_type.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ReportListResponse { reports }))
}

/// GET /reports/{id}
pub async fn get_report(
    service: web::Data<ReportService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let report = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("", web::post().to(create_report))
            .route("", web::get().to(list_reports))
            .route("/{id}", web::get().to(get_report)),
    );
}
