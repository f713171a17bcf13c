use serde_derive::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone, Copy)]
struct ExportQuery {
    month: u32,
    year: i32,
}

pub fn export_report(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("export" / i32)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ExportQuery>())
        .and(warp::header::<String>("auth"))
        .and_then(move |student_id: i32, query: ExportQuery, auth: String| {
            let services = services.clone();
            async move {
                if let Err(err) = tokens::authorize(&services.pool, &auth).await {
                    return standard_replies::escolar_error_response(&err);
                }
                match services
                    .calculations
                    .export_monthly_report(student_id, query.month, query.year)
                    .await
                {
                    Ok(report) => standard_replies::response_with_obj(report, StatusCode::OK),
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
