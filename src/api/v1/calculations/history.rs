use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

pub fn extra_hours_history(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("history" / i32)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HistoryQuery>())
        .and(warp::header::<String>("auth"))
        .and_then(move |student_id: i32, query: HistoryQuery, auth: String| {
            let services = services.clone();
            async move {
                if let Err(err) = tokens::authorize(&services.pool, &auth).await {
                    return standard_replies::escolar_error_response(&err);
                }
                if query.end_date < query.start_date {
                    return standard_replies::bad_request("endDate must not precede startDate.");
                }
                match services
                    .calculations
                    .extra_hours_history(student_id, query.start_date, query.end_date)
                    .await
                {
                    Ok(entries) => {
                        let msg = serde_json::json!({
                            "studentId": student_id,
                            "entries": entries,
                        });
                        standard_replies::response_with_obj(msg, StatusCode::OK)
                    }
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
