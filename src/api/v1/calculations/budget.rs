use serde_derive::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone, Copy)]
struct BudgetQuery {
    month: u32,
    year: i32,
}

pub fn monthly_budget(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("budget" / i32)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<BudgetQuery>())
        .and(warp::header::<String>("auth"))
        .and_then(move |student_id: i32, query: BudgetQuery, auth: String| {
            let services = services.clone();
            async move {
                // Read-only: every active role may look at budgets.
                if let Err(err) = tokens::authorize(&services.pool, &auth).await {
                    return standard_replies::escolar_error_response(&err);
                }
                match services
                    .calculations
                    .calculate_monthly_budget(student_id, query.month, query.year)
                    .await
                {
                    Ok(breakdown) => standard_replies::response_with_obj(breakdown, StatusCode::OK),
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
