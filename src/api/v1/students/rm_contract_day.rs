use serde_derive::{Deserialize, Serialize};
use diesel::prelude::*;
use tokio::task;
use warp::Filter;
use warp::http::StatusCode;

use crate::helper_model::EscolarError;
use crate::methods::{standard_replies, tokens};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
struct RmContractDayData {
    student_id: i32,
    day_of_week: i32,
}

pub fn rm_contract_day(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("rm-contract-day")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and_then(move |body: RmContractDayData, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                if !staff.can_manage_billing() {
                    return standard_replies::staff_not_allowed();
                }
                if !(0..=4).contains(&body.day_of_week) {
                    return standard_replies::escolar_error_response(
                        &EscolarError::InvalidWeekday,
                    );
                }

                let pool = services.pool.clone();
                let result = task::spawn_blocking(move || -> Result<usize, EscolarError> {
                    use crate::schema::contract_matrix::dsl::*;
                    let mut conn = pool.get().map_err(EscolarError::database)?;
                    diesel::delete(
                        contract_matrix
                            .filter(student_id.eq(body.student_id))
                            .filter(day_of_week.eq(body.day_of_week)),
                    )
                    .execute(&mut conn)
                    .map_err(EscolarError::database)
                })
                .await
                .map_err(EscolarError::internal);

                match result {
                    Ok(Ok(0)) => standard_replies::contract_not_found(body.day_of_week),
                    Ok(Ok(_)) => {
                        let msg = serde_json::json!({
                            "studentId": body.student_id,
                            "dayOfWeek": body.day_of_week,
                            "removed": true,
                        });
                        standard_replies::response_with_obj(msg, StatusCode::OK)
                    }
                    Ok(Err(err)) | Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
