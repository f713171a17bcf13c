use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use crate::helper_model::EscolarError;
use crate::methods::{standard_replies, time, tokens};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct ExtraHoursData {
    student_id: i32,
    date: NaiveDate,
    real_entry_time: String,
    real_exit_time: String,
}

pub fn calculate_extra_hours(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("extra-hours")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and_then(move |body: ExtraHoursData, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                if !staff.can_manage_billing() {
                    return standard_replies::staff_not_allowed();
                }
                for real_time in [&body.real_entry_time, &body.real_exit_time] {
                    if !time::is_valid_time_format(real_time) {
                        return standard_replies::escolar_error_response(
                            &EscolarError::TimeFormat(real_time.clone()),
                        );
                    }
                }

                match services
                    .calculations
                    .calculate_extra_hours(
                        body.student_id,
                        body.date,
                        &body.real_entry_time,
                        &body.real_exit_time,
                    )
                    .await
                {
                    Ok(hours) => {
                        let msg = serde_json::json!({
                            "studentId": body.student_id,
                            "date": body.date,
                            "extraHours": hours,
                        });
                        standard_replies::response_with_obj(msg, StatusCode::OK)
                    }
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
