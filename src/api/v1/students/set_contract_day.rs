use chrono::Utc;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::task;
use warp::Filter;
use warp::http::StatusCode;

use crate::helper_model::EscolarError;
use crate::methods::{standard_replies, time, tokens};
use crate::model::{ContractMatrixEntry, NewContractMatrixEntry, Student};
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct SetContractDayData {
    student_id: i32,
    day_of_week: i32,
    entry_time: String,
    exit_time: String,
    services: HashMap<String, bool>,
}

fn validate_schedule(data: &SetContractDayData) -> Result<(), EscolarError> {
    if !(0..=4).contains(&data.day_of_week) {
        return Err(EscolarError::InvalidWeekday);
    }
    // Contracted times are sold on the half-hour grid.
    for contracted_time in [&data.entry_time, &data.exit_time] {
        if !time::is_half_hour_mark(contracted_time) {
            return Err(EscolarError::TimeFormat(contracted_time.clone()));
        }
    }
    if !time::validate_time_range(&data.entry_time, &data.exit_time)? {
        return Err(EscolarError::InvalidSchedule(String::from(
            "exitTime must be after entryTime.",
        )));
    }
    Ok(())
}

pub fn set_contract_day(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("set-contract-day")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and_then(move |body: SetContractDayData, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                if !staff.can_manage_billing() {
                    return standard_replies::staff_not_allowed();
                }
                if let Err(err) = validate_schedule(&body) {
                    return standard_replies::escolar_error_response(&err);
                }

                let pool = services.pool.clone();
                let result =
                    task::spawn_blocking(move || -> Result<ContractMatrixEntry, EscolarError> {
                        let mut conn = pool.get().map_err(EscolarError::database)?;
                        {
                            use crate::schema::students::dsl::*;
                            students
                                .filter(id.eq(body.student_id))
                                .first::<Student>(&mut conn)
                                .optional()
                                .map_err(EscolarError::database)?
                                .ok_or(EscolarError::StudentNotFound)?;
                        }
                        use crate::schema::contract_matrix::dsl;
                        let now = Utc::now();
                        let new_entry = NewContractMatrixEntry {
                            student_id: body.student_id,
                            day_of_week: body.day_of_week,
                            entry_time: body.entry_time.clone(),
                            exit_time: body.exit_time.clone(),
                            services: serde_json::json!(body.services),
                            created_at: now,
                            updated_at: now,
                        };
                        diesel::insert_into(dsl::contract_matrix)
                            .values(&new_entry)
                            .on_conflict((dsl::student_id, dsl::day_of_week))
                            .do_update()
                            .set((
                                dsl::entry_time.eq(body.entry_time),
                                dsl::exit_time.eq(body.exit_time),
                                dsl::services.eq(serde_json::json!(body.services)),
                                dsl::updated_at.eq(now),
                            ))
                            .get_result::<ContractMatrixEntry>(&mut conn)
                            .map_err(EscolarError::database)
                    })
                    .await
                    .map_err(EscolarError::internal);

                match result {
                    Ok(Ok(entry)) => standard_replies::response_with_obj(entry, StatusCode::OK),
                    Ok(Err(err)) | Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(day: i32, entry: &str, exit: &str) -> SetContractDayData {
        SetContractDayData {
            student_id: 1,
            day_of_week: day,
            entry_time: entry.to_string(),
            exit_time: exit.to_string(),
            services: HashMap::new(),
        }
    }

    #[test]
    fn accepts_half_hour_grid_schedules() {
        assert!(validate_schedule(&data(0, "07:30", "12:00")).is_ok());
        assert!(validate_schedule(&data(4, "13:00", "17:30")).is_ok());
    }

    #[test]
    fn rejects_weekends_and_off_grid_times() {
        assert_eq!(
            validate_schedule(&data(5, "08:00", "12:00")),
            Err(EscolarError::InvalidWeekday)
        );
        assert_eq!(
            validate_schedule(&data(0, "08:10", "12:00")),
            Err(EscolarError::TimeFormat(String::from("08:10")))
        );
        assert!(validate_schedule(&data(0, "12:00", "08:00")).is_err());
        assert!(validate_schedule(&data(0, "08:00", "08:00")).is_err());
    }
}
