use diesel::prelude::*;
use tokio::task;
use warp::Filter;
use warp::http::StatusCode;

use crate::helper_model::EscolarError;
use crate::methods::{standard_replies, tokens};
use crate::model::{ContractMatrixEntry, Series, Student};
use crate::services::Services;

pub fn get_student(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("get" / i32)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::<String>("auth"))
        .and_then(move |student_id: i32, auth: String| {
            let services = services.clone();
            async move {
                if let Err(err) = tokens::authorize(&services.pool, &auth).await {
                    return standard_replies::escolar_error_response(&err);
                }

                let pool = services.pool.clone();
                let result = task::spawn_blocking(
                    move || -> Result<
                        Option<(Student, Series, Vec<ContractMatrixEntry>)>,
                        EscolarError,
                    > {
                        let mut conn = pool.get().map_err(EscolarError::database)?;
                        let student_row = {
                            use crate::schema::students::dsl::*;
                            let row = students
                                .filter(id.eq(student_id))
                                .first::<Student>(&mut conn)
                                .optional()
                                .map_err(EscolarError::database)?;
                            match row {
                                Some(row) => row,
                                None => return Ok(None),
                            }
                        };
                        let series_row = {
                            use crate::schema::series::dsl::*;
                            series
                                .filter(id.eq(student_row.series_id))
                                .first::<Series>(&mut conn)
                                .map_err(EscolarError::database)?
                        };
                        let matrix = {
                            use crate::schema::contract_matrix::dsl::*;
                            contract_matrix
                                .filter(crate::schema::contract_matrix::student_id.eq(student_row.id))
                                .order(day_of_week.asc())
                                .load::<ContractMatrixEntry>(&mut conn)
                                .map_err(EscolarError::database)?
                        };
                        Ok(Some((student_row, series_row, matrix)))
                    },
                )
                .await
                .map_err(EscolarError::internal);

                match result {
                    Ok(Ok(Some((student_row, series_row, matrix)))) => {
                        let msg = serde_json::json!({
                            "student": student_row,
                            "series": series_row,
                            "contractMatrix": matrix,
                        });
                        standard_replies::response_with_obj(msg, StatusCode::OK)
                    }
                    Ok(Ok(None)) => standard_replies::student_not_found(),
                    Ok(Err(err)) | Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
