use bcrypt::verify;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task;
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::helper_model::{ErrorResponse, EscolarError};
use crate::methods::{standard_replies, tokens};
use crate::model::AccessToken;
use crate::services::Services;

#[derive(Deserialize, Serialize, Clone)]
struct LoginData {
    email: String,
    password: String,
}

fn credentials_invalid() -> Result<(warp::reply::Response,), warp::Rejection> {
    let msg = ErrorResponse {
        title: String::from("Credentials Invalid"),
        message: String::from("Email or password is incorrect."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::UNAUTHORIZED)
        .into_response(),))
}

pub fn staff_login(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |login_data: LoginData| {
            let services = services.clone();
            async move {
                let staff_row =
                    match crate::methods::staff::get_staff_by_email(&services.pool, login_data.email)
                        .await
                    {
                        Ok(row) => row,
                        Err(err) => return standard_replies::escolar_error_response(&err),
                    };
                let staff_row = match staff_row {
                    Some(row) => row,
                    // Same reply as a wrong password; no account probing.
                    None => return credentials_invalid(),
                };
                if !verify(&login_data.password, &staff_row.password).unwrap_or(false) {
                    return credentials_invalid();
                }
                if !staff_row.active {
                    return standard_replies::staff_inactive();
                }

                let new_token = match tokens::gen_token_object(&services.pool, staff_row.id).await {
                    Ok(token) => token,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                let pool = services.pool.clone();
                let insert_result =
                    task::spawn_blocking(move || -> Result<AccessToken, EscolarError> {
                        use crate::schema::access_tokens::dsl::*;
                        let mut conn = pool.get().map_err(EscolarError::database)?;
                        diesel::insert_into(access_tokens)
                            .values(&new_token)
                            .get_result::<AccessToken>(&mut conn)
                            .map_err(EscolarError::database)
                    })
                    .await
                    .map_err(EscolarError::internal);
                let token_row = match insert_result {
                    Ok(Ok(row)) => row,
                    Ok(Err(err)) | Err(err) => {
                        return standard_replies::escolar_error_response(&err);
                    }
                };

                standard_replies::auth_staff_reply(
                    &staff_row.to_publish_staff(),
                    &token_row.to_publish_access_token(),
                )
            }
        })
}
