use crate::db::PgPool;
use crate::helper_model::EscolarError;
use crate::model::{AccessToken, NewAccessToken, RequestToken, Staff};
use chrono::Utc;
use diesel::prelude::*;
use secrets::Secret;
use std::ops::Add;
use tokio::task;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

// Sliding session window for back-office staff.
const TOKEN_TTL_HOURS: i64 = 12;

/// Parse the `auth` header, formatted as `<hex-token>$<staff_id>`.
pub fn parse_auth_header(auth: &str) -> Result<RequestToken, EscolarError> {
    let token_and_id = auth.split('$').collect::<Vec<&str>>();
    if token_and_id.len() != 2 {
        return Err(EscolarError::TokenFormat);
    }
    let staff_id = token_and_id[1]
        .parse::<i32>()
        .map_err(|_| EscolarError::TokenFormat)?;
    Ok(RequestToken {
        staff_id,
        token: String::from(token_and_id[0]),
    })
}

async fn generate_unique_token(pool: &PgPool) -> Result<Vec<u8>, EscolarError> {
    loop {
        // Generate a secure random 32-byte token
        let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());
        let candidate = token_vec.clone();

        let pool = pool.clone();
        let token_exists = task::spawn_blocking(move || -> Result<bool, EscolarError> {
            let mut conn = pool.get().map_err(EscolarError::database)?;
            diesel::select(diesel::dsl::exists(
                crate::schema::access_tokens::table
                    .filter(crate::schema::access_tokens::token.eq(token_vec)),
            ))
            .get_result::<bool>(&mut conn)
            .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)??;

        if !token_exists {
            return Ok(candidate);
        }
    }
}

pub async fn gen_token_object(pool: &PgPool, staff_id: i32) -> Result<NewAccessToken, EscolarError> {
    Ok(NewAccessToken {
        staff_id,
        token: generate_unique_token(pool).await?,
        exp: Utc::now().add(chrono::Duration::hours(TOKEN_TTL_HOURS)),
    })
}

pub async fn verify_staff_token(
    pool: &PgPool,
    request: &RequestToken,
) -> Result<AccessToken, EscolarError> {
    let binary_token = hex::decode(&request.token).map_err(|_| EscolarError::TokenFormat)?;
    let request_staff_id = request.staff_id;
    let pool = pool.clone();
    let token_row = task::spawn_blocking(move || -> Result<Option<AccessToken>, EscolarError> {
        use crate::schema::access_tokens::dsl::*;
        let mut conn = pool.get().map_err(EscolarError::database)?;
        access_tokens
            .filter(staff_id.eq(request_staff_id))
            .filter(token.eq(binary_token))
            .first::<AccessToken>(&mut conn)
            .optional()
            .map_err(EscolarError::database)
    })
    .await
    .map_err(EscolarError::internal)??;

    match token_row {
        Some(row) if row.exp >= Utc::now() => Ok(row),
        _ => Err(EscolarError::InvalidToken),
    }
}

pub async fn extend_token(pool: &PgPool, token_id: i32) -> Result<(), EscolarError> {
    let pool = pool.clone();
    task::spawn_blocking(move || -> Result<(), EscolarError> {
        use crate::schema::access_tokens::dsl::*;
        let mut conn = pool.get().map_err(EscolarError::database)?;
        diesel::update(access_tokens.filter(id.eq(token_id)))
            .set(exp.eq(Utc::now().add(chrono::Duration::hours(TOKEN_TTL_HOURS))))
            .execute(&mut conn)
            .map_err(EscolarError::database)?;
        Ok(())
    })
    .await
    .map_err(EscolarError::internal)?
}

/// Auth boundary shared by every endpoint: parse the header, check the
/// session token, slide its expiration and load the staff account. Role
/// gating stays in the endpoint, before any service call.
pub async fn authorize(pool: &PgPool, auth: &str) -> Result<Staff, EscolarError> {
    let request = parse_auth_header(auth)?;
    let token_row = verify_staff_token(pool, &request).await?;
    extend_token(pool, token_row.id).await?;
    let staff = crate::methods::staff::get_staff_by_id(pool, request.staff_id).await?;
    if !staff.active {
        return Err(EscolarError::StaffInactive);
    }
    Ok(staff)
}

pub fn token_not_hex_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not in hex format"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn token_invalid_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not valid"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_auth_header() {
        let parsed = parse_auth_header("deadbeef$42").unwrap();
        assert_eq!(parsed.staff_id, 42);
        assert_eq!(parsed.token, "deadbeef");
    }

    #[test]
    fn rejects_malformed_auth_headers() {
        assert_eq!(parse_auth_header("deadbeef"), Err(EscolarError::TokenFormat));
        assert_eq!(parse_auth_header("a$b$c"), Err(EscolarError::TokenFormat));
        assert_eq!(
            parse_auth_header("deadbeef$notanumber"),
            Err(EscolarError::TokenFormat)
        );
    }
}
