use crate::db::PgPool;
use crate::helper_model::EscolarError;
use crate::model::Staff;
use diesel::prelude::*;
use tokio::task;

pub async fn get_staff_by_id(pool: &PgPool, lookup_id: i32) -> Result<Staff, EscolarError> {
    let pool = pool.clone();
    let row = task::spawn_blocking(move || -> Result<Option<Staff>, EscolarError> {
        use crate::schema::staff::dsl::*;
        let mut conn = pool.get().map_err(EscolarError::database)?;
        staff
            .filter(id.eq(lookup_id))
            .first::<Staff>(&mut conn)
            .optional()
            .map_err(EscolarError::database)
    })
    .await
    .map_err(EscolarError::internal)??;

    // A token pointing at a deleted account is treated as a bad session.
    row.ok_or(EscolarError::InvalidToken)
}

pub async fn get_staff_by_email(
    pool: &PgPool,
    lookup_email: String,
) -> Result<Option<Staff>, EscolarError> {
    let pool = pool.clone();
    task::spawn_blocking(move || -> Result<Option<Staff>, EscolarError> {
        use crate::schema::staff::dsl::*;
        let mut conn = pool.get().map_err(EscolarError::database)?;
        staff
            .filter(email.eq(&lookup_email))
            .first::<Staff>(&mut conn)
            .optional()
            .map_err(EscolarError::database)
    })
    .await
    .map_err(EscolarError::internal)?
}
