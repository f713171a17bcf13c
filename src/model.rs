use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::StudentStatusEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    Ativo,
    Inativo,
    Transferido,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PriceTypeEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    Mensalidade,
    Servico,
    HoraExtra,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::StaffRoleEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Admin,
    Gerente,
    Operador,
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::StudentStatusEnum, Pg> for StudentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            StudentStatus::Ativo => out.write_all(b"ATIVO")?,
            StudentStatus::Inativo => out.write_all(b"INATIVO")?,
            StudentStatus::Transferido => out.write_all(b"TRANSFERIDO")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::StudentStatusEnum, Pg> for StudentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ATIVO" => Ok(StudentStatus::Ativo),
            b"INATIVO" => Ok(StudentStatus::Inativo),
            b"TRANSFERIDO" => Ok(StudentStatus::Transferido),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::PriceTypeEnum, Pg> for PriceType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PriceType::Mensalidade => out.write_all(b"MENSALIDADE")?,
            PriceType::Servico => out.write_all(b"SERVICO")?,
            PriceType::HoraExtra => out.write_all(b"HORA_EXTRA")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PriceTypeEnum, Pg> for PriceType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"MENSALIDADE" => Ok(PriceType::Mensalidade),
            b"SERVICO" => Ok(PriceType::Servico),
            b"HORA_EXTRA" => Ok(PriceType::HoraExtra),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::StaffRoleEnum, Pg> for StaffRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            StaffRole::Admin => out.write_all(b"ADMIN")?,
            StaffRole::Gerente => out.write_all(b"GERENTE")?,
            StaffRole::Operador => out.write_all(b"OPERADOR")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::StaffRoleEnum, Pg> for StaffRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ADMIN" => Ok(StaffRole::Admin),
            b"GERENTE" => Ok(StaffRole::Gerente),
            b"OPERADOR" => Ok(StaffRole::Operador),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String, // Hashed!
    pub role: StaffRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Staff {
    pub fn to_publish_staff(&self) -> PublishStaff {
        PublishStaff {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    // ADMIN and GERENTE may trigger billing mutations; OPERADOR is read-only.
    pub fn can_manage_billing(&self) -> bool {
        matches!(self.role, StaffRole::Admin | StaffRole::Gerente)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PublishStaff {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Staff))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    pub id: i32,
    pub staff_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

impl AccessToken {
    pub fn to_publish_access_token(&self) -> PublishAccessToken {
        PublishAccessToken {
            staff_id: self.staff_id,
            token: hex::encode(&self.token),
            exp: self.exp,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = access_tokens)]
pub struct NewAccessToken {
    pub staff_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PublishAccessToken {
    pub staff_id: i32,
    pub token: String,
    pub exp: DateTime<Utc>,
}

// Parsed form of the `auth` header: "<hex-token>$<staff_id>".
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RequestToken {
    pub staff_id: i32,
    pub token: String,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = segments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Segment {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Segment))]
#[diesel(table_name = series)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Series {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub segment_id: i32,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Series))]
#[diesel(table_name = school_classes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SchoolClass {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub series_id: i32,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Series))]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub cpf: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,
    pub status: StudentStatus,
    pub active: bool,
    pub series_id: i32,
    pub class_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn is_enrolled(&self) -> bool {
        self.active && self.status == StudentStatus::Ativo
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Student))]
#[diesel(table_name = contract_matrix)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ContractMatrixEntry {
    pub id: i32,
    pub student_id: i32,
    pub day_of_week: i32,
    pub entry_time: String,
    pub exit_time: String,
    pub services: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = contract_matrix)]
pub struct NewContractMatrixEntry {
    pub student_id: i32,
    pub day_of_week: i32,
    pub entry_time: String,
    pub exit_time: String,
    pub services: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Student))]
#[diesel(table_name = extra_hours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ExtraHoursRecord {
    pub id: i32,
    pub student_id: i32,
    pub date: NaiveDate,
    pub hours_calculated: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = extra_hours)]
pub struct NewExtraHoursRecord {
    pub student_id: i32,
    pub date: NaiveDate,
    pub hours_calculated: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Series))]
#[diesel(table_name = prices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: i32,
    #[serde(rename = "type")]
    pub price_type: PriceType,
    pub series_id: Option<i32>,
    pub service_name: Option<String>,
    pub value: BigDecimal,
    pub value_per_hour: Option<BigDecimal>,
    pub effective_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = prices)]
pub struct NewPrice {
    pub price_type: PriceType,
    pub series_id: Option<i32>,
    pub service_name: Option<String>,
    pub value: BigDecimal,
    pub value_per_hour: Option<BigDecimal>,
    pub effective_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
