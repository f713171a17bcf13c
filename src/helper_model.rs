use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

// Business-rule and infrastructure failures surfaced by the core.
// Input-format problems are caught at the endpoint boundary and mostly
// never reach the services; the few that can (time strings stored in the
// contract matrix) carry the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum EscolarError {
    TokenFormat,
    InvalidToken,
    StaffInactive,
    TimeFormat(String),
    InvalidWeekday,
    FutureDate,
    InvalidMonth,
    InvalidSchedule(String),
    ContractNotFound(i32),
    StudentNotFound,
    StudentNotActive,
    PriceNotFound,
    PriceConflict,
    InvalidPrice(String),
    Database(String),
    Internal(String),
}

impl EscolarError {
    pub fn database(err: impl ToString) -> Self {
        EscolarError::Database(err.to_string())
    }

    pub fn internal(err: impl ToString) -> Self {
        EscolarError::Internal(err.to_string())
    }
}

// ------------------------------------------------------------------
// Budget breakdown (derived, never persisted)
// ------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceLine {
    pub nome: String,
    pub valor: BigDecimal,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraHoursSummary {
    pub total_horas: f64,
    pub valor_por_hora: BigDecimal,
    pub subtotal: BigDecimal,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub data: NaiveDate,
    pub horas_extras: f64,
    pub dia_semana: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub mensalidade: BigDecimal,
    pub servicos_contratados: Vec<ServiceLine>,
    pub horas_extras: ExtraHoursSummary,
    pub total_geral: BigDecimal,
    pub detalhamento_dias: Vec<DayDetail>,
}

// ------------------------------------------------------------------
// Contract simulation
// ------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub entry_time: String,
    pub exit_time: String,
    pub services: HashMap<String, bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Discounts {
    pub mensalidade: Option<f64>,
    pub servicos: Option<f64>,
    pub horas_extras: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDiff {
    pub mensalidade: BigDecimal,
    pub servicos_contratados: BigDecimal,
    pub horas_extras: BigDecimal,
    pub total_geral: BigDecimal,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub contrato_atual: BudgetBreakdown,
    pub contrato_simulado: BudgetBreakdown,
    pub diferencas: BudgetDiff,
}

// ------------------------------------------------------------------
// Extra-hours history and monthly report
// ------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i32,
    pub date: NaiveDate,
    pub horas_extras: f64,
    pub valor_por_hora: BigDecimal,
    pub valor: BigDecimal,
    pub dia_semana: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ReportStudent {
    pub id: i32,
    pub nome: String,
    pub serie: String,
    pub segmento: String,
    pub turma: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ReportPeriod {
    pub mes: u32,
    pub ano: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub aluno: ReportStudent,
    pub periodo: ReportPeriod,
    pub orcamento: BudgetBreakdown,
    pub gerado_em: DateTime<Utc>,
}
