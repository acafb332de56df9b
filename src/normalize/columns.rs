//! Ordered candidate source labels per logical field.
//!
//! The sheet's column names drift between exports (punctuation variants,
//! alternate wordings), so each field lists every label seen in the wild,
//! checked in order. Resolution takes the first label present with a
//! non-empty value.

pub const ID: &[&str] = &["COD. INT. (Meta)", "COD META PRODUCTO"];

pub const AXIS: &[&str] = &["EJE"];
pub const AXIS_WEIGHT: &[&str] = &["PONDERADOR EJE"];
pub const SECTOR_NAME: &[&str] = &["NOMBRE DE SECTOR"];
pub const PROGRAM_CODE: &[&str] = &["COD. INT. PROGRAMA"];
pub const PROGRAM_NAME: &[&str] = &["PROGRAMA PDT"];
pub const SUBPROGRAM_CODE: &[&str] = &["COD SUBPROGRAMA", "COD. INT. SUBPROGRAMA"];
pub const SUBPROGRAM_NAME: &[&str] = &["SUBPROGRAMA"];

pub const RESULT_GOAL: &[&str] = &["MR / META DE RESULTADO", "META DE RESULTADO"];
pub const RESULT_INDICATOR: &[&str] = &["INDICADOR DE RESULTADO"];
pub const BASELINE: &[&str] = &["L.B", "L.B (Linea Base)"];

pub const PRODUCT_GOAL: &[&str] = &["META DE PRODUCTO"];
pub const MEASUREMENT_UNIT: &[&str] = &["UNIDAD DE MEDIDA"];
pub const INDICATOR: &[&str] = &["INDICADOR"];
pub const RESPONSIBLE: &[&str] = &["RESPONSABLE"];
pub const EXPECTED_CUMULATIVE_VALUE: &[&str] = &["VALOR ESPERADO CUATRIENIO"];
pub const EXECUTED_VS_CUMULATIVE_PCT: &[&str] = &["% TOTAL EJECUTADO (Año) VS CUATRIENIO"];
pub const EXPECTED_VALUE_YEAR: &[&str] = &["VALOR ESPERADO 2025"];

pub const QUARTER_PLAN: [&[&str]; 4] = [
    &["T1 PLANEADO 2025", "T1. PLANEADO 2025"],
    &["T2 PLANEADO 2025", "T2. PLANEADO 2025"],
    &["T3 PLANEADO 2025", "T3. PLANEADO 2025"],
    &["T4 PLANEADO 2025", "T4. PLANEADO 2025"],
];
pub const QUARTER_EXEC: [&[&str]; 4] = [
    &["T1 EJECUTADO 2025", "T1. EJECUTADO 2025"],
    &["T2 EJECUTADO 2025", "T2. EJECUTADO 2025"],
    &["T3 EJECUTADO 2025", "T3. EJECUTADO 2025"],
    &["T4 EJECUTADO 2025", "T4. EJECUTADO 2025"],
];

pub const TOTAL_PLAN: &[&str] = &["TOTAL PLANEADO 2025"];
pub const TOTAL_EXEC: &[&str] = &["TOTAL EJECUTADO 2025"];
pub const PROGRESS: &[&str] = &["AVANCE 2025"];

pub const FINAL_APPROPRIATION: &[&str] = &["APROPIACION DEFINITIVA 2025"];
pub const COMMITMENTS: &[&str] = &["COMPROMISOS 2025"];
pub const PAYMENTS: &[&str] = &["PAGOS 2025"];
pub const FINANCIAL_EXECUTION_PCT: &[&str] = &["% EJECUCIÓN FINANCIERA"];
pub const FINANCIAL_PLAN: &[&str] = &["PLAN FINANCIERO PDM 2024-2027"];
