//! Data models for the prediction client.
//!
//! Operator input flows `FormInput` → `PredictionRequest` → wire payload;
//! backend answers flow `PredictionResponse` → `SessionResult`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// Text shown wherever the backend left a descriptive field out.
pub const NO_DATA: &str = "Sin datos";

/// Unit assumed when the backend does not name one.
pub const DEFAULT_UNIT: &str = "°C";

// ---

/// Calendar month, 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(u8);

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

impl Month {
    // ---
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Month(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Spanish name, as the month selector shows it.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }
}

impl Default for Month {
    fn default() -> Self {
        Month(1)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `1`..`12` or a Spanish month name in any case.
impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return Month::new(number).ok_or_else(|| ValidationError::InvalidMonth(s.to_string()));
        }
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|idx| Month(idx as u8 + 1))
            .ok_or_else(|| ValidationError::InvalidMonth(s.to_string()))
    }
}

/// Raw values from the operator form, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation_mm: f64,
    pub humidity_percent: i64,
    pub month: Month,
}

impl Default for FormInput {
    fn default() -> Self {
        FormInput {
            temp_max: 18.0,
            temp_min: 8.0,
            precipitation_mm: 5.0,
            humidity_percent: 60,
            month: Month::default(),
        }
    }
}

/// A validated prediction request. Built once per submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    temp_max: f64,
    temp_min: f64,
    precipitation_mm: f64,
    humidity_percent: u8,
    month: Month,
}

impl TryFrom<FormInput> for PredictionRequest {
    type Error = ValidationError;

    fn try_from(form: FormInput) -> Result<Self, Self::Error> {
        // ---
        for (field, value) in [
            ("temp_max", form.temp_max),
            ("temp_min", form.temp_min),
            ("lluvia", form.precipitation_mm),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite(field));
            }
        }
        if form.temp_min > form.temp_max {
            return Err(ValidationError::MinAboveMax {
                min: form.temp_min,
                max: form.temp_max,
            });
        }
        if form.precipitation_mm < 0.0 {
            return Err(ValidationError::NegativePrecipitation(form.precipitation_mm));
        }
        let humidity_percent = u8::try_from(form.humidity_percent)
            .ok()
            .filter(|h| *h <= 100)
            .ok_or(ValidationError::HumidityOutOfRange(form.humidity_percent))?;

        Ok(PredictionRequest {
            temp_max: form.temp_max,
            temp_min: form.temp_min,
            precipitation_mm: form.precipitation_mm,
            humidity_percent,
            month: form.month,
        })
    }
}

impl PredictionRequest {
    // ---
    pub fn temp_max(&self) -> f64 {
        self.temp_max
    }
}

/// Body of `/api/v1/predecir-clima` and `/api/v1/prediccion/temperatura`.
#[derive(Debug, Serialize)]
pub struct ClimatePayload {
    pub temp_max: f64,
    pub temp_min: f64,
    pub lluvia: f64,
    pub humedad: u8,
    pub mes: u8,
}

/// Body of `/api/v1/predecir-temperatura`.
#[derive(Debug, Serialize)]
pub struct TemperaturePayload {
    pub temperatura: f64,
    pub humedad: u8,
    pub mes: &'static str,
}

impl From<&PredictionRequest> for ClimatePayload {
    fn from(req: &PredictionRequest) -> Self {
        ClimatePayload {
            temp_max: req.temp_max,
            temp_min: req.temp_min,
            lluvia: req.precipitation_mm,
            humedad: req.humidity_percent,
            mes: req.month.number(),
        }
    }
}

impl From<&PredictionRequest> for TemperaturePayload {
    fn from(req: &PredictionRequest) -> Self {
        TemperaturePayload {
            temperatura: req.temp_max,
            humedad: req.humidity_percent,
            mes: req.month.name(),
        }
    }
}

// ---

/// Today's observed conditions reported by the automatic frost scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodayConditions {
    pub max: f64,
    pub min: f64,
    pub rain: f64,
}

/// Backend answer, one variant per response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    Flat {
        predicted_temperature: f64,
        unit: String,
    },
    Nested {
        estimated_temperature_tomorrow: f64,
        risk_description: String,
        frost_alert: bool,
    },
    AutoScan {
        location: String,
        today: TodayConditions,
        frost_alert: bool,
        message: String,
    },
}

/// Where the displayed result came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultOrigin {
    Live,
    Simulated,
    AutoScan {
        location: String,
        today: TodayConditions,
    },
}

/// The last result shown in this session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResult {
    pub last_temperature: f64,
    pub last_risk_description: String,
    pub last_frost_alert: bool,
    pub unit: String,
    pub origin: ResultOrigin,
    pub updated_at: DateTime<Utc>,
}

impl SessionResult {
    // ---
    pub fn is_simulated(&self) -> bool {
        self.origin == ResultOrigin::Simulated
    }
}

impl PredictionResponse {
    /// Map any response shape onto what the dashboard displays.
    ///
    /// Automatic scans report today's minimum as the temperature, since that
    /// is the value the frost alert is about.
    pub fn into_session_result(self) -> SessionResult {
        // ---
        let updated_at = Utc::now();
        match self {
            PredictionResponse::Flat {
                predicted_temperature,
                unit,
            } => SessionResult {
                last_temperature: predicted_temperature,
                last_risk_description: NO_DATA.to_string(),
                last_frost_alert: false,
                unit: if unit == NO_DATA {
                    DEFAULT_UNIT.to_string()
                } else {
                    unit
                },
                origin: ResultOrigin::Live,
                updated_at,
            },
            PredictionResponse::Nested {
                estimated_temperature_tomorrow,
                risk_description,
                frost_alert,
            } => SessionResult {
                last_temperature: estimated_temperature_tomorrow,
                last_risk_description: risk_description,
                last_frost_alert: frost_alert,
                unit: DEFAULT_UNIT.to_string(),
                origin: ResultOrigin::Live,
                updated_at,
            },
            PredictionResponse::AutoScan {
                location,
                today,
                frost_alert,
                message,
            } => SessionResult {
                last_temperature: today.min,
                last_risk_description: message,
                last_frost_alert: frost_alert,
                unit: DEFAULT_UNIT.to_string(),
                origin: ResultOrigin::AutoScan { location, today },
                updated_at,
            },
        }
    }
}

/// Health badge state, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerStatus {
    pub reachable: bool,
    pub display_message: String,
}
