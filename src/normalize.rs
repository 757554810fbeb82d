//! Response normalizers, one per backend response shape.
//!
//! Each function is total over `serde_json::Value`: a missing key, a value of
//! the wrong type, or a body that is not an object at all yields the typed
//! default (`0.0`, [`NO_DATA`], `false`). Unknown fields are ignored.

use serde_json::Value;

use crate::models::{PredictionResponse, TodayConditions, NO_DATA};

// ---

fn number(obj: &Value, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn text(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or(NO_DATA)
        .to_string()
}

fn flag(obj: &Value, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// `{ <temperature_key>, [unidad] }`
///
/// The key differs per contract: `temperatura_predicha` or
/// `prediccion_temperatura`.
pub fn flat(body: &Value, temperature_key: &str) -> PredictionResponse {
    // ---
    PredictionResponse::Flat {
        predicted_temperature: number(body, temperature_key),
        unit: text(body, "unidad"),
    }
}

/// `{ resultado: { temperatura_manana_estimada, riesgo_descripcion, alerta_helada } }`
pub fn nested(body: &Value) -> PredictionResponse {
    // ---
    let inner = body.get("resultado").unwrap_or(&Value::Null);

    PredictionResponse::Nested {
        estimated_temperature_tomorrow: number(inner, "temperatura_manana_estimada"),
        risk_description: text(inner, "riesgo_descripcion"),
        frost_alert: flag(inner, "alerta_helada"),
    }
}

/// `{ ubicacion, condiciones_hoy: { max, min, lluvia }, <frost_key>, mensaje }`
///
/// `frost_key` is `alerta_helada` or `hay_helada` depending on the backend
/// version; only the configured one is consulted.
pub fn auto_scan(body: &Value, frost_key: &str) -> PredictionResponse {
    // ---
    let today = body.get("condiciones_hoy").unwrap_or(&Value::Null);

    PredictionResponse::AutoScan {
        location: text(body, "ubicacion"),
        today: TodayConditions {
            max: number(today, "max"),
            min: number(today, "min"),
            rain: number(today, "lluvia"),
        },
        frost_alert: flag(body, frost_key),
        message: text(body, "mensaje"),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_full_body() {
        // ---
        let body = json!({
            "resultado": {
                "temperatura_manana_estimada": 14.5,
                "riesgo_descripcion": "Normal",
                "alerta_helada": false
            }
        });
        assert_eq!(
            nested(&body),
            PredictionResponse::Nested {
                estimated_temperature_tomorrow: 14.5,
                risk_description: "Normal".into(),
                frost_alert: false,
            }
        );
    }

    #[test]
    fn nested_missing_fields_use_defaults() {
        // ---
        let expected = PredictionResponse::Nested {
            estimated_temperature_tomorrow: 0.0,
            risk_description: NO_DATA.into(),
            frost_alert: false,
        };
        for body in [
            json!({}),
            json!({ "resultado": {} }),
            json!({ "resultado": null }),
            json!({ "resultado": "oops" }),
            json!([1, 2, 3]),
            Value::Null,
        ] {
            assert_eq!(nested(&body), expected, "body: {body}");
        }
    }

    #[test]
    fn nested_wrong_types_use_defaults() {
        // ---
        let body = json!({
            "resultado": {
                "temperatura_manana_estimada": "14.5",
                "riesgo_descripcion": 3,
                "alerta_helada": "si",
                "extra": true
            }
        });
        assert_eq!(
            nested(&body),
            PredictionResponse::Nested {
                estimated_temperature_tomorrow: 0.0,
                risk_description: NO_DATA.into(),
                frost_alert: false,
            }
        );
    }

    #[test]
    fn flat_accepts_integer_temperature() {
        // ---
        let body = json!({ "prediccion_temperatura": 12, "unidad": "°C" });
        assert_eq!(
            flat(&body, "prediccion_temperatura"),
            PredictionResponse::Flat {
                predicted_temperature: 12.0,
                unit: "°C".into(),
            }
        );
    }

    #[test]
    fn flat_ignores_other_contract_key() {
        // ---
        let body = json!({ "temperatura_predicha": 21.3 });
        assert_eq!(
            flat(&body, "prediccion_temperatura"),
            PredictionResponse::Flat {
                predicted_temperature: 0.0,
                unit: NO_DATA.into(),
            }
        );
    }

    #[test]
    fn auto_scan_reads_only_configured_frost_key() {
        // ---
        let body = json!({
            "ubicacion": "Puno",
            "condiciones_hoy": { "max": 9.0, "min": -3.0, "lluvia": 0.4 },
            "hay_helada": true,
            "mensaje": "Helada probable"
        });

        let PredictionResponse::AutoScan { frost_alert, today, location, message } =
            auto_scan(&body, "hay_helada")
        else {
            panic!("wrong shape");
        };
        assert!(frost_alert);
        assert_eq!(location, "Puno");
        assert_eq!(message, "Helada probable");
        assert_eq!(today, TodayConditions { max: 9.0, min: -3.0, rain: 0.4 });

        let PredictionResponse::AutoScan { frost_alert, .. } = auto_scan(&body, "alerta_helada")
        else {
            panic!("wrong shape");
        };
        assert!(!frost_alert);
    }

    #[test]
    fn auto_scan_empty_body() {
        // ---
        assert_eq!(
            auto_scan(&json!({}), "alerta_helada"),
            PredictionResponse::AutoScan {
                location: NO_DATA.into(),
                today: TodayConditions::default(),
                frost_alert: false,
                message: NO_DATA.into(),
            }
        );
    }
}
