//! Plain-text presentation of a [`Session`].
//!
//! Everything shown is read from the session passed in; the renderer keeps
//! no state of its own.

use std::io::{self, Write};

use crate::{
    models::{ResultOrigin, SessionResult},
    session::{Banner, Session},
};

/// Upper end of the gauge scale, °C.
pub const GAUGE_MAX_C: f64 = 30.0;

const GAUGE_WIDTH: usize = 30;

/// Write the full dashboard: status line, banner, metric and gauge.
pub fn render<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    // ---
    match session.status() {
        Some(status) if status.reachable => writeln!(out, "[●] {}", status.display_message)?,
        Some(status) => writeln!(out, "[○] {}", status.display_message)?,
        None => writeln!(out, "[?] Estado del servidor desconocido")?,
    }

    if let Some(banner) = session.banner() {
        let tag = match banner {
            Banner::Success(_) => "OK",
            Banner::Warning(_) => "AVISO",
            Banner::Error(_) => "ERROR",
        };
        writeln!(out, "[{tag}] {}", banner.message())?;
    }

    match session.result() {
        Some(result) => render_result(result, out),
        None => writeln!(out, "Ingresa los datos con 'predict' o consulta 'frost'."),
    }
}

fn render_result<W: Write>(result: &SessionResult, out: &mut W) -> io::Result<()> {
    // ---
    let label = match &result.origin {
        ResultOrigin::Live => "TEMPERATURA PROYECTADA (Estimación IA)".to_string(),
        ResultOrigin::Simulated => "TEMPERATURA PROYECTADA (SIMULADA, sin conexión)".to_string(),
        ResultOrigin::AutoScan { location, .. } => format!("MÍNIMA DE HOY en {location}"),
    };
    writeln!(out, "{label}: {:.2} {}", result.last_temperature, result.unit)?;
    writeln!(out, "{}", gauge(result.last_temperature))?;

    if let ResultOrigin::AutoScan { today, .. } = &result.origin {
        writeln!(
            out,
            "Hoy: máx {:.1} °C, mín {:.1} °C, lluvia {:.1} mm",
            today.max, today.min, today.rain
        )?;
    }

    let frost = if result.last_frost_alert {
        "ALERTA DE HELADA"
    } else {
        "sin alerta de helada"
    };
    writeln!(out, "Riesgo: {} ({frost})", result.last_risk_description)?;
    writeln!(
        out,
        "Actualizado: {}",
        result.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Text dial for `value` over `0..=GAUGE_MAX_C`, clamped at both ends.
pub fn gauge(value: f64) -> String {
    // ---
    let ratio = if value.is_finite() {
        (value / GAUGE_MAX_C).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "0 [{}{}] {}",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        GAUGE_MAX_C
    )
}

/// The session as pretty JSON, for the `export` command.
pub fn render_json<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    // ---
    serde_json::to_writer_pretty(&mut *out, session)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::{
        models::{PredictionResponse, ServerStatus, TodayConditions, NO_DATA},
        session::Outcome,
    };
    use chrono::Utc;

    fn rendered(session: &Session) -> String {
        // ---
        let mut buf = Vec::new();
        render(session, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn gauge_clamps_and_scales() {
        // ---
        assert_eq!(gauge(-5.0), format!("0 [{}] 30", "-".repeat(30)));
        assert_eq!(gauge(15.0), format!("0 [{}{}] 30", "#".repeat(15), "-".repeat(15)));
        assert_eq!(gauge(45.0), format!("0 [{}] 30", "#".repeat(30)));
        assert_eq!(gauge(f64::NAN), gauge(0.0));
    }

    #[test]
    fn empty_session_prompts_for_input() {
        // ---
        let text = rendered(&Session::new());
        assert!(text.contains("Estado del servidor desconocido"));
        assert!(text.contains("Ingresa los datos"));
    }

    #[test]
    fn simulated_result_is_labelled() {
        // ---
        let mut session = Session::new();
        session.set_status(ServerStatus {
            reachable: false,
            display_message: "Servidor desconectado (http://127.0.0.1:8000)".into(),
        });
        session.complete(Outcome::Simulated {
            result: SessionResult {
                last_temperature: 19.2,
                last_risk_description: "Simulación".into(),
                last_frost_alert: false,
                unit: "°C".into(),
                origin: ResultOrigin::Simulated,
                updated_at: Utc::now(),
            },
            reason: "connection refused".into(),
        });

        let text = rendered(&session);
        assert!(text.contains("[○] Servidor desconectado"));
        assert!(text.contains("[AVISO]"));
        assert!(text.contains("SIMULADA"));
        assert!(text.contains("19.20 °C"));
    }

    #[test]
    fn temperatura_answer_without_unit_shows_celsius() {
        // ---
        let mut session = Session::new();
        let response = PredictionResponse::Flat {
            predicted_temperature: 20.1,
            unit: NO_DATA.into(),
        };
        session.complete(Outcome::Completed(response.into_session_result()));

        let text = rendered(&session);
        assert!(text.contains("20.10 °C"), "rendered: {text}");
        assert!(!text.contains("20.10 Sin datos"));
    }

    #[test]
    fn auto_scan_shows_conditions_and_alert() {
        // ---
        let mut session = Session::new();
        session.complete(Outcome::Completed(SessionResult {
            last_temperature: -2.0,
            last_risk_description: "Helada esta noche".into(),
            last_frost_alert: true,
            unit: "°C".into(),
            origin: ResultOrigin::AutoScan {
                location: "Puno".into(),
                today: TodayConditions {
                    max: 10.0,
                    min: -2.0,
                    rain: 0.0,
                },
            },
            updated_at: Utc::now(),
        }));

        let text = rendered(&session);
        assert!(text.contains("MÍNIMA DE HOY en Puno: -2.00 °C"));
        assert!(text.contains("máx 10.0 °C"));
        assert!(text.contains("ALERTA DE HELADA"));
    }

    #[test]
    fn json_export_includes_result() {
        // ---
        let mut session = Session::new();
        session.complete(Outcome::Completed(SessionResult {
            last_temperature: 14.5,
            last_risk_description: "Normal".into(),
            last_frost_alert: false,
            unit: "°C".into(),
            origin: ResultOrigin::Live,
            updated_at: Utc::now(),
        }));

        let mut buf = Vec::new();
        render_json(&session, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["result"]["last_temperature"], 14.5);
        assert_eq!(value["phase"], "Rendered");
    }
}
