//! Line commands typed by the operator at the terminal.
//!
//! `predict` takes the form fields as `key=value` pairs; omitted fields keep
//! the form defaults (18.0 / 8.0 / 5.0 mm / 60 % / Enero).

use thiserror::Error;

use crate::models::{FormInput, Month};

pub const HELP: &str = "\
Comandos:
  predict [temp_max=18.0] [temp_min=8.0] [lluvia=5.0] [humedad=60] [mes=Enero]
                  ejecutar predicción manual
  frost           consultar helada automática
  status          comprobar el servidor
  show            mostrar el último resultado
  export          sesión en JSON
  help            esta ayuda
  quit            salir";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Predict(FormInput),
    Frost,
    Status,
    Show,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("comando desconocido '{0}' (usa 'help')")]
    Unknown(String),

    #[error("se esperaba campo=valor, no '{0}'")]
    Malformed(String),

    #[error("campo desconocido '{0}'")]
    UnknownField(String),

    #[error("valor inválido para {field}: '{value}'")]
    BadValue { field: String, value: String },
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        // ---
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "predict" | "predecir" => Command::Predict(parse_form(words)?),
            "frost" | "helada" => Command::Frost,
            "status" => Command::Status,
            "show" => Command::Show,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "salir" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_form<'a>(fields: impl Iterator<Item = &'a str>) -> Result<FormInput, CommandError> {
    // ---
    let mut form = FormInput::default();

    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| CommandError::Malformed(field.to_string()))?;
        let bad = || CommandError::BadValue {
            field: key.to_string(),
            value: value.to_string(),
        };

        match key.to_ascii_lowercase().as_str() {
            "temp_max" | "max" => form.temp_max = value.parse().map_err(|_| bad())?,
            "temp_min" | "min" => form.temp_min = value.parse().map_err(|_| bad())?,
            "lluvia" | "precipitacion" => {
                form.precipitation_mm = value.parse().map_err(|_| bad())?
            }
            "humedad" => form.humidity_percent = value.parse().map_err(|_| bad())?,
            "mes" => form.month = value.parse::<Month>().map_err(|_| bad())?,
            _ => return Err(CommandError::UnknownField(key.to_string())),
        }
    }

    Ok(form)
}
