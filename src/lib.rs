//! Client for the FIA agronomic prediction backend.
//!
//! Collects weather parameters from an operator, sends them to the remote
//! prediction service, and presents the forecast temperature and frost risk.
//! No forecasting happens here; the crate validates input, dispatches to the
//! right versioned endpoint, normalizes whatever comes back, and keeps the
//! latest result in a per-session [`Session`].
//!
//! Module layout (Explicit Module Boundary Pattern): modules stay private and
//! callers go through the re-exports below.

mod api;
mod config;
mod console;
mod dashboard;
mod error;
mod fallback;
mod models;
mod normalize;
mod render;
mod session;

pub use api::{ApiClient, FrostContract, PredictionContract};
pub use config::{load_from_env, Config, DEFAULT_API_URL};
pub use console::{Command, CommandError, HELP};
pub use dashboard::Dashboard;
pub use error::{DispatchError, UnknownContract, ValidationError};
pub use models::{
    FormInput, Month, PredictionRequest, PredictionResponse, ResultOrigin, ServerStatus,
    SessionResult, TodayConditions, DEFAULT_UNIT, NO_DATA,
};
pub use render::{render, render_json};
pub use session::{Banner, Outcome, Phase, Session};
