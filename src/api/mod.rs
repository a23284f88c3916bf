use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{
    BiographicalProfile, BiologicalProfile, EducationLevel, FinancialProfile, MAX_COMMUTE_HOURS,
    MAX_LIFE_EXPECTANCY, MAX_MAINTENANCE_HOURS, MAX_WORK_HOURS, MIN_LIFE_EXPECTANCY, Profile,
    ReferenceTable, TimeAllocationProfile,
};
use crate::presentation::{Dashboard, build_dashboard};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const DEFAULT_BIRTH_DATE: &str = "1997-10-07";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliBiologicalProfile {
    Male,
    Female,
}

impl From<CliBiologicalProfile> for BiologicalProfile {
    fn from(value: CliBiologicalProfile) -> Self {
        match value {
            CliBiologicalProfile::Male => BiologicalProfile::Male,
            CliBiologicalProfile::Female => BiologicalProfile::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliEducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
}

impl From<CliEducationLevel> for EducationLevel {
    fn from(value: CliEducationLevel) -> Self {
        match value {
            CliEducationLevel::HighSchool => EducationLevel::HighSchool,
            CliEducationLevel::Bachelor => EducationLevel::Bachelor,
            CliEducationLevel::Master => EducationLevel::Master,
            CliEducationLevel::Doctorate => EducationLevel::Doctorate,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiBiologicalProfile {
    #[serde(alias = "Male", alias = "m")]
    Male,
    #[serde(alias = "Female", alias = "f")]
    Female,
}

impl From<ApiBiologicalProfile> for CliBiologicalProfile {
    fn from(value: ApiBiologicalProfile) -> Self {
        match value {
            ApiBiologicalProfile::Male => CliBiologicalProfile::Male,
            ApiBiologicalProfile::Female => CliBiologicalProfile::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiEducationLevel {
    #[serde(alias = "highSchool", alias = "high_school")]
    HighSchool,
    #[serde(alias = "bachelors")]
    Bachelor,
    #[serde(alias = "masters")]
    Master,
    #[serde(alias = "phd")]
    Doctorate,
}

impl From<ApiEducationLevel> for CliEducationLevel {
    fn from(value: ApiEducationLevel) -> Self {
        match value {
            ApiEducationLevel::HighSchool => CliEducationLevel::HighSchool,
            ApiEducationLevel::Bachelor => CliEducationLevel::Bachelor,
            ApiEducationLevel::Master => CliEducationLevel::Master,
            ApiEducationLevel::Doctorate => CliEducationLevel::Doctorate,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DashboardPayload {
    birth_date: Option<NaiveDate>,
    biological_profile: Option<ApiBiologicalProfile>,
    education_level: Option<ApiEducationLevel>,
    life_expectancy: Option<u32>,

    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    physical_assets: Option<f64>,
    liquid_savings: Option<f64>,
    total_debt: Option<f64>,

    work_hours: Option<u32>,
    commute_hours: Option<u32>,
    maintenance_hours: Option<u32>,

    as_of: Option<NaiveDate>,
}

/// Profile flags shared by the `report` subcommand and the HTTP defaults.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value = DEFAULT_BIRTH_DATE, help = "Birth date, YYYY-MM-DD")]
    pub birth_date: NaiveDate,
    #[arg(long, value_enum, default_value_t = CliBiologicalProfile::Male)]
    pub biological_profile: CliBiologicalProfile,
    #[arg(long, value_enum, default_value_t = CliEducationLevel::Master)]
    pub education_level: CliEducationLevel,
    #[arg(
        long,
        help = "Life expectancy in years (60-100); defaults to the baseline for the biological profile"
    )]
    pub life_expectancy: Option<u32>,
    #[arg(long, default_value_t = 0.0, help = "Monthly net income")]
    pub monthly_income: f64,
    #[arg(long, default_value_t = 0.0, help = "Monthly fixed expenses")]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0, help = "Physical assets such as home or car")]
    pub physical_assets: f64,
    #[arg(long, default_value_t = 0.0, help = "Savings and liquid investments")]
    pub liquid_savings: f64,
    #[arg(long, default_value_t = 0.0)]
    pub total_debt: f64,
    #[arg(long, default_value_t = 40, help = "Weekly work hours (0-80)")]
    pub work_hours: u32,
    #[arg(long, default_value_t = 10, help = "Weekly commute hours (0-30)")]
    pub commute_hours: u32,
    #[arg(
        long,
        default_value_t = 21,
        help = "Weekly hours for eating, hygiene and chores (0-50)"
    )]
    pub maintenance_hours: u32,
    #[arg(long, help = "Evaluation date, YYYY-MM-DD; defaults to today")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("--{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    #[error("--{field} must be a finite amount >= 0")]
    InvalidAmount { field: &'static str },

    #[error("Invalid API payload: {0}")]
    Payload(String),
}

#[derive(Debug)]
struct ApiRequest {
    profile: Profile,
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), InputError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidAmount { field })
    }
}

pub fn build_profile(args: &ProfileArgs, reference: &ReferenceTable) -> Result<Profile, InputError> {
    let biological_profile: BiologicalProfile = args.biological_profile.into();
    let life_expectancy_years = args.life_expectancy.unwrap_or_else(|| {
        reference
            .life_expectancy
            .default_years(biological_profile)
            .clamp(MIN_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY)
    });

    check_range(
        "life-expectancy",
        life_expectancy_years,
        MIN_LIFE_EXPECTANCY,
        MAX_LIFE_EXPECTANCY,
    )?;
    check_range("work-hours", args.work_hours, 0, MAX_WORK_HOURS)?;
    check_range("commute-hours", args.commute_hours, 0, MAX_COMMUTE_HOURS)?;
    check_range(
        "maintenance-hours",
        args.maintenance_hours,
        0,
        MAX_MAINTENANCE_HOURS,
    )?;

    for (field, value) in [
        ("monthly-income", args.monthly_income),
        ("monthly-expenses", args.monthly_expenses),
        ("physical-assets", args.physical_assets),
        ("liquid-savings", args.liquid_savings),
        ("total-debt", args.total_debt),
    ] {
        check_amount(field, value)?;
    }

    Ok(Profile {
        bio: BiographicalProfile {
            birth_date: args.birth_date,
            biological_profile,
            education_level: args.education_level.into(),
            life_expectancy_years,
        },
        finance: FinancialProfile {
            monthly_income: args.monthly_income,
            monthly_expenses: args.monthly_expenses,
            physical_assets: args.physical_assets,
            liquid_savings: args.liquid_savings,
            total_debt: args.total_debt,
        },
        time: TimeAllocationProfile {
            work_hours: args.work_hours,
            commute_hours: args.commute_hours,
            maintenance_hours: args.maintenance_hours,
        },
    })
}

/// Validates `args` and evaluates the dashboard, defaulting to today's date.
pub fn render_report(args: &ProfileArgs, config: &Config) -> Result<Dashboard, InputError> {
    let profile = build_profile(args, &config.reference)?;
    Ok(evaluate(&profile, args.as_of, config))
}

fn evaluate(profile: &Profile, as_of: Option<NaiveDate>, config: &Config) -> Dashboard {
    let today = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    if profile.bio.birth_date > today {
        warn!(
            birth_date = %profile.bio.birth_date,
            %today,
            "birth date is after the evaluation date; age metrics will be negative"
        );
    }
    build_dashboard(profile, today, &config.reference, &config.presentation)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/dashboard",
            get(dashboard_get_handler).post(dashboard_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(config: Config) -> std::io::Result<()> {
    let host = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let port = config.server.port;
    let addr = SocketAddr::from((host, port));
    let app = router(AppState::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!("Life Radar listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn dashboard_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<DashboardPayload>, QueryRejection>,
) -> Response {
    let payload = payload
        .map(|Query(payload)| payload)
        .map_err(|rejection| InputError::Payload(rejection.body_text()));
    dashboard_handler_impl(&state, payload)
}

async fn dashboard_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<DashboardPayload>, JsonRejection>,
) -> Response {
    let payload = payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| InputError::Payload(rejection.body_text()));
    dashboard_handler_impl(&state, payload)
}

fn dashboard_handler_impl(
    state: &AppState,
    payload: Result<DashboardPayload, InputError>,
) -> Response {
    let config = &state.config;
    let request = match payload.and_then(|p| api_request_from_payload(p, &config.reference)) {
        Ok(request) => request,
        Err(e) => {
            warn!("rejected dashboard request: {e}");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let dashboard = evaluate(&request.profile, request.as_of, config);
    info!(
        as_of = %dashboard.as_of,
        weeks_lived = dashboard.metrics.weeks_lived,
        "dashboard rendered"
    );
    json_response(StatusCode::OK, dashboard)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str, reference: &ReferenceTable) -> Result<ApiRequest, InputError> {
    let payload = serde_json::from_str::<DashboardPayload>(json)
        .map_err(|e| InputError::Payload(e.to_string()))?;
    api_request_from_payload(payload, reference)
}

fn api_request_from_payload(
    payload: DashboardPayload,
    reference: &ReferenceTable,
) -> Result<ApiRequest, InputError> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.birth_date {
        args.birth_date = v;
    }
    if let Some(v) = payload.biological_profile {
        args.biological_profile = v.into();
    }
    if let Some(v) = payload.education_level {
        args.education_level = v.into();
    }
    if let Some(v) = payload.life_expectancy {
        args.life_expectancy = Some(v);
    }

    if let Some(v) = payload.monthly_income {
        args.monthly_income = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.physical_assets {
        args.physical_assets = v;
    }
    if let Some(v) = payload.liquid_savings {
        args.liquid_savings = v;
    }
    if let Some(v) = payload.total_debt {
        args.total_debt = v;
    }

    if let Some(v) = payload.work_hours {
        args.work_hours = v;
    }
    if let Some(v) = payload.commute_hours {
        args.commute_hours = v;
    }
    if let Some(v) = payload.maintenance_hours {
        args.maintenance_hours = v;
    }

    let profile = build_profile(&args, reference)?;
    Ok(ApiRequest {
        profile,
        as_of: payload.as_of,
    })
}

fn default_args_for_api() -> ProfileArgs {
    ProfileArgs {
        birth_date: NaiveDate::from_ymd_opt(1997, 10, 7).unwrap_or(NaiveDate::MIN),
        biological_profile: CliBiologicalProfile::Male,
        education_level: CliEducationLevel::Master,
        life_expectancy: None,
        monthly_income: 0.0,
        monthly_expenses: 0.0,
        physical_assets: 0.0,
        liquid_savings: 0.0,
        total_debt: 0.0,
        work_hours: 40,
        commute_hours: 10,
        maintenance_hours: 21,
        as_of: None,
    }
}
