use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{error::AppError, state::AppState};

use super::dto::{MealRequest, MealResponse, MessageResponse};
use super::repo;
use super::services::{parse_calendar_date, validate_meal};

// --- public router ---

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/meals/date/:date", get(list_meals_by_date))
        .route("/meals/type/:meal_type", get(list_meals_by_type))
}

// --- handlers ---

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> Result<Json<MealResponse>, AppError> {
    let meal = validate_meal(body(payload)?)?;
    let id = repo::insert(&state.db, &meal).await?;
    info!(id, meal_type = %meal.meal_type, "meal created");
    Ok(Json(meal.with_id(id)))
}

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> Result<Json<Vec<MealResponse>>, AppError> {
    let rows = repo::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(MealResponse::from).collect()))
}

#[instrument(skip(state, id))]
pub async fn get_meal(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MealResponse>, AppError> {
    let id = meal_id(id)?;
    let row = repo::get_by_id(&state.db, id).await?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, id, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> Result<Json<MealResponse>, AppError> {
    let id = meal_id(id)?;
    let meal = validate_meal(body(payload)?)?;
    repo::update_by_id(&state.db, id, &meal).await?;
    info!(id, "meal updated");
    Ok(Json(meal.with_id(id)))
}

#[instrument(skip(state, id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = meal_id(id)?;
    repo::delete_by_id(&state.db, id).await?;
    info!(id, "meal deleted");
    Ok(Json(MessageResponse {
        message: "Meal record deleted".into(),
    }))
}

/// GET /meals/date/{YYYY-MM-DD}
#[instrument(skip(state, date))]
pub async fn list_meals_by_date(
    State(state): State<AppState>,
    date: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<MealResponse>>, AppError> {
    let date = parse_calendar_date(&segment(date)?)?;
    let rows = repo::list_by_date(&state.db, &date).await?;
    Ok(Json(rows.into_iter().map(MealResponse::from).collect()))
}

#[instrument(skip(state, meal_type))]
pub async fn list_meals_by_type(
    State(state): State<AppState>,
    meal_type: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<MealResponse>>, AppError> {
    let meal_type = segment(meal_type)?;
    let rows = repo::list_by_type(&state.db, &meal_type).await?;
    Ok(Json(rows.into_iter().map(MealResponse::from).collect()))
}

fn body(payload: Result<Json<MealRequest>, JsonRejection>) -> Result<MealRequest, AppError> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected meal payload");
            Err(AppError::Validation(rejection.body_text()))
        }
    }
}

fn meal_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

fn segment(value: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    value
        .map(|Path(value)| value)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
