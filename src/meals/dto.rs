use serde::{Deserialize, Serialize};

/// Body of `POST /meals` and `PUT /meals/{id}`.
#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub date_time: String,
    pub meal_type: String,
    pub food_name: String,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A meal record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealResponse {
    pub id: i64,
    pub date_time: String,
    pub meal_type: String,
    pub food_name: String,
    pub calories: Option<i64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
