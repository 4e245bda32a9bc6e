use sqlx::FromRow;

use crate::meals::dto::MealResponse;

/// Row as stored in the `meals` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MealRow {
    pub id: i64,
    pub date_time: String,
    pub meal_type: String,
    pub food_name: String,
    pub calories: Option<i64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

/// A validated record ready to be written. `date_time` is already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub date_time: String,
    pub meal_type: String,
    pub food_name: String,
    pub calories: Option<i64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

impl NewMeal {
    pub fn with_id(self, id: i64) -> MealResponse {
        MealResponse {
            id,
            date_time: self.date_time,
            meal_type: self.meal_type,
            food_name: self.food_name,
            calories: self.calories,
            notes: self.notes,
            image_url: self.image_url,
        }
    }
}

impl From<MealRow> for MealResponse {
    fn from(r: MealRow) -> Self {
        Self {
            id: r.id,
            date_time: r.date_time,
            meal_type: r.meal_type,
            food_name: r.food_name,
            calories: r.calories,
            notes: r.notes,
            image_url: r.image_url,
        }
    }
}
