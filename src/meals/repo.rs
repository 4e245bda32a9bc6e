use crate::db::Database;
use crate::error::AppError;
use crate::meals::repo_types::{MealRow, NewMeal};

const SELECT_COLUMNS: &str =
    "SELECT id, date_time, meal_type, food_name, calories, notes, image_url FROM meals";

pub async fn insert(db: &Database, meal: &NewMeal) -> Result<i64, AppError> {
    let mut conn = db.connect().await?;
    let res = sqlx::query(
        r#"
        INSERT INTO meals (date_time, meal_type, food_name, calories, notes, image_url)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&meal.date_time)
    .bind(&meal.meal_type)
    .bind(&meal.food_name)
    .bind(meal.calories)
    .bind(&meal.notes)
    .bind(&meal.image_url)
    .execute(&mut conn)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn list_all(db: &Database) -> Result<Vec<MealRow>, AppError> {
    let mut conn = db.connect().await?;
    let rows = sqlx::query_as::<_, MealRow>(&format!("{SELECT_COLUMNS} ORDER BY date_time DESC"))
        .fetch_all(&mut conn)
        .await?;
    Ok(rows)
}

pub async fn get_by_id(db: &Database, id: i64) -> Result<MealRow, AppError> {
    let mut conn = db.connect().await?;
    let row = sqlx::query_as::<_, MealRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
    row.ok_or(AppError::NotFound)
}

/// Replaces every mutable column of row `id`.
pub async fn update_by_id(db: &Database, id: i64, meal: &NewMeal) -> Result<u64, AppError> {
    let mut conn = db.connect().await?;
    let res = sqlx::query(
        r#"
        UPDATE meals
        SET date_time = ?, meal_type = ?, food_name = ?,
            calories = ?, notes = ?, image_url = ?
        WHERE id = ?
        "#,
    )
    .bind(&meal.date_time)
    .bind(&meal.meal_type)
    .bind(&meal.food_name)
    .bind(meal.calories)
    .bind(&meal.notes)
    .bind(&meal.image_url)
    .bind(id)
    .execute(&mut conn)
    .await?;
    affected_or_not_found(res.rows_affected())
}

pub async fn delete_by_id(db: &Database, id: i64) -> Result<u64, AppError> {
    let mut conn = db.connect().await?;
    let res = sqlx::query("DELETE FROM meals WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;
    affected_or_not_found(res.rows_affected())
}

/// `date` is `YYYY-MM-DD`; matched against the leading date part of `date_time`.
pub async fn list_by_date(db: &Database, date: &str) -> Result<Vec<MealRow>, AppError> {
    let mut conn = db.connect().await?;
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        "{SELECT_COLUMNS} WHERE substr(date_time, 1, 10) = ? ORDER BY date_time ASC"
    ))
    .bind(date)
    .fetch_all(&mut conn)
    .await?;
    Ok(rows)
}

pub async fn list_by_type(db: &Database, meal_type: &str) -> Result<Vec<MealRow>, AppError> {
    let mut conn = db.connect().await?;
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        "{SELECT_COLUMNS} WHERE meal_type = ? ORDER BY date_time DESC"
    ))
    .bind(meal_type)
    .fetch_all(&mut conn)
    .await?;
    Ok(rows)
}

fn affected_or_not_found(affected: u64) -> Result<u64, AppError> {
    match affected {
        0 => Err(AppError::NotFound),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::services::normalize_timestamp;
    use tempfile::TempDir;

    async fn fresh_db() -> (Database, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("meals.db"));
        db.init_schema().await.unwrap();
        (db, dir)
    }

    fn meal(meal_type: &str, food_name: &str, date_time: &str) -> NewMeal {
        NewMeal {
            date_time: date_time.into(),
            meal_type: meal_type.into(),
            food_name: food_name.into(),
            calories: None,
            notes: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_record() {
        let (db, _dir) = fresh_db().await;
        let mut input = meal("lunch", "ramen", "2024-05-01T12:30:00");
        input.calories = Some(650);
        input.notes = Some("extra egg".into());
        input.image_url = Some("https://img.example/ramen.jpg".into());

        let id = insert(&db, &input).await.unwrap();
        let row = get_by_id(&db, id).await.unwrap();

        assert_eq!(row.id, id);
        assert_eq!(
            NewMeal {
                date_time: row.date_time,
                meal_type: row.meal_type,
                food_name: row.food_name,
                calories: row.calories,
                notes: row.notes,
                image_url: row.image_url,
            },
            input
        );
    }

    #[tokio::test]
    async fn first_insert_gets_id_one() {
        let (db, _dir) = fresh_db().await;
        let id = insert(&db, &meal("breakfast", "oatmeal", "2024-05-01T08:00:00"))
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (db, _dir) = fresh_db().await;
        let id = insert(&db, &meal("snack", "apple", "2024-05-01T15:00:00"))
            .await
            .unwrap();

        assert_eq!(delete_by_id(&db, id).await.unwrap(), 1);
        assert!(matches!(get_by_id(&db, id).await, Err(AppError::NotFound)));
        assert!(matches!(delete_by_id(&db, id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_changes_nothing() {
        let (db, _dir) = fresh_db().await;
        insert(&db, &meal("dinner", "curry", "2024-05-01T19:00:00"))
            .await
            .unwrap();
        let before = list_all(&db).await.unwrap();

        let res = update_by_id(&db, 42, &meal("dinner", "pasta", "2024-05-02T19:00:00")).await;

        assert!(matches!(res, Err(AppError::NotFound)));
        assert_eq!(list_all(&db).await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (db, _dir) = fresh_db().await;
        let mut original = meal("dinner", "curry", "2024-05-01T19:00:00");
        original.notes = Some("spicy".into());
        let id = insert(&db, &original).await.unwrap();

        let replacement = meal("lunch", "salad", "2024-05-02T12:00:00");
        assert_eq!(update_by_id(&db, id, &replacement).await.unwrap(), 1);

        let row = get_by_id(&db, id).await.unwrap();
        assert_eq!(row.food_name, "salad");
        assert_eq!(row.meal_type, "lunch");
        assert_eq!(row.notes, None);
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let (db, _dir) = fresh_db().await;
        for ts in [
            "2024-05-01T08:00:00",
            "2024-05-03T08:00:00",
            "2024-05-02T08:00:00",
        ] {
            insert(&db, &meal("breakfast", "toast", ts)).await.unwrap();
        }

        let rows = list_all(&db).await.unwrap();
        let times: Vec<_> = rows.iter().map(|r| r.date_time.as_str()).collect();
        assert_eq!(
            times,
            [
                "2024-05-03T08:00:00",
                "2024-05-02T08:00:00",
                "2024-05-01T08:00:00"
            ]
        );
    }

    #[tokio::test]
    async fn list_all_on_empty_table() {
        let (db, _dir) = fresh_db().await;
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_by_date_matches_calendar_day_ascending() {
        let (db, _dir) = fresh_db().await;
        insert(&db, &meal("dinner", "soup", "2024-05-01T19:00:00")).await.unwrap();
        insert(&db, &meal("breakfast", "eggs", "2024-05-01T07:30:00")).await.unwrap();
        insert(&db, &meal("breakfast", "eggs", "2024-05-02T07:30:00")).await.unwrap();
        insert(&db, &meal("snack", "nuts", "2024-04-30T23:59:59")).await.unwrap();

        let rows = list_by_date(&db, "2024-05-01").await.unwrap();
        let times: Vec<_> = rows.iter().map(|r| r.date_time.as_str()).collect();
        assert_eq!(times, ["2024-05-01T07:30:00", "2024-05-01T19:00:00"]);
    }

    #[tokio::test]
    async fn list_by_type_is_exact_and_newest_first() {
        let (db, _dir) = fresh_db().await;
        insert(&db, &meal("lunch", "bento", "2024-05-01T12:00:00")).await.unwrap();
        insert(&db, &meal("lunch", "udon", "2024-05-02T12:00:00")).await.unwrap();
        insert(&db, &meal("Lunch", "soba", "2024-05-03T12:00:00")).await.unwrap();
        insert(&db, &meal("dinner", "sushi", "2024-05-02T19:00:00")).await.unwrap();

        let rows = list_by_type(&db, "lunch").await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.food_name.as_str()).collect();
        assert_eq!(names, ["udon", "bento"]);
    }

    #[tokio::test]
    async fn offset_and_fractional_timestamps_order_and_filter_by_utc() {
        let (db, _dir) = fresh_db().await;
        for (food_name, raw) in [
            ("tokyo", "2024-05-01T08:00:00+09:00"),
            ("utc", "2024-05-01T01:00:00Z"),
            ("whole", "2024-05-01T08:00:00Z"),
            ("half", "2024-05-01T08:00:00.5Z"),
        ] {
            let date_time = normalize_timestamp(raw).unwrap();
            insert(&db, &meal("dinner", food_name, &date_time)).await.unwrap();
        }

        let names = |rows: Vec<MealRow>| -> Vec<String> {
            rows.into_iter().map(|r| r.food_name).collect()
        };

        assert_eq!(
            names(list_all(&db).await.unwrap()),
            ["half", "whole", "utc", "tokyo"]
        );
        assert_eq!(names(list_by_date(&db, "2024-04-30").await.unwrap()), ["tokyo"]);
        assert_eq!(
            names(list_by_date(&db, "2024-05-01").await.unwrap()),
            ["utc", "whole", "half"]
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("missing").join("meals.db"));

        let res = list_all(&db).await;
        assert!(matches!(res, Err(AppError::StoreUnavailable(_))));
    }
}
