use sqlx::{FromRow, SqlitePool};

/// Raw `plans` row. Food columns are nullable in older databases.
#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: i64,
    pub name: String,
    pub area: String,
    pub availabilities_json: String,
    pub food_dislike: Option<String>,
    pub food_weak: Option<String>,
    pub food_cant: Option<String>,
    pub food_want: Option<String>,
    pub created_at: String,
}

pub struct NewPlan<'a> {
    pub name: &'a str,
    pub area: &'a str,
    pub availabilities_json: &'a str,
    pub food_dislike: &'a str,
    pub food_weak: &'a str,
    pub food_cant: &'a str,
    pub food_want: &'a str,
    pub created_at: &'a str,
}

/// Insert one plan and return its store-assigned id.
pub async fn insert(db: &SqlitePool, plan: &NewPlan<'_>) -> Result<i64, sqlx::Error> {
    let done = sqlx::query(
        r#"
        INSERT INTO plans
            (name, area, availabilities_json, food_dislike, food_weak, food_cant, food_want, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(plan.name)
    .bind(plan.area)
    .bind(plan.availabilities_json)
    .bind(plan.food_dislike)
    .bind(plan.food_weak)
    .bind(plan.food_cant)
    .bind(plan.food_want)
    .bind(plan.created_at)
    .execute(db)
    .await?;

    Ok(done.last_insert_rowid())
}

/// All plans, most recent first.
pub async fn list_newest_first(db: &SqlitePool) -> Result<Vec<PlanRow>, sqlx::Error> {
    sqlx::query_as::<_, PlanRow>(
        r#"
        SELECT id, name, area, availabilities_json,
               food_dislike, food_weak, food_cant, food_want, created_at
          FROM plans
         ORDER BY id DESC
        "#,
    )
    .fetch_all(db)
    .await
}

#[cfg(test)]
pub async fn count(db: &SqlitePool) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plans")
        .fetch_one(db)
        .await
        .expect("count plans");
    n
}
