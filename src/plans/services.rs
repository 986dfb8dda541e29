use sqlx::SqlitePool;
use time::{macros::format_description, OffsetDateTime};

use super::{
    codec,
    dto::{PlanIn, PlanItem},
    repo::{self, NewPlan, PlanRow},
};
use crate::error::AppError;

pub const NAME_MAX_CHARS: usize = 100;
pub const AREA_MAX_CHARS: usize = 200;

pub const MSG_NO_AVAILABILITY: &str = "空いている日・時間を1つ以上入力してください。";
const MSG_NAME_REQUIRED: &str = "名前を入力してください。";
const MSG_NAME_TOO_LONG: &str = "名前は100文字以内で入力してください。";
const MSG_AREA_REQUIRED: &str = "行動範囲を入力してください。";
const MSG_AREA_TOO_LONG: &str = "行動範囲は200文字以内で入力してください。";

/// Checks everything that must hold before a plan may be stored.
/// Over-length fields are rejected, never truncated.
pub fn validate(plan: &PlanIn) -> Result<(), AppError> {
    check_text(&plan.name, NAME_MAX_CHARS, MSG_NAME_REQUIRED, MSG_NAME_TOO_LONG)?;
    check_text(&plan.area, AREA_MAX_CHARS, MSG_AREA_REQUIRED, MSG_AREA_TOO_LONG)?;
    if plan.availabilities.is_empty() {
        return Err(AppError::Validation(MSG_NO_AVAILABILITY.into()));
    }
    Ok(())
}

fn check_text(value: &str, max: usize, required: &str, too_long: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(required.into()));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(too_long.into()));
    }
    Ok(())
}

/// Validates and stores a plan, returning the new id.
pub async fn submit(db: &SqlitePool, plan: &PlanIn) -> Result<i64, AppError> {
    validate(plan)?;

    let availabilities_json = codec::encode(&plan.availabilities)?;
    let created_at = utc_timestamp()?;
    let id = repo::insert(
        db,
        &NewPlan {
            name: &plan.name,
            area: &plan.area,
            availabilities_json: &availabilities_json,
            food_dislike: &plan.food_dislike,
            food_weak: &plan.food_weak,
            food_cant: &plan.food_cant,
            food_want: &plan.food_want,
            created_at: &created_at,
        },
    )
    .await?;
    Ok(id)
}

/// Every stored plan, newest first, with availabilities decoded.
pub async fn list_all(db: &SqlitePool) -> Result<Vec<PlanItem>, AppError> {
    repo::list_newest_first(db)
        .await?
        .into_iter()
        .map(PlanItem::try_from)
        .collect()
}

impl TryFrom<PlanRow> for PlanItem {
    type Error = AppError;

    fn try_from(r: PlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            availabilities: codec::decode(&r.availabilities_json)?,
            id: r.id,
            name: r.name,
            area: r.area,
            food_dislike: r.food_dislike.unwrap_or_default(),
            food_weak: r.food_weak.unwrap_or_default(),
            food_cant: r.food_cant.unwrap_or_default(),
            food_want: r.food_want.unwrap_or_default(),
            created_at: r.created_at,
        })
    }
}

/// Naive UTC ISO-8601 timestamp with microseconds, e.g. `2025-11-20T09:15:02.123456`.
fn utc_timestamp() -> Result<String, time::error::Format> {
    let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");
    OffsetDateTime::now_utc().format(fmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::plans::dto::Availability;
    use time::PrimitiveDateTime;

    fn window(date: &str, start: &str, end: &str) -> Availability {
        Availability {
            date: date.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    fn plan(name: &str, windows: Vec<Availability>) -> PlanIn {
        PlanIn {
            name: name.into(),
            area: "Tokyo".into(),
            availabilities: windows,
            food_dislike: String::new(),
            food_weak: String::new(),
            food_cant: String::new(),
            food_want: "ramen".into(),
        }
    }

    fn validation_message(res: Result<(), AppError>) -> String {
        match res {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_availabilities_are_rejected() {
        let msg = validation_message(validate(&plan("Aki", vec![])));
        assert_eq!(msg, MSG_NO_AVAILABILITY);
    }

    #[test]
    fn name_and_area_limits_count_characters() {
        let w = vec![window("2025-11-20", "18:00", "21:00")];

        let at_limit = plan(&"あ".repeat(NAME_MAX_CHARS), w.clone());
        assert!(validate(&at_limit).is_ok());

        let over = plan(&"a".repeat(NAME_MAX_CHARS + 1), w.clone());
        assert_eq!(validation_message(validate(&over)), MSG_NAME_TOO_LONG);

        let mut long_area = plan("Aki", w.clone());
        long_area.area = "x".repeat(AREA_MAX_CHARS + 1);
        assert_eq!(validation_message(validate(&long_area)), MSG_AREA_TOO_LONG);

        let blank = plan("   ", w);
        assert_eq!(validation_message(validate(&blank)), MSG_NAME_REQUIRED);
    }

    #[test]
    fn timestamp_is_naive_iso() {
        let ts = utc_timestamp().unwrap();
        assert!(!ts.contains('Z') && !ts.contains('+'));
        let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");
        PrimitiveDateTime::parse(&ts, fmt).expect("parses back");
    }

    #[tokio::test]
    async fn submit_then_list_round_trips() {
        let db = memory_pool().await;
        let windows = vec![
            window("2025-11-21", "10:00", "12:00"),
            window("2025-11-20", "21:00", "18:00"),
            window("2025-11-21", "10:00", "12:00"),
        ];
        let input = plan("Aki", windows.clone());

        let id = submit(&db, &input).await.expect("submit");
        let items = list_all(&db).await.expect("list");

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Aki");
        assert_eq!(item.area, "Tokyo");
        assert_eq!(item.availabilities, windows);
        assert_eq!(item.food_dislike, "");
        assert_eq!(item.food_want, "ramen");
        assert!(!item.created_at.is_empty());
    }

    #[tokio::test]
    async fn rejected_submit_writes_nothing() {
        let db = memory_pool().await;
        submit(&db, &plan("Aki", vec![window("2025-11-20", "18:00", "21:00")]))
            .await
            .unwrap();

        let err = submit(&db, &plan("Ren", vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo::count(&db).await, 1);
    }

    #[tokio::test]
    async fn list_is_empty_on_fresh_store() {
        let db = memory_pool().await;
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let db = memory_pool().await;
        let w = vec![window("2025-11-20", "18:00", "21:00")];
        for name in ["first", "second", "third"] {
            submit(&db, &plan(name, w.clone())).await.unwrap();
        }

        let items = list_all(&db).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["third", "second", "first"]);
        assert!(items.windows(2).all(|pair| pair[0].id > pair[1].id));
    }

    #[tokio::test]
    async fn reads_rows_from_older_deployments() {
        let db = memory_pool().await;
        sqlx::query(
            r#"INSERT INTO plans (name, area, availabilities_json, created_at)
               VALUES ('Mio', 'Osaka', '[{"date": "2025-11-22", "start": "12:00", "end": "15:00"}]', '2025-11-01T08:00:00.000000')"#,
        )
        .execute(&db)
        .await
        .unwrap();

        let items = list_all(&db).await.unwrap();
        assert_eq!(items[0].availabilities, vec![window("2025-11-22", "12:00", "15:00")]);
        assert_eq!(items[0].food_cant, "");
        assert_eq!(items[0].created_at, "2025-11-01T08:00:00.000000");
    }

    #[tokio::test]
    async fn unreadable_availabilities_fail_the_listing() {
        let db = memory_pool().await;
        sqlx::query(
            "INSERT INTO plans (name, area, availabilities_json, created_at) VALUES ('x', 'y', '{oops', 'now')",
        )
        .execute(&db)
        .await
        .unwrap();

        assert!(matches!(list_all(&db).await, Err(AppError::Codec(_))));
    }
}
