use serde::{Deserialize, Deserializer, Serialize};

/// One date/time window a respondent is free. The three tokens are stored
/// as given; order, format and inverted ranges are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: String,
    pub start: String,
    pub end: String,
}

/// Body of `POST /api/submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanIn {
    pub name: String,
    pub area: String,
    pub availabilities: Vec<Availability>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub food_dislike: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub food_weak: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub food_cant: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub food_want: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
}

/// A stored submission as returned to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanItem {
    pub id: i64,
    pub name: String,
    pub area: String,
    pub availabilities: Vec<Availability>,
    pub food_dislike: String,
    pub food_weak: String,
    pub food_cant: String,
    pub food_want: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub items: Vec<PlanItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_fields_default_to_empty() {
        let plan: PlanIn = serde_json::from_str(
            r#"{
                "name": "Aki",
                "area": "Tokyo",
                "availabilities": [{"date": "2025-11-20", "start": "18:00", "end": "21:00"}],
                "food_weak": null,
                "food_want": "ramen"
            }"#,
        )
        .unwrap();
        assert_eq!(plan.food_dislike, "");
        assert_eq!(plan.food_weak, "");
        assert_eq!(plan.food_cant, "");
        assert_eq!(plan.food_want, "ramen");
    }

    #[test]
    fn availabilities_are_required() {
        let err = serde_json::from_str::<PlanIn>(r#"{"name": "Aki", "area": "Tokyo"}"#).unwrap_err();
        assert!(err.to_string().contains("availabilities"));
    }
}
