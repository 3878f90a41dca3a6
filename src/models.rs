use serde::{Deserialize, Deserializer, Serialize};

/// One persisted spending record. `id` and `date` are assigned at creation
/// and never change afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub comment: Option<String>,
}

/// Per-category aggregate, computed fresh on every summary request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategorySummary {
    pub category: String,
    pub amount: f64,
    pub count: i64,
    pub average_bill: f64,
}

#[derive(Deserialize, Debug)]
pub struct CreateExpensePayload {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial update. Unknown keys are ignored on deserialization. `comment`
/// distinguishes "absent" (left untouched) from an explicit null (cleared),
/// hence the nested Option.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateExpensePayload {
    pub category: Option<String>,
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Debug)]
pub struct ListExpensesQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct HealthStatus {
    pub status: &'static str,
}
