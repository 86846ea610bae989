use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl ServerConfig {
    pub fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            access_token: None,
            csrf_token: None,
        }
    }
}

/// Dashboards are addressed either by numeric id or by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DashboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardId::Number(id) => write!(f, "{id}"),
            DashboardId::Text(slug) => f.write_str(slug),
        }
    }
}

impl From<i64> for DashboardId {
    fn from(id: i64) -> Self {
        DashboardId::Number(id)
    }
}

impl From<&str> for DashboardId {
    fn from(slug: &str) -> Self {
        DashboardId::Text(slug.to_string())
    }
}

impl From<String> for DashboardId {
    fn from(slug: String) -> Self {
        DashboardId::Text(slug)
    }
}

/// Right-hand side of a filter clause.
///
/// Numbers and booleans coming from the backend are kept as their textual
/// form, since they only ever end up inside a quoted SQL fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(boolean) => Some(boolean.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

impl FilterValue {
    /// Read a JSON value as a filter value. `null` entries keep their
    /// textual form; objects and nested lists cannot be read.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(FilterValue::List),
            other => scalar_text(other).map(FilterValue::Scalar),
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FilterValue::from_json(Value::deserialize(deserializer)?)
            .ok_or_else(|| de::Error::custom("filter value must be a scalar or a list of scalars"))
    }
}

/// A top-level `null` means no value (unary operators). A value that
/// cannot be read also yields `None`, which keeps the clause out of rls.
fn lenient_filter_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FilterValue>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        other => {
            let parsed = FilterValue::from_json(other);
            if parsed.is_none() {
                tracing::warn!("ignoring unreadable filter value");
            }
            Ok(parsed)
        }
    }
}

/// Malformed clauses are skipped one by one; their siblings survive.
fn lenient_filters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<FilterClause>>, D::Error> {
    let Some(raw) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let clauses = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<FilterClause>(value) {
            Ok(clause) => Some(clause),
            Err(err) => {
                tracing::warn!("dropping malformed filter clause: {err}");
                None
            }
        })
        .collect();
    Ok(Some(clauses))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub col: String,
    pub op: String,
    /// Absent for unary operators such as `IS NULL`.
    #[serde(
        default,
        deserialize_with = "lenient_filter_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub val: Option<FilterValue>,
}

#[cfg(test)]
impl FilterClause {
    pub fn new(col: impl Into<String>, op: impl Into<String>, val: FilterValue) -> Self {
        Self {
            col: col.into(),
            op: op.into(),
            val: Some(val),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtraFormData {
    #[serde(
        default,
        deserialize_with = "lenient_filters",
        skip_serializing_if = "Option::is_none"
    )]
    pub filters: Option<Vec<FilterClause>>,
    /// Everything else native filters put here (time range, granularity...).
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMaskEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_form_data: Option<ExtraFormData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own_state: Option<Value>,
}

impl DataMaskEntry {
    pub fn filters(&self) -> Option<&[FilterClause]> {
        self.extra_form_data
            .as_ref()
            .and_then(|extra| extra.filters.as_deref())
    }
}

#[cfg(test)]
impl DataMaskEntry {
    pub fn with_filters(filters: Vec<FilterClause>) -> Self {
        Self {
            extra_form_data: Some(ExtraFormData {
                filters: Some(filters),
                ..ExtraFormData::default()
            }),
            ..Self::default()
        }
    }
}

/// Applied filter selections keyed by filter/chart id.
pub type DataMask = BTreeMap<String, DataMaskEntry>;

/// Read-only snapshot of the dashboard view that share links encode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    #[serde(default)]
    pub data_mask: DataMask,
    #[serde(default)]
    pub active_tabs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermalinkRequest {
    pub data_mask: DataMask,
    pub active_tabs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermalinkResponse {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestUser {
    pub username: String,
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RlsRule {
    pub clause: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestTokenRequest {
    pub user: GuestUser,
    pub resources: Vec<GuestResource>,
    pub rls: Vec<RlsRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuestTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Error envelope the backend uses for non-2xx answers.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ApiErrorBody {
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_values_accept_scalars_and_lists() {
        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "year", "op": "IN", "val": [2020, "2021", true] }))
                .unwrap();
        assert_eq!(
            clause.val,
            Some(FilterValue::List(vec![
                "2020".to_string(),
                "2021".to_string(),
                "true".to_string()
            ]))
        );

        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "country", "op": "==", "val": "FR" })).unwrap();
        assert_eq!(clause.val, Some(FilterValue::Scalar("FR".to_string())));
    }

    #[test]
    fn unary_filter_has_no_value() {
        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "region", "op": "IS NULL" })).unwrap();
        assert_eq!(clause.val, None);

        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "region", "op": "IS NULL", "val": null }))
                .unwrap();
        assert_eq!(clause.val, None);
    }

    #[test]
    fn unreadable_values_leave_the_clause_without_value() {
        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "a", "op": "IN", "val": [["x"]] })).unwrap();
        assert_eq!(clause.val, None);

        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "a", "op": "==", "val": { "k": 1 } })).unwrap();
        assert_eq!(clause.val, None);

        assert!(serde_json::from_value::<FilterValue>(json!([["x"]])).is_err());
    }

    #[test]
    fn null_list_entries_keep_their_text() {
        let clause: FilterClause =
            serde_json::from_value(json!({ "col": "region", "op": "IN", "val": [null, "EU"] }))
                .unwrap();
        assert_eq!(
            clause.val,
            Some(FilterValue::List(vec!["null".to_string(), "EU".to_string()]))
        );
    }

    #[test]
    fn malformed_clause_does_not_take_down_its_siblings() {
        let state: DashboardState = serde_json::from_value(json!({
            "dataMask": {
                "NATIVE_FILTER-country": {
                    "extraFormData": {
                        "filters": [
                            { "col": "country", "op": "IN", "val": ["FR"] },
                            { "op": "IN", "val": ["no column"] },
                            { "col": "region", "op": "IN", "val": [null, "EU"] }
                        ]
                    }
                }
            }
        }))
        .unwrap();

        let filters = state.data_mask["NATIVE_FILTER-country"].filters().unwrap();
        let columns: Vec<&str> = filters.iter().map(|f| f.col.as_str()).collect();
        assert_eq!(columns, vec!["country", "region"]);
    }

    #[test]
    fn data_mask_keeps_unknown_extra_form_data() {
        let state: DashboardState = serde_json::from_value(json!({
            "dataMask": {
                "NATIVE_FILTER-1": {
                    "id": "NATIVE_FILTER-1",
                    "extraFormData": {
                        "filters": [{ "col": "country", "op": "IN", "val": ["FR"] }],
                        "time_range": "Last week"
                    },
                    "filterState": { "value": ["FR"] }
                }
            },
            "activeTabs": ["TAB-1"]
        }))
        .unwrap();

        let entry = &state.data_mask["NATIVE_FILTER-1"];
        assert_eq!(entry.filters().map(|f| f.len()), Some(1));
        let round_trip = serde_json::to_value(&state).unwrap();
        assert_eq!(
            round_trip["dataMask"]["NATIVE_FILTER-1"]["extraFormData"]["time_range"],
            json!("Last week")
        );
        assert_eq!(round_trip["activeTabs"], json!(["TAB-1"]));
    }

    #[test]
    fn dashboard_id_displays_and_parses_both_forms() {
        assert_eq!(DashboardId::from(42).to_string(), "42");
        assert_eq!(DashboardId::from("sales").to_string(), "sales");
        assert_eq!(
            serde_json::from_value::<DashboardId>(json!(7)).unwrap(),
            DashboardId::Number(7)
        );
        assert_eq!(
            serde_json::from_value::<DashboardId>(json!("world_health")).unwrap(),
            DashboardId::Text("world_health".to_string())
        );
    }

    #[test]
    fn guest_token_request_wire_shape() {
        let request = GuestTokenRequest {
            user: GuestUser {
                username: "guest".to_string(),
                first_name: "guest".to_string(),
            },
            resources: vec![GuestResource {
                kind: "dashboard".to_string(),
                id: "42".to_string(),
            }],
            rls: vec![RlsRule {
                clause: "country IN ('FR')".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user": { "username": "guest", "first_name": "guest" },
                "resources": [{ "type": "dashboard", "id": "42" }],
                "rls": [{ "clause": "country IN ('FR')" }]
            })
        );
    }

    #[test]
    fn api_error_message_handles_objects() {
        let body: ApiErrorBody =
            serde_json::from_value(json!({ "message": { "user": ["required"] } })).unwrap();
        assert_eq!(body.message_text().as_deref(), Some(r#"{"user":["required"]}"#));
        let body: ApiErrorBody = serde_json::from_value(json!({ "message": "Forbidden" })).unwrap();
        assert_eq!(body.message_text().as_deref(), Some("Forbidden"));
    }
}
