use crate::api::{DataMask, FilterClause, FilterValue, RlsRule};

/// Render a filter clause as a SQL-like fragment: `col op 'v'` or
/// `col op ('a','b')`.
///
/// Values are quoted verbatim; embedded quotes are not escaped. Returns
/// `None` when the clause carries no value.
pub fn format_filter(filter: &FilterClause) -> Option<String> {
    let value = match filter.val.as_ref()? {
        FilterValue::List(items) => {
            let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
            format!("({})", quoted.join(","))
        }
        FilterValue::Scalar(item) => format!("'{item}'"),
    };

    Some(format!("{} {} {}", filter.col, filter.op, value))
}

/// Flatten every data-mask entry's extra filters into row-level-security
/// rules for a guest token. Entries without filters contribute nothing.
pub fn rls_clauses(data_mask: &DataMask) -> Vec<RlsRule> {
    data_mask
        .values()
        .filter_map(|entry| entry.filters())
        .flatten()
        .filter_map(format_filter)
        .map(|clause| RlsRule { clause })
        .collect()
}
