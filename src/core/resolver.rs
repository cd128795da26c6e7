// LogSift - core/resolver.rs
//
// Error code -> cause + corrective actions lookup.
// Pure, synchronous, read-only over a MappingTable.

use crate::core::mapping::MappingTable;
use crate::core::model::ResolveResult;
use crate::util::constants;
use std::collections::BTreeSet;

/// Resolve `code` against `table`.
///
/// The first row carrying the code decides the cause; the actions are
/// gathered from every row sharing that cause, deduplicated and sorted.
pub fn resolve(table: &MappingTable, code: &str) -> ResolveResult {
    let code = code.trim();

    if !table.is_loaded() {
        return ResolveResult::TableUnavailable;
    }
    if code.is_empty() {
        return ResolveResult::InvalidInput;
    }

    let Some(row) = table.find_code(code) else {
        tracing::debug!(code, "Error code not in mapping table");
        return ResolveResult::NotFound;
    };

    let cause = row
        .cause
        .clone()
        .unwrap_or_else(|| constants::NO_CAUSE_TEXT.to_string());

    let actions: BTreeSet<&str> = table
        .rows()
        .iter()
        .filter(|r| r.cause.as_deref() == Some(cause.as_str()))
        .map(|r| r.corrective_action.as_str())
        .filter(|a| !a.is_empty())
        .collect();

    let actions = if actions.is_empty() {
        constants::NO_ACTION_TEXT.to_string()
    } else {
        actions.into_iter().collect::<Vec<_>>().join("\n")
    };

    tracing::debug!(code, cause = %cause, "Error code resolved");
    ResolveResult::Found { cause, actions }
}
