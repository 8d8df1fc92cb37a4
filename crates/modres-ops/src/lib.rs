pub mod ops_check;
pub mod ops_list;
pub mod ops_resolve;
pub mod ops_setup;
pub mod ops_tree;

use modres_util::errors::ModresError;

/// Serialize `value` as pretty JSON with a trailing newline.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> miette::Result<String> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| ModresError::Generic {
        message: format!("Failed to serialize output: {e}"),
    })?;
    json.push('\n');
    Ok(json)
}
