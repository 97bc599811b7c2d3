//! `typesVersions` entries for generated `package.json` manifests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Wildcard path redirection for one `typesVersions` range.
///
/// Serializes as `{ "*": ["tsX.Y/*"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesVersionsRedirect {
    #[serde(rename = "*")]
    pub paths: Vec<String>,
}

/// `typesVersions` fragment of a generated `package.json`, keyed by version
/// range constraint.
///
/// Keys are `>=X.Y.0-0` with single-digit components, so the map's lexical
/// order is also version order.
pub type TypesVersions = BTreeMap<String, TypesVersionsRedirect>;

/// Builds the `typesVersions` fragment for the given compiler versions.
///
/// Returns `None` for an empty list, in which case the field is omitted
/// from the manifest entirely.
///
/// # Examples
///
/// ```
/// use dts_header_core::make_types_versions_for_package_json;
///
/// let fragment = make_types_versions_for_package_json(&["3.1"]).unwrap();
/// let json = serde_json::to_value(&fragment).unwrap();
/// assert_eq!(json, serde_json::json!({ ">=3.1.0-0": { "*": ["ts3.1/*"] } }));
///
/// assert!(make_types_versions_for_package_json::<&str>(&[]).is_none());
/// ```
pub fn make_types_versions_for_package_json<S: AsRef<str>>(
    versions: &[S],
) -> Option<TypesVersions> {
    if versions.is_empty() {
        return None;
    }

    let fragment = versions
        .iter()
        .map(|version| {
            let version = version.as_ref();
            (
                format!(">={version}.0-0"),
                TypesVersionsRedirect {
                    paths: vec![format!("ts{version}/*")],
                },
            )
        })
        .collect();
    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_version() {
        let fragment = make_types_versions_for_package_json(&["3.1", "3.6"]).unwrap();
        let keys: Vec<&str> = fragment.keys().map(String::as_str).collect();
        assert_eq!(keys, [">=3.1.0-0", ">=3.6.0-0"]);
        assert_eq!(fragment[">=3.6.0-0"].paths, vec!["ts3.6/*".to_string()]);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let versions = vec!["3.4".to_string()];
        let fragment = make_types_versions_for_package_json(&versions).unwrap();
        assert!(fragment.contains_key(">=3.4.0-0"));
    }

    #[test]
    fn test_empty_list_yields_none() {
        let versions: [&str; 0] = [];
        assert_eq!(make_types_versions_for_package_json(&versions), None);
    }
}
