//! JSON artifact: the entry catalogue of one model as a plain array.

use serde_json::{Value, json};

use crate::pipeline::ModelExpansion;

/// Render one model's entries as pretty-printed JSON.
pub fn render(model: &ModelExpansion) -> String {
    let entries: Vec<Value> = model
        .entries
        .iter()
        .map(|entry| {
            json!({
                "path": entry.dotted(),
                "type": entry.value_type.qualified_name(),
                "elementType": entry.element_type.as_ref().map(|t| t.qualified_name()),
                "model": entry.model_valued,
                "firstDegree": entry.first_degree(),
            })
        })
        .collect();

    let document = json!({
        "model": model.identity.qualified_name(),
        "entries": entries,
    });
    // json! output is always serializable; fall back to the compact form on
    // the unreachable error path rather than panicking.
    serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelmeta_core::{MetadataEntry, TypeIdentity};

    #[test]
    fn renders_entries_with_paths_and_types() {
        let model = ModelExpansion {
            identity: TypeIdentity::model("com.example", "Group"),
            entries: vec![MetadataEntry {
                path: vec!["members".to_string()],
                value_type: TypeIdentity::opaque("java.util.List"),
                element_type: Some(TypeIdentity::model("com.example", "Person")),
                model_valued: true,
            }],
        };

        let rendered = render(&model);
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["model"], "com.example.Group");
        assert_eq!(parsed["entries"][0]["path"], "members");
        assert_eq!(parsed["entries"][0]["elementType"], "com.example.Person");
        assert_eq!(parsed["entries"][0]["firstDegree"], true);
    }
}
