use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog used across the suite: two groups, a control with enhancements,
/// labeled statement items, guidance, and parameters.
pub fn fixture_catalog(id: &str, title: &str) -> Value {
    json!({
        "catalog": {
            "id": id,
            "metadata": {"title": title, "version": "fixture", "oscal_version": "1.0.0"},
            "groups": [
                {
                    "id": "ac",
                    "class": "family",
                    "title": "Access Control",
                    "controls": [
                        {
                            "id": "ac-1",
                            "title": "Policy and Procedures",
                            "parameters": [
                                {"id": "ac-1_prm_1", "label": "organization-defined personnel or roles"},
                                {"id": "ac-1_prm_2", "label": "organization-defined frequency"}
                            ],
                            "properties": [{"name": "label", "value": "AC-1"}],
                            "parts": [
                                {
                                    "id": "ac-1_smt",
                                    "name": "statement",
                                    "prose": "The organization:",
                                    "parts": [
                                        {
                                            "id": "ac-1_smt.a",
                                            "name": "item",
                                            "properties": [{"name": "label", "value": "a."}],
                                            "prose": "Develops and disseminates to {{ insert: param, ac-1_prm_1 }}:",
                                            "parts": [
                                                {
                                                    "id": "ac-1_smt.a.1",
                                                    "name": "item",
                                                    "properties": [{"name": "label", "value": "1."}],
                                                    "prose": "An access control policy; and"
                                                },
                                                {
                                                    "id": "ac-1_smt.a.2",
                                                    "name": "item",
                                                    "properties": [{"name": "label", "value": "2."}],
                                                    "prose": "Procedures to facilitate the policy.\nSee also AC-2."
                                                }
                                            ]
                                        },
                                        {
                                            "id": "ac-1_smt.b",
                                            "name": "item",
                                            "properties": [{"name": "label", "value": "b."}],
                                            "prose": "Reviews the policy {{ ac-1_prm_2 }}."
                                        }
                                    ]
                                },
                                {
                                    "id": "ac-1_gdn",
                                    "name": "guidance",
                                    "prose": "Policy guidance."
                                }
                            ]
                        },
                        {
                            "id": "ac-6",
                            "title": "Least Privilege",
                            "properties": [{"name": "label", "value": "AC-6"}],
                            "parts": [
                                {"id": "ac-6_smt", "name": "statement", "prose": "Do X.\\n\\nDo Y."},
                                {"id": "ac-6_gdn", "name": "guidance", "prose": "Organizations employ least privilege."}
                            ],
                            "controls": [
                                {
                                    "id": "ac-6.1",
                                    "title": "Authorize Access to Security Functions",
                                    "properties": [{"name": "label", "value": "AC-6(1)"}],
                                    "parts": [
                                        {"id": "ac-6.1_smt", "name": "statement", "prose": "Authorize access."}
                                    ]
                                }
                            ]
                        }
                    ]
                },
                {
                    "id": "au",
                    "class": "family",
                    "title": "Audit and Accountability",
                    "controls": [
                        {"id": "au-1", "title": "Audit Policy", "parts": []}
                    ]
                }
            ]
        }
    })
}

pub fn write_json(dir: &Path, file: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(file);
    let body = serde_json::to_string_pretty(value)?;
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn write_text(dir: &Path, file: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(file);
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Names of the parts whose prose shows up in `rendered`.
pub fn contributing_parts<'a>(rendered: &str, candidates: &[(&'a str, &str)]) -> Vec<&'a str> {
    candidates
        .iter()
        .filter(|(_, prose)| rendered.contains(prose))
        .map(|(name, _)| *name)
        .collect()
}
