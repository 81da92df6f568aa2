//! Markdown-style rendering of control narrative.
//!
//! A control or part is rendered as its own text block followed by the blocks
//! of its included children, in document order. Each block is:
//!
//! - the part's `label` property plus one space (suppressed at the root),
//!   followed by its prose with escaped `\n\n` markers turned into real
//!   paragraph breaks;
//! - with every line after the first padded by the label width, so wrapped
//!   lines align under the prose;
//! - with every line prefixed by the indent unit once per depth level;
//! - terminated by a blank line when non-empty.
//!
//! A part with neither label nor prose below the root still emits its
//! indentation and blank line. Part-name filtering happens at the recursion
//! boundary, so a skipped subtree contributes nothing, not even whitespace.

use crate::catalog::index::parameter_label;
use crate::catalog::{Control, Part, PartName};
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Depth of the root call; renders without indentation or label.
pub const ROOT_DEPTH: i32 = -1;

pub const DEFAULT_INDENT: &str = "    ";

/// Parts included by `render_as_markup` when callers want the control text.
pub const DEFAULT_PARTS: &[&str] = &["statement"];

/// OSCAL markup-multiline paragraph separator as it appears in prose.
const ESCAPED_PARAGRAPH: &str = "\\n\\n";

const PARAGRAPH_BREAK: &str = "\n\n";

/// How far down the tree a name filter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterScope {
    /// Only the direct children of the rendered part are filtered; included
    /// parts render their whole subtree (a statement keeps its items).
    #[default]
    Root,
    /// The filter is applied at every recursion boundary.
    Recursive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    pub indent_unit: String,
    pub suppress_root_label: bool,
    pub filter_scope: FilterScope,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT.to_string(),
            suppress_root_label: true,
            filter_scope: FilterScope::default(),
        }
    }
}

/// Render the parts of `control` named in `included` as markup.
///
/// Typical filters are `{statement}` for the control text or `{guidance}` for
/// supplemental guidance.
pub fn render_as_markup(control: &Control, included: &BTreeSet<PartName>) -> String {
    render_part(control, ROOT_DEPTH, &MarkupOptions::default(), Some(included))
}

/// Render `part` and its descendants starting at `depth`.
///
/// `filter` of `None` includes every child; an empty set includes none.
pub fn render_part(
    part: &Part,
    depth: i32,
    options: &MarkupOptions,
    filter: Option<&BTreeSet<PartName>>,
) -> String {
    let mut fragments = Vec::new();
    collect_fragments(part, depth, options, filter, &mut fragments);
    fragments.concat()
}

fn collect_fragments(
    part: &Part,
    depth: i32,
    options: &MarkupOptions,
    filter: Option<&BTreeSet<PartName>>,
    out: &mut Vec<String>,
) {
    if let Some(block) = text_block(part, depth, options) {
        out.push(block);
        out.push(PARAGRAPH_BREAK.to_string());
    }

    let child_filter = match options.filter_scope {
        FilterScope::Root => None,
        FilterScope::Recursive => filter,
    };
    for child in &part.parts {
        if let Some(names) = filter {
            if !child.name.as_ref().is_some_and(|name| names.contains(name)) {
                continue;
            }
        }
        collect_fragments(child, depth + 1, options, child_filter, out);
    }
}

/// Label-joined, indented text of one part, or `None` when that text is
/// empty. A bare part below depth 0 still yields its indentation.
fn text_block(part: &Part, depth: i32, options: &MarkupOptions) -> Option<String> {
    let label = if depth == ROOT_DEPTH && options.suppress_root_label {
        String::new()
    } else {
        part.label().map(|label| format!("{label} ")).unwrap_or_default()
    };

    let mut text = label.clone();
    if let Some(prose) = part.prose.as_deref() {
        text.push_str(&normalize_paragraphs(prose));
    }

    let continuation = " ".repeat(label.chars().count());
    let indent = options.indent_unit.repeat(depth.max(0) as usize);
    let lines: Vec<String> = text
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                format!("{indent}{line}")
            } else {
                format!("{indent}{continuation}{line}")
            }
        })
        .collect();
    let block = lines.join("\n");
    (!block.is_empty()).then_some(block)
}

/// Replace escaped `\n\n` markers with real paragraph breaks.
pub fn normalize_paragraphs(prose: &str) -> String {
    prose.replace(ESCAPED_PARAGRAPH, PARAGRAPH_BREAK)
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(?:insert:\s*param,\s*)?([A-Za-z0-9_.\-]+)\s*\}\}").unwrap()
});

/// Replace parameter placeholders in rendered text with `[label]`.
///
/// Both `{{ insert: param, ac-1_prm_1 }}` and the older `{{ ac-1_prm_1 }}`
/// forms are recognized. A placeholder naming a parameter the control does
/// not declare (or declares without a label) is an error.
pub fn substitute_parameters(text: &str, control: &Control) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(param_id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let label = parameter_label(control, param_id.as_str())?;
        output.push_str(&text[last..whole.start()]);
        output.push('[');
        output.push_str(label);
        output.push(']');
        last = whole.end();
    }
    output.push_str(&text[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NodeKind, Parameter, Property, name_filter};

    fn labeled(name: &str, label: Option<&str>, prose: Option<&str>, parts: Vec<Part>) -> Part {
        Part {
            name: Some(PartName::from_name(name)),
            properties: label
                .map(|value| {
                    vec![Property {
                        name: "label".to_string(),
                        value: value.to_string(),
                        class: None,
                    }]
                })
                .unwrap_or_default(),
            prose: prose.map(str::to_string),
            parts,
            ..Part::default()
        }
    }

    fn control(parts: Vec<Part>) -> Control {
        Part {
            kind: NodeKind::Control,
            id: Some("ac-6".to_string()),
            properties: vec![Property {
                name: "label".to_string(),
                value: "AC-6".to_string(),
                class: None,
            }],
            parts,
            ..Part::default()
        }
    }

    #[test]
    fn statement_items_nest_with_labels() {
        let statement = labeled(
            "statement",
            None,
            Some("The organization:"),
            vec![
                labeled(
                    "item",
                    Some("a."),
                    Some("Develops a policy;"),
                    vec![labeled("item", Some("1."), Some("Addresses purpose;"), vec![])],
                ),
                labeled("item", Some("b."), Some("Reviews the policy."), vec![]),
            ],
        );
        let rendered = render_as_markup(&control(vec![statement]), &name_filter(["statement"]));
        assert_eq!(
            rendered,
            "The organization:\n\n\
             \x20   a. Develops a policy;\n\n\
             \x20       1. Addresses purpose;\n\n\
             \x20   b. Reviews the policy.\n\n"
        );
    }

    #[test]
    fn root_label_is_suppressed_unless_disabled() {
        let part = labeled("statement", Some("AC-6"), Some("Employ least privilege."), vec![]);
        let default = render_part(&part, ROOT_DEPTH, &MarkupOptions::default(), None);
        assert_eq!(default, "Employ least privilege.\n\n");

        let options = MarkupOptions {
            suppress_root_label: false,
            ..MarkupOptions::default()
        };
        let shown = render_part(&part, ROOT_DEPTH, &options, None);
        assert_eq!(shown, "AC-6 Employ least privilege.\n\n");
    }

    #[test]
    fn escaped_paragraph_markers_become_blank_lines() {
        let part = labeled("statement", None, Some("Do X.\\n\\nDo Y."), vec![]);
        let rendered = render_part(&part, 0, &MarkupOptions::default(), None);
        assert_eq!(rendered, "Do X.\n\nDo Y.\n\n");
        assert!(!rendered.contains("\\n"));
    }

    #[test]
    fn label_continuation_pads_every_following_line() {
        let part = labeled("item", Some("a.1."), Some("first\nsecond\\n\\nthird"), vec![]);
        let rendered = render_part(&part, 1, &MarkupOptions::default(), None);
        let pad = " ".repeat("a.1. ".len());
        assert_eq!(
            rendered,
            format!("    a.1. first\n    {pad}second\n    {pad}\n    {pad}third\n\n")
        );
    }

    #[test]
    fn root_and_depth_zero_have_no_leading_indent() {
        let part = labeled("statement", None, Some("Text."), vec![]);
        let options = MarkupOptions::default();
        assert_eq!(render_part(&part, ROOT_DEPTH, &options, None), "Text.\n\n");
        assert_eq!(render_part(&part, 0, &options, None), "Text.\n\n");
        assert_eq!(render_part(&part, -5, &options, None), "Text.\n\n");
    }

    #[test]
    fn custom_indent_unit_repeats_per_level() {
        let part = labeled("item", Some("b."), Some("Text."), vec![]);
        let options = MarkupOptions {
            indent_unit: "\t".to_string(),
            ..MarkupOptions::default()
        };
        assert_eq!(render_part(&part, 2, &options, None), "\t\tb. Text.\n\n");
    }

    #[test]
    fn label_without_prose_is_emitted_alone() {
        let part = labeled("item", Some("c."), None, vec![]);
        assert_eq!(
            render_part(&part, 0, &MarkupOptions::default(), None),
            "c. \n\n"
        );
    }

    #[test]
    fn bare_parts_emit_indentation_only() {
        let options = MarkupOptions::default();
        let empty = labeled("item", None, None, vec![]);
        assert_eq!(render_part(&empty, 3, &options, None), "            \n\n");
        assert_eq!(render_part(&empty, 0, &options, None), "");
        assert_eq!(render_part(&empty, ROOT_DEPTH, &options, None), "");

        let blank = labeled("item", None, Some(""), vec![]);
        assert_eq!(render_part(&blank, 1, &options, None), "    \n\n");
    }

    #[test]
    fn bare_children_keep_their_blank_lines() {
        let parent = labeled(
            "statement",
            None,
            Some("Top."),
            vec![
                labeled("item", None, None, vec![]),
                labeled("item", None, Some(""), vec![]),
            ],
        );
        let rendered = render_part(&parent, 0, &MarkupOptions::default(), None);
        assert_eq!(rendered, "Top.\n\n    \n\n    \n\n");
    }

    #[test]
    fn filter_skips_whole_subtrees() {
        let ctl = control(vec![
            labeled("statement", None, Some("Do X."), vec![]),
            labeled(
                "guidance",
                None,
                Some("Background."),
                vec![labeled("item", Some("a."), Some("Nested guidance."), vec![])],
            ),
        ]);
        let rendered = render_as_markup(&ctl, &name_filter(["statement"]));
        assert_eq!(rendered, "Do X.\n\n");

        let guidance = render_as_markup(&ctl, &name_filter(["guidance"]));
        assert_eq!(guidance, "Background.\n\n    a. Nested guidance.\n\n");

        let none = render_as_markup(&ctl, &BTreeSet::new());
        assert_eq!(none, "");

        let all = render_part(&ctl, ROOT_DEPTH, &MarkupOptions::default(), None);
        assert_eq!(all, "Do X.\n\nBackground.\n\n    a. Nested guidance.\n\n");
    }

    #[test]
    fn recursive_scope_filters_descendants() {
        let ctl = control(vec![labeled(
            "statement",
            None,
            Some("Top."),
            vec![
                labeled("item", Some("a."), Some("Item."), vec![]),
                labeled("objective", None, Some("Objective."), vec![]),
            ],
        )]);
        let filter = name_filter(["statement", "item"]);
        let options = MarkupOptions {
            filter_scope: FilterScope::Recursive,
            ..MarkupOptions::default()
        };
        let rendered = render_part(&ctl, ROOT_DEPTH, &options, Some(&filter));
        assert_eq!(rendered, "Top.\n\n    a. Item.\n\n");

        let root_only = render_as_markup(&ctl, &filter);
        assert!(root_only.contains("Objective."));
    }

    #[test]
    fn substitutes_both_placeholder_forms() {
        let mut ctl = control(vec![]);
        ctl.parameters = vec![
            Parameter {
                id: "ac-1_prm_1".to_string(),
                label: Some("organization-defined personnel".to_string()),
                ..Parameter::default()
            },
            Parameter {
                id: "ac-1_prm_2".to_string(),
                label: Some("frequency".to_string()),
                ..Parameter::default()
            },
        ];
        let text = "Disseminate to {{ insert: param, ac-1_prm_1 }} every {{ ac-1_prm_2 }}.";
        assert_eq!(
            substitute_parameters(text, &ctl).unwrap(),
            "Disseminate to [organization-defined personnel] every [frequency]."
        );
        assert!(substitute_parameters("{{ insert: param, ac-1_prm_9 }}", &ctl).is_err());
        assert_eq!(substitute_parameters("no params", &ctl).unwrap(), "no params");
    }
}
