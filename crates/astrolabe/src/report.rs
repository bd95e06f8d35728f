//! Plain-text console reports.
//!
//! Reports depend only on the model, never on layout, so they are printed
//! even when a drawing cannot be produced. Lines carry no trailing spaces.

use std::fmt::Write;

use crate::model::{Automaton, NodeIndex, SyntaxTree, TreeNodeKind};

const RULE_WIDTH: usize = 70;

/// Renders the automaton summary and its sorted transition table.
///
/// # Examples
///
/// ```
/// # use astrolabe::document::{AutomatonDocument, RawState, RawTransition};
/// # use astrolabe::identifier::StateId;
/// # use astrolabe::model::Automaton;
/// # use astrolabe::report::automaton_report;
/// let automaton = Automaton::from_document(AutomatonDocument {
///     states: vec![
///         RawState { id: StateId::new(0), accepting: false },
///         RawState { id: StateId::new(1), accepting: true },
///     ],
///     start_state: Some(StateId::new(0)),
///     transitions: vec![RawTransition::new(1, "b", 0), RawTransition::new(0, "a", 1)],
/// })
/// .unwrap();
///
/// let report = automaton_report(&automaton);
/// assert!(report.contains("Accepting States:  {1}"));
/// assert!(report.find("0        a          1").unwrap() < report.find("1        b          0").unwrap());
/// ```
pub fn automaton_report(automaton: &Automaton) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        "DFA (DETERMINISTIC FINITE AUTOMATON)".to_string(),
        heavy.clone(),
        format!("Total States:      {}", automaton.len()),
        format!(
            "Start State:       {}",
            automaton
                .start()
                .map_or_else(|| "none".to_string(), |id| id.to_string())
        ),
        format!(
            "Accepting States:  {{{}}}",
            automaton
                .accepting_ids()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!("Total Transitions: {}", automaton.transitions().len()),
        String::new(),
        "Transition Table:".to_string(),
        light.clone(),
        table_row("From", "Symbol", "To"),
        light,
    ];

    let mut transitions = automaton.transitions().to_vec();
    transitions.sort();
    lines.extend(transitions.iter().map(|transition| {
        table_row(
            &transition.from().to_string(),
            transition.symbol(),
            &transition.to().to_string(),
        )
    }));

    lines.push(heavy);
    lines.push(String::new());
    join_lines(&lines)
}

/// Renders the syntax-tree banner and, when the tree has a root, its
/// preorder drawing.
pub fn tree_report(tree: &SyntaxTree) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        "SYNTAX TREE".to_string(),
        heavy.clone(),
        format!("Original Regex:      {}", tree.original_regex()),
        format!("With Concatenation:  {}", tree.regex_with_concat()),
        format!("Postfix Notation:    {}", tree.postfix()),
        heavy,
    ];

    if let Some(root) = tree.root() {
        lines.push(String::new());
        lines.push("Tree Structure (preorder traversal):".to_string());
        push_subtree(tree, root, "", true, &mut lines);
        lines.push(String::new());
    }

    join_lines(&lines)
}

fn table_row(from: &str, symbol: &str, to: &str) -> String {
    format!("{from:<8} {symbol:<10} {to:<8}")
}

fn push_subtree(
    tree: &SyntaxTree,
    index: NodeIndex,
    prefix: &str,
    is_tail: bool,
    lines: &mut Vec<String>,
) {
    let node = tree.node(index);
    let connector = if is_tail { "└── " } else { "├── " };
    let value = match node.kind() {
        TreeNodeKind::Epsilon => format!("{} (epsilon)", node.value()),
        TreeNodeKind::Operator | TreeNodeKind::Literal => node.value().to_string(),
    };
    lines.push(format!("{prefix}{connector}{value}"));

    let child_prefix = format!("{prefix}{}", if is_tail { "    " } else { "│   " });
    if let Some(left) = node.left() {
        push_subtree(tree, left, &child_prefix, node.right().is_none(), lines);
    }
    if let Some(right) = node.right() {
        push_subtree(tree, right, &child_prefix, true, lines);
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut output = String::new();
    for line in lines {
        // Writing to a String cannot fail.
        let _ = writeln!(output, "{}", line.trim_end());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AutomatonDocument, RawState, RawTransition, RawTreeNode, SyntaxTreeDocument};
    use astrolabe_core::identifier::StateId;

    fn tree(root: Option<RawTreeNode>) -> SyntaxTree {
        SyntaxTree::from_document(SyntaxTreeDocument {
            root,
            original_regex: Some("ab".to_string()),
            regex_with_concat: Some("a.b".to_string()),
            postfix: Some("ab.".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_tree_report_concat() {
        let report = tree_report(&tree(Some(RawTreeNode::branch(
            0,
            ".",
            Some(RawTreeNode::leaf(1, "a")),
            Some(RawTreeNode::leaf(2, "b")),
        ))));

        let rule = "=".repeat(70);
        let expected = format!(
            "{rule}\nSYNTAX TREE\n{rule}\n\
             Original Regex:      ab\n\
             With Concatenation:  a.b\n\
             Postfix Notation:    ab.\n\
             {rule}\n\
             \n\
             Tree Structure (preorder traversal):\n\
             └── .\n    \
             ├── a\n    \
             └── b\n\
             \n"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_tree_report_nested_prefixes() {
        let report = tree_report(&tree(Some(RawTreeNode::branch(
            0,
            "|",
            Some(RawTreeNode::branch(
                1,
                "*",
                Some(RawTreeNode::leaf(2, "ε")),
                None,
            )),
            Some(RawTreeNode::leaf(3, "c")),
        ))));

        let drawing: Vec<&str> = report
            .lines()
            .skip_while(|line| !line.starts_with("Tree Structure"))
            .skip(1)
            .take(4)
            .collect();
        assert_eq!(
            drawing,
            vec![
                "└── |",
                "    ├── *",
                "    │   └── ε (epsilon)",
                "    └── c",
            ]
        );
    }

    #[test]
    fn test_tree_report_without_root() {
        let report = tree_report(&tree(None));
        assert!(!report.contains("Tree Structure"));
        assert!(report.ends_with(&format!("{}\n", "=".repeat(70))));
    }

    #[test]
    fn test_tree_report_missing_strings() {
        let tree = SyntaxTree::from_document(SyntaxTreeDocument::default()).unwrap();
        assert!(tree_report(&tree).contains("Postfix Notation:    N/A"));
    }

    fn automaton(start: Option<u32>) -> Automaton {
        Automaton::from_document(AutomatonDocument {
            states: vec![
                RawState {
                    id: StateId::new(2),
                    accepting: true,
                },
                RawState {
                    id: StateId::new(0),
                    accepting: false,
                },
                RawState {
                    id: StateId::new(1),
                    accepting: true,
                },
            ],
            start_state: start.map(StateId::new),
            transitions: vec![
                RawTransition::new(1, "b", 0),
                RawTransition::new(0, "b", 2),
                RawTransition::new(0, "a", 1),
                RawTransition::new(0, "a", 1),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_automaton_report() {
        let report = automaton_report(&automaton(Some(0)));
        let rule = "=".repeat(70);
        let dash = "-".repeat(70);
        let expected = format!(
            "{rule}\nDFA (DETERMINISTIC FINITE AUTOMATON)\n{rule}\n\
             Total States:      3\n\
             Start State:       0\n\
             Accepting States:  {{1, 2}}\n\
             Total Transitions: 4\n\
             \n\
             Transition Table:\n\
             {dash}\n\
             From     Symbol     To\n\
             {dash}\n\
             0        a          1\n\
             0        a          1\n\
             0        b          2\n\
             1        b          0\n\
             {rule}\n\
             \n"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_automaton_report_without_start() {
        let report = automaton_report(&automaton(None));
        assert!(report.contains("Start State:       none\n"));
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let report = automaton_report(&automaton(Some(0)));
        assert!(report.lines().all(|line| line == line.trim_end()));
    }
}
