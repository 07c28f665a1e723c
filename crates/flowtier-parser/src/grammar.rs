//! Line grammar for the flow language.
//!
//! Every non-blank line holds exactly one statement:
//!
//! ```text
//! statement := node | edge | header
//! node      := kind ws+ ident ws* quoted (ws* actor)?
//! kind      := "startEvent" | "task" | "gateway" | "endEvent"
//! actor     := "[" ws* "actor" ws* ":" ws* name "]"      -- canonical
//!            | "actor" ws* "=" ws* quoted                  -- compatibility alias
//! edge      := ident ws* "-->" ws* ("|" text "|" ws*)? ident (ws* "|" text "|")?
//! header    := ident
//! ident     := [A-Za-z0-9_]+
//! quoted    := '"' [^"]* '"'
//! ```
//!
//! The caller strips comments and surrounding whitespace; [`statement`] must
//! then consume the whole line.

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, delimited, eof, opt, preceded, terminated},
    error::{ModalResult, StrContext},
    token::{take_till, take_while},
};

use flowtier_core::semantic::NodeKind;

/// A node declaration as written, before ids are interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeDecl<'src> {
    pub kind: NodeKind,
    pub id: &'src str,
    pub label: &'src str,
    pub actor: Option<&'src str>,
}

/// An edge as written. `label` is empty when none was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeDecl<'src> {
    pub from: &'src str,
    pub to: &'src str,
    pub label: &'src str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement<'src> {
    Node(NodeDecl<'src>),
    Edge(EdgeDecl<'src>),
    /// A bare identifier, such as the `bpmnFlow` diagram marker.
    Header(&'src str),
}

/// Identifier of letters, digits and underscores.
fn ident<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .context(StrContext::Label("identifier"))
        .parse_next(input)
}

/// Node kind keyword. Taking a whole identifier first gives the word boundary.
fn kind(input: &mut &str) -> ModalResult<NodeKind> {
    ident
        .verify_map(NodeKind::from_keyword)
        .context(StrContext::Label("node kind"))
        .parse_next(input)
}

/// Free text between double quotes.
fn quoted<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    delimited('"', take_till(0.., '"'), '"')
        .context(StrContext::Label("quoted text"))
        .parse_next(input)
}

/// `[actor: Name]`
fn bracket_actor<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    delimited(
        ('[', space0, "actor", space0, ':', space0),
        take_till(1.., ']'),
        ']',
    )
    .map(str::trim_end)
    .parse_next(input)
}

/// `actor="Name"`
fn assigned_actor<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    preceded(("actor", space0, '=', space0), quoted)
        .map(str::trim)
        .parse_next(input)
}

fn actor<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    alt((bracket_actor, assigned_actor))
        .context(StrContext::Label("actor annotation"))
        .parse_next(input)
}

fn node_decl<'src>(input: &mut &'src str) -> ModalResult<NodeDecl<'src>> {
    (
        kind,
        space1,
        ident,
        space0,
        quoted,
        opt(preceded(space0, actor)),
    )
        .map(|(kind, _, id, _, label, actor)| NodeDecl {
            kind,
            id,
            label,
            actor: actor.filter(|name| !name.is_empty()),
        })
        .parse_next(input)
}

/// `|text|`, trimmed.
fn pipe_label<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    delimited('|', take_till(0.., '|'), '|')
        .map(str::trim)
        .context(StrContext::Label("edge label"))
        .parse_next(input)
}

fn edge_decl<'src>(input: &mut &'src str) -> ModalResult<EdgeDecl<'src>> {
    (
        ident,
        space0,
        "-->",
        space0,
        opt(terminated(pipe_label, space0)),
        ident,
        opt(preceded(space0, pipe_label)),
    )
        .map(|(from, _, _, _, leading, to, trailing)| EdgeDecl {
            from,
            to,
            label: leading.or(trailing).unwrap_or_default(),
        })
        .parse_next(input)
}

/// Parse one whole statement line.
pub(crate) fn statement<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    alt((
        terminated(node_decl, eof).map(Statement::Node),
        terminated(edge_decl, eof).map(Statement::Edge),
        terminated(ident, eof).map(Statement::Header),
    ))
    .parse_next(input)
}

/// Parse a comment-free, trimmed line. `None` means the line matches nothing.
pub(crate) fn parse_statement(line: &str) -> Option<Statement<'_>> {
    statement.parse(line).ok()
}

/// Removes a trailing `%%` comment that is not inside a quoted label or a
/// `|...|` edge label.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut in_pipes = false;
    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' if !in_pipes => in_quotes = !in_quotes,
            '|' if !in_quotes => in_pipes = !in_pipes,
            '%' if !in_quotes
                && !in_pipes
                && chars.peek().is_some_and(|&(_, next)| next == '%') =>
            {
                return &line[..idx];
            }
            _ => {}
        }
    }
    line
}

/// Returns true if the line opens a quote it never closes.
pub(crate) fn has_unterminated_quote(line: &str) -> bool {
    line.chars().filter(|&c| c == '"').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(line: &str) -> NodeDecl<'_> {
        match parse_statement(line) {
            Some(Statement::Node(decl)) => decl,
            other => panic!("expected node for `{line}`, got {other:?}"),
        }
    }

    fn edge(line: &str) -> EdgeDecl<'_> {
        match parse_statement(line) {
            Some(Statement::Edge(decl)) => decl,
            other => panic!("expected edge for `{line}`, got {other:?}"),
        }
    }

    #[test]
    fn test_node_without_actor() {
        let decl = node(r#"startEvent s "Start""#);
        assert_eq!(decl.kind, NodeKind::StartEvent);
        assert_eq!(decl.id, "s");
        assert_eq!(decl.label, "Start");
        assert_eq!(decl.actor, None);
    }

    #[test]
    fn test_node_each_kind() {
        assert_eq!(node(r#"task t "Do""#).kind, NodeKind::Task);
        assert_eq!(node(r#"gateway g "Ok?""#).kind, NodeKind::Gateway);
        assert_eq!(node(r#"endEvent e "End""#).kind, NodeKind::EndEvent);
    }

    #[test]
    fn test_node_label_keeps_inner_spaces() {
        assert_eq!(
            node(r#"task T1 "Validate Order""#).label,
            "Validate Order"
        );
        assert_eq!(node(r#"task T1 """#).label, "");
    }

    #[test]
    fn test_bracket_actor() {
        assert_eq!(node(r#"task t "Do" [actor: Alice]"#).actor, Some("Alice"));
        assert_eq!(
            node(r#"task t "Do"[actor:Mary Ann  ]"#).actor,
            Some("Mary Ann")
        );
    }

    #[test]
    fn test_assigned_actor_alias() {
        assert_eq!(node(r#"task T1 "Validate" actor="Alice""#).actor, Some("Alice"));
        assert_eq!(node(r#"task T1 "Validate" actor = "Bob""#).actor, Some("Bob"));
    }

    #[test]
    fn test_empty_actor_is_no_actor() {
        assert_eq!(node(r#"task t "Do" actor="""#).actor, None);
        assert_eq!(node(r#"task t "Do" actor="  ""#).actor, None);
    }

    #[test]
    fn test_kind_needs_word_boundary() {
        assert!(parse_statement(r#"tasks t "Do""#).is_none());
        assert!(parse_statement(r#"taskt "Do""#).is_none());
    }

    #[test]
    fn test_edge_plain() {
        let decl = edge("s --> t");
        assert_eq!((decl.from, decl.to, decl.label), ("s", "t", ""));

        let tight = edge("s-->t");
        assert_eq!((tight.from, tight.to), ("s", "t"));
    }

    #[test]
    fn test_edge_label_after_arrow() {
        let decl = edge("G1 -->|yes| T2");
        assert_eq!((decl.from, decl.to, decl.label), ("G1", "T2", "yes"));
    }

    #[test]
    fn test_edge_label_after_target() {
        let decl = edge("G1 --> T2 | no |");
        assert_eq!((decl.from, decl.to, decl.label), ("G1", "T2", "no"));
    }

    #[test]
    fn test_edge_label_both_positions_keeps_first() {
        assert_eq!(edge("a -->|first| b |second|").label, "first");
    }

    #[test]
    fn test_keyword_may_be_edge_endpoint() {
        let decl = edge("task --> end");
        assert_eq!((decl.from, decl.to), ("task", "end"));
    }

    #[test]
    fn test_header() {
        assert_eq!(parse_statement("bpmnFlow"), Some(Statement::Header("bpmnFlow")));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        for line in [
            "process p \"X\"",
            "task t Do",
            "task \"Do\"",
            "s -> t",
            "s --> ",
            "--> t",
            "s --> t extra",
            "task t \"Do\" trailing",
            "task t \"Do\" [actor Alice]",
            "task t \"Do",
            "two words",
        ] {
            assert!(parse_statement(line).is_none(), "should reject `{line}`");
        }
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("s --> t %% happy path"), "s --> t ");
        assert_eq!(strip_comment("%% only a comment"), "");
        assert_eq!(strip_comment(r#"task t "100%% sure""#), r#"task t "100%% sure""#);
        assert_eq!(strip_comment("50% done"), "50% done");
    }

    #[test]
    fn test_strip_comment_keeps_percent_in_edge_labels() {
        assert_eq!(strip_comment("s -->|50%% off| q"), "s -->|50%% off| q");
        assert_eq!(strip_comment("s -->|😀%%x| q %% note"), "s -->|😀%%x| q ");
        assert_eq!(strip_comment(r#"s --> q |a "b| %% c"#), r#"s --> q |a "b| "#);
        assert_eq!(edge(strip_comment("s -->|50%% off| q")).label, "50%% off");
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(has_unterminated_quote(r#"task t "Do"#));
        assert!(!has_unterminated_quote(r#"task t "Do""#));
        assert!(!has_unterminated_quote("s --> t"));
    }
}
