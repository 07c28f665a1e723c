//! Line-by-line driver turning source text into a [`ParsedFlow`].

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use flowtier_core::{
    identifier::Id,
    semantic::{Edge, Node, NodeKind},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    grammar::{self, EdgeDecl, NodeDecl, Statement},
    span::{Span, Spanned},
};

/// Nodes and edges recovered from the source, plus everything that was
/// skipped or corrected on the way.
#[derive(Debug, Clone, Default)]
pub struct ParsedFlow {
    nodes: Vec<Spanned<Node>>,
    edges: Vec<Spanned<Edge>>,
    diagnostics: Vec<Diagnostic>,
}

impl ParsedFlow {
    /// Declared nodes in order of first declaration, one per id.
    pub fn nodes(&self) -> &[Spanned<Node>] {
        &self.nodes
    }

    /// Edges in source order.
    pub fn edges(&self) -> &[Spanned<Edge>] {
        &self.edges
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if no node was declared.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Spanned<Node>>, Vec<Spanned<Edge>>, Vec<Diagnostic>) {
        (self.nodes, self.edges, self.diagnostics)
    }
}

/// Accumulates statements while walking the lines.
#[derive(Default)]
struct FlowBuilder {
    nodes: IndexMap<Id, Spanned<Node>>,
    edges: Vec<Spanned<Edge>>,
    collector: DiagnosticCollector,
    seen_statement: bool,
}

impl FlowBuilder {
    fn line(&mut self, text: &str, span: Span) {
        let Some(statement) = grammar::parse_statement(text) else {
            self.unrecognized(text, span);
            return;
        };

        match statement {
            Statement::Header(marker) if !self.seen_statement => {
                debug!(marker = marker; "Skipping diagram header");
            }
            Statement::Header(_) => self.unrecognized(text, span),
            Statement::Node(decl) => self.node(decl, span),
            Statement::Edge(decl) => self.edge(decl, span),
        }
        self.seen_statement = true;
    }

    fn unrecognized(&mut self, text: &str, span: Span) {
        trace!(line = text; "Unrecognized line");
        let diagnostic = if grammar::has_unterminated_quote(text) {
            Diagnostic::warning("unterminated quoted text")
                .with_code(ErrorCode::E101)
                .with_label(span, "line skipped")
                .with_help("close the label with `\"`")
        } else {
            Diagnostic::warning("unrecognized line")
                .with_code(ErrorCode::E100)
                .with_label(span, "line skipped")
                .with_help("expected `<kind> <id> \"<label>\"` or `<id> --> <id>`")
        };
        self.collector.emit(diagnostic);
    }

    fn node(&mut self, decl: NodeDecl<'_>, span: Span) {
        if decl.actor.is_some() && decl.kind != NodeKind::Task {
            self.collector.emit(
                Diagnostic::warning(format!(
                    "actor annotation on {} `{}` is ignored",
                    decl.kind, decl.id
                ))
                .with_code(ErrorCode::E103)
                .with_label(span, "only tasks have actors"),
            );
        }

        let id = Id::new(decl.id);
        let node = Node::new(id.clone(), decl.kind, decl.label, decl.actor.map(str::to_owned));
        trace!(id = decl.id, kind:% = decl.kind; "Parsed node");

        match self.nodes.entry(id) {
            Entry::Occupied(mut entry) => {
                self.collector.emit(
                    Diagnostic::warning(format!("node `{}` is declared more than once", decl.id))
                        .with_code(ErrorCode::E200)
                        .with_label(span, "this declaration wins")
                        .with_secondary_label(entry.get().span(), "previously declared here"),
                );
                entry.insert(Spanned::new(node, span));
            }
            Entry::Vacant(entry) => {
                entry.insert(Spanned::new(node, span));
            }
        }
    }

    fn edge(&mut self, decl: EdgeDecl<'_>, span: Span) {
        trace!(from = decl.from, to = decl.to, label = decl.label; "Parsed edge");
        let edge = Edge::new(Id::new(decl.from), Id::new(decl.to), decl.label);
        self.edges.push(Spanned::new(edge, span));
    }

    fn finish(mut self, source_len: usize) -> ParsedFlow {
        if self.nodes.is_empty() {
            self.collector.emit(
                Diagnostic::error("no nodes found")
                    .with_code(ErrorCode::E102)
                    .with_label(Span::new(0..source_len), "nothing to lay out")
                    .with_help("declare at least one node, e.g. `startEvent s \"Start\"`"),
            );
        }

        ParsedFlow {
            nodes: self.nodes.into_values().collect(),
            edges: self.edges,
            diagnostics: self.collector.into_diagnostics(),
        }
    }
}

/// Parse flow source text.
///
/// Parsing is total: lines that match nothing are skipped with a warning and
/// an input without nodes yields an empty [`ParsedFlow`] carrying an `E102`
/// error diagnostic. Node and edge lines may appear in any order.
///
/// # Example
///
/// ```
/// use flowtier_parser::parse;
///
/// let flow = parse(
///     "bpmnFlow\n\
///      startEvent s \"Start\"\n\
///      s --> t\n\
///      task t \"Do\" [actor: Alice]\n",
/// );
///
/// assert_eq!(flow.nodes().len(), 2);
/// assert_eq!(flow.edges().len(), 1);
/// assert_eq!(flow.nodes()[1].actor(), Some("Alice"));
/// assert!(flow.diagnostics().is_empty());
/// ```
pub fn parse(source: &str) -> ParsedFlow {
    let mut builder = FlowBuilder::default();
    let mut offset = 0;

    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let content = grammar::strip_comment(raw_line.trim_end_matches(['\n', '\r']));
        let text = content.trim();
        if text.is_empty() {
            continue;
        }

        let leading = content.len() - content.trim_start().len();
        let start = line_start + leading;
        builder.line(text, Span::new(start..start + text.len()));
    }

    let flow = builder.finish(source.len());
    debug!(
        nodes = flow.nodes.len(),
        edges = flow.edges.len(),
        diagnostics = flow.diagnostics.len();
        "Parsed flow source"
    );
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    fn codes(flow: &ParsedFlow) -> Vec<ErrorCode> {
        flow.diagnostics().iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_parse_scenario_a() {
        let flow = parse(
            r#"startEvent s "Start"
task t "Do" [actor: Alice]
endEvent e "End"
s --> t
t --> e
"#,
        );

        let ids: Vec<_> = flow.nodes().iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, ["s", "t", "e"]);
        assert_eq!(flow.nodes()[1].actor(), Some("Alice"));
        assert_eq!(flow.edges().len(), 2);
        assert!(flow.edges().iter().all(|e| e.label().is_empty()));
        assert!(flow.diagnostics().is_empty());
    }

    #[test]
    fn test_edges_may_precede_nodes() {
        let flow = parse("a --> b\nstartEvent a \"A\"\nendEvent b \"B\"\n");

        assert_eq!(flow.nodes().len(), 2);
        assert_eq!(flow.edges()[0].from(), "a");
        assert_eq!(flow.edges()[0].to(), "b");
    }

    #[test]
    fn test_header_only_as_first_statement() {
        let flow = parse("\n  bpmnFlow\nstartEvent s \"S\"\nstray\n");

        assert_eq!(flow.nodes().len(), 1);
        assert_eq!(codes(&flow), [ErrorCode::E100]);
    }

    #[test]
    fn test_unrecognized_line_span_points_at_text() {
        let source = "startEvent s \"S\"\n   garbage here  \n";
        let flow = parse(source);

        let diag = &flow.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        let span = diag.labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "garbage here");
    }

    #[test]
    fn test_unterminated_quote_is_reported_specifically() {
        let flow = parse("startEvent s \"Start\ntask t \"Do\"\n");

        assert_eq!(flow.nodes().len(), 1);
        assert_eq!(codes(&flow), [ErrorCode::E101]);
    }

    #[test]
    fn test_comments_and_crlf() {
        let flow = parse("%% heading\r\nstartEvent s \"S\" %% entry\r\ns --> s\r\n");

        assert_eq!(flow.nodes().len(), 1);
        assert_eq!(flow.edges().len(), 1);
        assert!(flow.diagnostics().is_empty());
    }

    #[test]
    fn test_duplicate_id_last_declaration_wins_in_first_position() {
        let source = "task a \"First\"\nstartEvent s \"S\"\ngateway a \"Second\"\n";
        let flow = parse(source);

        let ids: Vec<_> = flow.nodes().iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, ["a", "s"]);
        assert_eq!(flow.nodes()[0].kind(), NodeKind::Gateway);
        assert_eq!(flow.nodes()[0].label(), "Second");

        let diag = &flow.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.labels().len(), 2);
        let previous = diag.labels()[1].span();
        assert_eq!(&source[previous.start()..previous.end()], "task a \"First\"");
    }

    #[test]
    fn test_actor_on_gateway_is_dropped_with_warning() {
        let flow = parse("gateway g \"Ok?\" [actor: Bob]\n");

        assert_eq!(flow.nodes()[0].actor(), None);
        assert_eq!(codes(&flow), [ErrorCode::E103]);
    }

    #[test]
    fn test_empty_input_reports_no_nodes() {
        for source in ["", "   \n\t\n", "bpmnFlow\n", "%% nothing\n"] {
            let flow = parse(source);
            assert!(flow.is_empty());
            assert_eq!(codes(&flow), [ErrorCode::E102], "source: {source:?}");
            assert_eq!(flow.diagnostics()[0].severity(), Severity::Error);
        }
    }

    #[test]
    fn test_garbage_only_input() {
        let flow = parse("hello world\n!!!\n<svg>\n");

        assert!(flow.is_empty());
        assert_eq!(
            codes(&flow),
            [ErrorCode::E100, ErrorCode::E100, ErrorCode::E100, ErrorCode::E102]
        );
    }

    #[test]
    fn test_edge_labels_both_surface_forms() {
        let flow = parse("G -->|yes| T1\nG --> T2 |no|\n");

        assert_eq!(flow.edges()[0].label(), "yes");
        assert_eq!(flow.edges()[1].label(), "no");
    }
}
