//! The HTML is parsed with [`scraper`] (html5ever underneath) and then copied into a flat
//! arena, so every walk over the tree is a loop over an explicit stack. Deeply nested markup
//! cannot overflow the call stack.
//!
//! ```rust
//! use cikseed_spider::dom::Document;
//!
//! let doc = Document::parse("<table><tr><td>0000320193</td></tr></table>");
//! let table = doc.find_first(doc.root(), "table").unwrap();
//! let cells = doc.find_all(table, "td");
//! assert_eq!(doc.text(cells[0]), "0000320193");
//! ```
//!
//! [`scraper`]: https://docs.rs/scraper/latest/scraper/

/// Index of a node inside its [`Document`].
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

impl Node {
    /// Tag name, for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.tag().is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }
}

/// An HTML document; node `0` is always the document root.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

// elements that never carry a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// elements whose text children are written out verbatim
const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

impl Document {
    /// Parse `html` leniently; malformed markup is repaired the way a browser would.
    pub fn parse(html: &str) -> Self {
        let parsed = scraper::Html::parse_document(html);
        let mut doc = Self { nodes: Vec::new() };

        // pre-order copy; children are pushed reversed so that siblings pop in document order
        let mut stack = vec![(parsed.tree.root(), None::<NodeId>)];
        while let Some((node, parent)) = stack.pop() {
            let kind = match node.value() {
                scraper::Node::Document | scraper::Node::Fragment => NodeKind::Document,
                scraper::Node::Element(element) => NodeKind::Element {
                    name: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                },
                scraper::Node::Text(text) => NodeKind::Text((**text).to_string()),
                scraper::Node::Comment(comment) => NodeKind::Comment((**comment).to_string()),
                _ => continue,
            };

            let id = doc.push(kind, parent);
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
        }

        doc
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk of `from` and everything beneath it.
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![from],
        }
    }

    /// First element named `tag` in document order, `from` itself included.
    pub fn find_first(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(from).find(|&id| self.nodes[id].is_element(tag))
    }

    /// Every element named `tag` beneath `from`, in document order. A match is not searched
    /// any deeper, so a `td` nested in another `td` is reported once, as its outer cell.
    pub fn find_all(&self, from: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if id != from && node.is_element(tag) {
                found.push(id);
                continue;
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of every text node beneath `id`.
    pub fn text(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| match &self.nodes[n].kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize `id` and its subtree back to HTML, markup included.
    pub fn render(&self, id: NodeId) -> String {
        enum Step {
            Open(NodeId, bool),
            Close(NodeId),
        }

        let mut out = String::new();
        let mut stack = vec![Step::Open(id, false)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id, raw) => match &self.nodes[id].kind {
                    NodeKind::Document => {
                        let children = self.nodes[id].children.iter().rev();
                        stack.extend(children.map(|&child| Step::Open(child, false)));
                    }
                    NodeKind::Text(text) if raw => out.push_str(text),
                    NodeKind::Text(text) => escape_into(&mut out, text, false),
                    NodeKind::Comment(comment) => {
                        out.push_str("<!--");
                        out.push_str(comment);
                        out.push_str("-->");
                    }
                    NodeKind::Element { name, attrs } => {
                        out.push('<');
                        out.push_str(name);
                        for (key, value) in attrs {
                            out.push(' ');
                            out.push_str(key);
                            out.push_str("=\"");
                            escape_into(&mut out, value, true);
                            out.push('"');
                        }
                        out.push('>');

                        if VOID_ELEMENTS.contains(&name.as_str()) {
                            continue;
                        }
                        let raw = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                        stack.push(Step::Close(id));
                        let children = self.nodes[id].children.iter().rev();
                        stack.extend(children.map(|&child| Step::Open(child, raw)));
                    }
                },
                Step::Close(id) => {
                    if let Some(name) = self.nodes[id].tag() {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
        out
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Iterator behind [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc.nodes[id].children.iter().rev());
        Some(id)
    }
}
