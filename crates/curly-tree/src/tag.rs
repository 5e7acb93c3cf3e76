//! The tag capability interface and its shared base state.

use std::cell::RefCell;
use std::rc::Rc;

use curly_core::{Error, ParseInfo, Result};
use curly_xml::XmlNode;

/// Shared handle to a tag in a schema tree.
///
/// The tree is a single-threaded shared-mutation structure: the caller
/// keeps typed handles to the tags it wants to query while the parser
/// mutates the same nodes through the tree. `Rc<RefCell<_>>` makes that
/// explicit, and keeps the whole tree `!Send`: parsing into one tree from
/// two threads is not a supported use and now cannot compile.
pub type TagRef = Rc<RefCell<dyn Tag>>;

/// Wrap a tag for use in a tree.
pub fn shared<T: Tag>(tag: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(tag))
}

/// Coerce a typed tag handle into a [`TagRef`].
pub fn tag_ref<T: Tag + 'static>(tag: &Rc<RefCell<T>>) -> TagRef {
    tag.clone()
}

/// State common to every tag kind.
pub struct TagBase {
    name: String,
    mandatory: bool,
    defined: bool,
    children: Vec<TagRef>,
    line: usize,
    column: usize,
}

impl TagBase {
    /// Create base state for a tag with the given name.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            name: name.into(),
            mandatory,
            defined: false,
            children: Vec::new(),
            line: 0,
            column: 0,
        }
    }

    /// Name of the tag, compared case-sensitively against input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the tag must be defined by the end of the parse.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The raw defined flag, without looking at children.
    pub fn defined_flag(&self) -> bool {
        self.defined
    }

    /// Set or clear the defined flag.
    pub fn set_defined(&mut self, on: bool) {
        self.defined = on;
    }

    /// Registered children in declaration order.
    pub fn children(&self) -> &[TagRef] {
        &self.children
    }

    /// Register a child. A name may appear at most once under one parent.
    pub fn add_child(&mut self, child: TagRef) -> Result<()> {
        let name = child.borrow().name().to_string();
        if self.children.iter().any(|c| c.borrow().name() == name) {
            return Err(Error::DuplicateChildTag {
                child: name,
                parent: self.name.clone(),
            });
        }
        self.children.push(child);
        Ok(())
    }

    /// Remember where in the input this tag started.
    pub fn record_location(&mut self, info: &ParseInfo) {
        self.line = info.line_number();
        self.column = info.column_number();
    }

    /// Line recorded at `on_start`, 1-based; 0 before any parse.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Column recorded at `on_start`, 1-based; 0 before any parse.
    pub fn column_number(&self) -> usize {
        self.column
    }
}

impl std::fmt::Debug for TagBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagBase")
            .field("name", &self.name)
            .field("mandatory", &self.mandatory)
            .field("defined", &self.defined)
            .field("children", &self.children.len())
            .finish()
    }
}

/// A node in a schema tree.
///
/// The parser drives a tag through `on_start`, zero or more `on_string`
/// deliveries and `on_finish`; the printers walk defined tags back into
/// text. Implementors store their state in a [`TagBase`] and expose it via
/// `base`/`base_mut`; everything else has a default.
///
/// `on_string` and `on_finish` are only meaningful between `on_start` and
/// the matching `on_finish`, which is the order the parser guarantees.
pub trait Tag {
    /// The tag's shared base state.
    fn base(&self) -> &TagBase;
    /// The tag's shared base state, mutably.
    fn base_mut(&mut self) -> &mut TagBase;

    /// Name of the tag.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Whether the tag must be defined by the end of the parse.
    fn is_mandatory(&self) -> bool {
        self.base().is_mandatory()
    }

    /// Whether the tag has been defined. A tag with children counts as
    /// defined only if no mandatory child is undefined.
    fn is_defined(&self) -> bool {
        for child in self.children() {
            let child = child.borrow();
            if child.is_mandatory() && !child.is_defined() {
                return false;
            }
        }
        self.base().defined_flag()
    }

    /// Set or clear the defined flag.
    fn set_defined(&mut self, on: bool) {
        self.base_mut().set_defined(on);
    }

    /// Children in declaration order.
    fn children(&self) -> &[TagRef] {
        self.base().children()
    }

    /// Register a child tag.
    fn add_child(&mut self, child: TagRef) -> Result<()> {
        self.base_mut().add_child(child)
    }

    /// Whether any child is already defined.
    fn is_any_child_defined(&self) -> bool {
        self.children().iter().any(|c| c.borrow().is_defined())
    }

    /// Line recorded at `on_start`, 1-based.
    fn line_number(&self) -> usize {
        self.base().line_number()
    }

    /// Column recorded at `on_start`, 1-based.
    fn column_number(&self) -> usize {
        self.base().column_number()
    }

    /// Called when the parser opens this tag.
    fn on_start(&mut self, info: &ParseInfo) -> Result<()> {
        self.base_mut().record_location(info);
        Ok(())
    }

    /// Called for each string lexeme delivered to this tag.
    fn on_string(&mut self, info: &ParseInfo, text: &str) -> Result<()>;

    /// Called when the parser closes this tag.
    fn on_finish(&mut self, info: &ParseInfo) -> Result<()>;

    /// Print this tag in the brace dialect, one tab per indent level.
    /// An undefined tag prints nothing.
    fn print(&self, indent: usize) -> String;

    /// Append this tag's XML form to `nodes`. An undefined tag appends
    /// nothing.
    fn print_xml(&self, nodes: &mut Vec<XmlNode>);
}

/// Assemble the standard brace-dialect block: indentation, `{name`, the
/// pre-rendered value section, children at indent+1, and the closing brace.
pub(crate) fn print_block(tag: &dyn Tag, indent: usize, values: &str) -> String {
    let mut out = String::new();
    out.push_str(&"\t".repeat(indent));
    out.push('{');
    out.push_str(tag.name());
    out.push_str(values);
    if !tag.children().is_empty() {
        out.push('\n');
        for child in tag.children() {
            out.push_str(&child.borrow().print(indent + 1));
        }
        out.push_str(&"\t".repeat(indent));
    }
    out.push('}');
    out.push('\n');
    out
}

/// Fail if any mandatory child of `tag` is still undefined.
pub(crate) fn check_mandatory_children(tag: &dyn Tag, info: &ParseInfo) -> Result<()> {
    for child in tag.children() {
        let child = child.borrow();
        if child.is_mandatory() && !child.is_defined() {
            return Err(Error::UndefinedChildMandatoryTag {
                child: child.name().to_string(),
                parent: tag.name().to_string(),
                info: info.clone(),
            });
        }
    }
    Ok(())
}

/// Append the XML forms of `tag`'s children to an element's node list.
pub(crate) fn print_children_xml(tag: &dyn Tag, nodes: &mut Vec<XmlNode>) {
    for child in tag.children() {
        child.borrow().print_xml(nodes);
    }
}
