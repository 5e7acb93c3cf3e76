//! Tag representing repeated instances of a subordinate tag shape.

use curly_core::{ParseInfo, Result};
use curly_xml::XmlNode;

use crate::{Tag, TagBase, TagRef};

/// A tag type that can be instantiated once per occurrence inside a
/// [`TagVectorOfTags`].
pub trait Subordinate: Tag {
    /// Create a fresh instance for one occurrence of the tag.
    fn create(name: &str, mandatory: bool) -> Self;
}

/// A tag matching zero or more sibling occurrences of the same sub-schema.
///
/// Each `on_start` creates a fresh subordinate instance carrying the
/// container's name and mandatory flag; hooks are delegated to it until
/// `on_finish` moves it into the completed list. Between instances the
/// working slot is empty.
#[derive(Debug)]
pub struct TagVectorOfTags<T: Subordinate> {
    base: TagBase,
    instances: Vec<T>,
    current: Option<T>,
}

impl<T: Subordinate> TagVectorOfTags<T> {
    /// Create the tag.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
            instances: Vec::new(),
            current: None,
        }
    }

    /// Number of completed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether there are no completed instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Completed instance at the given position.
    pub fn at(&self, index: usize) -> &T {
        &self.instances[index]
    }

    /// All completed instances, in document order.
    pub fn instances(&self) -> &[T] {
        &self.instances
    }

    /// Append a populated instance before writing a configuration out.
    pub fn push_instance(&mut self, instance: T) {
        self.instances.push(instance);
        self.base.set_defined(true);
    }
}

impl<T: Subordinate> Tag for TagVectorOfTags<T> {
    fn base(&self) -> &TagBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TagBase {
        &mut self.base
    }

    /// Children of the instance currently being parsed; empty between
    /// instances.
    fn children(&self) -> &[TagRef] {
        match &self.current {
            Some(current) => current.children(),
            None => &[],
        }
    }

    fn on_start(&mut self, info: &ParseInfo) -> Result<()> {
        let mut instance = T::create(self.base.name(), self.base.is_mandatory());
        instance.on_start(info)?;
        self.current = Some(instance);
        Ok(())
    }

    fn on_string(&mut self, info: &ParseInfo, text: &str) -> Result<()> {
        let current = self
            .current
            .as_mut()
            .expect("on_string is delivered between on_start and on_finish");
        current.on_string(info, text)
    }

    fn on_finish(&mut self, info: &ParseInfo) -> Result<()> {
        let mut current = self
            .current
            .take()
            .expect("on_finish is delivered after on_start");
        current.on_finish(info)?;
        self.instances.push(current);
        self.base.set_defined(true);
        Ok(())
    }

    fn print(&self, indent: usize) -> String {
        if !self.is_defined() {
            return String::new();
        }
        self.instances
            .iter()
            .map(|instance| instance.print(indent))
            .collect()
    }

    fn print_xml(&self, nodes: &mut Vec<XmlNode>) {
        if !self.is_defined() {
            return;
        }
        for instance in &self.instances {
            instance.print_xml(nodes);
        }
    }
}
