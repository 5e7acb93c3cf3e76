use curly_core::{ParseInfo, Result};
use curly_lexer::{InputCursor, Lexer};
use curly_tree::{
    Constraint, Tag, TagBase, TagNoValue, TagRef, TagScalar, TagScalarString, TagScalarVector,
    TagVectorOfTags, shared, tag_ref,
};
use curly_xml::XmlNode;

use super::Parser;

fn parse_str(root: &TagRef, source: &str) -> Result<()> {
    let cursor = InputCursor::new(source, "test.curly");
    let lexer = Lexer::new(cursor);
    Parser::new(root.clone(), lexer).parse()
}

#[test]
fn bool_scalars_parse_into_the_schema() {
    let root = shared(TagNoValue::new("cfg", true));
    let with_true = shared(TagScalar::<bool>::new("withTrue", true));
    let with_false = shared(TagScalar::<bool>::new("withFalse", true));
    root.borrow_mut().add_child(tag_ref(&with_true)).unwrap();
    root.borrow_mut().add_child(tag_ref(&with_false)).unwrap();

    parse_str(
        &tag_ref(&root),
        "{cfg {withTrue \"true\"} {withFalse \"false\"}}",
    )
    .unwrap();

    assert_eq!(with_true.borrow().value(), Some(&true));
    assert_eq!(with_false.borrow().value(), Some(&false));
    assert!(root.borrow().is_defined());
}

/// A tag that records which hooks fired, like an application tag that
/// performs its own bookkeeping.
struct HookTag {
    base: TagBase,
    started: bool,
    finished: bool,
    with_string: bool,
    define_on_finish: bool,
}

impl HookTag {
    fn new(name: &str, mandatory: bool, define_on_finish: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
            started: false,
            finished: false,
            with_string: false,
            define_on_finish,
        }
    }
}

impl Tag for HookTag {
    fn base(&self) -> &TagBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TagBase {
        &mut self.base
    }

    fn on_start(&mut self, info: &ParseInfo) -> Result<()> {
        self.base.record_location(info);
        self.started = true;
        Ok(())
    }

    fn on_string(&mut self, _info: &ParseInfo, _text: &str) -> Result<()> {
        self.with_string = true;
        Ok(())
    }

    fn on_finish(&mut self, _info: &ParseInfo) -> Result<()> {
        self.finished = true;
        if self.define_on_finish {
            self.base.set_defined(true);
        }
        Ok(())
    }

    fn print(&self, _indent: usize) -> String {
        String::new()
    }

    fn print_xml(&self, _nodes: &mut Vec<XmlNode>) {}
}

#[test]
fn hooks_fire_even_when_a_tag_stays_undefined() {
    let first = shared(HookTag::new("firstTag", true, true));
    let second = shared(HookTag::new("secondTag", false, false));
    first.borrow_mut().add_child(tag_ref(&second)).unwrap();

    parse_str(
        &tag_ref(&first),
        "{firstTag \"lexeme1\" {secondTag \"lexeme2\"}}",
    )
    .unwrap();

    let first = first.borrow();
    assert!(first.started && first.finished && first.with_string);
    assert!(first.is_defined());

    let second = second.borrow();
    assert!(second.started && second.finished && second.with_string);
    assert!(!second.is_defined());
}

#[test]
fn double_open_brace_is_fatal() {
    let root = shared(HookTag::new("firstTag", true, true));
    let err = parse_str(&tag_ref(&root), "{{firstTag \"x\"}}").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"Unexpected start curl brace. We expected tag name, but we've got start curl brace. In file "test.curly" on line 1."#
    );
}

#[test]
fn constraint_violation_names_tag_and_value() {
    let root = shared(TagNoValue::new("cfg", true));
    let int_value = shared(
        TagScalar::<i32>::new("intValue", true).with_constraint(Constraint::min_max(0, 100)),
    );
    root.borrow_mut().add_child(tag_ref(&int_value)).unwrap();

    let err = parse_str(&tag_ref(&root), "{cfg {intValue 200}}").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"Invalid value: "200". Value must match to the constraint in tag "intValue". In file "test.curly" on line 1."#
    );
}

#[test]
fn scalar_vector_keeps_order() {
    let root = shared(TagNoValue::new("cfg", true));
    let values = shared(TagScalarVector::<i32>::new("intValues", true));
    root.borrow_mut().add_child(tag_ref(&values)).unwrap();

    parse_str(&tag_ref(&root), "{cfg {intValues 100 200 300}}").unwrap();
    assert_eq!(values.borrow().values(), &[100, 200, 300]);
}

#[test]
fn mandatory_root_missing_from_empty_input() {
    let root = shared(TagNoValue::new("cfg", true));
    let err = parse_str(&tag_ref(&root), "").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"Unexpected end of file. Undefined mandatory tag "cfg". In file "test.curly" on line 1."#
    );
}

#[test]
fn optional_root_and_empty_input_succeed_trivially() {
    let root = shared(TagNoValue::new("cfg", false));
    parse_str(&tag_ref(&root), "").unwrap();
    assert!(!root.borrow().is_defined());

    // Comments only is still an empty document.
    parse_str(&tag_ref(&root), "|| nothing here\n|# at all #|").unwrap();
    assert!(!root.borrow().is_defined());
}

#[test]
fn undefined_mandatory_child_is_reported_by_the_closing_parent() {
    let root = shared(TagNoValue::new("cfg", true));
    let port = shared(TagScalar::<i32>::new("port", true));
    root.borrow_mut().add_child(tag_ref(&port)).unwrap();

    let err = parse_str(&tag_ref(&root), "{cfg}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Undefined child mandatory tag: \"port\". Where parent is: \"cfg\". \
         In file \"test.curly\" on line 1."
    );
}

#[test]
fn root_name_mismatch_is_fatal() {
    let root = shared(TagNoValue::new("cfg", true));
    let err = parse_str(&tag_ref(&root), "{config}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected tag name. We expected \"cfg\", but we've got \"config\". \
         In file \"test.curly\" on line 1."
    );
}

#[test]
fn tag_names_are_case_sensitive() {
    let root = shared(TagNoValue::new("cfg", true));
    assert!(parse_str(&tag_ref(&root), "{CFG}").is_err());
}

#[test]
fn unknown_child_names_the_parent() {
    let root = shared(TagNoValue::new("cfg", true));
    let port = shared(TagScalar::<i32>::new("port", false));
    root.borrow_mut().add_child(tag_ref(&port)).unwrap();

    let err = parse_str(&tag_ref(&root), "{cfg {host localhost}}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected tag name. We expected one child tag of tag \"cfg\", \
         but we've got \"host\". In file \"test.curly\" on line 1."
    );
}

#[test]
fn missing_start_brace_is_fatal() {
    let root = shared(TagNoValue::new("cfg", true));
    let err = parse_str(&tag_ref(&root), "cfg {}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected start curl brace, but we've got \"cfg\". \
         In file \"test.curly\" on line 1."
    );
}

#[test]
fn unfinished_tag_at_eof_is_fatal() {
    let root = shared(TagNoValue::new("cfg", true));
    let err = parse_str(&tag_ref(&root), "{cfg").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected end of file. Still unfinished tag \"cfg\"."
    );
}

#[test]
fn trailing_content_is_fatal() {
    let root = shared(TagNoValue::new("cfg", true));
    let err = parse_str(&tag_ref(&root), "{cfg} extra").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected content. We've finished parsing, but we've got this: \"extra\". \
         In file \"test.curly\" on line 1."
    );
}

#[test]
fn vector_of_tags_collects_every_instance() {
    let root = shared(TagNoValue::new("servers", true));
    let server = shared(TagVectorOfTags::<TagScalarString>::new("server", true));
    root.borrow_mut().add_child(tag_ref(&server)).unwrap();

    parse_str(
        &tag_ref(&root),
        "{servers {server alpha} {server beta} {server gamma}}",
    )
    .unwrap();

    let server = server.borrow();
    assert_eq!(server.len(), 3);
    assert_eq!(server.at(0).value(), Some("alpha"));
    assert_eq!(server.at(2).value(), Some("gamma"));
}

#[test]
fn wrapped_string_sections_reassemble() {
    let root = shared(TagNoValue::new("cfg", true));
    let text = shared(TagScalarString::new("text", true));
    root.borrow_mut().add_child(tag_ref(&text)).unwrap();

    // Two string lexemes on separate physical lines, as the formatter
    // emits for long values.
    parse_str(
        &tag_ref(&root),
        "{cfg\n\t{text \"part one \"\n\t      \"and part two\"}\n}",
    )
    .unwrap();
    assert_eq!(text.borrow().value(), Some("part one and part two"));
}

#[test]
fn value_after_child_tag_is_fatal() {
    let root = shared(TagNoValue::new("cfg", true));
    let outer = shared(TagScalarVector::<i32>::new("outer", true));
    let inner = shared(TagScalar::<i32>::new("inner", false));
    outer.borrow_mut().add_child(tag_ref(&inner)).unwrap();
    root.borrow_mut().add_child(tag_ref(&outer)).unwrap();

    let err = parse_str(&tag_ref(&root), "{cfg {outer 1 {inner 2} 3}}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Value \"3\" for tag \"outer\" must be defined before any child tag. \
         In file \"test.curly\" on line 1."
    );
}

#[test]
fn comments_are_transparent_to_the_parser() {
    for source in [
        "{cfg {port 80}}",
        "|| leading\n{cfg {port 80}}",
        "{cfg |# here #| {port 80}}",
        "{cfg {port |# and here #| 80}}",
        "{cfg {port 80} || trailing\n}",
    ] {
        let root = shared(TagNoValue::new("cfg", true));
        let port = shared(TagScalar::<i32>::new("port", true));
        root.borrow_mut().add_child(tag_ref(&port)).unwrap();
        parse_str(&tag_ref(&root), source).unwrap();
        assert_eq!(port.borrow().value(), Some(&80), "source {source:?}");
    }
}

#[test]
fn deep_nesting_resolves_by_declaration_order() {
    let root = shared(TagNoValue::new("a", true));
    let b = shared(TagNoValue::new("b", false));
    let c = shared(TagScalar::<i32>::new("c", false));
    b.borrow_mut().add_child(tag_ref(&c)).unwrap();
    root.borrow_mut().add_child(tag_ref(&b)).unwrap();

    parse_str(&tag_ref(&root), "{a {b {c 5}}}").unwrap();
    assert_eq!(c.borrow().value(), Some(&5));
    assert!(root.borrow().is_defined());
}

#[test]
fn error_line_numbers_follow_the_input() {
    let root = shared(TagNoValue::new("cfg", true));
    let port = shared(TagScalar::<i32>::new("port", true));
    root.borrow_mut().add_child(tag_ref(&port)).unwrap();

    let err = parse_str(&tag_ref(&root), "{cfg\n  {port\n    eighty}}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value: \"eighty\". In file \"test.curly\" on line 3."
    );
}
