use insta::assert_snapshot;
use xot::{NameId, Xot};

use xee_dtd::{
    Attribute, AttributeDef, AttributeType, Code, ContentSpecNode, ContentSpecType, ContentSpecs,
    DefaultKind, DiagnosticArg, Diagnostics, DocumentHandler, Severity, SourceSpan, Validator,
    ValidatorBuilder,
};

struct Names {
    xot: Xot,
    doc: NameId,
    item: NameId,
    id: NameId,
    idref: NameId,
    idrefs: NameId,
}

impl Names {
    fn new() -> Self {
        let mut xot = Xot::new();
        let doc = xot.add_name("doc");
        let item = xot.add_name("item");
        let id = xot.add_name("id");
        let idref = xot.add_name("ref");
        let idrefs = xot.add_name("refs");
        Self {
            xot,
            doc,
            item,
            id,
            idref,
            idrefs,
        }
    }

    fn name(&mut self, name: &str) -> NameId {
        self.xot.add_name(name)
    }
}

fn span(start: usize, end: usize) -> SourceSpan {
    SourceSpan::new(start, end)
}

fn declare_empty<H: DocumentHandler>(v: &mut Validator<H, Diagnostics>, name: NameId) {
    v.declare_element_content(
        name,
        ContentSpecType::Empty,
        None,
        false,
        SourceSpan::empty(),
    );
}

fn declare_star<H: DocumentHandler>(
    v: &mut Validator<H, Diagnostics>,
    parent: NameId,
    child: NameId,
) {
    let specs = v.content_specs_mut();
    let leaf = specs.leaf(child);
    let root = specs.zero_or_more(leaf);
    v.declare_element_content(
        parent,
        ContentSpecType::Children,
        Some(root),
        false,
        SourceSpan::empty(),
    );
}

// <!ELEMENT doc (item*)>
// <!ELEMENT item EMPTY>
// <!ATTLIST item id ID #IMPLIED ref IDREF #IMPLIED refs IDREFS #IMPLIED>
fn declare_items<H: DocumentHandler>(v: &mut Validator<H, Diagnostics>, n: &Names) {
    declare_star(v, n.doc, n.item);
    declare_empty(v, n.item);
    v.declare_attribute(
        n.item,
        AttributeDef::new(n.id, AttributeType::Id, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.item,
        AttributeDef::new(n.idref, AttributeType::Idref, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.item,
        AttributeDef::new(n.idrefs, AttributeType::Idrefs, DefaultKind::Implied),
    );
    v.end_dtd();
}

fn item<H: DocumentHandler>(
    v: &mut Validator<H, Diagnostics>,
    n: &Names,
    attributes: Vec<Attribute>,
    at: SourceSpan,
) {
    v.start_element(n.item, attributes, at);
    v.end_element(n.item, at);
}

#[test]
fn test_duplicate_id_reported_once() {
    let n = Names::new();
    let mut v = Validator::collecting();
    declare_items(&mut v, &n);

    v.start_element(n.doc, vec![], span(0, 5));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(5, 10));
    item(&mut v, &n, vec![Attribute::new(n.id, " x ")], span(10, 15));
    item(&mut v, &n, vec![Attribute::new(n.id, "y")], span(15, 20));
    v.end_element(n.doc, span(20, 26));

    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Code::IdNotUnique);
    assert_eq!(diagnostics[0].span, span(10, 15));
    assert_eq!(diagnostics[0].args, vec![DiagnosticArg::Text("x".to_string())]);
    assert_snapshot!(diagnostics[0].message(&n.xot), @r#"ID value "x" is not unique."#);
}

#[test]
fn test_unresolved_idref_reported_once_at_first_use() {
    let n = Names::new();
    let mut v = Validator::collecting();
    declare_items(&mut v, &n);

    v.start_element(n.doc, vec![], span(0, 5));
    item(&mut v, &n, vec![Attribute::new(n.idref, "missing")], span(5, 10));
    item(&mut v, &n, vec![Attribute::new(n.idref, "missing")], span(10, 15));
    item(&mut v, &n, vec![Attribute::new(n.idref, "x")], span(15, 20));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(20, 25));
    item(
        &mut v,
        &n,
        vec![Attribute::new(n.idrefs, " x  missing other ")],
        span(25, 30),
    );
    // references are only resolved at the end of the root element
    assert!(v.reporter().is_empty());
    v.end_element(n.doc, span(30, 36));

    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(
        v.reporter().codes(),
        vec![Code::IdRefWithoutId, Code::IdRefWithoutId]
    );
    assert_eq!(diagnostics[0].span, span(5, 10));
    assert_eq!(
        diagnostics[0].args,
        vec![DiagnosticArg::Text("missing".to_string())]
    );
    assert_eq!(diagnostics[1].span, span(25, 30));
    assert_eq!(
        diagnostics[1].args,
        vec![DiagnosticArg::Text("other".to_string())]
    );
}

#[test]
fn test_fixed_attribute() {
    let mut n = Names::new();
    let version = n.name("version");
    let mut v = Validator::collecting();
    v.declare_element_content(
        n.doc,
        ContentSpecType::Any,
        None,
        false,
        SourceSpan::empty(),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(version, AttributeType::Cdata, DefaultKind::Fixed).with_default("1.0"),
    );
    v.end_dtd();

    let attributes = v.start_element(n.doc, vec![Attribute::new(version, "1.0")], span(0, 20));
    v.end_element(n.doc, span(20, 26));
    assert!(v.reporter().is_empty());
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "1.0");
    assert!(attributes[0].specified);

    let attributes = v.start_element(n.doc, vec![Attribute::new(version, "2.0")], span(0, 20));
    v.end_element(n.doc, span(20, 26));
    assert_eq!(v.reporter().codes(), vec![Code::FixedAttributeMismatch]);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "2.0");
    let diagnostic = v.reporter().iter().next().unwrap();
    assert_snapshot!(diagnostic.message(&n.xot), @r#"Attribute "version" of element type "doc" has the value "2.0" but must have the fixed value "1.0"."#);

    let attributes = v.start_element(n.doc, vec![], span(0, 5));
    v.end_element(n.doc, span(5, 11));
    assert_eq!(v.reporter().len(), 1);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "1.0");
    assert!(!attributes[0].specified);
}

#[test]
fn test_reset_isolates_documents() {
    let n = Names::new();
    let mut v = Validator::collecting();
    declare_items(&mut v, &n);
    v.start_element(n.doc, vec![], span(0, 5));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(5, 10));
    v.end_element(n.doc, span(10, 16));
    v.end_document();
    assert!(v.reporter().is_empty());

    v.reset();
    declare_items(&mut v, &n);
    v.start_element(n.doc, vec![], span(0, 5));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(5, 10));
    v.end_element(n.doc, span(10, 16));
    v.end_document();
    assert!(v.reporter().is_empty());

    v.reset();
    declare_items(&mut v, &n);
    v.start_element(n.doc, vec![], span(0, 5));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(5, 10));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(10, 15));
    v.end_element(n.doc, span(15, 21));
    v.end_document();
    assert_eq!(v.reporter().codes(), vec![Code::IdNotUnique]);
}

#[test]
fn test_reset_forgets_declarations() {
    let n = Names::new();
    let mut v = Validator::collecting();
    declare_items(&mut v, &n);
    v.reset();
    v.end_dtd();
    v.start_element(n.doc, vec![], span(0, 5));
    v.end_element(n.doc, span(5, 11));
    assert_eq!(v.reporter().codes(), vec![Code::ElementNotDeclared]);
}

#[test]
fn test_disabled_validation_still_normalizes() {
    let mut n = Names::new();
    let tokens = n.name("tokens");
    let lang = n.name("lang");
    let version = n.name("version");
    let other = n.name("other");
    let mut v = ValidatorBuilder::new()
        .validation(false)
        .build((), Diagnostics::new());
    declare_items(&mut v, &n);
    v.declare_attribute(
        n.doc,
        AttributeDef::new(tokens, AttributeType::Nmtokens, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(lang, AttributeType::Nmtoken, DefaultKind::Default).with_default("en"),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(version, AttributeType::Cdata, DefaultKind::Required),
    );

    let attributes = v.start_element(n.doc, vec![Attribute::new(tokens, "  a   b  ")], span(0, 5));
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].value, "a b");
    assert_eq!(attributes[1].name, lang);
    assert_eq!(attributes[1].value, "en");
    v.start_element(other, vec![], span(5, 10));
    v.end_element(other, span(10, 15));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(15, 20));
    item(&mut v, &n, vec![Attribute::new(n.id, "x")], span(20, 25));
    item(&mut v, &n, vec![Attribute::new(n.idref, "nowhere")], span(25, 30));
    v.end_element(n.doc, span(30, 36));
    v.end_document();

    assert!(v.reporter().is_empty());
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Start(NameId, usize),
    End(NameId),
    Characters(String),
    Ignorable(String),
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
}

impl DocumentHandler for Recorder {
    fn start_element(&mut self, name: NameId, attributes: &[Attribute]) {
        self.events.push(Event::Start(name, attributes.len()));
    }

    fn end_element(&mut self, name: NameId) {
        self.events.push(Event::End(name));
    }

    fn characters(&mut self, text: &str) {
        self.events.push(Event::Characters(text.to_string()));
    }

    fn ignorable_whitespace(&mut self, text: &str) {
        self.events.push(Event::Ignorable(text.to_string()));
    }
}

#[test]
fn test_element_content() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let mut v = ValidatorBuilder::new().build(Recorder::default(), Diagnostics::new());
    // <!ELEMENT doc (a,b)>
    let specs = v.content_specs_mut();
    let a_leaf = specs.leaf(a);
    let b_leaf = specs.leaf(b);
    let root = specs.seq(a_leaf, b_leaf);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        false,
        span(0, 20),
    );
    declare_empty(&mut v, a);
    declare_empty(&mut v, b);
    v.end_dtd();

    v.start_element(n.doc, vec![], span(30, 35));
    v.characters("\n  ");
    v.start_element(b, vec![], span(38, 42));
    v.end_element(b, span(38, 42));
    v.characters("text");
    v.end_element(n.doc, span(46, 52));

    assert_eq!(
        v.handler().events,
        vec![
            Event::Start(n.doc, 0),
            Event::Ignorable("\n  ".to_string()),
            Event::Start(b, 0),
            Event::End(b),
            Event::Characters("text".to_string()),
            Event::End(n.doc),
        ]
    );
    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Code::ContentInvalid);
    assert_eq!(diagnostics[0].span, span(46, 52));
    assert_snapshot!(diagnostics[0].message(&n.xot), @r#"The content of element type "doc" is invalid starting at child 0."#);
}

#[test]
fn test_incomplete_and_empty_content() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let mut v = Validator::collecting();
    let specs = v.content_specs_mut();
    let a_leaf = specs.leaf(a);
    let b_leaf = specs.leaf(b);
    let root = specs.seq(a_leaf, b_leaf);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        false,
        span(0, 20),
    );
    declare_empty(&mut v, a);
    declare_empty(&mut v, b);
    v.end_dtd();

    v.start_element(n.doc, vec![], span(30, 35));
    v.start_element(a, vec![], span(35, 40));
    // whitespace counts as content of an EMPTY element
    v.characters(" ");
    v.end_element(a, span(40, 44));
    v.end_element(n.doc, span(44, 50));

    assert_eq!(
        v.reporter().codes(),
        vec![Code::ContentInvalid, Code::ContentIncomplete]
    );
}

#[test]
fn test_standalone_whitespace_in_external_element_content() {
    let mut n = Names::new();
    let a = n.name("a");
    let mut v = ValidatorBuilder::new()
        .standalone(true)
        .build(Recorder::default(), Diagnostics::new());
    let specs = v.content_specs_mut();
    let leaf = specs.leaf(a);
    let root = specs.zero_or_more(leaf);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        true,
        span(0, 20),
    );
    declare_empty(&mut v, a);
    v.end_dtd();

    v.start_element(n.doc, vec![], span(30, 35));
    v.characters("\n");
    v.start_element(a, vec![], span(36, 40));
    v.end_element(a, span(36, 40));
    v.end_element(n.doc, span(40, 46));

    assert!(v
        .handler()
        .events
        .contains(&Event::Characters("\n".to_string())));
    assert_eq!(v.reporter().codes(), vec![Code::ContentInvalid]);
}

#[test]
fn test_mixed_content() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let c = n.name("c");
    let mut v = Validator::collecting();
    let root = v.content_specs_mut().mixed(&[a, b]);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Mixed,
        Some(root),
        false,
        span(0, 20),
    );
    declare_empty(&mut v, a);
    declare_empty(&mut v, b);
    declare_empty(&mut v, c);
    v.end_dtd();

    v.start_element(n.doc, vec![], span(30, 35));
    for (i, child) in [b, a, b, c].into_iter().enumerate() {
        v.characters("some text");
        v.start_element(child, vec![], span(40 + i, 41 + i));
        v.end_element(child, span(40 + i, 41 + i));
    }
    v.end_element(n.doc, span(50, 56));

    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Code::ContentInvalid);
    // text, b, text, a, text, b, text, c
    assert_eq!(
        diagnostics[0].args,
        vec![DiagnosticArg::Name(n.doc), DiagnosticArg::Index(7)]
    );
}

#[test]
fn test_declaration_diagnostics() {
    let mut n = Names::new();
    let list = n.name("list");
    let missing = n.name("missing");
    let a = n.name("a");
    let id1 = n.name("id1");
    let id2 = n.name("id2");
    let mut v = Validator::collecting();

    declare_empty(&mut v, n.doc);
    declare_empty(&mut v, n.doc);
    v.declare_attribute(
        n.doc,
        AttributeDef::new(a, AttributeType::Cdata, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(a, AttributeType::Cdata, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(id1, AttributeType::Id, DefaultKind::Implied),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(id2, AttributeType::Id, DefaultKind::Required),
    );
    declare_star(&mut v, list, missing);
    v.declare_unparsed_entity("pic", None, "pic.gif", "gif", false, span(60, 80));
    v.declare_internal_entity("pic", "text", false, span(80, 90));
    v.end_dtd();

    assert_eq!(
        v.reporter().codes(),
        vec![
            Code::DuplicateElementDeclaration,
            Code::DuplicateAttributeDefinition,
            Code::MultipleIdAttributes,
            Code::DuplicateEntityDeclaration,
            Code::UndeclaredElementInContentModel,
            Code::NotationNotDeclared,
        ]
    );
    let severities: Vec<_> = v.reporter().iter().map(|d| d.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Error,
            Severity::Warning,
            Severity::Error,
            Severity::Warning,
            Severity::Warning,
            Severity::Error,
        ]
    );
    let messages: Vec<_> = v
        .reporter()
        .iter()
        .map(|d| d.message(&n.xot))
        .collect();
    assert_snapshot!(messages[2], @r#"Element type "doc" already has an attribute "id1" of type ID; a second attribute "id2" of type ID is not permitted."#);
    assert_snapshot!(messages[4], @r#"The content model of element type "list" refers to undeclared element type "missing"."#);
    let notation = v.reporter().iter().last().unwrap();
    assert_eq!(notation.span, span(60, 80));
}

#[test]
fn test_attlist_for_undeclared_element() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let mut v = Validator::collecting();
    v.declare_attribute(
        n.item,
        AttributeDef::new(a, AttributeType::Cdata, DefaultKind::Implied).with_span(span(10, 20)),
    );
    v.declare_attribute(
        n.item,
        AttributeDef::new(b, AttributeType::Cdata, DefaultKind::Default)
            .with_default("x")
            .with_span(span(20, 30)),
    );
    v.end_dtd();

    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Code::AttlistForUndeclaredElement);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].span, span(10, 20));
}

#[test]
fn test_notation_declared_later_is_not_required() {
    let mut v = Validator::collecting();
    v.declare_unparsed_entity("pic", None, "pic.gif", "gif", false, span(0, 10));
    v.declare_notation("gif", None, Some("viewer"), span(10, 20));
    v.declare_notation("gif", None, Some("viewer"), span(20, 30));
    v.end_dtd();
    assert_eq!(
        v.reporter().codes(),
        vec![Code::DuplicateNotationDeclaration]
    );
    let duplicate = v.reporter().iter().next().unwrap();
    assert_eq!(duplicate.severity, Severity::Warning);
    assert_eq!(duplicate.span, span(20, 30));
}

#[test]
fn test_attribute_declaration_checks() {
    let mut n = Names::new();
    let kind = n.name("kind");
    let size = n.name("size");
    let mut v = Validator::collecting();
    declare_empty(&mut v, n.doc);
    v.declare_attribute(
        n.doc,
        AttributeDef::new(n.id, AttributeType::Id, DefaultKind::Default).with_default("x"),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(kind, AttributeType::Notation, DefaultKind::Implied)
            .with_enumeration(&["gif"]),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(size, AttributeType::Enumeration, DefaultKind::Default)
            .with_enumeration(&["small", "large"])
            .with_default("medium"),
    );
    v.declare_notation("gif", None, Some("viewer"), span(0, 10));
    v.end_dtd();

    assert_eq!(
        v.reporter().codes(),
        vec![
            Code::IdAttributeDefault,
            Code::InvalidDefaultValue,
            Code::NotationOnEmptyElement,
        ]
    );
}

#[test]
fn test_duplicate_mixed_type() {
    let mut n = Names::new();
    let a = n.name("a");
    let mut v = Validator::collecting();
    let root = v.content_specs_mut().mixed(&[a, a]);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Mixed,
        Some(root),
        false,
        span(0, 30),
    );
    assert_eq!(v.reporter().codes(), vec![Code::DuplicateMixedType]);
}

#[test]
fn test_root_element_type() {
    let n = Names::new();
    let mut v = ValidatorBuilder::new()
        .root_element(Some(n.doc))
        .build((), Diagnostics::new());
    v.declare_element_content(
        n.item,
        ContentSpecType::Any,
        None,
        false,
        SourceSpan::empty(),
    );
    v.declare_element_content(
        n.doc,
        ContentSpecType::Any,
        None,
        false,
        SourceSpan::empty(),
    );
    v.end_dtd();
    v.start_element(n.item, vec![], span(0, 6));
    v.end_element(n.item, span(6, 13));
    assert_eq!(v.reporter().codes(), vec![Code::RootElementType]);
}

#[test]
fn test_ambiguous_model_reported_once() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let c = n.name("c");
    let mut v = Validator::collecting();
    // ((a,b)|(a,c))
    let specs = v.content_specs_mut();
    let a1 = specs.leaf(a);
    let b_leaf = specs.leaf(b);
    let ab = specs.seq(a1, b_leaf);
    let a2 = specs.leaf(a);
    let c_leaf = specs.leaf(c);
    let ac = specs.seq(a2, c_leaf);
    let root = specs.choice(ab, ac);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        false,
        span(0, 30),
    );
    declare_empty(&mut v, a);
    declare_empty(&mut v, b);
    declare_empty(&mut v, c);
    v.end_dtd();

    for _ in 0..2 {
        v.start_element(n.doc, vec![], span(40, 45));
        v.start_element(a, vec![], span(45, 50));
        v.end_element(a, span(45, 50));
        v.start_element(c, vec![], span(50, 55));
        v.end_element(c, span(50, 55));
        v.end_element(n.doc, span(55, 61));
    }

    let diagnostics: Vec<_> = v.reporter().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Code::AmbiguousContentModel);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].span, span(0, 30));
}

#[test]
fn test_repeated_nullable_model_is_not_ambiguous() {
    let mut n = Names::new();
    let a = n.name("a");
    let b = n.name("b");
    let mut v = Validator::collecting();
    // (a*,b*)+
    let specs = v.content_specs_mut();
    let a_leaf = specs.leaf(a);
    let a_star = specs.zero_or_more(a_leaf);
    let b_leaf = specs.leaf(b);
    let b_star = specs.zero_or_more(b_leaf);
    let seq = specs.seq(a_star, b_star);
    let root = specs.one_or_more(seq);
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        false,
        span(0, 30),
    );
    declare_empty(&mut v, a);
    declare_empty(&mut v, b);
    v.end_dtd();

    v.start_element(n.doc, vec![], span(40, 45));
    v.start_element(b, vec![], span(45, 50));
    v.end_element(b, span(45, 50));
    v.start_element(a, vec![], span(50, 55));
    v.end_element(a, span(50, 55));
    v.end_element(n.doc, span(55, 61));

    assert!(v.reporter().is_empty());
}

#[test]
fn test_malformed_content_model_is_a_diagnostic() {
    let n = Names::new();
    let mut v = Validator::collecting();
    let mut other = ContentSpecs::new();
    other.text();
    let far = other.text();
    let root = v.content_specs_mut().add(ContentSpecNode::OneOrMore(far));
    v.declare_element_content(
        n.doc,
        ContentSpecType::Children,
        Some(root),
        false,
        span(0, 30),
    );
    v.end_dtd();

    for _ in 0..2 {
        v.start_element(n.doc, vec![], span(40, 45));
        v.characters("anything goes");
        v.end_element(n.doc, span(58, 64));
    }
    assert_eq!(v.reporter().codes(), vec![Code::MalformedContentModel]);
}

#[test]
fn test_standalone_defaults_and_normalization() {
    let mut n = Names::new();
    let lang = n.name("lang");
    let token = n.name("token");
    let mut v = ValidatorBuilder::new()
        .standalone(true)
        .build((), Diagnostics::new());
    v.declare_element_content(n.doc, ContentSpecType::Any, None, true, SourceSpan::empty());
    v.declare_attribute(
        n.doc,
        AttributeDef::new(lang, AttributeType::Cdata, DefaultKind::Default)
            .with_default("en")
            .declared_externally(true),
    );
    v.declare_attribute(
        n.doc,
        AttributeDef::new(token, AttributeType::Nmtoken, DefaultKind::Implied)
            .declared_externally(true),
    );
    v.end_dtd();

    let attributes = v.start_element(n.doc, vec![Attribute::new(token, " t ")], span(0, 20));
    v.end_element(n.doc, span(20, 26));
    assert_eq!(attributes[0].value, "t");
    assert_eq!(attributes[1].value, "en");
    assert_eq!(
        v.reporter().codes(),
        vec![
            Code::AttributeNormalizedInStandalone,
            Code::DefaultedAttributeInStandalone,
        ]
    );
}

#[test]
fn test_undeclared_element_and_attribute() {
    let mut n = Names::new();
    let other = n.name("other");
    let mut v = Validator::collecting();
    v.declare_element_content(
        n.doc,
        ContentSpecType::Any,
        None,
        false,
        SourceSpan::empty(),
    );
    v.end_dtd();

    v.start_element(n.doc, vec![Attribute::new(other, "x")], span(0, 10));
    v.start_element(other, vec![Attribute::new(other, "x")], span(10, 20));
    v.end_element(other, span(20, 28));
    v.end_element(n.doc, span(28, 34));
    // attributes of undeclared elements are not reported separately
    assert_eq!(
        v.reporter().codes(),
        vec![Code::AttributeNotDeclared, Code::ElementNotDeclared]
    );
}
