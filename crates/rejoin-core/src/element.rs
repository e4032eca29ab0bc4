use std::collections::BTreeMap;
use std::rc::Rc;

/// Prop key under which text descriptors carry their value.
pub const TEXT_VALUE: &str = "value";

/// A component is a plain function from props to a single descriptor.
/// Identity (for reconciliation) is the function's address.
pub type ComponentFn = fn(&Props) -> Element;

#[derive(Clone)]
pub enum ElementKind {
    Component(ComponentFn),
    Host(&'static str),
    Text,
}

impl PartialEq for ElementKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Component(a), Self::Component(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Self::Host(a), Self::Host(b)) => a == b,
            (Self::Text, Self::Text) => true,
            _ => false,
        }
    }
}

impl std::fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Component(_) => write!(f, "Component(<fn>)"),
            ElementKind::Host(tag) => write!(f, "Host({tag})"),
            ElementKind::Text => write!(f, "Text"),
        }
    }
}

/// Event delivered to a listener: the event name plus an optional
/// payload (the new value for text input).
#[derive(Clone, Debug)]
pub struct Event {
    pub name: String,
    pub value: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: None }
    }

    pub fn click() -> Self {
        Self::new("click")
    }

    pub fn input(value: impl Into<String>) -> Self {
        Self { name: "input".into(), value: Some(value.into()) }
    }
}

/// Cloneable event handler. Compares by identity, not by behavior.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<listener>")
    }
}

#[derive(Clone, Debug)]
pub enum PropValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Listener(Listener),
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Listener(a), Self::Listener(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Null => Ok(()),
            Self::Listener(_) => write!(f, "<listener>"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}
impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}
impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}
impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}
impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
impl From<Listener> for PropValue {
    fn from(v: Listener) -> Self {
        Self::Listener(v)
    }
}

/// Property bag of a descriptor. The ordered child descriptors ride inside
/// it so component functions receive them along with everything else.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    values: BTreeMap<String, PropValue>,
    pub children: Vec<Element>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Registers `f` under the `on`-prefixed prop name for `event`,
    /// e.g. `on("click", ..)` stores an `onclick` listener prop.
    pub fn on(self, event: &str, f: impl Fn(&Event) + 'static) -> Self {
        self.set(format!("on{event}"), Listener::new(f))
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One child slot handed to the factory: an element, a bare value to be
/// normalized into a text descriptor, or a nested sequence to flatten.
pub enum Child {
    Node(Element),
    Value(PropValue),
    List(Vec<Child>),
}

impl From<Element> for Child {
    fn from(el: Element) -> Self {
        Self::Node(el)
    }
}
/// `None` stays in the child list as a suppressed text slot so sibling
/// positions are stable across conditional renders.
impl From<Option<Element>> for Child {
    fn from(el: Option<Element>) -> Self {
        match el {
            Some(el) => Self::Node(el),
            None => Self::Value(PropValue::Null),
        }
    }
}
impl From<Vec<Child>> for Child {
    fn from(list: Vec<Child>) -> Self {
        Self::List(list)
    }
}
impl From<PropValue> for Child {
    fn from(v: PropValue) -> Self {
        Self::Value(v)
    }
}
impl From<&str> for Child {
    fn from(v: &str) -> Self {
        Self::Value(v.into())
    }
}
impl From<String> for Child {
    fn from(v: String) -> Self {
        Self::Value(v.into())
    }
}
impl From<i64> for Child {
    fn from(v: i64) -> Self {
        Self::Value(v.into())
    }
}
impl From<i32> for Child {
    fn from(v: i32) -> Self {
        Self::Value(v.into())
    }
}
impl From<bool> for Child {
    fn from(v: bool) -> Self {
        Self::Value(v.into())
    }
}

/// Immutable descriptor of desired structure: a kind plus props. Text
/// descriptors carry a [`TEXT_VALUE`] prop and no children. Pure data;
/// the only identity is structural equality of `kind`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub props: Props,
}

impl Element {
    pub fn host(tag: &'static str, props: Props, children: Vec<Child>) -> Self {
        Self::with_children(ElementKind::Host(tag), props, children)
    }

    pub fn component(f: ComponentFn, props: Props, children: Vec<Child>) -> Self {
        Self::with_children(ElementKind::Component(f), props, children)
    }

    pub fn text(value: impl Into<PropValue>) -> Self {
        Self {
            kind: ElementKind::Text,
            props: Props::new().set(TEXT_VALUE, value),
        }
    }

    /// The "render nothing" descriptor: a text slot whose value suppresses
    /// host-node creation while still occupying its position.
    pub fn none() -> Self {
        Self::text(PropValue::Null)
    }

    fn with_children(kind: ElementKind, mut props: Props, children: Vec<Child>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            flatten_into(child, &mut flat);
        }
        props.children = flat;
        Self { kind, props }
    }
}

fn flatten_into(child: Child, out: &mut Vec<Element>) {
    match child {
        Child::Node(el) => out.push(el),
        Child::Value(v) => out.push(Element::text(v)),
        Child::List(list) => {
            for c in list {
                flatten_into(c, out);
            }
        }
    }
}
