use serde::{Deserialize, Serialize};

/// An immutable XML attribute.
///
/// Namespace declarations are represented as attributes named `xmlns` or
/// `xmlns:prefix` with no namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    namespace: Option<String>,
    value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: value.into(),
        }
    }

    pub fn with_namespace(
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let namespace = namespace.into();
        Self {
            name: name.into(),
            namespace: (!namespace.is_empty()).then_some(namespace),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for `xmlns` and `xmlns:*` declarations.
    pub fn is_namespace_declaration(&self) -> bool {
        self.namespace.is_none() && (self.name == "xmlns" || self.name.starts_with("xmlns:"))
    }
}

/// Generic representation of one XML element.
///
/// A node is either a leaf carrying a scalar `value` or a composite carrying
/// child `fields`. When both are set, `value` wins on serialization and the
/// fields are ignored. Attribute and field order is document order.
///
/// # Example
///
/// ```
/// use syndfeed::content::{Attribute, ContentNode};
///
/// let enclosure = ContentNode::new("enclosure")
///     .attribute(Attribute::new("url", "https://example.com/a.mp3"))
///     .attribute(Attribute::new("length", "1024"));
/// assert_eq!(enclosure.attribute_value("length"), Some("1024"));
///
/// let item = ContentNode::new("item")
///     .field(ContentNode::with_value("title", "Hello"))
///     .field(enclosure);
/// assert_eq!(item.field_value("title"), Some("Hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    pub name: String,
    /// `None` for elements outside any namespace (RSS elements).
    pub namespace: Option<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub fields: Vec<ContentNode>,
}

impl ContentNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Sets the namespace. An empty string means no namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn field(mut self, field: ContentNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_field(&mut self, field: ContentNode) {
        self.fields.push(field);
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Value of the first attribute named `name` that has no namespace.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace().is_none() && a.name() == name)
            .map(Attribute::value)
    }

    /// Value of the first attribute named `name` whose namespace is either
    /// absent or `namespace`.
    pub fn attribute_value_in(&self, name: &str, namespace: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name() == name && a.namespace().map_or(true, |ns| ns == namespace))
            .map(Attribute::value)
    }

    /// Value of the first child field named `name`.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }

    /// True when the node is in `namespace`; `None` matches no namespace.
    pub fn is_in(&self, namespace: Option<&str>) -> bool {
        self.namespace.as_deref() == namespace
    }
}
