//! Attribute and value definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A value appearing in an attribute argument or a config block.
///
/// Numeric literals keep their source text; consumers parse them as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A string literal (escapes kept verbatim).
    String(String),
    /// An integer literal.
    Int(SmolStr),
    /// A float literal.
    Float(SmolStr),
    /// A boolean literal.
    Bool(bool),
    /// A bare identifier, e.g. an enum value or a field reference.
    Ident(SmolStr),
    /// A list, e.g. `[a, b]`.
    List(Vec<Value>),
    /// A function call, e.g. `now()` or `env("DATABASE_URL")`.
    Call(FunctionCall),
}

/// A function call value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name.
    pub name: SmolStr,
    /// Positional arguments.
    pub args: Vec<Value>,
}

impl FunctionCall {
    /// Create a new function call.
    pub fn new(name: impl Into<SmolStr>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Value {
    /// Create a function call value.
    pub fn call(name: impl Into<SmolStr>, args: Vec<Value>) -> Self {
        Self::Call(FunctionCall::new(name, args))
    }

    /// Try to get the value as a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Get the text of a string literal or a bare identifier.
    pub fn as_name(&self) -> Option<&str> {
        self.as_str().or_else(|| self.as_ident())
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(s) | Self::Float(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Try to get the value as a function call.
    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Check if this is a call of the given function.
    pub fn is_call(&self, name: &str) -> bool {
        self.as_call().is_some_and(|c| c.name == name)
    }

    /// Number of elements this value contributes to a reference list.
    ///
    /// A list counts its elements; any other value counts as one.
    pub fn arity(&self) -> usize {
        self.as_list().map_or(1, <[Value]>::len)
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, values: &[Value]) -> std::fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Int(s) | Self::Float(s) | Self::Ident(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(values) => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

impl std::fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.args)?;
        f.write_str(")")
    }
}

/// An attribute argument (named or positional).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeArg {
    /// Argument name (None for positional arguments).
    pub name: Option<SmolStr>,
    /// Argument value.
    pub value: Value,
}

impl AttributeArg {
    /// Create a positional argument.
    pub fn positional(value: Value) -> Self {
        Self { name: None, value }
    }

    /// Create a named argument.
    pub fn named(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// Check if this is a positional argument.
    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }
}

impl std::fmt::Display for AttributeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// An attribute applied to a field (`@`), model or enum (`@@`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@` prefix; dotted for native types (`db.Uuid`).
    pub name: SmolStr,
    /// Attribute arguments.
    pub args: Vec<AttributeArg>,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<SmolStr>, args: Vec<AttributeArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Create an attribute with no arguments.
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        Self::new(name, vec![])
    }

    /// Get the attribute name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Get the first argument, named or not.
    pub fn first_arg(&self) -> Option<&Value> {
        self.args.first().map(|a| &a.value)
    }

    /// Get the first positional argument.
    pub fn first_positional(&self) -> Option<&Value> {
        self.args
            .iter()
            .find(|a| a.is_positional())
            .map(|a| &a.value)
    }

    /// Get a named argument by name.
    pub fn get_arg(&self, name: &str) -> Option<&Value> {
        self.args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .map(|a| &a.value)
    }

    /// Check if a named argument is present.
    pub fn has_arg(&self, name: &str) -> bool {
        self.get_arg(name).is_some()
    }

    /// Split a dotted name into namespace and member (`db.Uuid` -> `("db", "Uuid")`).
    pub fn namespace(&self) -> Option<(&str, &str)> {
        self.name.split_once('.')
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Value Tests ====================

    #[test]
    fn test_value_accessors() {
        let s = Value::String("hello".into());
        assert_eq!(s.as_str(), Some("hello"));
        assert_eq!(s.as_name(), Some("hello"));
        assert_eq!(s.as_ident(), None);

        let ident = Value::Ident("Cascade".into());
        assert_eq!(ident.as_ident(), Some("Cascade"));
        assert_eq!(ident.as_name(), Some("Cascade"));
        assert_eq!(ident.as_str(), None);

        assert_eq!(Value::Int("42".into()).as_int(), Some(42));
        assert_eq!(Value::Int("-7".into()).as_float(), Some(-7.0));
        assert_eq!(Value::Float("1.5".into()).as_float(), Some(1.5));
        assert_eq!(Value::Float("1.5".into()).as_int(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
    }

    #[test]
    fn test_value_call() {
        let now = Value::call("now", vec![]);
        assert!(now.is_call("now"));
        assert!(!now.is_call("uuid"));
        assert_eq!(now.as_call().map(|c| c.args.len()), Some(0));
    }

    #[test]
    fn test_value_arity() {
        let list = Value::List(vec![Value::Ident("a".into()), Value::Ident("b".into())]);
        assert_eq!(list.arity(), 2);
        assert_eq!(Value::Ident("a".into()).arity(), 1);
        assert_eq!(Value::List(vec![]).arity(), 0);
    }

    #[test]
    fn test_value_display() {
        let value = Value::List(vec![
            Value::Ident("a".into()),
            Value::call("env", vec![Value::String("URL".into())]),
            Value::Int("3".into()),
            Value::Bool(false),
        ]);
        assert_eq!(value.to_string(), r#"[a, env("URL"), 3, false]"#);
    }

    // ==================== Attribute Tests ====================

    #[test]
    fn test_attribute_args() {
        let attr = Attribute::new(
            "relation",
            vec![
                AttributeArg::positional(Value::String("Author".into())),
                AttributeArg::named("fields", Value::List(vec![Value::Ident("authorId".into())])),
                AttributeArg::named("references", Value::List(vec![Value::Ident("id".into())])),
            ],
        );

        assert!(attr.is("relation"));
        assert_eq!(attr.first_positional().and_then(Value::as_str), Some("Author"));
        assert!(attr.has_arg("fields"));
        assert!(attr.has_arg("references"));
        assert!(!attr.has_arg("onDelete"));
        assert_eq!(attr.get_arg("fields").map(Value::arity), Some(1));
    }

    #[test]
    fn test_attribute_namespace() {
        assert_eq!(Attribute::simple("db.Uuid").namespace(), Some(("db", "Uuid")));
        assert_eq!(Attribute::simple("id").namespace(), None);
    }

    #[test]
    fn test_attribute_display() {
        assert_eq!(Attribute::simple("id").to_string(), "@id");

        let attr = Attribute::new(
            "default",
            vec![AttributeArg::positional(Value::call("autoincrement", vec![]))],
        );
        assert_eq!(attr.to_string(), "@default(autoincrement())");

        let attr = Attribute::new(
            "unique",
            vec![
                AttributeArg::named("fields", Value::List(vec![Value::Ident("a".into())])),
                AttributeArg::named("map", Value::String("uq".into())),
            ],
        );
        assert_eq!(attr.to_string(), r#"@unique(fields: [a], map: "uq")"#);
    }
}
