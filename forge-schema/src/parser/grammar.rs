//! Recursive-descent productions for schema files.
//!
//! Every production takes the cursor positioned on its first token and
//! returns the node it built, or the first syntax error it hit. A failed
//! block is dropped as a whole; [`synchronize`] then skips what is left of it.

use tracing::trace;

use super::cursor::Cursor;
use crate::ast::*;
use crate::error::SchemaResult;
use crate::lexer::TokenKind;

/// `datasource <name> { <entry>* }`
pub fn parse_datasource(cur: &mut Cursor<'_>) -> SchemaResult<Datasource> {
    cur.expect(TokenKind::Datasource)?;
    let name = cur.expect_ident()?;
    cur.expect(TokenKind::LBrace)?;

    let mut datasource = Datasource::new(name);
    datasource.fields = parse_config_body(cur)?;

    trace!("Parsed datasource {}", datasource.name);
    Ok(datasource)
}

/// `generator <name> { <entry>* }`
pub fn parse_generator(cur: &mut Cursor<'_>) -> SchemaResult<Generator> {
    cur.expect(TokenKind::Generator)?;
    let name = cur.expect_ident()?;
    cur.expect(TokenKind::LBrace)?;

    let mut generator = Generator::new(name);
    generator.fields = parse_config_body(cur)?;

    trace!("Parsed generator {}", generator.name);
    Ok(generator)
}

/// `<name> = <value>` entries up to and including the closing brace.
fn parse_config_body(cur: &mut Cursor<'_>) -> SchemaResult<Vec<ConfigField>> {
    let mut fields = vec![];

    loop {
        match cur.kind() {
            TokenKind::RBrace => {
                cur.bump();
                return Ok(fields);
            }
            TokenKind::Eof => return Err(cur.expected(TokenKind::RBrace.describe())),
            kind if kind.is_name() => {
                let name = cur.bump().literal;
                cur.expect(TokenKind::Equals)?;
                if let Some(value) = parse_value(cur)? {
                    fields.push(ConfigField::new(name, value));
                }
            }
            _ => return Err(cur.unexpected()),
        }
    }
}

/// `model <Name> { (<field> | <@@attribute>)* }`
pub fn parse_model(cur: &mut Cursor<'_>) -> SchemaResult<Model> {
    cur.expect(TokenKind::Model)?;
    let name = cur.expect_ident()?;
    cur.expect(TokenKind::LBrace)?;

    let mut model = Model::new(name);
    (model.fields, model.attributes) = parse_fields_body(cur)?;

    trace!("Parsed model {} with {} fields", model.name, model.fields.len());
    Ok(model)
}

/// `type <Name> { (<field> | <@@attribute>)* }`
pub fn parse_composite_type(cur: &mut Cursor<'_>) -> SchemaResult<CompositeType> {
    cur.expect(TokenKind::Type)?;
    let name = cur.expect_ident()?;
    cur.expect(TokenKind::LBrace)?;

    let mut composite = CompositeType::new(name);
    (composite.fields, composite.attributes) = parse_fields_body(cur)?;

    trace!("Parsed type {}", composite.name);
    Ok(composite)
}

fn parse_fields_body(cur: &mut Cursor<'_>) -> SchemaResult<(Vec<ModelField>, Vec<Attribute>)> {
    let mut fields = vec![];
    let mut attributes = vec![];

    loop {
        match cur.kind() {
            TokenKind::RBrace => {
                cur.bump();
                return Ok((fields, attributes));
            }
            TokenKind::Eof => return Err(cur.expected(TokenKind::RBrace.describe())),
            TokenKind::AtAt => attributes.push(parse_attribute(cur)?),
            kind if kind.is_name() => fields.push(parse_field(cur)?),
            _ => return Err(cur.unexpected()),
        }
    }
}

/// `<name> <Type> <@attribute>*`
fn parse_field(cur: &mut Cursor<'_>) -> SchemaResult<ModelField> {
    let name = cur.expect_name()?;
    let field_type = parse_field_type(cur)?;

    let mut attributes = vec![];
    while cur.at(TokenKind::At) {
        attributes.push(parse_attribute(cur)?);
    }

    Ok(ModelField::new(name, field_type, attributes))
}

/// `<Type>`, `<Type>[]`, `<Type>?`, `<Type>[]?` or `Unsupported("<raw>")`.
pub fn parse_field_type(cur: &mut Cursor<'_>) -> SchemaResult<FieldType> {
    let name = cur.expect_ident()?;

    let mut field_type = if name == "Unsupported" {
        cur.expect(TokenKind::LParen)?;
        let raw = cur.expect(TokenKind::String)?.literal;
        cur.expect(TokenKind::RParen)?;
        FieldType::unsupported(raw.as_str())
    } else {
        FieldType::new(name)
    };

    // `[` only marks a list when `]` follows immediately.
    if cur.at(TokenKind::LBracket) && cur.peek_at(TokenKind::RBracket) {
        cur.bump();
        cur.bump();
        field_type.is_array = true;
    }
    if cur.at(TokenKind::Question) {
        cur.bump();
        field_type.is_optional = true;
    }

    Ok(field_type)
}

/// `@name`, `@@name`, `@ns.name`, each with an optional `(<args>)`.
pub fn parse_attribute(cur: &mut Cursor<'_>) -> SchemaResult<Attribute> {
    cur.bump();

    let mut name = cur.expect_name()?.to_string();
    while cur.at(TokenKind::Dot) {
        cur.bump();
        name.push('.');
        name.push_str(&cur.expect_name()?);
    }

    let mut args = vec![];
    if cur.at(TokenKind::LParen) {
        cur.bump();
        while !cur.at(TokenKind::RParen) && !cur.at(TokenKind::Eof) {
            if let Some(arg) = parse_argument(cur)? {
                args.push(arg);
            }
            if cur.at(TokenKind::Comma) {
                cur.bump();
            }
        }
        cur.expect(TokenKind::RParen)?;
    }

    Ok(Attribute::new(name, args))
}

/// `<name>: <value>`, `<name> = <value>` or a positional `<value>`.
fn parse_argument(cur: &mut Cursor<'_>) -> SchemaResult<Option<AttributeArg>> {
    let named = cur.kind().is_name()
        && (cur.peek_at(TokenKind::Colon) || cur.peek_at(TokenKind::Equals));

    if named {
        let name = cur.bump().literal;
        cur.bump();
        Ok(parse_value(cur)?.map(|value| AttributeArg::named(name, value)))
    } else {
        Ok(parse_value(cur)?.map(AttributeArg::positional))
    }
}

/// Deepest nesting of lists and calls accepted inside one value.
pub const MAX_VALUE_DEPTH: usize = 128;

/// Parse a literal, list, identifier or function call.
///
/// A token that cannot start a value is skipped and yields `None`. Lists
/// and calls nested deeper than [`MAX_VALUE_DEPTH`] are a syntax error.
pub fn parse_value(cur: &mut Cursor<'_>) -> SchemaResult<Option<Value>> {
    parse_nested_value(cur, 0)
}

fn parse_nested_value(cur: &mut Cursor<'_>, depth: usize) -> SchemaResult<Option<Value>> {
    let opens_nesting = cur.at(TokenKind::LBracket)
        || (cur.kind().is_name() && cur.peek_at(TokenKind::LParen));
    if opens_nesting && depth >= MAX_VALUE_DEPTH {
        return Err(cur.expected(&format!("value nesting of at most {MAX_VALUE_DEPTH} levels")));
    }

    let value = match cur.kind() {
        TokenKind::String => Value::String(cur.bump().literal.to_string()),
        TokenKind::Int => Value::Int(cur.bump().literal),
        TokenKind::Float => Value::Float(cur.bump().literal),
        TokenKind::Boolean => Value::Bool(cur.bump().literal == "true"),
        TokenKind::LBracket => {
            cur.bump();
            Value::List(parse_value_list(cur, TokenKind::RBracket, depth + 1)?)
        }
        kind if kind.is_name() => {
            let name = cur.bump().literal;
            if cur.at(TokenKind::LParen) {
                cur.bump();
                Value::call(name, parse_value_list(cur, TokenKind::RParen, depth + 1)?)
            } else {
                Value::Ident(name)
            }
        }
        _ => {
            let skipped = cur.bump();
            trace!("Skipped {} where a value was expected", skipped);
            return Ok(None);
        }
    };

    Ok(Some(value))
}

/// Comma-separated values up to and including `close`.
fn parse_value_list(
    cur: &mut Cursor<'_>,
    close: TokenKind,
    depth: usize,
) -> SchemaResult<Vec<Value>> {
    let mut values = vec![];
    while !cur.at(close) && !cur.at(TokenKind::Eof) {
        if let Some(value) = parse_nested_value(cur, depth)? {
            values.push(value);
        }
        if cur.at(TokenKind::Comma) {
            cur.bump();
        }
    }
    cur.expect(close)?;
    Ok(values)
}

/// `enum <Name> { (<value> <@attribute>* | <@@attribute>)* }`
pub fn parse_enum(cur: &mut Cursor<'_>) -> SchemaResult<Enum> {
    cur.expect(TokenKind::Enum)?;
    let name = cur.expect_ident()?;
    cur.expect(TokenKind::LBrace)?;

    let mut e = Enum::new(name);
    loop {
        match cur.kind() {
            TokenKind::RBrace => {
                cur.bump();
                break;
            }
            TokenKind::Eof => return Err(cur.expected(TokenKind::RBrace.describe())),
            TokenKind::AtAt => e.attributes.push(parse_attribute(cur)?),
            kind if kind.is_name() => {
                let value = cur.bump().literal;
                let mut attributes = vec![];
                while cur.at(TokenKind::At) {
                    attributes.push(parse_attribute(cur)?);
                }
                e.add_value(EnumValue::new(value, attributes));
            }
            _ => return Err(cur.unexpected()),
        }
    }

    trace!("Parsed enum {} with {} values", e.name, e.values.len());
    Ok(e)
}

/// Skip the remainder of a block whose parse failed.
///
/// Stops after the `}` that brings the brace depth back to `base`, before a
/// block keyword at depth `base`, or at EOF.
pub fn synchronize(cur: &mut Cursor<'_>, base: usize) {
    loop {
        match cur.kind() {
            TokenKind::Eof => return,
            kind if kind.is_keyword() && cur.depth() <= base => return,
            TokenKind::RBrace => {
                cur.bump();
                if cur.depth() <= base {
                    return;
                }
            }
            _ => {
                cur.bump();
            }
        }
    }
}
