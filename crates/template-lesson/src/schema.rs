//! Typed descriptions of the JSON the model must return.
//!
//! A [`ResponseSchema`] is rendered into the prompt as a JSON document whose
//! leaves are `"<type>: <description>"` strings, so the model sees the exact
//! field names and nesting it has to reproduce.

use std::fmt::Write as _;

use edu_lesson_types::ResourceType;

use crate::registry::SchemaId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(&'static str),
    Number(&'static str),
    Boolean(&'static str),
    OneOf(&'static [&'static str]),
    List(Box<Node>),
    Object(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub node: Node,
    pub required: bool,
}

impl Field {
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

pub fn text(name: &'static str, description: &'static str) -> Field {
    field(name, Node::Text(description))
}

pub fn number(name: &'static str, description: &'static str) -> Field {
    field(name, Node::Number(description))
}

pub fn boolean(name: &'static str, description: &'static str) -> Field {
    field(name, Node::Boolean(description))
}

pub fn one_of(name: &'static str, options: &'static [&'static str]) -> Field {
    field(name, Node::OneOf(options))
}

pub fn text_list(name: &'static str, description: &'static str) -> Field {
    field(name, Node::List(Box::new(Node::Text(description))))
}

pub fn object(name: &'static str, fields: Vec<Field>) -> Field {
    field(name, Node::Object(fields))
}

pub fn object_list(name: &'static str, fields: Vec<Field>) -> Field {
    field(name, Node::List(Box::new(Node::Object(fields))))
}

fn field(name: &'static str, node: Node) -> Field {
    Field {
        name,
        node,
        required: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSchema {
    pub id: SchemaId,
    pub resource_type: ResourceType,
    pub fields: Vec<Field>,
}

impl ResponseSchema {
    pub fn item_key(&self) -> &'static str {
        self.resource_type.item_key()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// The schema as pretty-printed JSON text, in declaration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_object(&mut out, &self.fields, 0);
        out
    }
}

fn quoted(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_object(out: &mut String, fields: &[Field], depth: usize) {
    out.push_str("{\n");
    for (i, field) in fields.iter().enumerate() {
        pad(out, depth + 1);
        let _ = write!(out, "{}: ", quoted(field.name));
        write_node(out, &field.node, depth + 1);
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    pad(out, depth);
    out.push('}');
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Text(desc) => out.push_str(&quoted(&format!("string: {desc}"))),
        Node::Number(desc) => out.push_str(&quoted(&format!("number: {desc}"))),
        Node::Boolean(desc) => out.push_str(&quoted(&format!("boolean: {desc}"))),
        Node::OneOf(options) => {
            out.push_str(&quoted(&format!("one of: {}", options.join(" | "))))
        }
        Node::List(inner) => {
            out.push_str("[\n");
            pad(out, depth + 1);
            write_node(out, inner, depth + 1);
            out.push('\n');
            pad(out, depth);
            out.push(']');
        }
        Node::Object(fields) => write_object(out, fields, depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResponseSchema {
        ResponseSchema {
            id: SchemaId::WorksheetGeneral,
            resource_type: ResourceType::Worksheet,
            fields: vec![
                text("title", "worksheet title").required(),
                one_of("level", &["easy", "hard"]),
                object_list(
                    "problems",
                    vec![text("question", "the \"problem\""), number("points", "score")],
                )
                .required(),
            ],
        }
    }

    #[test]
    fn render_keeps_declaration_order() {
        let rendered = sample().render();
        assert_eq!(
            rendered,
            r#"{
  "title": "string: worksheet title",
  "level": "one of: easy | hard",
  "problems": [
    {
      "question": "string: the \"problem\"",
      "points": "number: score"
    }
  ]
}"#
        );
    }

    #[test]
    fn render_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(&sample().render()).unwrap();
        assert!(value["problems"].is_array());
    }

    #[test]
    fn required_fields() {
        let schema = sample();
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["title", "problems"]);
        assert_eq!(schema.item_key(), "problems");
        assert!(schema.field("level").is_some());
    }
}
