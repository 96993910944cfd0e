//! Endpoint types shared by the integration tests.

#![allow(dead_code, unused_macros)]

use endpoint_router::{PageModel, Routable, Schema, Shape, Value, VariantShape};
use uuid::Uuid;

/// Sections of the admin area, routed as a nested union.
#[derive(Debug, Clone, PartialEq)]
pub enum Admin {
    Users,
    Settings { key: String },
}

impl Routable for Admin {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Union(vec![
            VariantShape::new("Users"),
            VariantShape::new("Settings").field(schema.field::<String>("key")),
        ])
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Users => Value::variant(0, Vec::new()),
            Self::Settings { key } => Value::variant(1, vec![key.to_value()]),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        let (tag, mut fields) = value.into_variant()?;
        match tag {
            0 => Some(Self::Users),
            1 => Some(Self::Settings { key: fields.read()? }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    About,
    Book { isbn: String },
    Chapter { isbn: String, n: u32 },
    Tags { tags: Vec<String> },
    Files { owner: u32, path: String },
    Ids { ids: Vec<u64> },
    Flag { on: bool },
    User { id: Uuid },
    Admin { section: Admin },
    Dash { tab: Option<String>, model: PageModel<Vec<String>> },
    Point { at: (i32, i32) },
    Score { value: f64 },
}

impl Routable for Page {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Union(vec![
            VariantShape::new("Home").path("/"),
            VariantShape::new("About"),
            VariantShape::new("Book")
                .path("/book/{isbn}")
                .field(schema.field::<String>("isbn")),
            VariantShape::new("Chapter")
                .path("/book/{isbn}/chapter/{n}")
                .field(schema.field::<String>("isbn"))
                .field(schema.field::<u32>("n")),
            VariantShape::new("Tags")
                .path("/tags/{tags}")
                .field(schema.field::<Vec<String>>("tags")),
            VariantShape::new("Files")
                .path("/files/{owner}/{*path}")
                .field(schema.field::<u32>("owner"))
                .field(schema.field::<String>("path")),
            VariantShape::new("Ids")
                .path("/ids/{*ids}")
                .field(schema.field::<Vec<u64>>("ids")),
            VariantShape::new("Flag")
                .path("/flag/{on}")
                .field(schema.field::<bool>("on")),
            VariantShape::new("User")
                .path("/user/{id}")
                .field(schema.field::<Uuid>("id")),
            VariantShape::new("Admin")
                .path("/admin/{section}")
                .field(schema.field::<Admin>("section")),
            VariantShape::new("Dash")
                .path("/dash/{tab}")
                .field(schema.field::<Option<String>>("tab"))
                .page_model("model"),
            VariantShape::new("Point")
                .path("/point/{at}")
                .field(schema.field::<(i32, i32)>("at")),
            VariantShape::new("Score")
                .path("/score/{value}")
                .field(schema.field::<f64>("value")),
        ])
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Home => Value::variant(0, Vec::new()),
            Self::About => Value::variant(1, Vec::new()),
            Self::Book { isbn } => Value::variant(2, vec![isbn.to_value()]),
            Self::Chapter { isbn, n } => Value::variant(3, vec![isbn.to_value(), n.to_value()]),
            Self::Tags { tags } => Value::variant(4, vec![tags.to_value()]),
            Self::Files { owner, path } => {
                Value::variant(5, vec![owner.to_value(), path.to_value()])
            }
            Self::Ids { ids } => Value::variant(6, vec![ids.to_value()]),
            Self::Flag { on } => Value::variant(7, vec![on.to_value()]),
            Self::User { id } => Value::variant(8, vec![id.to_value()]),
            Self::Admin { section } => Value::variant(9, vec![section.to_value()]),
            Self::Dash { tab, .. } => Value::variant(10, vec![tab.to_value(), Value::PageModel]),
            Self::Point { at } => Value::variant(11, vec![at.to_value()]),
            Self::Score { value } => Value::variant(12, vec![value.to_value()]),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        let (tag, mut fields) = value.into_variant()?;
        let page = match tag {
            0 => Self::Home,
            1 => Self::About,
            2 => Self::Book { isbn: fields.read()? },
            3 => Self::Chapter {
                isbn: fields.read()?,
                n: fields.read()?,
            },
            4 => Self::Tags { tags: fields.read()? },
            5 => Self::Files {
                owner: fields.read()?,
                path: fields.read()?,
            },
            6 => Self::Ids { ids: fields.read()? },
            7 => Self::Flag { on: fields.read()? },
            8 => Self::User { id: fields.read()? },
            9 => Self::Admin { section: fields.read()? },
            10 => Self::Dash {
                tab: fields.read()?,
                model: fields.read_page_model()?,
            },
            11 => Self::Point { at: fields.read()? },
            12 => Self::Score { value: fields.read()? },
            _ => return None,
        };
        Some(page)
    }
}

/// Arithmetic expressions, a self-referential endpoint type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num { n: i64 },
    Neg { inner: Box<Expr> },
    Add { lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Routable for Expr {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Union(vec![
            VariantShape::new("Num")
                .path("/num/{n}")
                .field(schema.field::<i64>("n")),
            VariantShape::new("Neg")
                .path("/neg/{inner}")
                .field(schema.field::<Box<Expr>>("inner")),
            VariantShape::new("Add")
                .path("/add/{lhs}/{rhs}")
                .field(schema.field::<Box<Expr>>("lhs"))
                .field(schema.field::<Box<Expr>>("rhs")),
        ])
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Num { n } => Value::variant(0, vec![n.to_value()]),
            Self::Neg { inner } => Value::variant(1, vec![inner.to_value()]),
            Self::Add { lhs, rhs } => Value::variant(2, vec![lhs.to_value(), rhs.to_value()]),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        let (tag, mut fields) = value.into_variant()?;
        match tag {
            0 => Some(Self::Num { n: fields.read()? }),
            1 => Some(Self::Neg {
                inner: fields.read()?,
            }),
            2 => Some(Self::Add {
                lhs: fields.read()?,
                rhs: fields.read()?,
            }),
            _ => None,
        }
    }
}

/// Declares a type that only describes a shape, for construction tests.
macro_rules! shape_only {
    ($name:ident, |$schema:ident| $shape:expr) => {
        struct $name;

        impl endpoint_router::Routable for $name {
            fn describe($schema: &mut endpoint_router::Schema) -> endpoint_router::Shape {
                $shape
            }

            fn to_value(&self) -> endpoint_router::Value {
                endpoint_router::Value::variant(0, Vec::new())
            }

            fn from_value(_: endpoint_router::Value) -> Option<Self> {
                None
            }
        }
    };
}
