//! Typed query predicates.
//!
//! Filters are built as values and lowered to BSON in one place, instead of
//! assembling ad-hoc filter documents at every call site.

use mongodb::bson::{doc, Bson, Document, Regex};
use weft_types::SortOrder;

/// A filter predicate over a single collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals value.
    Eq(&'static str, Bson),
    /// Field does not equal value.
    Ne(&'static str, Bson),
    /// Field is a member of the given set.
    In(&'static str, Vec<Bson>),
    /// Field is null or missing entirely. Marks top-level threads, where
    /// `parent_id` may be either.
    NullOrAbsent(&'static str),
    /// Case-insensitive substring match. The needle is escaped, so regex
    /// metacharacters in user input match literally.
    Contains(&'static str, String),
    /// Every sub-predicate holds.
    All(Vec<Predicate>),
    /// At least one sub-predicate holds.
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn into_document(self) -> Document {
        match self {
            Predicate::Eq(field, value) => doc! { field: value },
            Predicate::Ne(field, value) => doc! { field: { "$ne": value } },
            Predicate::In(field, values) => doc! { field: { "$in": values } },
            // `field: null` matches both an explicit null and a missing field.
            Predicate::NullOrAbsent(field) => doc! { field: Bson::Null },
            Predicate::Contains(field, needle) => doc! {
                field: Bson::RegularExpression(Regex {
                    pattern: escape_regex(&needle),
                    options: "i".to_string(),
                })
            },
            Predicate::All(mut preds) => match preds.len() {
                0 => Document::new(),
                1 => preds.remove(0).into_document(),
                _ => doc! {
                    "$and": preds
                        .into_iter()
                        .map(|p| Bson::Document(p.into_document()))
                        .collect::<Vec<_>>()
                },
            },
            Predicate::Any(mut preds) => match preds.len() {
                0 => Document::new(),
                1 => preds.remove(0).into_document(),
                _ => doc! {
                    "$or": preds
                        .into_iter()
                        .map(|p| Bson::Document(p.into_document()))
                        .collect::<Vec<_>>()
                },
            },
        }
    }
}

/// Lower a sort order to the driver's 1/-1 convention.
pub fn sort_value(order: SortOrder) -> i32 {
    match order {
        SortOrder::Ascending => 1,
        SortOrder::Descending => -1,
    }
}

fn escape_regex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
