//! Normalization of heterogeneous list responses.
//!
//! Known payload shapes are an explicit sum type rather than ad hoc field
//! probing, so each branch is testable on its own. Classification is total:
//! any well-formed JSON value normalizes without panicking, worst case to an
//! empty list.

use serde_json::Value;

/// Uniform `{items, total}` pair extracted from a variable-shaped response.
///
/// `total` is the server-reported count for the whole collection, so it can
/// legitimately exceed (or briefly disagree with) `items.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedList {
    pub items: Vec<Value>,
    pub total: u64,
}

impl NormalizedList {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Known list payload shapes, in the order they are tried.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// The response is itself the collection: `[...]`.
    BareArray(Vec<Value>),
    /// `{"items": [...], ...}`
    ItemsField {
        items: Vec<Value>,
        declared_total: Option<Value>,
    },
    /// `{"members": [...], ...}`
    MembersField {
        items: Vec<Value>,
        declared_total: Option<Value>,
    },
    /// `{"data": {"members": [...]}, ...}`
    NestedDataMembers {
        items: Vec<Value>,
        declared_total: Option<Value>,
    },
    /// None of the above; normalization falls back to the first array-valued
    /// field, then to an empty list.
    Other(Value),
}

impl ResponseShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::BareArray(items),
            Value::Object(ref obj) => {
                if let Some(Value::Array(items)) = obj.get("items") {
                    return Self::ItemsField {
                        items: items.clone(),
                        declared_total: declared_total(&value),
                    };
                }
                if let Some(Value::Array(items)) = obj.get("members") {
                    return Self::MembersField {
                        items: items.clone(),
                        declared_total: declared_total(&value),
                    };
                }
                if let Some(Value::Array(items)) =
                    obj.get("data").and_then(|d| d.get("members"))
                {
                    return Self::NestedDataMembers {
                        items: items.clone(),
                        declared_total: declared_total(&value),
                    };
                }
                Self::Other(value)
            }
            other => Self::Other(other),
        }
    }
}

/// Normalize any JSON response into a [`NormalizedList`].
pub fn normalize(value: Value) -> NormalizedList {
    match ResponseShape::classify(value) {
        ResponseShape::BareArray(items) => {
            let total = items.len() as u64;
            NormalizedList { items, total }
        }
        ResponseShape::ItemsField {
            items,
            declared_total,
        }
        | ResponseShape::MembersField {
            items,
            declared_total,
        }
        | ResponseShape::NestedDataMembers {
            items,
            declared_total,
        } => finish(items, declared_total),
        ResponseShape::Other(value) => fallback(value),
    }
}

/// Companion total for a list object: `total`, then `count`, then
/// `meta.total`.
fn declared_total(value: &Value) -> Option<Value> {
    value
        .get("total")
        .or_else(|| value.get("count"))
        .or_else(|| value.get("meta").and_then(|m| m.get("total")))
        .cloned()
}

fn finish(items: Vec<Value>, declared_total: Option<Value>) -> NormalizedList {
    let total = declared_total
        .as_ref()
        .and_then(as_total)
        .unwrap_or(items.len() as u64);
    NormalizedList { items, total }
}

/// A declared total only counts when it is a finite non-negative number.
fn as_total(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
}

/// Unknown shape: take the first array-valued field, or give up with an
/// empty list.
fn fallback(value: Value) -> NormalizedList {
    if let Value::Object(obj) = &value {
        for (_, field) in obj {
            if let Value::Array(items) = field {
                return finish(items.clone(), declared_total(&value));
            }
        }
    }
    NormalizedList::empty()
}
