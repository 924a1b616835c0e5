//! Clause arguments from loosely-typed JSON.
//!
//! Host bindings hand over dynamically typed arguments; these conversions
//! check their shape and map them onto the builder's argument types.
//! Wrong shapes are argument errors, malformed alias or expression objects
//! are format errors.

use crate::builder::{InsertFields, Join};
use crate::error::{QueryError, QueryResult};
use crate::ident::{FieldSpec, Selection, TableSpec, ValueExpr};
use crate::value::Value;
use serde_json::{Map, Value as Json};

impl TableSpec {
    /// `"users"` or `{"u": "users"}`.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        match json {
            Json::String(name) => Ok(Self::Name(name.clone())),
            Json::Object(map) => {
                let Some((alias, table)) = map.iter().next() else {
                    return Err(QueryError::format(
                        "Non empty objects should be used for aliasing",
                    ));
                };
                match table {
                    Json::String(table) => Ok(Self::Aliased(vec![(alias.clone(), table.clone())])),
                    _ => Err(QueryError::format(
                        "Only strings are allowed for table / alias name",
                    )),
                }
            }
            _ => Err(QueryError::argument(
                "Argument \"tables\" must be a valid string or object",
            )),
        }
    }
}

impl ValueExpr {
    /// A literal, or `{"value": .., "escape": bool}`.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        match json {
            Json::Object(map) => expr_from_object(map),
            other => Value::from_json(other).map(Self::Literal),
        }
    }
}

fn expr_from_object(map: &Map<String, Json>) -> QueryResult<ValueExpr> {
    let Some(value) = map.get("value") else {
        return Err(QueryError::format(
            "The \"value\" option for the field object must be specified",
        ));
    };
    let escape = match map.get("escape") {
        None => None,
        Some(Json::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(QueryError::format(
                "Specify a valid boolean value for the \"escape\" option in the field object",
            ));
        }
    };
    Ok(ValueExpr::Expr {
        value: Value::from_json(value)?,
        escape,
    })
}

impl FieldSpec {
    /// `"name"` or `{"alias": expr, ...}`.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        match json {
            Json::String(name) => Ok(Self::Name(name.clone())),
            Json::Object(map) => {
                if map.is_empty() {
                    return Err(QueryError::format(
                        "Non empty objects should be used for value aliasing in select",
                    ));
                }
                map.iter()
                    .map(|(alias, expr)| Ok((alias.clone(), ValueExpr::from_json(expr)?)))
                    .collect::<QueryResult<Vec<_>>>()
                    .map(Self::Aliased)
            }
            _ => Err(QueryError::argument(
                "Fields must be strings or alias objects",
            )),
        }
    }
}

fn field_list(items: &[Json]) -> QueryResult<Vec<FieldSpec>> {
    items.iter().map(FieldSpec::from_json).collect()
}

impl Selection {
    /// A raw string, an array of field specs or one alias object.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        match json {
            Json::String(raw) => Ok(Self::Raw(raw.clone())),
            Json::Array(items) => field_list(items).map(Self::Fields),
            Json::Object(_) => FieldSpec::from_json(json).map(Self::Field),
            _ => Err(QueryError::argument(
                "Argument \"fields\" must be a valid string, array or object",
            )),
        }
    }
}

impl InsertFields {
    /// `false`, a raw string or an array of field specs.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        match json {
            Json::Bool(false) => Ok(Self::Omit),
            Json::String(raw) => Ok(Self::Raw(raw.clone())),
            Json::Array(items) => field_list(items).map(Self::List),
            _ => Err(QueryError::argument(
                "Argument \"fields\" must be false, a valid string or an array",
            )),
        }
    }
}

impl Join {
    /// `{"table": .., "type"?: .., "alias"?: .., "conditions"?: .., "escape"?: bool}`.
    pub fn from_json(json: &Json) -> QueryResult<Self> {
        let Json::Object(map) = json else {
            return Err(QueryError::argument("Argument \"join\" must be an object"));
        };
        let optional_string = |key: &str| -> QueryResult<Option<String>> {
            match map.get(key) {
                None => Ok(None),
                Some(Json::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(QueryError::argument(format!(
                    "Argument \"join\" attribute \"{key}\" must be a string"
                ))),
            }
        };

        let table = optional_string("table")?.ok_or_else(|| {
            QueryError::argument("Argument \"join\" must have a \"table\" attribute")
        })?;
        let escape = match map.get("escape") {
            None => true,
            Some(Json::Bool(b)) => *b,
            Some(_) => {
                return Err(QueryError::argument(
                    "Argument \"join\" attribute \"escape\" must be a boolean",
                ));
            }
        };
        Ok(Self {
            table,
            kind: optional_string("type")?,
            alias: optional_string("alias")?,
            conditions: optional_string("conditions")?,
            escape,
        })
    }
}

/// `{"field": value | {"value": .., "escape": bool}, ...}` for `set`.
pub fn assignments_from_json(json: &Json) -> QueryResult<Vec<(String, ValueExpr)>> {
    let Json::Object(map) = json else {
        return Err(QueryError::argument("Argument \"values\" must be an object"));
    };
    map.iter()
        .map(|(field, expr)| Ok((field.clone(), ValueExpr::from_json(expr)?)))
        .collect()
}
