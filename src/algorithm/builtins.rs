//! Handlers for the functions declared in the embedded catalogue.
//!
//! Integer inputs produce integer results where the operation cannot overflow;
//! anything else is computed in `f64`. A float result that is not finite is a
//! handler error.
//!
//! The catalogue only declares the shape of `arrayArguments`; the handler here
//! sums every element of both arrays.

use super::app::{FunctionHandler, handler_fn};
use crate::error::{CatalogError, CatalogResult};
use chrono::Local;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Format used by `now`.
pub const SYSDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// All builtin handlers keyed by function identifier.
pub fn all() -> Vec<(&'static str, Arc<dyn FunctionHandler>)> {
    let add_handler: Arc<dyn FunctionHandler> = Arc::new(handler_fn(|_, params| add(params)));
    let abs_handler: Arc<dyn FunctionHandler> = Arc::new(handler_fn(|_, params| abs(params)));
    let now_handler: Arc<dyn FunctionHandler> = Arc::new(handler_fn(|_, params| now(params)));
    let array_handler: Arc<dyn FunctionHandler> =
        Arc::new(handler_fn(|_, params| array_arguments(params)));

    vec![
        ("add", add_handler),
        ("abs", abs_handler),
        ("now", now_handler),
        ("arrayArguments", array_handler),
    ]
}

/// `num1 + num2`, returned as `{"num1": sum}`.
pub fn add(params: &Map<String, Value>) -> CatalogResult<Value> {
    let sum = sum_numbers("add", [number(params, "add", "num1")?, number(params, "add", "num2")?])?;
    Ok(json!({ "num1": sum }))
}

/// `|num1|`, returned as `{"res": value}`.
pub fn abs(params: &Map<String, Value>) -> CatalogResult<Value> {
    let value = number(params, "abs", "num1")?;
    let res = match value.as_i64().and_then(i64::checked_abs) {
        Some(i) => json!(i),
        None => json!(finite(as_f64(value, "abs")?.abs(), "abs")?),
    };
    Ok(json!({ "res": res }))
}

/// Local wall-clock time, returned as `{"sysdate": "YYYY-MM-DD HH:MM:SS"}`.
pub fn now(_params: &Map<String, Value>) -> CatalogResult<Value> {
    Ok(json!({ "sysdate": Local::now().format(SYSDATE_FORMAT).to_string() }))
}

/// Sum of every element of `arr1` and `arr2`, returned as `{"result": sum}`.
pub fn array_arguments(params: &Map<String, Value>) -> CatalogResult<Value> {
    let arr1 = array(params, "arrayArguments", "arr1")?;
    let arr2 = array(params, "arrayArguments", "arr2")?;
    let result = sum_numbers("arrayArguments", arr1.iter().chain(arr2.iter()))?;
    Ok(json!({ "result": result }))
}

fn number<'a>(params: &'a Map<String, Value>, function: &str, name: &str) -> CatalogResult<&'a Value> {
    match params.get(name) {
        Some(value) if value.is_number() => Ok(value),
        Some(_) => Err(CatalogError::handler(
            function,
            format!("parameter '{}' must be a number", name),
        )),
        None => Err(CatalogError::handler(
            function,
            format!("missing parameter '{}'", name),
        )),
    }
}

fn array<'a>(
    params: &'a Map<String, Value>,
    function: &str,
    name: &str,
) -> CatalogResult<&'a Vec<Value>> {
    params
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::handler(function, format!("parameter '{}' must be an array", name)))
}

fn as_f64(value: &Value, function: &str) -> CatalogResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| CatalogError::handler(function, format!("'{}' is not a number", value)))
}

fn sum_numbers<'a, I>(function: &str, values: I) -> CatalogResult<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let values: Vec<&Value> = values.into_iter().collect();

    let integer_sum = values
        .iter()
        .try_fold(0i64, |acc, v| v.as_i64().and_then(|i| acc.checked_add(i)));
    if let Some(sum) = integer_sum {
        return Ok(json!(sum));
    }

    let mut sum = 0.0;
    for value in values {
        sum += as_f64(value, function)?;
    }
    Ok(json!(finite(sum, function)?))
}

// JSON has no encoding for infinities; serde_json would emit null.
fn finite(value: f64, function: &str) -> CatalogResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CatalogError::handler(function, "result is not a finite number"))
    }
}
