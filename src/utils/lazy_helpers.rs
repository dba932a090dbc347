//! Column projection and extraction helpers with schema validation
//!
//! Provides safe, explicit patterns for pulling role-bound columns out of a
//! source DataFrame so a missing or mistyped binding surfaces as a
//! `SchemaError` instead of a polars lookup failure deep inside a formula.

use polars::prelude::*;
use std::collections::HashSet;
use crate::error::{EthnoError, Result};

/// Fail with `SchemaError` naming every required column absent from `df`
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<()> {
    let actual: HashSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.as_str())
        .collect();

    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| !actual.contains(name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EthnoError::missing_columns(context, &missing))
    }
}

/// Materialize DataFrame with explicit column list and validation
///
/// # Arguments
/// * `df` - Source table
/// * `columns` - Required column names, in output order
/// * `context` - Context for error messages (e.g., "long-form input")
///
/// # Errors
/// `SchemaError` if any required column is missing from the source.
pub fn materialize_with_columns(
    df: &DataFrame,
    columns: &[&str],
    context: &str,
) -> Result<DataFrame> {
    require_columns(df, columns, context)?;

    let col_exprs: Vec<Expr> = columns.iter()
        .map(|&name| col(name))
        .collect();

    Ok(df.clone().lazy().select(col_exprs).collect()?)
}

/// Read a column as optional strings, casting numeric identifiers to text
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)
        .map_err(|_| EthnoError::missing_columns("string column", &[name]))?;

    let as_text = column.cast(&DataType::String)?;
    let values = as_text
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect();

    Ok(values)
}

/// Read a binary use column as presence flags
///
/// Accepts boolean and numeric dtypes. Nulls count as absent.
///
/// # Errors
/// `SchemaError` for a non-numeric column or any value outside {0, 1}.
pub fn binary_values(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let column = df.column(name)
        .map_err(|_| EthnoError::missing_columns("binary use column", &[name]))?;

    if !is_binary_candidate(column.dtype()) {
        return Err(EthnoError::Schema(format!(
            "binary use column '{}' has non-numeric dtype {}",
            name,
            column.dtype()
        )));
    }

    let as_float = column.cast(&DataType::Float64)?;
    let mut flags = Vec::with_capacity(as_float.len());

    for (idx, value) in as_float.f64()?.into_iter().enumerate() {
        match value {
            None => flags.push(false),
            Some(v) if v == 0.0 => flags.push(false),
            Some(v) if v == 1.0 => flags.push(true),
            Some(v) => {
                return Err(EthnoError::Schema(format!(
                    "binary use column '{}' holds {} at row {} (expected 0 or 1)",
                    name, v, idx
                )));
            }
        }
    }

    Ok(flags)
}

fn is_binary_candidate(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Boolean
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}
