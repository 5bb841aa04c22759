//! Column processors used while cleaning raw tables.
//!
//! Every processor takes the table by reference and returns a new table, so a
//! cleaning pipeline is a chain of pure transforms.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UpliftError};

/// How string categories become numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoricalEncoding {
    /// One integer column, codes assigned by sorted distinct value
    #[default]
    Ordinal,
    /// One 0/1 column per distinct value, named after the value
    OneHot,
}

impl fmt::Display for CategoricalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoricalEncoding::Ordinal => write!(f, "ordinal"),
            CategoricalEncoding::OneHot => write!(f, "one-hot"),
        }
    }
}

/// Fail with a parse error naming the first missing column
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| df.get_column_index(name).is_none()) {
        Some(name) => Err(UpliftError::Parse(format!("missing column `{}`", name))),
        None => Ok(()),
    }
}

/// Names of all columns, in table order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns().iter().map(|c| c.name().to_string()).collect()
}

/// Drop columns by name
pub fn drop_columns(df: &DataFrame, names: &[&str]) -> Result<DataFrame> {
    require_columns(df, names)?;
    let mut out = df.clone();
    for name in names {
        out = out.drop(name)?;
    }
    Ok(out)
}

/// Values of a categorical column as strings
fn category_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::String)?;
    series
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::to_string)
                .ok_or_else(|| UpliftError::Parse(format!("null value in column `{}`", name)))
        })
        .collect()
}

/// Distinct values of a categorical column in lexicographic order
pub fn sorted_categories(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = category_values(df, name)?;
    let distinct: BTreeSet<String> = values.into_iter().collect();
    Ok(distinct.into_iter().collect())
}

/// Replace a categorical column with its ordinal codes.
///
/// Each distinct value is numbered by its position in the lexicographically
/// sorted list of distinct values, starting at 0.
pub fn factorize(df: &DataFrame, name: &str) -> Result<DataFrame> {
    let values = category_values(df, name)?;
    let codes: BTreeMap<&str, f64> = values
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(code, value)| (value, code as f64))
        .collect();

    let encoded: Vec<f64> = values.iter().map(|v| codes[v.as_str()]).collect();

    let mut out = df.clone();
    out.with_column(Column::new(name.into(), encoded))?;
    Ok(out)
}

/// Replace a categorical column, in place, with one 0/1 column per distinct value.
///
/// Indicator columns appear in sorted value order at the position of the
/// original column.
pub fn one_hot(df: &DataFrame, name: &str) -> Result<DataFrame> {
    require_columns(df, &[name])?;
    let values = category_values(df, name)?;
    let categories: BTreeSet<&str> = values.iter().map(String::as_str).collect();

    let mut columns = Vec::with_capacity(df.width() + categories.len());
    for column in df.get_columns() {
        if column.name().as_str() != name {
            columns.push(column.clone());
            continue;
        }
        for category in &categories {
            let indicator: Vec<f64> = values
                .iter()
                .map(|v| if v == category { 1.0 } else { 0.0 })
                .collect();
            columns.push(Column::new((*category).into(), indicator));
        }
    }

    Ok(DataFrame::new(columns)?)
}

/// Replace string labels with explicit codes; an unmapped label is an error
pub fn map_labels(df: &DataFrame, name: &str, mapping: &[(&str, f64)]) -> Result<DataFrame> {
    let values = category_values(df, name)?;
    let encoded = values
        .iter()
        .map(|v| {
            mapping
                .iter()
                .find(|(label, _)| *label == v.as_str())
                .map(|(_, code)| *code)
                .ok_or_else(|| UpliftError::Parse(format!("unknown label `{}` in column `{}`", v, name)))
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut out = df.clone();
    out.with_column(Column::new(name.into(), encoded))?;
    Ok(out)
}

/// Cast every column to `Float64`, rejecting nulls and unconvertible values
pub fn cast_all_f64(df: &DataFrame) -> Result<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let name = column.name().to_string();
            let series = column
                .as_materialized_series()
                .strict_cast(&DataType::Float64)
                .map_err(|e| UpliftError::Parse(format!("column `{}` is not numeric: {}", name, e)))?;
            if series.null_count() > 0 {
                return Err(UpliftError::Parse(format!("null value in column `{}`", name)));
            }
            Ok(Column::from(series))
        })
        .collect::<Result<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

/// Values of a numeric column as `f64`
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| UpliftError::Parse(format!("null value in column `{}`", name))))
        .collect()
}

/// Keep the rows at `indices`, in the given order
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec("idx".into(), indices.iter().map(|&i| i as IdxSize).collect());
    Ok(df.take(&idx)?)
}
