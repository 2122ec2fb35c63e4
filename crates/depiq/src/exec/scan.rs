//! Shared row-scanning plumbing used by every dataset's executor surface.

use crate::error::Result;
use crate::exec::driver::{Driver, ExecResult, RowIter};
use crate::exec::row::{FromRow, FromValue};
use crate::value::Value;

pub(crate) async fn query(
    driver: &dyn Driver,
    sql: &str,
    args: &[Value],
) -> Result<Box<dyn RowIter>> {
    tracing::debug!(target: "depiq", sql = %sql, args = args.len(), "query");
    driver.query(sql, args).await
}

pub(crate) async fn exec(driver: &dyn Driver, sql: &str, args: &[Value]) -> Result<ExecResult> {
    tracing::debug!(target: "depiq", sql = %sql, args = args.len(), "exec");
    driver.exec(sql, args).await
}

/// Read every row into `dest`.
pub(crate) async fn scan_structs<T: FromRow>(
    driver: &dyn Driver,
    sql: &str,
    args: &[Value],
    dest: &mut Vec<T>,
) -> Result<()> {
    let mut rows = query(driver, sql, args).await?;
    while let Some(row) = rows.next().await {
        dest.push(T::from_row(&row?)?);
    }
    Ok(())
}

/// Read at most one row into `dest`; returns whether a row was found.
pub(crate) async fn scan_struct<T: FromRow>(
    driver: &dyn Driver,
    sql: &str,
    args: &[Value],
    dest: &mut T,
) -> Result<bool> {
    let mut rows = query(driver, sql, args).await?;
    match rows.next().await {
        Some(row) => {
            *dest = T::from_row(&row?)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Read the first column of every row into `dest`.
pub(crate) async fn scan_vals<T: FromValue>(
    driver: &dyn Driver,
    sql: &str,
    args: &[Value],
    dest: &mut Vec<T>,
) -> Result<()> {
    let mut rows = query(driver, sql, args).await?;
    while let Some(row) = rows.next().await {
        dest.push(row?.first_value()?);
    }
    Ok(())
}

/// Read the first column of at most one row; returns whether a row was found.
pub(crate) async fn scan_val<T: FromValue>(
    driver: &dyn Driver,
    sql: &str,
    args: &[Value],
    dest: &mut T,
) -> Result<bool> {
    let mut rows = query(driver, sql, args).await?;
    match rows.next().await {
        Some(row) => {
            *dest = row?.first_value()?;
            Ok(true)
        }
        None => Ok(false),
    }
}
