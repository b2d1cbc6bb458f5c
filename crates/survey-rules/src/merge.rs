//! Rowspan-aware lookup of the cells that back each table row.
//!
//! A cell with `rowspan > 1` covers the rows below it; the covered rows keep a
//! hidden placeholder at that column. Every row of such a merge group reads
//! the response stored on the merge-start cell, so conditions never observe a
//! partially checked group.

use std::ops::Range;

use serde::Serialize;

use crate::spec::table::{TableCell, TableRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMergeInfo {
    pub is_merged: bool,
    pub merge_start_row_id: String,
    pub merged_row_ids: Vec<String>,
}

/// Every row id merged with `row_id` at `col`, in row order; just `row_id` when unmerged.
pub fn merged_row_ids(row_id: &str, rows: &[TableRow], col: usize) -> Vec<String> {
    match row_position(row_id, rows).and_then(|index| merge_span(rows, index, col)) {
        Some(span) => rows[span].iter().map(|row| row.id.clone()).collect(),
        None => vec![row_id.to_string()],
    }
}

pub fn row_merge_info(row_id: &str, rows: &[TableRow], col: usize) -> RowMergeInfo {
    match row_position(row_id, rows).and_then(|index| merge_span(rows, index, col)) {
        Some(span) => RowMergeInfo {
            is_merged: true,
            merge_start_row_id: rows[span.start].id.clone(),
            merged_row_ids: rows[span].iter().map(|row| row.id.clone()).collect(),
        },
        None => RowMergeInfo {
            is_merged: false,
            merge_start_row_id: row_id.to_string(),
            merged_row_ids: vec![row_id.to_string()],
        },
    }
}

/// The cell that holds the response for `row_id` at `col`.
pub fn resolve_cell<'a>(row_id: &str, rows: &'a [TableRow], col: usize) -> Option<&'a TableCell> {
    let index = row_position(row_id, rows)?;
    let owner = merge_span(rows, index, col).map_or(index, |span| span.start);
    rows[owner].cells.get(col)
}

/// Expands row ids through their merge groups, keeping first-seen order.
///
/// Without a column, a row is expanded through every column whose owning
/// cell is interactive; merged label columns do not tie rows together.
pub fn expand_row_ids(row_ids: &[String], rows: &[TableRow], col: Option<usize>) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    let mut push = |id: String| {
        if !expanded.contains(&id) {
            expanded.push(id);
        }
    };

    for row_id in row_ids {
        push(row_id.clone());
        let columns = match col {
            Some(col) => vec![col],
            None => interactive_columns(row_id, rows),
        };
        for col in columns {
            for id in merged_row_ids(row_id, rows, col) {
                push(id);
            }
        }
    }

    expanded
}

/// Columns of `row_id` whose owning cell accepts input.
pub fn interactive_columns(row_id: &str, rows: &[TableRow]) -> Vec<usize> {
    let Some(row) = rows.iter().find(|row| row.id == row_id) else {
        return Vec::new();
    };
    (0..row.cells.len())
        .filter(|col| {
            resolve_cell(row_id, rows, *col).is_some_and(|cell| cell.kind.is_interactive())
        })
        .collect()
}

fn row_position(row_id: &str, rows: &[TableRow]) -> Option<usize> {
    rows.iter().position(|row| row.id == row_id)
}

fn merge_span(rows: &[TableRow], index: usize, col: usize) -> Option<Range<usize>> {
    for start in (0..=index).rev() {
        let Some(cell) = rows[start].cells.get(col) else {
            continue;
        };
        let span = cell.row_span();
        if span > 1 && start + span > index {
            return Some(start..(start + span).min(rows.len()));
        }
        if !cell.is_hidden {
            return None;
        }
    }
    None
}
