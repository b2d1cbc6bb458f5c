use tracing::trace;

use crate::answers::TableResponse;
use crate::merge::{expand_row_ids, interactive_columns, resolve_cell};
use crate::options::{ColumnPolicy, EvalOptions};
use crate::spec::table::{CellKind, Combinator, TableCell, TableCheck, TableRow};

/// Evaluates a table check with its stored combinator (`any` when it names a widget).
pub fn table_cell_satisfied(
    check: &TableCheck,
    rows: &[TableRow],
    cells: &TableResponse,
) -> bool {
    table_cell_satisfied_with(check, rows, cells, &EvalOptions::default())
}

pub fn table_cell_satisfied_with(
    check: &TableCheck,
    rows: &[TableRow],
    cells: &TableResponse,
    options: &EvalOptions,
) -> bool {
    let combinator = check.check_type.combinator().unwrap_or(Combinator::Any);
    TableScope::new(rows, cells, options).satisfied(check, combinator)
}

/// A table question's grid paired with its response, evaluated under fixed options.
pub(crate) struct TableScope<'a> {
    rows: &'a [TableRow],
    cells: &'a TableResponse,
    options: &'a EvalOptions,
}

impl<'a> TableScope<'a> {
    pub(crate) fn new(
        rows: &'a [TableRow],
        cells: &'a TableResponse,
        options: &'a EvalOptions,
    ) -> Self {
        Self {
            rows,
            cells,
            options,
        }
    }

    /// Combines per-row hits over the merge-expanded row set of `check`.
    ///
    /// Unknown rows or a column missing from a referenced row make the whole
    /// check false, whatever the combinator.
    pub(crate) fn satisfied(&self, check: &TableCheck, combinator: Combinator) -> bool {
        let Some(row_ids) = self.checked_rows(check) else {
            return false;
        };
        let mut hits = row_ids.iter().map(|row_id| self.row_hit(check, row_id));
        let result = match combinator {
            Combinator::Any => hits.any(|hit| hit),
            Combinator::All => hits.all(|hit| hit),
            Combinator::None => !hits.any(|hit| hit),
        };
        trace!(rows = ?row_ids, ?combinator, result, "table check evaluated");
        result
    }

    /// True when exactly the rows of `check` are hit and no other row of the table is.
    pub(crate) fn exclusive(&self, check: &TableCheck) -> bool {
        let Some(row_ids) = self.checked_rows(check) else {
            return false;
        };
        if !row_ids.iter().all(|row_id| self.row_hit(check, row_id)) {
            return false;
        }
        self.rows
            .iter()
            .filter(|row| !row_ids.contains(&row.id))
            .all(|row| !self.row_hit(check, &row.id))
    }

    /// Non-empty values selected in the cells scoped by `check`, row by row.
    pub(crate) fn selected_values(&self, check: &TableCheck) -> Vec<&'a str> {
        let widget = check.check_type.widget();
        let mut values = Vec::new();
        for row_id in &check.row_ids {
            for col in self.columns(check, row_id) {
                let Some(cell) = resolve_cell(row_id, self.rows, col) else {
                    continue;
                };
                if !cell.kind.is_interactive() || !widget.is_none_or(|kind| cell.kind == kind) {
                    continue;
                }
                if let Some(value) = self.cells.get(&cell.id) {
                    for selected in value.values() {
                        values.push(selected);
                        if let Some(mapped) = cell.option(selected).and_then(|o| o.value.as_deref())
                        {
                            values.push(mapped);
                        }
                    }
                }
            }
        }
        values
    }

    fn checked_rows(&self, check: &TableCheck) -> Option<Vec<String>> {
        if check.row_ids.is_empty() {
            return None;
        }
        for row_id in &check.row_ids {
            let row = self.rows.iter().find(|row| &row.id == row_id)?;
            if let Some(col) = check.cell_column_index
                && row.cells.get(col).is_none()
            {
                return None;
            }
        }
        Some(expand_row_ids(
            &check.row_ids,
            self.rows,
            check.cell_column_index,
        ))
    }

    fn columns(&self, check: &TableCheck, row_id: &str) -> Vec<usize> {
        match check.cell_column_index {
            Some(col) => vec![col],
            None => interactive_columns(row_id, self.rows),
        }
    }

    fn row_hit(&self, check: &TableCheck, row_id: &str) -> bool {
        let widget = check.check_type.widget();
        let mut cells = self
            .columns(check, row_id)
            .into_iter()
            .filter_map(|col| resolve_cell(row_id, self.rows, col))
            .filter(|cell| widget.is_none_or(|kind| cell.kind == kind))
            .peekable();

        match (check.cell_column_index, self.options.unscoped_columns) {
            (Some(_), _) | (None, ColumnPolicy::Any) => {
                cells.any(|cell| self.cell_hit(cell, &check.expected_values))
            }
            (None, ColumnPolicy::All) => {
                cells.peek().is_some()
                    && cells.all(|cell| self.cell_hit(cell, &check.expected_values))
            }
        }
    }

    fn cell_hit(&self, cell: &TableCell, expected: &[String]) -> bool {
        let values = self
            .cells
            .get(&cell.id)
            .map(|value| value.values())
            .unwrap_or_default();
        let accepts = |value: &str| expected.iter().any(|candidate| candidate == value);

        match cell.kind {
            CellKind::Checkbox => {
                if expected.is_empty() {
                    !values.is_empty()
                } else {
                    values.iter().any(|value| accepts(*value))
                }
            }
            CellKind::Radio | CellKind::Select | CellKind::Input => match values.first() {
                Some(value) => expected.is_empty() || accepts(*value),
                None => false,
            },
            CellKind::Text | CellKind::Image => false,
        }
    }
}
