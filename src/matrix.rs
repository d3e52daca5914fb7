// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::TryReserveError;
use std::marker::PhantomData;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::layout::Layout;
use crate::missing::MISSING_INT32;

/// A growable rectangular table of `i32` cells stored row-major in layout `L`.
///
/// Cells are addressed by logical `(input, field)` coordinates; `L` decides which of the two
/// is the row. Raw writes and resizes live here and stay crate-private, the public tables
/// decide when to call them.
#[derive(Debug, Clone)]
pub(crate) struct Matrix<L: Layout> {
    cells: Vec<i32>,
    num_rows: usize,
    num_cols: usize,
    _layout: PhantomData<L>,
}

impl<L: Layout> Default for Matrix<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Matrix<L> {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            num_rows: 0,
            num_cols: 0,
            _layout: PhantomData,
        }
    }

    /// Logical extents as `(num_inputs, num_fields)`.
    #[inline]
    pub fn extents(&self) -> (usize, usize) {
        L::to_logical(self.num_rows, self.num_cols)
    }

    #[inline]
    fn offset(&self, input: usize, field: usize) -> Option<usize> {
        let (row, col) = L::to_physical(input, field);
        if row < self.num_rows && col < self.num_cols {
            Some(row * self.num_cols + col)
        } else {
            None
        }
    }

    /// Cell at `(input, field)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, input: usize, field: usize) -> Option<i32> {
        self.offset(input, field).map(|offset| self.cells[offset])
    }

    /// Returns the offset of `(input, field)` or an out-of-range error naming `what`.
    #[inline]
    pub fn checked_offset(
        &self,
        what: &'static str,
        input: usize,
        field: usize,
    ) -> Result<usize, Error> {
        self.offset(input, field).ok_or_else(|| {
            let (num_inputs, num_fields) = self.extents();
            Error::out_of_range(what, input, field, num_inputs, num_fields)
        })
    }

    #[inline]
    pub fn get_at(&self, offset: usize) -> i32 {
        self.cells[offset]
    }

    #[inline]
    pub fn set_at(&mut self, offset: usize, value: i32) {
        self.cells[offset] = value;
    }

    /// Sets every allocated cell to the missing sentinel without reallocating.
    pub fn reset_all(&mut self) {
        self.cells.fill(MISSING_INT32);
    }

    /// Grows the matrix to cover `num_inputs × num_fields`, never shrinking either extent.
    ///
    /// Existing cells keep their logical coordinates; new cells hold the missing sentinel.
    /// Returns whether a reallocation took place.
    pub fn grow(&mut self, num_inputs: usize, num_fields: usize) -> Result<bool, Error> {
        let (want_rows, want_cols) = L::to_physical(num_inputs, num_fields);
        let new_rows = self.num_rows.max(want_rows);
        let new_cols = self.num_cols.max(want_cols);
        if new_rows == self.num_rows && new_cols == self.num_cols {
            return Ok(false);
        }

        let new_len = new_rows.checked_mul(new_cols).ok_or_else(|| {
            Error::new(ErrorKind::AllocationFailed, "lookup matrix shape overflows")
                .with_context("rows", new_rows)
                .with_context("cols", new_cols)
        })?;
        let alloc_error = |err: TryReserveError| {
            Error::new(ErrorKind::AllocationFailed, "failed to grow lookup matrix")
                .with_context("rows", new_rows)
                .with_context("cols", new_cols)
                .set_source(err)
        };

        if new_cols == self.num_cols {
            // Only new rows: existing rows stay in place.
            self.cells
                .try_reserve_exact(new_len - self.cells.len())
                .map_err(alloc_error)?;
            self.cells.resize(new_len, MISSING_INT32);
        } else {
            let mut cells = Vec::new();
            cells.try_reserve_exact(new_len).map_err(alloc_error)?;
            cells.resize(new_len, MISSING_INT32);
            if self.num_cols > 0 {
                for (row, old) in self.cells.chunks_exact(self.num_cols).enumerate() {
                    let start = row * new_cols;
                    cells[start..start + self.num_cols].copy_from_slice(old);
                }
            }
            self.cells = cells;
        }

        let layout = L::KIND;
        tracing::debug!(
            %layout,
            old_rows = self.num_rows,
            old_cols = self.num_cols,
            rows = new_rows,
            cols = new_cols,
            "grew lookup matrix"
        );
        self.num_rows = new_rows;
        self.num_cols = new_cols;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldOrdered;
    use crate::layout::InputOrdered;

    fn get<L: Layout>(matrix: &Matrix<L>, input: usize, field: usize) -> i32 {
        let offset = matrix.checked_offset("test", input, field).unwrap();
        matrix.get_at(offset)
    }

    fn set<L: Layout>(matrix: &mut Matrix<L>, input: usize, field: usize, value: i32) {
        let offset = matrix.checked_offset("test", input, field).unwrap();
        matrix.set_at(offset, value);
    }

    fn check_grow_preserves_cells<L: Layout>() {
        let mut matrix = Matrix::<L>::new();
        assert!(matrix.grow(2, 3).unwrap());
        assert_eq!(matrix.extents(), (2, 3));
        set(&mut matrix, 1, 2, 12);
        set(&mut matrix, 0, 0, 0);

        // widen the column axis, forcing a re-layout
        assert!(matrix.grow(2, 6).unwrap());
        // add rows only
        assert!(matrix.grow(4, 6).unwrap());
        // both physical axes at once
        assert!(matrix.grow(5, 8).unwrap());
        assert_eq!(matrix.extents(), (5, 8));

        assert_eq!(get(&matrix, 1, 2), 12);
        assert_eq!(get(&matrix, 0, 0), 0);
        for input in 0..5 {
            for field in 0..8 {
                if (input, field) != (1, 2) && (input, field) != (0, 0) {
                    assert_eq!(get(&matrix, input, field), MISSING_INT32);
                }
            }
        }
    }

    #[test]
    fn test_grow_preserves_cells_input_ordered() {
        check_grow_preserves_cells::<InputOrdered>();
    }

    #[test]
    fn test_grow_preserves_cells_field_ordered() {
        check_grow_preserves_cells::<FieldOrdered>();
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut matrix = Matrix::<FieldOrdered>::new();
        matrix.grow(3, 4).unwrap();
        assert!(!matrix.grow(1, 1).unwrap());
        assert!(!matrix.grow(3, 4).unwrap());
        assert_eq!(matrix.extents(), (3, 4));
        assert!(matrix.grow(1, 5).unwrap());
        assert_eq!(matrix.extents(), (3, 5));
    }

    #[test]
    fn test_grow_from_zero_columns() {
        let mut matrix = Matrix::<InputOrdered>::new();
        assert!(matrix.grow(3, 0).unwrap());
        assert_eq!(matrix.extents(), (3, 0));
        assert!(matrix.checked_offset("test", 0, 0).is_err());
        assert!(matrix.grow(3, 2).unwrap());
        assert_eq!(get(&matrix, 2, 1), MISSING_INT32);
    }

    #[test]
    fn test_grow_overflow_is_allocation_failure() {
        let mut matrix = Matrix::<InputOrdered>::new();
        let err = matrix.grow(usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationFailed);
        assert_eq!(matrix.extents(), (0, 0));
    }

    #[test]
    fn test_physical_storage_follows_layout() {
        let mut by_input = Matrix::<InputOrdered>::new();
        let mut by_field = Matrix::<FieldOrdered>::new();
        by_input.grow(2, 3).unwrap();
        by_field.grow(2, 3).unwrap();
        set(&mut by_input, 1, 0, 5);
        set(&mut by_field, 1, 0, 5);
        // input 1, field 0: row 1 col 0 of 3 columns vs row 0 col 1 of 2 columns
        assert_eq!(by_input.cells[3], 5);
        assert_eq!(by_field.cells[1], 5);
    }
}
