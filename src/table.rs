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

use std::marker::PhantomData;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::layout::FieldOrdered;
use crate::layout::InputOrdered;
use crate::layout::Layout;
use crate::layout::LayoutKind;
use crate::matrix::Matrix;
use crate::missing::MAX_INDEX;
use crate::missing::MISSING_INT32;
use crate::missing::decode;
use crate::missing::encode;
use crate::view::LookupView;

const FORWARD: &str = "input-to-merged";
const REVERSE: &str = "merged-to-input";

/// Both matrices stored input-major.
pub type InputOrderedTable = IndexLookupTable<InputOrdered, InputOrdered>;

/// Both matrices stored field-major.
pub type FieldOrderedTable = IndexLookupTable<FieldOrdered, FieldOrdered>;

/// Bidirectional lookup table between the local indices of each input and merged indices.
///
/// The table holds two matrices of logical shape `[num_inputs × num_merged_fields]`:
/// `inputs_to_merged[(input, local)]` yields the merged index of an input's local field, and
/// `merged_to_inputs[(input, merged)]` yields the input's local index of a merged field.
/// `F` and `R` pick the physical [`Layout`] of each matrix; they change memory order only,
/// never the answer to a query.
///
/// Reallocation should be rare. Size the table close to its steady-state need up front so
/// that [`grow_if_needed`](Self::grow_if_needed) stays a bounds comparison on the hot path.
///
/// # Examples
///
/// ```
/// use mergelut::InputOrderedTable;
///
/// let mut table = InputOrderedTable::with_capacity(3, 8).unwrap();
/// table.add_mapping(0, 5, 2);
/// table.add_mapping(1, 7, 2);
///
/// assert_eq!(table.get_input_for_merged(0, 2), Some(5));
/// assert_eq!(table.get_input_for_merged(1, 2), Some(7));
/// assert_eq!(table.get_merged_for_input(0, 5), Some(2));
/// assert_eq!(table.get_merged_for_input(2, 5), None);
/// ```
#[derive(Debug, Clone)]
pub struct IndexLookupTable<F: Layout = InputOrdered, R: Layout = InputOrdered> {
    inputs_to_merged: Matrix<F>,
    merged_to_inputs: Matrix<R>,
}

impl<F: Layout, R: Layout> Default for IndexLookupTable<F, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Layout, R: Layout> IndexLookupTable<F, R> {
    /// Creates an empty table with no allocated cells.
    pub fn new() -> Self {
        Self {
            inputs_to_merged: Matrix::new(),
            merged_to_inputs: Matrix::new(),
        }
    }

    /// Creates a table covering `num_inputs × num_merged_fields`, every cell missing.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`] if the cells cannot be allocated.
    pub fn with_capacity(num_inputs: usize, num_merged_fields: usize) -> Result<Self, Error> {
        let mut table = Self::new();
        table.grow_if_needed(num_inputs, num_merged_fields)?;
        Ok(table)
    }

    /// Returns a builder for this table type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mergelut::FieldOrderedTable;
    ///
    /// let table = FieldOrderedTable::builder()
    ///     .num_inputs(4)
    ///     .num_merged_fields(16)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(table.num_inputs(), 4);
    /// assert_eq!(table.num_merged_fields(), 16);
    /// ```
    pub fn builder() -> LookupTableBuilder<F, R> {
        LookupTableBuilder::default()
    }

    /// Number of inputs currently addressable in both directions.
    pub fn num_inputs(&self) -> usize {
        self.inputs_to_merged
            .extents()
            .0
            .min(self.merged_to_inputs.extents().0)
    }

    /// Number of fields currently addressable in both directions.
    pub fn num_merged_fields(&self) -> usize {
        self.inputs_to_merged
            .extents()
            .1
            .min(self.merged_to_inputs.extents().1)
    }

    /// Layout of the input-to-merged matrix.
    pub fn forward_layout(&self) -> LayoutKind {
        F::KIND
    }

    /// Layout of the merged-to-input matrix.
    pub fn reverse_layout(&self) -> LayoutKind {
        R::KIND
    }

    /// Clears every mapping. Capacity is retained and nothing is allocated.
    pub fn reset_all(&mut self) {
        self.inputs_to_merged.reset_all();
        self.merged_to_inputs.reset_all();
    }

    /// Grows both matrices to cover `num_inputs × num_merged_fields`.
    ///
    /// Extents never shrink, existing mappings are preserved, new cells are missing. When the
    /// requested shape is already covered this only compares bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`] if the new cells cannot be allocated.
    pub fn grow_if_needed(
        &mut self,
        num_inputs: usize,
        num_merged_fields: usize,
    ) -> Result<(), Error> {
        self.inputs_to_merged.grow(num_inputs, num_merged_fields)?;
        self.merged_to_inputs.grow(num_inputs, num_merged_fields)?;
        Ok(())
    }

    /// Records that field `local_idx` of input `input_idx` is merged field `merged_idx`.
    ///
    /// Both directions are updated. Use the `reset_*` methods to invalidate a mapping.
    ///
    /// # Panics
    ///
    /// Panics if any index exceeds [`MAX_INDEX`] or lies outside the allocated extents.
    #[track_caller]
    pub fn add_mapping(&mut self, input_idx: usize, local_idx: usize, merged_idx: usize) {
        expect_ok(self.try_add_mapping(input_idx, local_idx, merged_idx))
    }

    /// Fallible form of [`add_mapping`](Self::add_mapping). On error the table is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidMappingArgument`] if an index exceeds [`MAX_INDEX`], or
    /// [`ErrorKind::IndexOutOfRange`] if it lies outside the allocated extents.
    pub fn try_add_mapping(
        &mut self,
        input_idx: usize,
        local_idx: usize,
        merged_idx: usize,
    ) -> Result<(), Error> {
        let (local, merged) = match (encode(local_idx), encode(merged_idx)) {
            (Some(local), Some(merged)) if input_idx <= MAX_INDEX => (local, merged),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidMappingArgument,
                    "mapping index does not fit a lookup cell",
                )
                .with_context("input_idx", input_idx)
                .with_context("local_idx", local_idx)
                .with_context("merged_idx", merged_idx));
            }
        };
        let forward = self
            .inputs_to_merged
            .checked_offset(FORWARD, input_idx, local_idx)?;
        let reverse = self
            .merged_to_inputs
            .checked_offset(REVERSE, input_idx, merged_idx)?;
        self.inputs_to_merged.set_at(forward, merged);
        self.merged_to_inputs.set_at(reverse, local);
        Ok(())
    }

    /// Merged index of field `local_idx` of input `input_idx`, or `None` if unmapped.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[inline]
    #[track_caller]
    pub fn get_merged_for_input(&self, input_idx: usize, local_idx: usize) -> Option<usize> {
        decode(self.get_merged_for_input_raw(input_idx, local_idx))
    }

    /// Fallible form of [`get_merged_for_input`](Self::get_merged_for_input).
    pub fn try_get_merged_for_input(
        &self,
        input_idx: usize,
        local_idx: usize,
    ) -> Result<Option<usize>, Error> {
        let offset = self
            .inputs_to_merged
            .checked_offset(FORWARD, input_idx, local_idx)?;
        Ok(decode(self.inputs_to_merged.get_at(offset)))
    }

    /// Like [`get_merged_for_input`](Self::get_merged_for_input) but returns the stored cell,
    /// [`MISSING_INT32`] when unmapped.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[inline]
    #[track_caller]
    pub fn get_merged_for_input_raw(&self, input_idx: usize, local_idx: usize) -> i32 {
        let offset = expect_ok(
            self.inputs_to_merged
                .checked_offset(FORWARD, input_idx, local_idx),
        );
        self.inputs_to_merged.get_at(offset)
    }

    /// Local index in input `input_idx` of merged field `merged_idx`, or `None` if unmapped.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[inline]
    #[track_caller]
    pub fn get_input_for_merged(&self, input_idx: usize, merged_idx: usize) -> Option<usize> {
        decode(self.get_input_for_merged_raw(input_idx, merged_idx))
    }

    /// Fallible form of [`get_input_for_merged`](Self::get_input_for_merged).
    pub fn try_get_input_for_merged(
        &self,
        input_idx: usize,
        merged_idx: usize,
    ) -> Result<Option<usize>, Error> {
        let offset = self
            .merged_to_inputs
            .checked_offset(REVERSE, input_idx, merged_idx)?;
        Ok(decode(self.merged_to_inputs.get_at(offset)))
    }

    /// Like [`get_input_for_merged`](Self::get_input_for_merged) but returns the stored cell,
    /// [`MISSING_INT32`] when unmapped.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[inline]
    #[track_caller]
    pub fn get_input_for_merged_raw(&self, input_idx: usize, merged_idx: usize) -> i32 {
        let offset = expect_ok(
            self.merged_to_inputs
                .checked_offset(REVERSE, input_idx, merged_idx),
        );
        self.merged_to_inputs.get_at(offset)
    }

    /// Invalidates the merged index of field `local_idx` of input `input_idx`.
    ///
    /// Only the input-to-merged direction is cleared; the reverse cell is left as is.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[track_caller]
    pub fn reset_merged_for_input(&mut self, input_idx: usize, local_idx: usize) {
        expect_ok(self.try_reset_merged_for_input(input_idx, local_idx))
    }

    /// Fallible form of [`reset_merged_for_input`](Self::reset_merged_for_input).
    pub fn try_reset_merged_for_input(
        &mut self,
        input_idx: usize,
        local_idx: usize,
    ) -> Result<(), Error> {
        let offset = self
            .inputs_to_merged
            .checked_offset(FORWARD, input_idx, local_idx)?;
        self.inputs_to_merged.set_at(offset, MISSING_INT32);
        Ok(())
    }

    /// Invalidates the local index in input `input_idx` of merged field `merged_idx`.
    ///
    /// Only the merged-to-input direction is cleared; the forward cell is left as is.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the allocated extents.
    #[track_caller]
    pub fn reset_input_for_merged(&mut self, input_idx: usize, merged_idx: usize) {
        expect_ok(self.try_reset_input_for_merged(input_idx, merged_idx))
    }

    /// Fallible form of [`reset_input_for_merged`](Self::reset_input_for_merged).
    pub fn try_reset_input_for_merged(
        &mut self,
        input_idx: usize,
        merged_idx: usize,
    ) -> Result<(), Error> {
        let offset = self
            .merged_to_inputs
            .checked_offset(REVERSE, input_idx, merged_idx)?;
        self.merged_to_inputs.set_at(offset, MISSING_INT32);
        Ok(())
    }

    /// Iterates the `(local_idx, merged_idx)` pairs recorded for input `input_idx`, in
    /// ascending local order.
    ///
    /// # Panics
    ///
    /// Panics if `input_idx` is not below [`num_inputs`](Self::num_inputs).
    #[track_caller]
    pub fn mappings_for_input(&self, input_idx: usize) -> impl Iterator<Item = (usize, usize)> {
        let (num_inputs, num_fields) = self.inputs_to_merged.extents();
        if input_idx >= num_inputs {
            panic!(
                "{}",
                Error::out_of_range(FORWARD, input_idx, 0, num_inputs, num_fields)
            );
        }
        (0..num_fields).filter_map(move |local_idx| {
            let merged = self.inputs_to_merged.get(input_idx, local_idx)?;
            decode(merged).map(|merged_idx| (local_idx, merged_idx))
        })
    }

    /// Borrows a read-only view of the table for the query phase.
    ///
    /// The view is `Copy` and `Sync`, so it can be handed to several reader threads while
    /// the borrow checker keeps the table from being mutated.
    pub fn view(&self) -> LookupView<'_, F, R> {
        LookupView::new(self)
    }
}

#[track_caller]
fn expect_ok<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Builder for [`IndexLookupTable`] with an initial capacity.
///
/// Layouts are picked by the type parameters of the table the builder was obtained from.
#[derive(Debug, Clone)]
pub struct LookupTableBuilder<F: Layout = InputOrdered, R: Layout = InputOrdered> {
    num_inputs: usize,
    num_merged_fields: usize,
    _layouts: PhantomData<(F, R)>,
}

impl<F: Layout, R: Layout> Default for LookupTableBuilder<F, R> {
    fn default() -> Self {
        Self {
            num_inputs: 0,
            num_merged_fields: 0,
            _layouts: PhantomData,
        }
    }
}

impl<F: Layout, R: Layout> LookupTableBuilder<F, R> {
    /// Sets the initial number of inputs.
    pub fn num_inputs(mut self, num_inputs: usize) -> Self {
        self.num_inputs = num_inputs;
        self
    }

    /// Sets the initial number of merged fields.
    pub fn num_merged_fields(mut self, num_merged_fields: usize) -> Self {
        self.num_merged_fields = num_merged_fields;
        self
    }

    /// Builds the table with every cell missing.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`] if the cells cannot be allocated.
    pub fn build(self) -> Result<IndexLookupTable<F, R>, Error> {
        IndexLookupTable::with_capacity(self.num_inputs, self.num_merged_fields)
    }
}
