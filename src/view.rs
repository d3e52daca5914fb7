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

use crate::error::Error;
use crate::layout::Layout;
use crate::table::IndexLookupTable;

/// Read-only handle on an [`IndexLookupTable`] for the query phase of a merge unit.
///
/// While any view is alive the table cannot be mutated, so views may be copied freely and
/// shared across threads.
///
/// # Examples
///
/// ```
/// use mergelut::InputOrderedTable;
///
/// let mut table = InputOrderedTable::with_capacity(2, 4).unwrap();
/// table.add_mapping(1, 3, 0);
///
/// let view = table.view();
/// std::thread::scope(|s| {
///     s.spawn(move || assert_eq!(view.get_input_for_merged(1, 0), Some(3)));
///     s.spawn(move || assert_eq!(view.get_merged_for_input(1, 3), Some(0)));
/// });
/// ```
pub struct LookupView<'a, F: Layout, R: Layout> {
    table: &'a IndexLookupTable<F, R>,
}

impl<F: Layout, R: Layout> Clone for LookupView<'_, F, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Layout, R: Layout> Copy for LookupView<'_, F, R> {}

impl<F: Layout, R: Layout> std::fmt::Debug for LookupView<'_, F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupView")
            .field("num_inputs", &self.num_inputs())
            .field("num_merged_fields", &self.num_merged_fields())
            .finish()
    }
}

impl<'a, F: Layout, R: Layout> LookupView<'a, F, R> {
    pub(crate) fn new(table: &'a IndexLookupTable<F, R>) -> Self {
        Self { table }
    }

    pub fn num_inputs(&self) -> usize {
        self.table.num_inputs()
    }

    pub fn num_merged_fields(&self) -> usize {
        self.table.num_merged_fields()
    }

    /// See [`IndexLookupTable::get_merged_for_input`].
    #[inline]
    #[track_caller]
    pub fn get_merged_for_input(&self, input_idx: usize, local_idx: usize) -> Option<usize> {
        self.table.get_merged_for_input(input_idx, local_idx)
    }

    /// See [`IndexLookupTable::get_input_for_merged`].
    #[inline]
    #[track_caller]
    pub fn get_input_for_merged(&self, input_idx: usize, merged_idx: usize) -> Option<usize> {
        self.table.get_input_for_merged(input_idx, merged_idx)
    }

    pub fn try_get_merged_for_input(
        &self,
        input_idx: usize,
        local_idx: usize,
    ) -> Result<Option<usize>, Error> {
        self.table.try_get_merged_for_input(input_idx, local_idx)
    }

    pub fn try_get_input_for_merged(
        &self,
        input_idx: usize,
        merged_idx: usize,
    ) -> Result<Option<usize>, Error> {
        self.table.try_get_input_for_merged(input_idx, merged_idx)
    }

    /// See [`IndexLookupTable::mappings_for_input`].
    #[track_caller]
    pub fn mappings_for_input(
        self,
        input_idx: usize,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.table.mappings_for_input(input_idx)
    }
}
