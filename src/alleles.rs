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
use crate::layout::InputOrdered;
use crate::layout::Layout;
use crate::table::IndexLookupTable;
use crate::view::LookupView;

/// Initial allele capacity. Sites rarely carry more alleles, so growth is seldom triggered.
pub const DEFAULT_INIT_NUM_ALLELES: usize = 10;

/// Allele table used when combining the allele lists of a merged site.
pub type CombineAllelesTable = AlleleMergeTable<InputOrdered, InputOrdered>;

/// Lookup table between the allele indices of each input and the merged allele list.
///
/// One table is created per merge job and reused for every output record. The number of
/// inputs is fixed at construction; only the allele axis grows, and only when a record
/// carries more alleles than any record before it.
///
/// # Examples
///
/// ```
/// use mergelut::CombineAllelesTable;
///
/// let mut alleles = CombineAllelesTable::new(2).unwrap();
///
/// // one record: input 1 lists the merged ALT allele 2 as its first ALT
/// alleles.reset_all();
/// alleles.grow_if_needed(3).unwrap();
/// alleles.add_mapping(1, 1, 2);
/// assert_eq!(alleles.get_input_for_merged(1, 2), Some(1));
/// assert_eq!(alleles.get_input_for_merged(0, 2), None);
/// ```
#[derive(Debug, Clone)]
pub struct AlleleMergeTable<F: Layout = InputOrdered, R: Layout = InputOrdered> {
    table: IndexLookupTable<F, R>,
    num_inputs: usize,
    max_num_alleles: usize,
}

impl<F: Layout, R: Layout> AlleleMergeTable<F, R> {
    /// Creates a table for `num_inputs` inputs with room for [`DEFAULT_INIT_NUM_ALLELES`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`](crate::error::ErrorKind::AllocationFailed) if
    /// the cells cannot be allocated.
    pub fn new(num_inputs: usize) -> Result<Self, Error> {
        Self::with_capacity(num_inputs, DEFAULT_INIT_NUM_ALLELES)
    }

    /// Creates a table for `num_inputs` inputs with room for `num_alleles` merged alleles.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`](crate::error::ErrorKind::AllocationFailed) if
    /// the cells cannot be allocated.
    pub fn with_capacity(num_inputs: usize, num_alleles: usize) -> Result<Self, Error> {
        Ok(Self {
            table: IndexLookupTable::with_capacity(num_inputs, num_alleles)?,
            num_inputs,
            max_num_alleles: num_alleles,
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Largest allele count the table currently has room for.
    pub fn max_num_alleles(&self) -> usize {
        self.max_num_alleles
    }

    /// Makes room for `num_merged_alleles` alleles per input.
    ///
    /// A no-op unless the request exceeds every earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AllocationFailed`](crate::error::ErrorKind::AllocationFailed) if
    /// the cells cannot be allocated; the watermark is then left unchanged.
    #[inline]
    pub fn grow_if_needed(&mut self, num_merged_alleles: usize) -> Result<(), Error> {
        if num_merged_alleles > self.max_num_alleles {
            self.table
                .grow_if_needed(self.num_inputs, num_merged_alleles)?;
            tracing::trace!(
                from = self.max_num_alleles,
                to = num_merged_alleles,
                "raised allele watermark"
            );
            self.max_num_alleles = num_merged_alleles;
        }
        Ok(())
    }

    /// See [`IndexLookupTable::reset_all`].
    pub fn reset_all(&mut self) {
        self.table.reset_all();
    }

    /// See [`IndexLookupTable::add_mapping`].
    #[track_caller]
    pub fn add_mapping(&mut self, input_idx: usize, local_idx: usize, merged_idx: usize) {
        self.table.add_mapping(input_idx, local_idx, merged_idx);
    }

    /// See [`IndexLookupTable::try_add_mapping`].
    pub fn try_add_mapping(
        &mut self,
        input_idx: usize,
        local_idx: usize,
        merged_idx: usize,
    ) -> Result<(), Error> {
        self.table.try_add_mapping(input_idx, local_idx, merged_idx)
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

    #[inline]
    #[track_caller]
    pub fn get_merged_for_input_raw(&self, input_idx: usize, local_idx: usize) -> i32 {
        self.table.get_merged_for_input_raw(input_idx, local_idx)
    }

    #[inline]
    #[track_caller]
    pub fn get_input_for_merged_raw(&self, input_idx: usize, merged_idx: usize) -> i32 {
        self.table.get_input_for_merged_raw(input_idx, merged_idx)
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

    /// See [`IndexLookupTable::reset_merged_for_input`].
    #[track_caller]
    pub fn reset_merged_for_input(&mut self, input_idx: usize, local_idx: usize) {
        self.table.reset_merged_for_input(input_idx, local_idx);
    }

    /// See [`IndexLookupTable::reset_input_for_merged`].
    #[track_caller]
    pub fn reset_input_for_merged(&mut self, input_idx: usize, merged_idx: usize) {
        self.table.reset_input_for_merged(input_idx, merged_idx);
    }

    pub fn try_reset_merged_for_input(
        &mut self,
        input_idx: usize,
        local_idx: usize,
    ) -> Result<(), Error> {
        self.table.try_reset_merged_for_input(input_idx, local_idx)
    }

    pub fn try_reset_input_for_merged(
        &mut self,
        input_idx: usize,
        merged_idx: usize,
    ) -> Result<(), Error> {
        self.table.try_reset_input_for_merged(input_idx, merged_idx)
    }

    /// See [`IndexLookupTable::view`].
    pub fn view(&self) -> LookupView<'_, F, R> {
        self.table.view()
    }
}
