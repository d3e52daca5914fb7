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

//! Physical layouts of a logical `[input × field]` matrix.
//!
//! A lookup matrix can be laid out in one of two ways:
//!
//! - [`InputOrdered`]: `matrix[row][col]` holds input `row`, field `col`. Walking all fields
//!   of one input touches contiguous memory.
//! - [`FieldOrdered`]: `matrix[row][col]` holds field `row`, input `col`. Walking one field
//!   across all inputs touches contiguous memory.
//!
//! Layouts are zero-sized types picked through the type parameters of
//! [`IndexLookupTable`](crate::IndexLookupTable), so the coordinate translation is
//! resolved at compile time.

use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// Runtime description of a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Rows are inputs, columns are fields.
    InputOrdered,
    /// Rows are fields, columns are inputs.
    FieldOrdered,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::InputOrdered => write!(f, "input-ordered"),
            LayoutKind::FieldOrdered => write!(f, "field-ordered"),
        }
    }
}

/// Strategy translating a logical `(input, field)` coordinate into a physical `(row, col)`.
///
/// This trait is sealed; the only implementations are [`InputOrdered`] and [`FieldOrdered`].
pub trait Layout:
    sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static
{
    /// The runtime description of this layout.
    const KIND: LayoutKind;

    /// Maps a logical coordinate (or a logical shape) to its physical counterpart.
    fn to_physical(input: usize, field: usize) -> (usize, usize);

    /// Inverse of [`Layout::to_physical`].
    fn to_logical(row: usize, col: usize) -> (usize, usize);
}

/// Rows are inputs, columns are fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputOrdered;

/// Rows are fields, columns are inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldOrdered;

impl sealed::Sealed for InputOrdered {}
impl sealed::Sealed for FieldOrdered {}

impl Layout for InputOrdered {
    const KIND: LayoutKind = LayoutKind::InputOrdered;

    #[inline(always)]
    fn to_physical(input: usize, field: usize) -> (usize, usize) {
        (input, field)
    }

    #[inline(always)]
    fn to_logical(row: usize, col: usize) -> (usize, usize) {
        (row, col)
    }
}

impl Layout for FieldOrdered {
    const KIND: LayoutKind = LayoutKind::FieldOrdered;

    #[inline(always)]
    fn to_physical(input: usize, field: usize) -> (usize, usize) {
        (field, input)
    }

    #[inline(always)]
    fn to_logical(row: usize, col: usize) -> (usize, usize) {
        (col, row)
    }
}
