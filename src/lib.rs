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

//! Bidirectional index lookup tables for merging records from several inputs.
//!
//! When several VCF-like sources are merged, each input numbers its fields, samples and
//! alleles locally while the output uses one merged numbering. An [`IndexLookupTable`]
//! answers both "which merged index is local index `j` of input `i`?" and "which local index
//! of input `i` is merged index `m`?" with a direct array access.
//!
//! Each of the two underlying matrices is stored in one of two [`layout`]s, picked through the
//! table's type parameters. [`AlleleMergeTable`] specializes the table for the small,
//! per-record allele lists of a merged site.
//!
//! Absent mappings are `None` in the typed API and [`missing::MISSING_INT32`] in storage and
//! in the `_raw` accessors.
//!
//! # Usage
//!
//! ```rust
//! use mergelut::IndexLookupTable;
//! use mergelut::layout::FieldOrdered;
//! use mergelut::layout::InputOrdered;
//!
//! // forward lookups walk one input, reverse lookups walk one merged field
//! let mut samples = IndexLookupTable::<InputOrdered, FieldOrdered>::with_capacity(2, 3).unwrap();
//! samples.add_mapping(0, 0, 0);
//! samples.add_mapping(1, 0, 1);
//! samples.add_mapping(1, 1, 2);
//!
//! assert_eq!(samples.get_merged_for_input(1, 1), Some(2));
//! assert_eq!(samples.get_input_for_merged(0, 1), None);
//! ```

pub mod error;
pub mod layout;
pub mod missing;

mod alleles;
mod matrix;
mod table;
mod view;

pub use self::alleles::AlleleMergeTable;
pub use self::alleles::CombineAllelesTable;
pub use self::alleles::DEFAULT_INIT_NUM_ALLELES;
pub use self::table::FieldOrderedTable;
pub use self::table::IndexLookupTable;
pub use self::table::InputOrderedTable;
pub use self::table::LookupTableBuilder;
pub use self::view::LookupView;
