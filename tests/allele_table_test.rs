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

use mergelut::AlleleMergeTable;
use mergelut::CombineAllelesTable;
use mergelut::DEFAULT_INIT_NUM_ALLELES;
use mergelut::layout::FieldOrdered;
use mergelut::layout::InputOrdered;

#[test]
fn test_default_capacity() {
    let table = CombineAllelesTable::new(2).unwrap();
    assert_eq!(table.num_inputs(), 2);
    assert_eq!(table.max_num_alleles(), DEFAULT_INIT_NUM_ALLELES);
    assert_eq!(table.view().num_merged_fields(), 10);
    assert_eq!(table.get_input_for_merged(1, 9), None);
}

#[test]
fn test_grow_only_past_watermark() {
    let mut table = CombineAllelesTable::new(2).unwrap();
    table.add_mapping(1, 2, 4);

    table.grow_if_needed(5).unwrap();
    assert_eq!(table.max_num_alleles(), 10);
    assert_eq!(table.view().num_merged_fields(), 10);

    table.grow_if_needed(15).unwrap();
    assert_eq!(table.max_num_alleles(), 15);
    assert_eq!(table.view().num_merged_fields(), 15);
    assert_eq!(table.view().num_inputs(), 2);
    assert_eq!(table.get_merged_for_input(1, 2), Some(4));
    assert_eq!(table.get_input_for_merged(1, 4), Some(2));
    assert_eq!(table.get_input_for_merged(1, 14), None);

    table.grow_if_needed(12).unwrap();
    assert_eq!(table.max_num_alleles(), 15);
    assert_eq!(table.view().num_merged_fields(), 15);
}

#[test]
fn test_per_record_reuse() {
    let mut table = AlleleMergeTable::<FieldOrdered, InputOrdered>::new(3).unwrap();
    // (number of merged alleles, [(input, local allele, merged allele)])
    let records: [(usize, &[(usize, usize, usize)]); 3] = [
        (2, &[(0, 0, 0), (0, 1, 1), (2, 0, 0), (2, 1, 1)]),
        (12, &[(0, 0, 0), (1, 0, 0), (1, 3, 11), (2, 1, 7)]),
        (3, &[(1, 0, 0), (1, 1, 2)]),
    ];

    for (num_alleles, mappings) in records {
        table.reset_all();
        table.grow_if_needed(num_alleles).unwrap();
        for &(input_idx, local_idx, merged_idx) in mappings {
            table.add_mapping(input_idx, local_idx, merged_idx);
        }
        for &(input_idx, local_idx, merged_idx) in mappings {
            assert_eq!(table.get_merged_for_input(input_idx, local_idx), Some(merged_idx));
            assert_eq!(table.get_input_for_merged(input_idx, merged_idx), Some(local_idx));
        }
    }

    assert_eq!(table.max_num_alleles(), 12);
    // nothing from the earlier records survives the last reset
    assert_eq!(table.get_input_for_merged(1, 11), None);
    assert_eq!(table.get_merged_for_input(2, 1), None);
    assert_eq!(table.get_input_for_merged(0, 0), None);
}

#[test]
fn test_asymmetric_reset() {
    let mut table = CombineAllelesTable::with_capacity(1, 4).unwrap();
    table.add_mapping(0, 3, 1);

    table.reset_input_for_merged(0, 1);
    assert_eq!(table.get_input_for_merged(0, 1), None);
    assert_eq!(table.get_merged_for_input(0, 3), Some(1));

    table.reset_merged_for_input(0, 3);
    assert_eq!(table.get_merged_for_input(0, 3), None);
}

#[test]
fn test_out_of_range_allele_is_an_error() {
    let mut table = CombineAllelesTable::with_capacity(2, 3).unwrap();
    assert!(table.try_add_mapping(0, 0, 3).is_err());
    assert!(table.try_add_mapping(2, 0, 0).is_err());
    assert!(table.try_get_merged_for_input(0, 3).is_err());

    table.grow_if_needed(4).unwrap();
    table.try_add_mapping(0, 0, 3).unwrap();
    assert_eq!(table.try_get_input_for_merged(0, 3).unwrap(), Some(0));
}

#[test]
#[should_panic(expected = "IndexOutOfRange")]
fn test_input_count_is_fixed() {
    let mut table = CombineAllelesTable::new(2).unwrap();
    table.grow_if_needed(40).unwrap();
    table.add_mapping(2, 0, 0);
}
