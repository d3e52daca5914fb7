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

//! The "no mapping recorded" sentinel shared by every lookup table.
//!
//! Cells are stored as `i32` holding htslib's `bcf_int32_missing` when empty, so a
//! merged record writer can copy them into BCF integer buffers unchanged. The typed
//! accessors surface the sentinel as `None`.

/// Value stored in a cell that holds no mapping. Identical to `bcf_int32_missing`.
pub const MISSING_INT32: i32 = i32::MIN;

/// Largest index a table can record.
pub const MAX_INDEX: usize = i32::MAX as usize;

/// Returns true if `value` is the missing sentinel.
#[inline]
pub const fn is_missing(value: i32) -> bool {
    value == MISSING_INT32
}

#[inline]
pub(crate) fn decode(raw: i32) -> Option<usize> {
    if is_missing(raw) {
        None
    } else {
        Some(raw as usize)
    }
}

/// Indices above [`MAX_INDEX`] do not fit a cell.
#[inline]
pub(crate) fn encode(idx: usize) -> Option<i32> {
    i32::try_from(idx).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rejects_indices_beyond_cell_range() {
        assert_eq!(encode(0), Some(0));
        assert_eq!(encode(MAX_INDEX), Some(i32::MAX));
        assert_eq!(encode(MAX_INDEX + 1), None);
    }

    #[test]
    fn test_decode_maps_sentinel_to_none() {
        assert_eq!(decode(MISSING_INT32), None);
        assert_eq!(decode(7), Some(7));
        assert!(is_missing(MISSING_INT32));
        assert!(!is_missing(0));
    }
}
