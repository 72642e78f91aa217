// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_builder;
mod test_truncation;
mod utils;
