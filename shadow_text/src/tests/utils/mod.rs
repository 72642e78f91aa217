// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;

pub(crate) use env::{line_texts, sized, TestEnv, TEST_FONT_SIZE};
