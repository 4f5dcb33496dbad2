// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flowtext benchmarks.

use tango_bench::{tango_benchmarks, tango_main};

use flowtext_bench::benches::{caching, layout, packing};

tango_benchmarks!(packing(), caching(), layout());
tango_main!();
