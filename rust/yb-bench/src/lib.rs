//! yb-bench: benchmark-only crate (see `benches/`).
