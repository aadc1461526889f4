//! Workspace root package. It carries development tooling (pre-commit hooks)
//! only; the library and CLI live under `crates/`.
