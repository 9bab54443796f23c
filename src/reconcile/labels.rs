//! Instance labels: the only link between a definition and its remote todos.
//!
//! An instance of definition `name` with target `n` is labelled
//! `"<name> (<k> of <n>)"`. The remote has no notion of definitions, so
//! membership is decided purely on the label:
//!
//! - a todo *is* instance `k` when its label equals the expected label,
//!   ignoring case and surrounding whitespace;
//! - a todo *belongs to* a definition when its label starts with
//!   `"<name> ("`, ignoring case. Any numbered suffix matches, including
//!   numbers above the current target.
//!
//! An unrelated todo that happens to carry an instance label is
//! indistinguishable from a real instance.

/// Label of the `k`-th instance of a cycle with `target` instances.
#[must_use]
pub fn instance_label(name: &str, k: u32, target: u32) -> String {
    format!("{name} ({k} of {target})")
}

/// Label equality used for existence checks.
#[must_use]
pub fn labels_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether `text` is a numbered instance of definition `name`.
#[must_use]
pub fn belongs_to(text: &str, name: &str) -> bool {
    let prefix = format!("{} (", name.trim().to_lowercase());
    text.trim().to_lowercase().starts_with(&prefix)
}
