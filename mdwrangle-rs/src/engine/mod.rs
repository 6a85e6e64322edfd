//! Edit engines: pure computations from `(record, edit)` to new text and
//! metadata. Persistence is the dispatcher's job.

pub mod move_files;
pub mod property;
pub mod replace;
pub mod tag;
pub mod transform;

pub use move_files::plan_move;
pub use property::apply_property_edits;
pub use replace::{CompiledReplace, ReplaceOutcome};
pub use tag::apply_tag_edits;
pub use transform::Program;

use serde_yaml::Value;

/// Render a metadata value the way it reads in an inline field: scalars
/// verbatim, sequences comma-joined with a normalized `", "` separator.
pub(crate) fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(seq) => seq
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) | Value::Tagged(_) => {
            serde_yaml::to_string(value).unwrap_or_default().trim_end().to_string()
        }
    }
}
