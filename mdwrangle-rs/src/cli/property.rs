//! Property command: build a property edit from NAME=ACTION specs and run it.

use crate::cli::args::PropertyArgs;
use crate::cli::Output;
use crate::error::{ExitCode, Result, WrangleError};
use crate::types::{Edit, PendingEdits, PropertyAction};
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &PropertyArgs, output: &Output) -> Result<ExitCode> {
    let edits = parse_edits(&args.edits)?;
    if edits.is_empty() && !args.lowercase_keys {
        output.info("all edits cancelled; nothing to do");
        return Ok(ExitCode::Success);
    }

    let edit = Edit::Property {
        edits,
        lowercase_keys: args.lowercase_keys,
    };
    crate::cli::execute(vault, &args.selection, &args.run, &edit, output)
}

/// Parse NAME=ACTION specs into the pending-edit map. Repeats overwrite,
/// `cancel` removes.
fn parse_edits(specs: &[String]) -> Result<PendingEdits<PropertyAction>> {
    let mut edits = PendingEdits::new();
    for spec in specs {
        let (name, action) = spec.split_once('=').ok_or_else(|| WrangleError::BadEditSpec {
            spec: spec.clone(),
            message: "expected NAME=ACTION".to_string(),
        })?;
        if name.is_empty() {
            return Err(WrangleError::BadEditSpec {
                spec: spec.clone(),
                message: "empty property name".to_string(),
            });
        }

        match action {
            "cancel" => edits.cancel(name),
            "delete" => edits.set(name, PropertyAction::Delete),
            "inline" => edits.set(name, PropertyAction::Inline),
            "frontmatter" => edits.set(name, PropertyAction::Frontmatter),
            "nested-tags" => edits.set(name, PropertyAction::NestedTags),
            other => match other.strip_prefix("rename:") {
                Some(to) if !to.is_empty() => edits.set(
                    name,
                    PropertyAction::Rename {
                        to: to.to_string(),
                    },
                ),
                Some(_) => {
                    return Err(WrangleError::BadEditSpec {
                        spec: spec.clone(),
                        message: "rename needs a new name, e.g. status=rename:state".to_string(),
                    });
                }
                None => {
                    return Err(WrangleError::BadEditSpec {
                        spec: spec.clone(),
                        message: format!("unknown action '{}'", other),
                    });
                }
            },
        }
    }
    Ok(edits)
}
