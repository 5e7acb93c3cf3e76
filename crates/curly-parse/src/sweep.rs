//! Post-parse check that every reachable mandatory tag was defined.

use curly_core::{Error, Result};
use curly_tree::TagRef;

/// Verify the root and every mandatory branch below it. Recursion only
/// descends into children of mandatory tags; an optional, undefined
/// subtree is left alone.
pub(crate) fn check_mandatory_tree(root: &TagRef) -> Result<()> {
    let root = root.borrow();
    if root.is_mandatory() && !root.is_defined() {
        return Err(Error::UndefinedMandatoryTag {
            name: root.name().to_string(),
        });
    }
    for child in root.children() {
        check_tag(child)?;
    }
    Ok(())
}

fn check_tag(tag: &TagRef) -> Result<()> {
    let tag = tag.borrow();
    if tag.is_mandatory() {
        if !tag.is_defined() {
            return Err(Error::UndefinedMandatoryTag {
                name: tag.name().to_string(),
            });
        }
        for child in tag.children() {
            check_tag(child)?;
        }
    }
    Ok(())
}
