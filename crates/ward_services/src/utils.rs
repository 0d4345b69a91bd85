use std::path::Path;

use anyhow::bail;
use ward_domain::Error;

/// Every adapter requires an absolute target so the prompt and the retry
/// error always name an unambiguous path.
pub fn assert_absolute_path(path: &Path) -> anyhow::Result<()> {
    if !path.is_absolute() {
        bail!(Error::RelativeTargetPath(path.display().to_string()));
    }
    Ok(())
}
