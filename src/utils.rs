use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a newline-delimited list file, trimming each line and dropping empties.
pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    let out = data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    Ok(out)
}
