//! Page output - writes the rendered HTML document to a file

use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the page, creating parent directories as needed
pub fn write_page(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    fs::write(path, html).with_context(|| format!("Failed to write map page {}", path.display()))?;

    info!(path = %path.display(), bytes = html.len(), "map_page_written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_page_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/quakes.html");

        write_page(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_page_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quakes.html");

        write_page(&path, "first").unwrap();
        write_page(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
