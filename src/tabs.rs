use crate::GlyphsmithError;
use std::io::Write;
use std::path::PathBuf;

/// Somewhere to open a new editing tab pre-filled with text
pub trait TabSink {
    fn new_tab(&mut self, text: &str) -> Result<(), GlyphsmithError>;
}

impl TabSink for Vec<String> {
    fn new_tab(&mut self, text: &str) -> Result<(), GlyphsmithError> {
        self.push(text.to_string());
        Ok(())
    }
}

/// Writes each tab to standard output, separated by a form feed
#[derive(Debug, Default)]
pub struct StdoutTabs {
    written: usize,
}

impl StdoutTabs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabSink for StdoutTabs {
    fn new_tab(&mut self, text: &str) -> Result<(), GlyphsmithError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if self.written > 0 {
            writeln!(handle, "\x0c")?;
        }
        writeln!(handle, "{}", text)?;
        self.written += 1;
        Ok(())
    }
}

/// Writes each tab to its own numbered text file in a directory
#[derive(Debug)]
pub struct DirectoryTabs {
    directory: PathBuf,
    prefix: String,
    written: usize,
}

impl DirectoryTabs {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        DirectoryTabs {
            directory: directory.into(),
            prefix: prefix.into(),
            written: 0,
        }
    }

    /// The files written so far, in order
    pub fn paths(&self) -> Vec<PathBuf> {
        (1..=self.written).map(|n| self.path_for(n)).collect()
    }

    fn path_for(&self, n: usize) -> PathBuf {
        self.directory.join(format!("{}-{:02}.txt", self.prefix, n))
    }
}

impl TabSink for DirectoryTabs {
    fn new_tab(&mut self, text: &str) -> Result<(), GlyphsmithError> {
        std::fs::create_dir_all(&self.directory).map_err(|source| GlyphsmithError::FileIO {
            path: self.directory.clone(),
            source,
        })?;
        let path = self.path_for(self.written + 1);
        log::debug!("Writing tab to {}", path.display());
        std::fs::write(&path, text).map_err(|source| GlyphsmithError::FileIO { path, source })?;
        self.written += 1;
        Ok(())
    }
}

/// Hand every tab to the sink, stopping at the first failure
pub fn open_tabs<S: TabSink + ?Sized>(
    sink: &mut S,
    tabs: &[String],
) -> Result<(), GlyphsmithError> {
    for tab in tabs {
        sink.new_tab(tab)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directory_tabs() {
        let dir = std::env::temp_dir().join(format!("glyphsmith-tabs-{}", std::process::id()));
        let mut sink = DirectoryTabs::new(&dir, "kern");
        open_tabs(&mut sink, &["one".to_string(), "two".to_string()]).unwrap();
        let paths = sink.paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "two");
        std::fs::remove_dir_all(dir).unwrap();
    }
}
