//! Kubeconfig serialization.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::kubeconfig::schema::Config;

/// Serialize a document to YAML text.
pub fn to_yaml(config: &Config) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(config)
}

/// Write a document to `path`, creating missing parent directories.
///
/// Credentials live in these files, so on Unix a newly created file is
/// readable by its owner only.
pub fn write_to_file(config: &Config, path: &Path) -> io::Result<()> {
    let content = to_yaml(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()
}
