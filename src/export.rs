use crate::error::ExportError;
use directories::{BaseDirs, UserDirs};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ARCHIVE_NAME: &str = "contacts-manager.zip";

/// Markup, styles and program source, in archive order.
pub const ASSET_NAMES: [&str; 3] = ["contact-card.ui", "style.css", "main.rs"];

pub const CARD_TEMPLATE: &str = include_str!("../resources/contact-card.ui");
pub const STYLESHEET: &str = include_str!("../resources/style.css");
const PROGRAM_SOURCE: &str = include_str!("main.rs");

pub trait AssetSource {
    fn fetch(&self, name: &str) -> Result<String, ExportError>;
}

/// The assets compiled into this binary.
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn fetch(&self, name: &str) -> Result<String, ExportError> {
        let text = match name {
            "contact-card.ui" => CARD_TEMPLATE,
            "style.css" => STYLESHEET,
            "main.rs" => PROGRAM_SOURCE,
            _ => {
                return Err(ExportError::Asset { name: name.to_string(), reason: "unknown asset".into() });
            }
        };
        Ok(text.to_string())
    }
}

/// Fetches every asset, then deflates them into one zip. Nothing is written if any fetch fails.
pub fn build_archive(source: &dyn AssetSource) -> Result<Vec<u8>, ExportError> {
    let assets = ASSET_NAMES
        .iter()
        .map(|name| source.fetch(name).map(|text| (*name, text)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, text) in assets {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(name, options)?;
        writer.write_all(text.as_bytes())?;
    }
    Ok(writer.finish()?.into_inner())
}

pub fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the archive as `dir/contacts-manager.zip`, replacing an older copy.
pub fn export_to(source: &dyn AssetSource, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = build_archive(source)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(ARCHIVE_NAME);
    fs::write(&path, bytes)?;
    log::info!("Exported application assets to {}", path.display());
    Ok(path)
}
