use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use image::Luma;
use qrcode::QrCode;

use crate::config::Configuration;

/// Render the upload URL as a QR code PNG for the no-photos screen.
/// Failure here is non-fatal; the caller logs and carries on without it.
pub fn generate(cfg: &Configuration) -> Result<PathBuf> {
    let code = QrCode::new(cfg.upload_url.as_bytes()).context("failed to generate QR code")?;
    let image = code.render::<Luma<u8>>().min_dimensions(300, 300).build();
    let path = qr_path(cfg);
    fs::create_dir_all(&cfg.var_dir)
        .with_context(|| format!("failed to create var dir at {}", cfg.var_dir.display()))?;
    image
        .save(&path)
        .with_context(|| format!("failed to write QR code to {}", path.display()))?;
    Ok(path)
}

pub fn qr_path(cfg: &Configuration) -> PathBuf {
    cfg.var_dir.join("upload-qr.png")
}
