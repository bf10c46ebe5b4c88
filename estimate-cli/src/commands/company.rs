//! Company branding: the fields printed on the estimate sheet header,
//! plus logo and seal images embedded as data URIs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use estimate_core::store::EstimateStore;

/// Largest accepted image file, matching the original upload limit.
const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Field updates for `company set`; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub postal: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub logo: Option<PathBuf>,
    pub stamp: Option<PathBuf>,
    pub remove_logo: bool,
    pub remove_stamp: bool,
}

/// `company show`: print the stored branding fields.
pub fn show(store: &dyn EstimateStore) -> Result<()> {
    let info = store.load_company_info()?;

    println!("name:    {}", or_unset(&info.name));
    println!("postal:  {}", or_unset(&info.postal));
    println!("address: {}", or_unset(&info.address));
    println!("phone:   {}", or_unset(&info.phone));
    println!("fax:     {}", or_unset(&info.fax));
    println!("logo:    {}", set_or_unset(&info.logo));
    println!("stamp:   {}", set_or_unset(&info.stamp));
    Ok(())
}

/// `company set`: apply field updates and persist.
pub fn set(
    store: &dyn EstimateStore,
    update: CompanyUpdate,
) -> Result<()> {
    let mut company = store.load_company_info()?;

    if let Some(name) = update.name {
        company.name = name.trim().to_string();
    }
    if let Some(postal) = update.postal {
        company.postal = postal.trim().to_string();
    }
    if let Some(address) = update.address {
        company.address = address.trim().to_string();
    }
    if let Some(phone) = update.phone {
        company.phone = phone.trim().to_string();
    }
    if let Some(fax) = update.fax {
        company.fax = fax.trim().to_string();
    }

    if update.remove_logo {
        company.logo = String::new();
    } else if let Some(path) = update.logo {
        company.logo = load_image_data_uri(&path)?;
    }
    if update.remove_stamp {
        company.stamp = String::new();
    } else if let Some(path) = update.stamp {
        company.stamp = load_image_data_uri(&path)?;
    }

    store.save_company_info(&company)?;
    info!("company information saved");
    Ok(())
}

/// Reads an image file into a `data:` URI, enforcing the original's
/// limits: at most 5 MB, PNG/JPEG/GIF only.
fn load_image_data_uri(path: &Path) -> Result<String> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => bail!(
            "unsupported image type '{}' (PNG, JPG or GIF required)",
            path.display()
        ),
    };

    let meta = fs::metadata(path)
        .with_context(|| format!("cannot read image '{}'", path.display()))?;
    if meta.len() > MAX_IMAGE_BYTES {
        bail!("image '{}' exceeds the 5 MB limit", path.display());
    }

    let bytes =
        fs::read(path).with_context(|| format!("cannot read image '{}'", path.display()))?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}

fn set_or_unset(value: &str) -> &'static str {
    if value.is_empty() { "(unset)" } else { "(set)" }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn image_becomes_data_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, b"\x89PNG fake").unwrap();

        let uri = load_image_data_uri(&path).unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.bmp");
        fs::write(&path, b"bmp").unwrap();

        assert!(load_image_data_uri(&path).is_err());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.png");
        fs::write(&path, vec![0u8; (MAX_IMAGE_BYTES + 1) as usize]).unwrap();

        let err = load_image_data_uri(&path).unwrap_err();
        assert!(err.to_string().contains("5 MB"));
    }
}
