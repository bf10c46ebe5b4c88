//! Company branding persisted with the application settings.

use serde::{Deserialize, Deserializer, Serialize};

/// Company information printed on the estimate sheet header.
///
/// All fields are plain strings with the empty string meaning "unset";
/// `logo` and `stamp` hold image data URIs. Blobs written by older
/// versions stored explicit nulls for unset fields, so every field
/// accepts both a missing key and a `null`, loading as empty rather
/// than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    /// Postal code, printed with a 〒 prefix.
    #[serde(deserialize_with = "null_as_empty")]
    pub postal: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub fax: String,
    /// Logo image as a data URI; empty when none is set.
    #[serde(deserialize_with = "null_as_empty")]
    pub logo: String,
    /// Seal (印影) image as a data URI; empty when none is set.
    #[serde(deserialize_with = "null_as_empty")]
    pub stamp: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CompanyInfo {
    /// Whether the sheet should print a company block at all.
    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let info: CompanyInfo = serde_json::from_str(r#"{"name":"サンプル建設"}"#).unwrap();

        assert_eq!(info.name, "サンプル建設");
        assert_eq!(info.postal, "");
        assert_eq!(info.logo, "");
        assert!(info.has_identity());
    }

    #[test]
    fn explicit_nulls_deserialize_as_empty() {
        let info: CompanyInfo = serde_json::from_str(
            r#"{"name":"サンプル建設","postal":null,"address":null,"logo":null}"#,
        )
        .unwrap();

        assert_eq!(info.name, "サンプル建設");
        assert_eq!(info.postal, "");
        assert_eq!(info.address, "");
        assert_eq!(info.logo, "");
    }

    #[test]
    fn default_has_no_identity() {
        assert!(!CompanyInfo::default().has_identity());
    }
}
