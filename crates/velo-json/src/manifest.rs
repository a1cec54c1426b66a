//! Typed records decoded from updater output.
//!
//! The updater prints an update manifest (`UpdateInfo` wrapping a
//! `VelopackAsset`) when checking for updates, and one progress event per line
//! while downloading. Keys are matched case-insensitively and unknown keys are
//! ignored. A known key holding the wrong kind of value is an error.
//!
//! Records serialize back to the updater's PascalCase key names, so
//! re-decoding serialized output yields the same record.

use serde::Serialize;

use crate::error::Result;
use crate::node::Node;
use crate::parser::parse;

/// Whether an asset is a full package or a delta against the previous release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VelopackAssetType {
    #[default]
    Unknown,
    Full,
    Delta,
}

impl VelopackAssetType {
    /// `"full"` in any case is `Full`; every other string is `Delta`.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("full") {
            VelopackAssetType::Full
        } else {
            VelopackAssetType::Delta
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, VelopackAssetType::Unknown)
    }
}

/// A release package, either on disk or in a remote feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VelopackAsset {
    #[serde(rename = "Id")]
    pub package_id: String,
    pub version: String,
    #[serde(rename = "Type", skip_serializing_if = "VelopackAssetType::is_unknown")]
    pub asset_type: VelopackAssetType,
    pub file_name: String,
    #[serde(rename = "SHA1")]
    pub sha1: String,
    /// Package size in bytes.
    pub size: u64,
    #[serde(rename = "Markdown")]
    pub notes_markdown: String,
    #[serde(rename = "Html")]
    pub notes_html: String,
}

impl VelopackAsset {
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_node(&parse(json)?)
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut asset = VelopackAsset::default();
        if let Some(v) = node.get_ignore_case("id")? {
            asset.package_id = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("version")? {
            asset.version = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("type")? {
            asset.asset_type = VelopackAssetType::from_name(v.as_str()?);
        }
        if let Some(v) = node.get_ignore_case("filename")? {
            asset.file_name = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("sha1")? {
            asset.sha1 = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("size")? {
            // saturating: negative sizes become 0
            asset.size = v.as_number()? as u64;
        }
        if let Some(v) = node.get_ignore_case("markdown")? {
            asset.notes_markdown = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("html")? {
            asset.notes_html = v.as_str()?.to_string();
        }
        Ok(asset)
    }
}

/// Result of an update check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateInfo {
    /// The release being updated to. `None` if the manifest did not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_full_release: Option<VelopackAsset>,
    /// True for a downgrade or a lateral move to the same version on
    /// another channel. Only full updates are allowed in that case.
    pub is_downgrade: bool,
}

impl UpdateInfo {
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_node(&parse(json)?)
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut info = UpdateInfo::default();
        if let Some(v) = node.get_ignore_case("targetfullrelease")? {
            info.target_full_release = Some(VelopackAsset::from_node(v)?);
        }
        if let Some(v) = node.get_ignore_case("isdowngrade")? {
            info.is_downgrade = v.as_bool()?;
        }
        Ok(info)
    }
}

/// One line of download progress reported by the updater.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgressEvent {
    pub file: String,
    pub complete: bool,
    /// Percentage, truncated toward zero.
    pub progress: i32,
    /// Empty unless the download failed.
    pub error: String,
}

impl ProgressEvent {
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_node(&parse(json)?)
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut event = ProgressEvent::default();
        if let Some(v) = node.get_ignore_case("file")? {
            event.file = v.as_str()?.to_string();
        }
        if let Some(v) = node.get_ignore_case("complete")? {
            event.complete = v.as_bool()?;
        }
        if let Some(v) = node.get_ignore_case("progress")? {
            event.progress = v.as_number()?.trunc() as i32;
        }
        if let Some(v) = node.get_ignore_case("error")? {
            event.error = v.as_str()?.to_string();
        }
        Ok(event)
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
