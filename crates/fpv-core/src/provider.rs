//! Built-in policies for operating systems and cloud-storage providers.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::PathError;
use crate::Policy;
use crate::PolicyConfig;
use crate::Result;

const WINDOWS_DEVICES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const WINDOWS_INVALID: &str = "<>:\"|?*";

/// A target environment with a built-in rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Windows file systems.
    Windows,
    /// macOS file systems.
    #[serde(rename = "macos")]
    MacOs,
    /// Linux file systems.
    Linux,
    /// Dropbox.
    Dropbox,
    /// Box.
    Box,
    /// Egnyte.
    Egnyte,
    /// Microsoft OneDrive.
    OneDrive,
    /// Microsoft SharePoint.
    SharePoint,
    /// Citrix ShareFile.
    ShareFile,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn with_devices(extra: &[&str]) -> Vec<String> {
    let mut names = strings(extra);
    names.extend(strings(WINDOWS_DEVICES));
    names
}

impl Provider {
    /// Every built-in provider.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Windows,
            Self::MacOs,
            Self::Linux,
            Self::Dropbox,
            Self::Box,
            Self::Egnyte,
            Self::OneDrive,
            Self::SharePoint,
            Self::ShareFile,
        ]
    }

    /// Lowercase identifier used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Dropbox => "dropbox",
            Self::Box => "box",
            Self::Egnyte => "egnyte",
            Self::OneDrive => "onedrive",
            Self::SharePoint => "sharepoint",
            Self::ShareFile => "sharefile",
        }
    }

    /// Rule table of this provider.
    #[must_use]
    pub fn config(self) -> PolicyConfig {
        let base = PolicyConfig {
            name: self.as_str().to_string(),
            ..PolicyConfig::default()
        };

        match self {
            Self::Windows => PolicyConfig {
                separator: "\\".to_string(),
                relative: false,
                max_length: Some(255),
                invalid_characters: WINDOWS_INVALID.to_string(),
                restricted_names: strings(WINDOWS_DEVICES),
                root_patterns: strings(&[r"^[A-Za-z]:$"]),
                trailing_periods: true,
                whitespace: true,
                ..base
            },
            Self::MacOs => PolicyConfig {
                restricted_names: strings(&[".DS_Store", "Icon\r", "Thumbs.db"]),
                leading_periods: true,
                whitespace: true,
                ..base
            },
            Self::Linux => PolicyConfig {
                invalid_characters: "\0".to_string(),
                whitespace: true,
                ..base
            },
            Self::Dropbox => PolicyConfig {
                max_length: Some(260),
                invalid_characters: WINDOWS_INVALID.to_string(),
                restricted_names: with_devices(&[".lock", "COM0", "LPT0"]),
                wide_characters: true,
                whitespace: true,
                ..base
            },
            Self::Box => PolicyConfig {
                max_length: Some(255),
                invalid_characters: WINDOWS_INVALID.to_string(),
                restricted_names: strings(&[
                    "outlook.pst",
                    "quickbooks.qbb",
                    "google_docs.gdoc",
                    "google_sheets.gsheet",
                    "google_slides.gslides",
                    "mac_package.pkg",
                ]),
                trailing_periods: true,
                whitespace: true,
                ..base
            },
            Self::Egnyte => PolicyConfig {
                max_length: Some(5000),
                max_component_length: Some(245),
                invalid_characters: "\\/\":<>|*?".to_string(),
                restricted_names: strings(&[
                    ".ds_store",
                    ".metadata_never_index",
                    ".thumbs.db",
                    "powerpoint temp",
                    "desktop.ini",
                ]),
                restricted_prefixes: strings(&["._", ".~", "word work file", "_egn_.", ".smbdelete"]),
                restricted_suffixes: strings(&[
                    "~",
                    "._attribs_",
                    "._rights_",
                    "._egn_",
                    "_egnmeta",
                    ".tmp",
                    "-spotlight",
                    ".ac$",
                    ".sv$",
                    ".~vsdx",
                ]),
                restricted_patterns: strings(&[
                    r"^atmp\d{4}$",
                    r".*\.sas\.b\d{2}$",
                    r"^aa[a-zA-Z]\d{5}$",
                    r"\.\$\$\$$",
                    r"^~.*(\.idlk|\.xlsx|\.xlsx \(deleted\)|\.pptx|\.pptx \(deleted\))$",
                    r"^~\$.*(\.docx?|\.docx \(deleted\)|\.rtf|\.pptx?|\.pptx \(deleted\)|\.xlsm|\.xlsm \(deleted\)|\.sldlfp|\.slddrw|\.sldprt|\.sldasm)$",
                ]),
                control_characters: true,
                wide_characters: true,
                whitespace: true,
                ..base
            },
            Self::OneDrive => PolicyConfig {
                max_length: Some(400),
                invalid_characters: "#%&*:{}<>?|\"".to_string(),
                restricted_names: with_devices(&[".lock", "_vti_", "desktop.ini"]),
                restricted_prefixes: strings(&["~$"]),
                root_patterns: strings(&[r"^root$"]),
                whitespace: true,
                ..base
            },
            Self::SharePoint => PolicyConfig {
                max_length: Some(400),
                invalid_characters: format!("{WINDOWS_INVALID}#"),
                restricted_names: with_devices(&[".lock", "_vti_", "desktop.ini"]),
                restricted_prefixes: strings(&["~$"]),
                restricted_root: strings(&["forms"]),
                trailing_periods: true,
                whitespace: true,
                ..base
            },
            Self::ShareFile => PolicyConfig {
                max_length: Some(255),
                invalid_characters: ":;*?\"<>~".to_string(),
                trailing_periods: true,
                whitespace: true,
                ..base
            },
        }
    }

    /// Compiled policy of this provider.
    pub fn policy(self) -> Result<Policy> {
        Policy::from_config(self.config())
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        let wanted = match wanted.as_str() {
            "mac" | "osx" => "macos",
            other => other,
        };
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| PathError::UnknownProvider {
                name: s.to_string(),
            })
    }
}
