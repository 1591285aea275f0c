// # File Profile Source
//
// JSON-file implementation of ProfileSource.
//
// ## Behavior
//
// - Read-only: the file is never written
// - Re-read on every `load()`: edits take effect on the next tool call
// - Missing file, missing fields and unreadable/unparsable content are
//   reported as three different errors
//
// ## File Format
//
// ```json
// {
//   "firstName": "Ada",
//   "lastName": "Lovelace",
//   "organization": "Analytical Engines Ltd",
//   "address1": "12 Analytical Row",
//   "address2": "Suite 3",
//   "city": "London",
//   "stateProvince": "Greater London",
//   "postalCode": "W1 1AA",
//   "country": "GB",
//   "phone": "+44.2071234567",
//   "email": "ada@example.com"
// }
// ```

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Error;
use crate::config::ProfileConfig;
use crate::traits::profile_source::{ProfileSource, RegistrantProfile};

/// Profile file as written by the operator, before validation
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFileFormat {
    first_name: Option<String>,
    last_name: Option<String>,
    organization: Option<String>,
    address1: Option<String>,
    address2: Option<String>,
    city: Option<String>,
    state_province: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl ProfileFileFormat {
    /// Check mandatory fields and build the profile
    ///
    /// Blank strings count as missing.
    fn validate(self) -> Result<RegistrantProfile, Error> {
        let mut missing = Vec::new();

        let mut required = |value: Option<String>, name: &'static str| -> String {
            match present(value) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let profile = RegistrantProfile {
            first_name: required(self.first_name, "firstName"),
            last_name: required(self.last_name, "lastName"),
            organization: present(self.organization),
            address1: required(self.address1, "address1"),
            address2: present(self.address2),
            city: required(self.city, "city"),
            state_province: required(self.state_province, "stateProvince"),
            postal_code: required(self.postal_code, "postalCode"),
            country: required(self.country, "country"),
            phone: required(self.phone, "phone"),
            email: required(self.email, "email"),
        };

        if !missing.is_empty() {
            return Err(Error::ProfileIncomplete(missing));
        }

        Ok(profile)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Registrant profile read from a JSON file
///
/// # Example
///
/// ```rust,no_run
/// use domreg_core::profile::FileProfileSource;
/// use domreg_core::traits::ProfileSource;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = FileProfileSource::new("registrant-profile.json");
///     let profile = source.load().await?;
///     println!("{}", profile.display_lines());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    path: PathBuf,
}

impl FileProfileSource {
    /// Create a source reading `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a source from configuration
    pub fn from_config(config: &ProfileConfig) -> Self {
        Self::new(&config.path)
    }

    /// Path this source reads
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSource for FileProfileSource {
    async fn load(&self) -> Result<RegistrantProfile, Error> {
        tracing::debug!("Looking for registrant profile at: {}", self.path.display());

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ProfileNotFound(self.path.clone()));
            }
            Err(e) => {
                return Err(Error::profile(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let raw: ProfileFileFormat = serde_json::from_str(&content).map_err(|e| {
            Error::profile(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        let profile = raw.validate()?;
        tracing::debug!("Registrant profile loaded from {}", self.path.display());
        Ok(profile)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
