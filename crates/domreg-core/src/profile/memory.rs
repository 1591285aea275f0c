// # Static Profile Source
//
// In-memory implementation of ProfileSource, for embedding the workflow
// in another application and for tests.

use async_trait::async_trait;

use crate::Error;
use crate::traits::profile_source::{ProfileSource, RegistrantProfile};

/// Profile source holding a fixed profile (or none)
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    profile: Option<RegistrantProfile>,
}

impl StaticProfileSource {
    /// Create a source that always returns `profile`
    pub fn new(profile: RegistrantProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    /// Create a source with no profile configured
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn load(&self) -> Result<RegistrantProfile, Error> {
        self.profile
            .clone()
            .ok_or_else(|| Error::profile("No registrant profile configured"))
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
