use serde::{Deserialize, Serialize};

use crate::error::MergeResult;
use crate::merger::merge_config;

/// Everything needed for one merge.
///
/// Requests are built right before use and consumed once. A serialized
/// request without a `separators` field deserializes to an empty list and
/// fails validation when merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// The previously generated configuration text.
    #[serde(default)]
    pub current_config: String,
    /// The user-supplied override text.
    #[serde(default)]
    pub requested_config: String,
    /// Marker that starts the generated block.
    pub block_divider: String,
    /// Key/value separators in priority order.
    #[serde(default)]
    pub separators: Vec<String>,
}

impl MergeRequest {
    /// Create a request from its four inputs.
    pub fn new<I, S>(
        current_config: impl Into<String>,
        requested_config: impl Into<String>,
        block_divider: impl Into<String>,
        separators: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            current_config: current_config.into(),
            requested_config: requested_config.into(),
            block_divider: block_divider.into(),
            separators: separators.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the merge.
    pub fn merge(&self) -> MergeResult<String> {
        merge_config(
            &self.current_config,
            &self.requested_config,
            &self.block_divider,
            &self.separators,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;

    #[test]
    fn request_merges() {
        let request = MergeRequest::new("a=1", "b = 2", "#---", ["="]);
        assert_eq!(request.merge().unwrap(), "a=1\n\n#---\nb=2\n");
    }

    #[test]
    fn default_request_is_invalid() {
        assert_eq!(
            MergeRequest::default().merge(),
            Err(MergeError::InvalidBlockDivider)
        );
    }

    #[test]
    fn deserialize_without_separators() {
        let request: MergeRequest = serde_json::from_str(
            r##"{"current_config": "a=1", "requested_config": "b=2", "block_divider": "#"}"##,
        )
        .unwrap();
        assert!(request.separators.is_empty());
        assert_eq!(request.merge(), Err(MergeError::InvalidSeparators));
    }

    #[test]
    fn json_roundtrip() {
        let request = MergeRequest::new("", "k v", "#", [" ", "\t"]);
        let json = serde_json::to_string(&request).unwrap();
        let back: MergeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
