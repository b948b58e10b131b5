//! Channel selection for immediate call logging
//!
//! A channel names the aspect of a call to record. A [`LogConfig`] describes the
//! requested channels the way a caller writes them; [`ChannelSet::resolve`] validates
//! the request and reduces it to the two facts the wrapper needs at call time.

use crate::error::{Result, TracerError};
use std::fmt;
use std::str::FromStr;

/// Channel names accepted by [`LogConfig`]
pub const ACCEPTABLE_CHANNELS: [&str; 3] = ["inputs", "outputs", "all"];

/// Aspect of a call to record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Inputs,
    Outputs,
    All,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Inputs => "inputs",
            Channel::Outputs => "outputs",
            Channel::All => "all",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = TracerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inputs" => Ok(Channel::Inputs),
            "outputs" => Ok(Channel::Outputs),
            "all" => Ok(Channel::All),
            other => Err(invalid_channels(vec![other.to_string()])),
        }
    }
}

/// Channel request as written at the decoration site
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogConfig {
    /// No channels given: inputs and outputs
    #[default]
    Default,
    /// A single channel name
    Channel(String),
    /// A list of channel names; an empty list behaves like [`LogConfig::Default`]
    Channels(Vec<String>),
}

impl LogConfig {
    /// Channel names requested, after single-name and empty-list normalization
    pub fn channel_names(&self) -> Vec<String> {
        match self {
            LogConfig::Channel(name) => vec![name.clone()],
            LogConfig::Channels(names) if !names.is_empty() => names.clone(),
            _ => vec![Channel::Inputs.to_string(), Channel::Outputs.to_string()],
        }
    }
}

impl From<&str> for LogConfig {
    fn from(name: &str) -> Self {
        LogConfig::Channel(name.to_string())
    }
}

impl From<String> for LogConfig {
    fn from(name: String) -> Self {
        LogConfig::Channel(name)
    }
}

impl From<Channel> for LogConfig {
    fn from(channel: Channel) -> Self {
        LogConfig::Channel(channel.to_string())
    }
}

impl From<Vec<String>> for LogConfig {
    fn from(names: Vec<String>) -> Self {
        LogConfig::Channels(names)
    }
}

impl From<Vec<&str>> for LogConfig {
    fn from(names: Vec<&str>) -> Self {
        LogConfig::Channels(names.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for LogConfig {
    fn from(names: &[&str]) -> Self {
        LogConfig::Channels(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LogConfig {
    fn from(names: [&str; N]) -> Self {
        LogConfig::Channels(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Validated channel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSet {
    inputs: bool,
    outputs: bool,
}

impl ChannelSet {
    /// Selection recording both inputs and outputs
    pub const BOTH: ChannelSet = ChannelSet {
        inputs: true,
        outputs: true,
    };

    /// Validate a request, failing with every unacceptable name at once
    pub fn resolve(config: &LogConfig) -> Result<Self> {
        let names = config.channel_names();

        let unacceptable: Vec<String> =
            names.iter().filter(|name| name.parse::<Channel>().is_err()).cloned().collect();
        if !unacceptable.is_empty() {
            return Err(invalid_channels(unacceptable));
        }

        let mut set = ChannelSet {
            inputs: false,
            outputs: false,
        };
        for channel in names.iter().filter_map(|name| name.parse::<Channel>().ok()) {
            match channel {
                Channel::Inputs => set.inputs = true,
                Channel::Outputs => set.outputs = true,
                Channel::All => {
                    set.inputs = true;
                    set.outputs = true;
                }
            }
        }
        Ok(set)
    }

    pub fn records_inputs(&self) -> bool {
        self.inputs
    }

    pub fn records_outputs(&self) -> bool {
        self.outputs
    }
}

fn invalid_channels(unacceptable: Vec<String>) -> TracerError {
    TracerError::InvalidConfiguration {
        unacceptable,
        acceptable: &ACCEPTABLE_CHANNELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(config: impl Into<LogConfig>) -> Result<ChannelSet> {
        ChannelSet::resolve(&config.into())
    }

    #[test]
    fn test_channel_round_trips_through_name() {
        for name in ACCEPTABLE_CHANNELS {
            let channel: Channel = name.parse().unwrap();
            assert_eq!(channel.as_str(), name);
        }
    }

    #[test]
    fn test_default_records_both() {
        assert_eq!(resolve(LogConfig::Default).unwrap(), ChannelSet::BOTH);
    }

    #[test]
    fn test_empty_list_equals_inputs_and_outputs() {
        let empty = resolve(Vec::<String>::new()).unwrap();
        let explicit = resolve(vec!["inputs", "outputs"]).unwrap();
        assert_eq!(empty, explicit);
        assert_eq!(empty, ChannelSet::BOTH);
    }

    #[test]
    fn test_single_name_is_a_one_element_list() {
        assert_eq!(LogConfig::from("outputs").channel_names(), vec!["outputs".to_string()]);

        let set = resolve("outputs").unwrap();
        assert!(!set.records_inputs());
        assert!(set.records_outputs());
    }

    #[test]
    fn test_inputs_only() {
        let set = resolve(Channel::Inputs).unwrap();
        assert!(set.records_inputs());
        assert!(!set.records_outputs());
    }

    #[test]
    fn test_all_records_both() {
        assert_eq!(resolve("all").unwrap(), ChannelSet::BOTH);
        assert_eq!(resolve(["inputs", "all"]).unwrap(), ChannelSet::BOTH);
    }

    #[test]
    fn test_unknown_channel_fails_even_with_valid_ones() {
        let err = resolve(["inputs", "verbose", "outputs", "errors"]).unwrap_err();
        match err {
            TracerError::InvalidConfiguration {
                unacceptable,
                acceptable,
            } => {
                assert_eq!(unacceptable, vec!["verbose".to_string(), "errors".to_string()]);
                assert_eq!(acceptable, &ACCEPTABLE_CHANNELS);
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_channel_names_are_case_sensitive() {
        assert!(resolve("Inputs").is_err());
    }

    #[test]
    fn test_slice_conversion() {
        let names: &[&str] = &["inputs"];
        assert_eq!(LogConfig::from(names), LogConfig::Channels(vec!["inputs".to_string()]));
    }
}
