//! Named indicator outputs.

use std::collections::HashMap;

use crate::series::Timestamp;
use crate::traits::SeriesElement;

/// One named output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel<T> {
    name: String,
    values: Vec<T>,
}

impl<T> Channel<T> {
    /// Channel name, e.g. `BB_Upper`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channel values, aligned with the input bars.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

/// The channels produced by a single indicator request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorOutput<T> {
    channels: Vec<Channel<T>>,
}

impl<T> IndicatorOutput<T> {
    /// Builds an output from `(name, values)` pairs.
    pub fn new<I>(channels: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<T>)>,
    {
        Self {
            channels: channels
                .into_iter()
                .map(|(name, values)| Channel { name, values })
                .collect(),
        }
    }

    /// Values of the channel called `name`.
    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&[T]> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(Channel::values)
    }

    /// Channels in output order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel<T>> {
        self.channels.iter()
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` if there are no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<T> IntoIterator for IndicatorOutput<T> {
    type Item = Channel<T>;
    type IntoIter = std::vec::IntoIter<Channel<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.into_iter()
    }
}

/// Every channel computed by a pipeline run, keyed by name and aligned with
/// the timestamps of the input series.
///
/// Channels keep the order in which they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorFrame<T> {
    timestamps: Vec<Timestamp>,
    channels: Vec<Channel<T>>,
    index: HashMap<String, usize>,
}

impl<T: SeriesElement> IndicatorFrame<T> {
    /// Creates an empty frame over `timestamps`.
    #[must_use]
    pub fn new(timestamps: Vec<Timestamp>) -> Self {
        Self {
            timestamps,
            channels: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds the channels of `output`.
    ///
    /// Returns the names that were already present; those channels keep their
    /// existing values.
    pub fn insert(&mut self, output: IndicatorOutput<T>) -> Vec<String> {
        let mut duplicates = Vec::new();
        for channel in output {
            if self.index.contains_key(&channel.name) {
                duplicates.push(channel.name);
                continue;
            }
            self.index.insert(channel.name.clone(), self.channels.len());
            self.channels.push(channel);
        }
        duplicates
    }

    /// Timestamps the channels are aligned with.
    #[must_use]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the frame covers no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(Channel::name)
    }

    /// Returns `true` if a channel called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Values of the channel called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.index
            .get(name)
            .map(|&position| self.channels[position].values())
    }

    /// Value of channel `name` at the bar stamped `timestamp`.
    ///
    /// `None` if the channel or the timestamp is unknown. A warm-up position
    /// yields `Some(NaN)`.
    #[must_use]
    pub fn value_at(&self, name: &str, timestamp: Timestamp) -> Option<T> {
        let position = self.timestamps.binary_search(&timestamp).ok()?;
        self.get(name)?.get(position).copied()
    }

    /// Channels in insertion order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel<T>> {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;

    fn output(pairs: &[(&str, Vec<f64>)]) -> IndicatorOutput<f64> {
        IndicatorOutput::new(pairs.iter().map(|(n, v)| (n.to_string(), v.clone())))
    }

    #[test]
    fn test_output_channel_lookup() {
        let out = output(&[("Stoch_K", vec![1.0, 2.0]), ("Stoch_D", vec![f64::NAN, 1.5])]);
        assert_eq!(out.len(), 2);
        assert_eq!(out.channel("Stoch_K"), Some(&[1.0, 2.0][..]));
        assert!(out.channel("Stoch_X").is_none());
        let names: Vec<_> = out.channels().map(Channel::name).collect();
        assert_eq!(names, ["Stoch_K", "Stoch_D"]);
    }

    #[test]
    fn test_frame_keeps_insertion_order() {
        let mut frame = IndicatorFrame::new(vec![10, 20, 30]);
        frame.insert(output(&[("RSI", vec![f64::NAN, 50.0, 60.0])]));
        frame.insert(output(&[("EMA5", vec![1.0, 2.0, 3.0])]));
        assert_eq!(frame.names().collect::<Vec<_>>(), ["RSI", "EMA5"]);
        assert_eq!(frame.channel_count(), 2);
        assert_eq!(frame.len(), 3);
        assert!(frame.contains("EMA5"));
    }

    #[test]
    fn test_frame_value_at() {
        let mut frame = IndicatorFrame::new(vec![10, 20, 30]);
        frame.insert(output(&[("RSI", vec![f64::NAN, 50.0, 60.0])]));

        assert_eq!(frame.value_at("RSI", 20), Some(50.0));
        assert!(frame.value_at("RSI", 10).unwrap().is_nan());
        assert_eq!(frame.value_at("RSI", 25), None);
        assert_eq!(frame.value_at("ADX", 20), None);
    }

    #[test]
    fn test_frame_rejects_duplicate_names() {
        let mut frame = IndicatorFrame::new(vec![1]);
        assert!(frame.insert(output(&[("VWAP", vec![1.0])])).is_empty());
        let dup = frame.insert(output(&[("VWAP", vec![2.0])]));
        assert_eq!(dup, ["VWAP"]);
        assert_eq!(frame.get("VWAP"), Some(&[1.0][..]));
    }
}
