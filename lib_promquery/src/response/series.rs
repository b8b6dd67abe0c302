use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reads an explicit JSON `null` as `T::default()`, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// # Metric Labels
///
/// The label subset carried per series. Any other labels in the payload are
/// ignored; missing ones decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricLabels {
    /// Metric name, from the `__name__` label.
    #[serde(rename = "__name__", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// The `job` label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
    /// The `instance` label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instance: String,
}

impl MetricLabels {
    /// `true` when no label is set, as for scalar and string results.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.job.is_empty() && self.instance.is_empty()
    }
}

/// One series of a `matrix` result: `{"metric": {..}, "values": [[t, "v"], ..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSeries {
    /// Series labels; `null` or missing decodes as empty labels.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metric: MetricLabels,
    /// Samples, kept opaque.
    pub values: Vec<Value>,
}

/// One sample of a `vector` result: `{"metric": {..}, "value": [t, "v"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSample {
    /// Series labels; `null` or missing decodes as empty labels.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metric: MetricLabels,
    /// The `[timestamp, value]` pair, kept opaque.
    pub value: Vec<Value>,
}

/// # Response Data Set
///
/// The uniform record produced for every result type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseDataSet {
    /// Series labels; empty for scalar, string and unknown result types.
    pub metric: MetricLabels,
    /// Opaque sample values.
    pub data: Vec<Value>,
}

/// A decoded `[timestamp, "value"]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Unix time in seconds, possibly fractional.
    pub timestamp: f64,
    /// Sample value; `NaN` and the infinities are preserved.
    pub value: f64,
}

impl Sample {
    /// Reads a `[<number>, "<float>"]` pair, returning `None` for any other shape.
    pub fn from_pair(entry: &Value) -> Option<Self> {
        let pair = entry.as_array()?;
        if pair.len() != 2 {
            return None;
        }
        let timestamp = pair[0].as_f64()?;
        let value = parse_sample_value(pair[1].as_str()?)?;
        Some(Self { timestamp, value })
    }
}

impl ResponseDataSet {
    /// Interprets `data` as samples, skipping entries that are not
    /// `[timestamp, "value"]` pairs.
    pub fn samples(&self) -> Vec<Sample> {
        self.data.iter().filter_map(Sample::from_pair).collect()
    }
}

fn parse_sample_value(raw: &str) -> Option<f64> {
    match raw {
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse::<f64>().ok(),
    }
}
