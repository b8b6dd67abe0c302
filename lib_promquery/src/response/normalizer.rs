//! # Response Normalizer
//!
//! Collapses every result type into a `Vec<ResponseDataSet>`:
//!
//! | result type          | record                                  |
//! |----------------------|-----------------------------------------|
//! | `matrix`             | `{metric, data: values}`                |
//! | `vector`             | `{metric, data: [value]}`               |
//! | anything else        | `{metric: empty, data: [entry]}` each   |
//!
//! Normalization never fails. Output order follows `data.result`.

use serde_json::Value;

use super::envelope::{ResponseData, TypedResult};
use super::series::{MetricLabels, ResponseDataSet};

/// Normalizes a decoded `data` block into uniform records.
pub fn normalize(data: ResponseData) -> Vec<ResponseDataSet> {
    match data.into_typed() {
        TypedResult::Matrix(series) => series
            .into_iter()
            .map(|s| ResponseDataSet {
                metric: s.metric,
                data: s.values,
            })
            .collect(),
        TypedResult::Vector(samples) => samples
            .into_iter()
            .map(|s| ResponseDataSet {
                metric: s.metric,
                data: vec![Value::Array(s.value)],
            })
            .collect(),
        TypedResult::Scalar(entries) | TypedResult::String(entries) => passthrough(entries),
        TypedResult::Other { result_type, entries } => {
            tracing::trace!(%result_type, count = entries.len(), "passing through unrecognised result type");
            passthrough(entries)
        }
    }
}

fn passthrough(entries: Vec<Value>) -> Vec<ResponseDataSet> {
    entries
        .into_iter()
        .map(|entry| ResponseDataSet {
            metric: MetricLabels::default(),
            data: vec![entry],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(result_type: &str, result: Vec<Value>) -> ResponseData {
        ResponseData {
            result_type: result_type.to_string(),
            result,
        }
    }

    #[test]
    fn test_matrix_entry_keeps_labels_and_values() {
        let out = normalize(data(
            "matrix",
            vec![json!({
                "metric": {"__name__": "up", "job": "j", "instance": "i"},
                "values": [[1, "0"], [2, "1"]]
            })],
        ));
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].metric,
            MetricLabels {
                name: "up".into(),
                job: "j".into(),
                instance: "i".into(),
            }
        );
        assert_eq!(out[0].data, vec![json!([1, "0"]), json!([2, "1"])]);
    }

    #[test]
    fn test_vector_value_is_wrapped() {
        let out = normalize(data(
            "vector",
            vec![json!({"metric": {"__name__": "up"}, "value": [1, "1"]})],
        ));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].metric.name, "up");
        assert_eq!(out[0].data, vec![json!([1, "1"])]);
    }

    #[test]
    fn test_unknown_type_wraps_each_entry_in_order() {
        let a = json!({"anything": true});
        let b = json!([1, 2, 3]);
        let out = normalize(data("mystery", vec![a.clone(), b.clone()]));
        assert_eq!(
            out,
            vec![
                ResponseDataSet { metric: MetricLabels::default(), data: vec![a] },
                ResponseDataSet { metric: MetricLabels::default(), data: vec![b] },
            ]
        );
    }

    #[test]
    fn test_scalar_and_string_pass_through() {
        let out = normalize(data("scalar", vec![json!(1435781451.781), json!("1")]));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.metric.is_empty()));
        assert_eq!(out[1].data, vec![json!("1")]);

        let out = normalize(data("string", vec![json!(1), json!("hello")]));
        assert_eq!(out[1].data, vec![json!("hello")]);
    }

    #[test]
    fn test_malformed_entries_are_skipped_not_fatal() {
        let out = normalize(data(
            "vector",
            vec![
                json!({"metric": {"job": "a"}, "value": [1, "1"]}),
                json!({"metric": {"job": "b"}}),
                json!({"metric": {"job": "c"}, "value": "1"}),
                json!({"metric": {"job": "d"}, "value": [2, "2"]}),
            ],
        ));
        let jobs: Vec<&str> = out.iter().map(|r| r.metric.job.as_str()).collect();
        assert_eq!(jobs, vec!["a", "d"]);
    }

    #[test]
    fn test_empty_result_yields_empty_output() {
        assert!(normalize(data("matrix", vec![])).is_empty());
        assert!(normalize(ResponseData::default()).is_empty());
    }
}
